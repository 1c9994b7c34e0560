use std::{future::Future, pin::Pin, time::Duration};

use tokio::time::Instant;

use crate::error::WriteError;

pub type WriteFuture<'a> = Pin<Box<dyn Future<Output = Result<(), WriteError>> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    pub ttl: Duration,
    pub preserve_history: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(200),
            preserve_history: false,
        }
    }
}

/// A handle to the target service. One instance is shared by every worker,
/// so implementations must tolerate concurrent calls through `&self`.
pub trait WriteClient: Send + Sync {
    /// `deadline` is the caller's upper bound; implementations may forward it
    /// to the transport.
    fn write<'a>(
        &'a self,
        key: &'a str,
        value: &'a [u8],
        options: &'a WriteOptions,
        deadline: Instant,
    ) -> WriteFuture<'a>;
}
