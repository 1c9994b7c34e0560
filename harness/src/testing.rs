use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};

use tokio::time::Instant;

use crate::{
    client::{WriteClient, WriteFuture, WriteOptions},
    error::WriteError,
};

/// Fails every `n`th call, counted across all callers.
#[derive(Debug, Default)]
pub struct FlakyClient {
    calls: AtomicU64,
    fail_every: Option<u64>,
}

impl FlakyClient {
    pub fn never_failing() -> Self {
        Self::default()
    }

    pub fn failing_every(n: u64) -> Self {
        Self {
            calls: AtomicU64::new(0),
            fail_every: Some(n),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WriteClient for FlakyClient {
    fn write<'a>(
        &'a self,
        _key: &'a str,
        _value: &'a [u8],
        _options: &'a WriteOptions,
        _deadline: Instant,
    ) -> WriteFuture<'a> {
        Box::pin(async move {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::task::yield_now().await;
            match self.fail_every {
                Some(n) if call % n == 0 => Err(WriteError::Remote(format!("call {} rejected", call))),
                _ => Ok(()),
            }
        })
    }
}

#[derive(Debug, Default)]
pub struct RecordingClient {
    writes: Mutex<Vec<(String, Vec<u8>, WriteOptions)>>,
}

impl RecordingClient {
    pub fn writes(&self) -> Vec<(String, Vec<u8>, WriteOptions)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.writes().into_iter().map(|(key, _, _)| key).collect()
    }
}

impl WriteClient for RecordingClient {
    fn write<'a>(
        &'a self,
        key: &'a str,
        value: &'a [u8],
        options: &'a WriteOptions,
        _deadline: Instant,
    ) -> WriteFuture<'a> {
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_vec(), options.clone()));
        Box::pin(async { Ok(()) })
    }
}

/// Never completes a write.
#[derive(Debug)]
pub struct StallingClient;

impl WriteClient for StallingClient {
    fn write<'a>(
        &'a self,
        _key: &'a str,
        _value: &'a [u8],
        _options: &'a WriteOptions,
        _deadline: Instant,
    ) -> WriteFuture<'a> {
        Box::pin(std::future::pending())
    }
}
