use std::time::Duration;

use key_gen::KeyGenerator;
use tokio::time::{Instant, timeout_at};

use crate::{
    client::{WriteClient, WriteOptions},
    config::RunConfig,
    error::WriteError,
};

// Used when `now + run_deadline` does not fit in an Instant.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// What a single worker hands back to the dispatcher once its loop is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerResult {
    pub worker: usize,
    pub attempts: u64,
    pub successes: u64,
}

impl WorkerResult {
    pub fn failures(&self) -> u64 {
        self.attempts - self.successes
    }
}

/// Issues `config.attempts_per_worker` sequential writes and counts the ones
/// that succeeded. A failed write is logged and skipped; it never ends the loop.
///
/// All attempts share one deadline, started when the worker starts. After it
/// passes, the remaining attempts fail with [`WriteError::DeadlineExceeded`]
/// without reaching the client.
pub async fn run<C>(client: &C, worker: usize, config: &RunConfig) -> WorkerResult
where
    C: WriteClient + ?Sized,
{
    let started = Instant::now();
    let deadline = started
        .checked_add(config.run_deadline)
        .unwrap_or_else(|| started + FAR_FUTURE);
    let mut keys = KeyGenerator::for_worker(config.seed, worker);
    let mut successes = 0;

    for attempt in 0..config.attempts_per_worker {
        let prefix = config.key_prefix_for(worker, attempt);
        let key = keys.generate(&prefix, config.key_suffix_length);

        match write_before(client, &key, &config.value, &config.options, deadline).await {
            Ok(()) => successes += 1,
            Err(e) => log::warn!("Error setting key {}: {}", key, e),
        }
    }

    let result = WorkerResult {
        worker,
        attempts: config.attempts_per_worker as u64,
        successes,
    };
    log::debug!(
        "worker {} finished: {}/{} writes in {:?}",
        worker,
        result.successes,
        result.attempts,
        started.elapsed()
    );
    result
}

async fn write_before<C>(
    client: &C,
    key: &str,
    value: &[u8],
    options: &WriteOptions,
    deadline: Instant,
) -> Result<(), WriteError>
where
    C: WriteClient + ?Sized,
{
    if Instant::now() >= deadline {
        return Err(WriteError::DeadlineExceeded);
    }
    match timeout_at(deadline, client.write(key, value, options, deadline)).await {
        Ok(result) => result,
        Err(_) => Err(WriteError::DeadlineExceeded),
    }
}
