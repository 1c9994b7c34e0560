use std::time::Duration;

use crate::client::WriteOptions;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub workers: usize,
    pub attempts_per_worker: usize,
    pub key_prefix: String,
    pub key_suffix_length: usize,
    pub value: Vec<u8>,
    pub options: WriteOptions,
    /// Upper bound on one worker's whole run, shared by all of its attempts.
    pub run_deadline: Duration,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: 20,
            attempts_per_worker: 20_000,
            key_prefix: "ds.yo".to_string(),
            key_suffix_length: 8,
            value: b"some value".to_vec(),
            options: WriteOptions::default(),
            run_deadline: Duration::from_secs(10 * 60),
            seed: 0,
        }
    }
}

impl RunConfig {
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn attempts_per_worker(mut self, attempts: usize) -> Self {
        self.attempts_per_worker = attempts;
        self
    }

    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn key_suffix_length(mut self, length: usize) -> Self {
        self.key_suffix_length = length;
        self
    }

    pub fn value(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.options.ttl = ttl;
        self
    }

    pub fn preserve_history(mut self, preserve: bool) -> Self {
        self.options.preserve_history = preserve;
        self
    }

    pub fn run_deadline(mut self, deadline: Duration) -> Self {
        self.run_deadline = deadline;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn max_writes(&self) -> u64 {
        self.workers as u64 * self.attempts_per_worker as u64
    }

    /// The part of a request key before the random suffix. Worker and attempt
    /// indices make it unique on its own.
    pub fn key_prefix_for(&self, worker: usize, attempt: usize) -> String {
        format!("{}.{}.{}.", self.key_prefix, worker, attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.workers, 20);
        assert_eq!(config.attempts_per_worker, 20_000);
        assert_eq!(config.key_suffix_length, 8);
        assert_eq!(config.options.ttl, Duration::from_secs(200));
        assert_eq!(config.run_deadline, Duration::from_secs(600));
        assert_eq!(config.max_writes(), 400_000);
    }

    #[test]
    fn test_builder_setters() {
        let config = RunConfig::default()
            .workers(3)
            .attempts_per_worker(5)
            .key_prefix("bench")
            .ttl(Duration::from_secs(1))
            .preserve_history(true);
        assert_eq!(config.max_writes(), 15);
        assert_eq!(config.key_prefix_for(2, 4), "bench.2.4.");
        assert!(config.options.preserve_history);
    }
}
