use std::{fmt, time::Duration};

use crate::worker::WorkerResult;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateReport {
    /// Successful writes across every worker that reported.
    pub total: u64,
    pub attempts: u64,
    pub workers: usize,
    pub elapsed: Duration,
}

impl AggregateReport {
    pub fn record(&mut self, result: &WorkerResult) {
        self.total += result.successes;
        self.attempts += result.attempts;
        self.workers += 1;
    }

    pub fn failures(&self) -> u64 {
        self.attempts - self.total
    }

    /// Successful writes per second.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.total as f64 / secs
    }
}

impl fmt::Display for AggregateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total keys set: {}", self.total)?;
        write!(f, "Elapsed time: {:?}", self.elapsed)
    }
}
