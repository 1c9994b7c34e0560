pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod memory;
pub mod report;
pub mod worker;

#[cfg(test)]
mod testing;

pub use client::{WriteClient, WriteFuture, WriteOptions};
pub use config::RunConfig;
pub use dispatcher::Dispatcher;
pub use error::{BoxError, HarnessError, WriteError};
pub use memory::MemoryStore;
pub use report::AggregateReport;
pub use worker::WorkerResult;
