use std::sync::Arc;

use harness::{Dispatcher, MemoryStore, RunConfig};

// Runs the default load against an in-process store, which measures the
// harness itself without any network in between.
#[tokio::main]
async fn main() {
    env_logger::init();
    let store = Arc::new(MemoryStore::new());
    let dispatcher = Dispatcher::new(RunConfig::default().seed(rand::random()));

    let report = dispatcher.dispatch(Arc::clone(&store)).await;

    println!("{}", report);
    log::info!(
        "{} keys stored, {:.0} writes/s",
        store.len(),
        report.throughput()
    );
}
