use std::{future::Future, sync::Arc, time::Instant};

use tokio::sync::mpsc;

use crate::{
    client::WriteClient,
    config::RunConfig,
    error::{BoxError, HarnessError},
    report::AggregateReport,
    worker::{self, WorkerResult},
};

#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: Arc<RunConfig>,
}

impl Dispatcher {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Connects once, then runs every worker against that one client. A failed
    /// connection aborts before any worker is started. Elapsed time includes
    /// connecting.
    pub async fn run<C, F, Fut, E>(&self, connect: F) -> Result<AggregateReport, HarnessError>
    where
        C: WriteClient + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, E>>,
        E: Into<BoxError>,
    {
        let started = Instant::now();
        let client = connect()
            .await
            .map_err(|e| HarnessError::Connect(e.into()))?;
        Ok(self.fan_out(Arc::new(client), started).await)
    }

    /// Runs every worker against an already established client.
    pub async fn dispatch<C>(&self, client: Arc<C>) -> AggregateReport
    where
        C: WriteClient + ?Sized + 'static,
    {
        self.fan_out(client, Instant::now()).await
    }

    async fn fan_out<C>(&self, client: Arc<C>, started: Instant) -> AggregateReport
    where
        C: WriteClient + ?Sized + 'static,
    {
        let workers = self.config.workers;
        log::info!(
            "dispatching {} workers x {} writes",
            workers,
            self.config.attempts_per_worker
        );

        let (sender, mut receiver) = mpsc::channel::<WorkerResult>(workers.max(1));
        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            let client = Arc::clone(&client);
            let config = Arc::clone(&self.config);
            let sender = sender.clone();
            handles.push(tokio::spawn(async move {
                let result = worker::run(client.as_ref(), index, &config).await;
                if sender.send(result).await.is_err() {
                    log::error!("worker {} could not deliver its result", index);
                }
            }));
        }

        // The watcher owns the last sender, so the channel closes only after
        // every worker has been joined.
        let watcher = tokio::spawn(async move {
            for (index, handle) in handles.into_iter().enumerate() {
                if let Err(e) = handle.await {
                    log::error!("worker {} did not complete: {}", index, e);
                }
            }
            drop(sender);
        });

        let mut report = AggregateReport::default();
        while let Some(result) = receiver.recv().await {
            report.record(&result);
        }
        if let Err(e) = watcher.await {
            log::error!("completion watcher failed: {}", e);
        }
        drop(client);

        report.elapsed = started.elapsed();
        if report.workers < workers {
            log::warn!("{} of {} workers reported", report.workers, workers);
        }
        report
    }
}
