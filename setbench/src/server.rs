use std::{net::SocketAddr, sync::Arc, time::Duration};

use clap::Parser;
use harness::MemoryStore;
use tonic::{Request, Response, Status, transport::Server};

use datastore::datastore_server::{Datastore, DatastoreServer};
use datastore::*;

pub mod datastore {
    tonic::include_proto!("datastore");

    pub(crate) const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("datastore_descriptor");
}

// Applied when a set request carries no options.
const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Parser)]
#[command(author, version, about = "In-memory datastore target for setbench", long_about = None)]
struct Cli {
    #[arg(long, default_value = "127.0.0.1:7777")]
    addr: SocketAddr,

    /// Seconds between sweeps of expired keys
    #[arg(long, default_value_t = 30)]
    purge_interval: u64,
}

/// Keeps only the latest value per key. `preserve_history` on a set request is
/// accepted but has no effect here.
#[derive(Debug, Default)]
pub struct DatastoreContext {
    pub store: Arc<MemoryStore>,
}

#[tonic::async_trait]
impl Datastore for DatastoreContext {
    #[tracing::instrument(skip(self, request))]
    async fn set(&self, request: Request<SetRequest>) -> Result<Response<SetResponse>, Status> {
        let input = request.into_inner();
        if input.key.is_empty() {
            return Err(Status::invalid_argument("Empty key not allowed"));
        }
        let ttl = match input.options {
            Some(options) => Duration::from_secs(
                u64::try_from(options.ttl)
                    .map_err(|_| Status::invalid_argument(format!("Negative ttl: {}", options.ttl)))?,
            ),
            None => DEFAULT_TTL,
        };
        tracing::debug!("Received set request for {}", input.key);

        self.store.put(input.key, input.value, ttl);
        Ok(Response::new(SetResponse { success: true }))
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, request: Request<GetRequest>) -> Result<Response<GetResponse>, Status> {
        let key = request.into_inner().key;
        let item = self.store.get(&key).map(|value| Item { key, value });
        tracing::debug!("Returning get response, found: {}", item.is_some());
        Ok(Response::new(GetResponse { item }))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let context = DatastoreContext::default();
    let store = Arc::clone(&context.store);
    let purge_interval = Duration::from_secs(cli.purge_interval.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(purge_interval);
        loop {
            ticker.tick().await;
            let removed = store.purge_expired();
            tracing::info!("Purged {} expired keys, {} stored", removed, store.len());
        }
    });

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(datastore::FILE_DESCRIPTOR_SET)
        .build_v1()?;

    tracing::info!("Starting datastore gRPC server on socket address: {}", cli.addr);
    Server::builder()
        .add_service(DatastoreServer::new(context))
        .add_service(reflection_service)
        .serve(cli.addr)
        .await?;

    Ok(())
}
