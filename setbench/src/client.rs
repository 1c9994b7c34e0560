mod grpc;

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use datastore::GetRequest;
use grpc::GrpcWriteClient;
use harness::{Dispatcher, RunConfig, WriteOptions};

pub mod datastore {
    tonic::include_proto!("datastore");
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Datastore endpoint
    #[arg(long, global = true, default_value = "http://127.0.0.1:7777")]
    addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the concurrent write load test
    Run(RunArgs),
    /// Write a single key
    Set {
        key: String,
        value: String,
        /// Time to live in seconds
        #[arg(long, default_value_t = 0)]
        ttl: u64,
        /// Ask the datastore to keep earlier values (setbench_server keeps only the latest)
        #[arg(long)]
        preserve_history: bool,
    },
    /// Read a single key
    Get { key: String },
}

#[derive(Args)]
struct RunArgs {
    #[arg(short, long, default_value_t = 20)]
    workers: usize,

    /// Writes issued by each worker
    #[arg(short, long, default_value_t = 20_000)]
    attempts: usize,

    #[arg(long, default_value = "ds.yo")]
    prefix: String,

    /// Length of the random key suffix
    #[arg(long, default_value_t = 8)]
    key_length: usize,

    #[arg(long, default_value = "some value")]
    value: String,

    /// Time to live in seconds
    #[arg(long, default_value_t = 200)]
    ttl: u64,

    /// Ask the datastore to keep earlier values (setbench_server keeps only the latest)
    #[arg(long)]
    preserve_history: bool,

    /// Upper bound in seconds on each worker's run
    #[arg(long, default_value_t = 600)]
    deadline: u64,

    /// Seed for key suffixes, random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

impl RunArgs {
    fn into_config(self) -> RunConfig {
        RunConfig::default()
            .workers(self.workers)
            .attempts_per_worker(self.attempts)
            .key_prefix(self.prefix)
            .key_suffix_length(self.key_length)
            .value(self.value.into_bytes())
            .ttl(Duration::from_secs(self.ttl))
            .preserve_history(self.preserve_history)
            .run_deadline(Duration::from_secs(self.deadline))
            .seed(self.seed.unwrap_or_else(rand::random))
    }
}

async fn handle_run(addr: String, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.into_config();
    tracing::info!(
        "Running {} workers x {} writes against {} (seed {})",
        config.workers,
        config.attempts_per_worker,
        addr,
        config.seed
    );

    let dispatcher = Dispatcher::new(config);
    let report = dispatcher.run(|| GrpcWriteClient::connect(addr)).await?;

    println!("{}", report);
    tracing::info!(
        "{} of {} writes failed, {:.0} writes/s",
        report.failures(),
        dispatcher.config().max_writes(),
        report.throughput()
    );

    Ok(())
}

async fn handle_set(
    client: GrpcWriteClient,
    key: String,
    value: String,
    options: WriteOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = tonic::Request::new(grpc::set_request(&key, value.as_bytes(), &options));
    let response = client.client().set(request).await?;
    println!("Set operation successful: {}", response.into_inner().success);

    Ok(())
}

async fn handle_get(client: GrpcWriteClient, key: String) -> Result<(), Box<dyn std::error::Error>> {
    let request = tonic::Request::new(GetRequest { key: key.clone() });
    let response = client.client().get(request).await?;

    match response.into_inner().item {
        Some(item) => println!("[key:{}] {}", item.key, String::from_utf8_lossy(&item.value)),
        None => println!("{} not found", key),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => handle_run(cli.addr, args).await?,
        Commands::Set {
            key,
            value,
            ttl,
            preserve_history,
        } => {
            let client = GrpcWriteClient::connect(cli.addr).await?;
            let options = WriteOptions {
                ttl: Duration::from_secs(ttl),
                preserve_history,
            };
            handle_set(client, key, value, options).await?
        }
        Commands::Get { key } => {
            let client = GrpcWriteClient::connect(cli.addr).await?;
            handle_get(client, key).await?
        }
    }

    Ok(())
}
