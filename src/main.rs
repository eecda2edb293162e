use calendash::{StoreClient, StoreConfig};
use clap::Parser;
use std::net::SocketAddr;

/// Standalone data service exposing the health and connectivity routes.
#[derive(Parser, Debug)]
#[command(name = "calendash-server", about = "Calendash data service")]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Directory for the durable record-set entries
    #[arg(long, default_value = "calendash_data")]
    data_dir: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let client = StoreClient::open(StoreConfig::new(&args.data_dir))?;

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    calendash::web::serve(client, addr).await
}
