//! Compilo Server - Playground UI, execution proxy and AI review

use clap::Parser;
use compilo::config::Config;
use compilo::telemetry::init_tracing;
use tracing::info;

#[derive(Parser)]
#[command(name = "compilo-server", version = compilo::VERSION, about = "Compilo playground server")]
struct Args {
    /// Bind address
    #[arg(long, env = "BIND_ADDRESS")]
    bind: Option<String>,

    /// Port
    #[arg(long, short, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    init_tracing(&config.log);

    let args = Args::parse();
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!("Starting Compilo v{}", compilo::VERSION);
    compilo::server::serve(&config).await
}
