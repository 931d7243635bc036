use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dialograph_core::config::AppConfig;
use dialograph_core::DialographError;
use dialograph_gateway::{GatewayServer, PassthroughSimulator};
use dialograph_store::SqliteStore;

#[derive(Parser)]
#[command(name = "dialograph", version, about = "Conversation designer admin service")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "dialograph.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve,
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(DialographError::ConfigNotFound(_)) => {
            info!(path = %cli.config.display(), "No config file found, using defaults");
            AppConfig::default()
        }
        Err(e) => return Err(e.into()),
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Commands::Serve => serve(config).await,
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let store = Arc::new(SqliteStore::open(Path::new(&config.storage.path))?);
    let simulator = Arc::new(PassthroughSimulator);

    let server = GatewayServer::new(config, store, simulator);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal.cancel();
        }
    });

    server.run(shutdown).await
}
