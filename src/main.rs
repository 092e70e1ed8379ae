use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lostfound::api;
use lostfound::config;

#[derive(Parser)]
#[command(name = "lostfound")]
#[command(version = "1.0.0")]
#[command(about = "Community lost & found listing board", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new lostfound.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lostfound=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => init(),
        Commands::Serve { host, port } => {
            let config = config::load_config()?;
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            api::run_server(config, &host, port).await?;
            Ok(())
        }
    }
}

fn init() -> Result<()> {
    let path = std::path::Path::new("lostfound.toml");
    if path.exists() {
        anyhow::bail!("lostfound.toml already exists, refusing to overwrite");
    }

    std::fs::write(path, config::default_config_content())?;
    println!("Wrote {}", path.display());
    Ok(())
}
