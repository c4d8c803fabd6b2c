use anyhow::Result;
use clap::{Parser, Subcommand};

/// portfolio - personal site with a contact form
#[derive(Parser)]
#[command(name = "portfolio")]
#[command(about = "Personal portfolio website", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate the configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = portfolio::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    portfolio::observability::init_observability(
        "portfolio",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Serve { host, port } => portfolio::server::serve(config, host, port).await,
        Commands::Check => {
            tracing::info!(mail = ?config.mail, "Configuration is valid");
            Ok(())
        }
    }
}
