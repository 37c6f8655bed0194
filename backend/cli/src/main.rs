use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::info;

use remitex_config::Config;
use remitex_gateway::{start_server, GatewayState};
use remitex_llm::providers::cerebras::CerebrasProvider;
use remitex_llm::providers::mock::MockProvider;
use remitex_llm::ProviderRegistry;

#[derive(Parser)]
#[command(name = "remitex")]
#[command(about = "Remitex — payment-advice extraction gateway")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the extraction gateway server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show current gateway status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let config = Config::from_env();

    logging::init_logger(config.log_dir.as_deref(), &config.log_level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("Remitex is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    config.validate_for_serve()?;

    let mut registry = ProviderRegistry::new();

    if let Some(api_key) = &config.cerebras_api_key {
        let mut provider = CerebrasProvider::new(api_key);
        if let Some(url) = &config.cerebras_base_url {
            provider = provider.with_base_url(url);
        }
        registry.register("cerebras", Arc::new(provider));
        info!("Registered Cerebras provider");
    }

    // Always available so the gateway can be smoke-tested without a key.
    registry.register("mock", Arc::new(MockProvider::new("mock")));

    let Some(provider) = registry.get(&config.provider) else {
        bail!("provider {:?} is not available", config.provider);
    };

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    info!(
        port = config.port,
        bind = %config.bind_address,
        provider = %provider.name(),
        model = %config.model,
        "Starting Remitex gateway"
    );

    let state = GatewayState {
        provider,
        config: Arc::new(config),
    };
    start_server(addr, state).await
}
