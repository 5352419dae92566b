mod config;
mod neodb;
mod server;
mod tools;

use std::sync::Arc;

use anyhow::Result;
use config::Config;
use neodb::NeoDbClient;
use server::McpServer;
use tools::ToolRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (RUST_LOG)
    dotenv::dotenv().ok();

    // Initialize logging; the backend writes to stderr, stdout carries protocol frames
    pretty_env_logger::init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("Starting NeoDB tool server for {}", config.api_base);
    log::debug!("Configuration: {:?}", config);

    let client = NeoDbClient::new(&config)?;
    let registry = ToolRegistry::new(config, Arc::new(client));
    log::info!("Registered {} tools", registry.list_tools().len());

    McpServer::new(registry).serve_stdio().await?;

    log::info!("Server stopped");
    Ok(())
}
