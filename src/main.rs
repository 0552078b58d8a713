use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod db;
mod llm;
mod util;
mod web;

use crate::config::{AppConfig, CliArgs};
use crate::db::QueryExecutor;
use crate::llm::TranslatorManager;
use crate::util::logging::init_tracing;
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let args = CliArgs::parse();

    // Load configuration
    let config = match AppConfig::new(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize the translator
    info!("Initializing translator with backend: {}", config.llm.backend);
    let translator = TranslatorManager::new(&config.llm)?;

    // The executor dials per request; only the connection settings live here
    info!(
        "Query executor targeting {}:{}/{}",
        config.database.host, config.database.port, config.database.dbname
    );
    let executor = QueryExecutor::new(&config.database);

    let app_state = Arc::new(AppState::new(config.clone(), translator, executor));

    // Start the web server
    info!(
        "Starting airline-nlq server on {}:{}",
        config.web.host, config.web.port
    );
    match web::run_server(config.web, app_state).await {
        Ok(_) => info!("Server stopped gracefully"),
        Err(e) => {
            error!("Server error: {}", e);
            return Err(std::io::Error::other(e.to_string()).into());
        }
    }

    Ok(())
}
