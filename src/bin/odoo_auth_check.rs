//! Odoo connection check.
//!
//! Loads the Odoo configuration the same way the server does, authenticates
//! and lists a few installed models. Exits non-zero on any failure.

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use odoo_mcp_server::core::odoo::{Domain, OdooClient, OdooConfig, SearchOptions};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = OdooConfig::load().context("loading Odoo configuration")?;
    info!(url = %config.url, db = %config.db, user = %config.username, "Connecting");

    let client = OdooClient::new(config)?;

    let uid = client.authenticate().await.context("authentication failed")?;
    println!("Authenticated as uid {uid}");

    let models = client
        .search_read(
            "ir.model",
            &Domain::new(),
            SearchOptions::fields(&["model", "name"]).limit(5),
        )
        .await
        .context("listing models")?;

    println!("Sample models:");
    for model in &models {
        let name = model.get("model").and_then(|v| v.as_str()).unwrap_or_default();
        let label = model.get("name").and_then(|v| v.as_str()).unwrap_or_default();
        println!("  {name} ({label})");
    }
    Ok(())
}
