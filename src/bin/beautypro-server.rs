// ABOUTME: Server binary for the BeautyPro API
// ABOUTME: Loads configuration, initializes logging and the database, then serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

//! # BeautyPro API Server Binary
//!
//! Configuration comes from the environment (and `.env`); the flags below
//! override individual values.

use anyhow::Result;
use beautypro_server::{
    config::{DatabaseUrl, ServerConfig},
    logging,
    resources::ServerResources,
    server,
};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

/// Command-line overrides for the environment configuration
#[derive(Parser)]
#[command(name = "beautypro-server")]
#[command(about = "BeautyPro API - scheduling and bookkeeping for beauty professionals")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. `sqlite:./data/beautypro.db` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = DatabaseUrl::parse_url(&database_url);
    }
    config.validate()?;

    logging::init_from_env()?;

    info!("Starting BeautyPro API");
    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(config).await?);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}
