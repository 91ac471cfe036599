//! SwingMusic artist service
//!
//! Serves artist pages for a local music library: the artist summary, the
//! artist's albums grouped by release type, and the full track list.

mod api;
mod config;
mod core;
mod db;
mod error;
mod models;
mod serializers;
mod stores;
mod utils;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::{Paths, UserConfig};
use crate::core::populate::populate_stores;
use crate::core::{ArtistsCache, TagHeuristics};
use crate::db::{DbEngine, TrackTable};
use crate::models::Track;
use crate::stores::Library;

/// SwingMusic artist service
#[derive(Parser, Debug)]
#[command(name = "swingmusic-artists")]
#[command(author = "swingmx")]
#[command(version = "2.0.0")]
#[command(about = "Artist pages for a self-hosted SwingMusic library")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 1970)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Path to config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of artist pages to keep cached (overrides settings.json)
    #[arg(long)]
    cache_size: Option<usize>,

    /// JSON array of tracks to add to the library before loading
    #[arg(long)]
    import: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(format!("{},sqlx=warn", log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("SwingMusic artist service v2.0.0 starting...");

    let paths = Paths::new(args.config)?;
    info!("Config directory: {:?}", paths.config_dir());

    let mut config = UserConfig::load(&paths)?;
    if let Some(size) = args.cache_size {
        config.artist_cache_size = size;
    }

    let engine = DbEngine::connect(&paths.app_db_path()).await?;

    if let Some(import) = args.import {
        import_tracks(&engine, &import).await?;
    }

    let library = Arc::new(Library::new());
    let cache = Arc::new(ArtistsCache::new(
        library.clone(),
        Arc::new(TagHeuristics::new(config.show_albums_as_singles)),
        config.cache_capacity(),
    ));
    info!("Artist cache holds {} artists", cache.capacity());

    info!("Loading data into memory...");
    populate_stores(&engine, &library, &cache, true).await?;

    run_server(args.host, args.port, cache, config).await
}

/// Insert tracks from a JSON file into the database
async fn import_tracks(engine: &DbEngine, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file {}", path.display()))?;
    let tracks: Vec<Track> =
        serde_json::from_str(&content).context("Failed to parse import file")?;

    let inserted = TrackTable::insert_many(engine.pool(), &tracks).await?;
    info!("Imported {} tracks from {}", inserted, path.display());
    Ok(())
}

async fn run_server(
    host: String,
    port: u16,
    cache: Arc<ArtistsCache>,
    config: UserConfig,
) -> Result<()> {
    use actix_cors::Cors;
    use actix_web::{middleware, web, App, HttpServer};

    let addr = format!("{}:{}", host, port);
    info!("Starting server on http://{}", addr);

    let state = web::Data::new(api::AppState { cache, config });

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(api::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
