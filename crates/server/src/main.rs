//! Encounter server entry point.
//!
//! Loads static content, starts the runtime with a fixed tick interval,
//! populates one hostile per tribe and logs every notification as JSON until
//! interrupted.
mod config;

use std::f32::consts::TAU;

use anyhow::{Context, Result};
use encounter_content::ContentFactory;
use encounter_core::{MapId, TribeId, TribeOracle, Vec3};
use runtime::{Event, OracleManager, Runtime, RuntimeConfig, RuntimeHandle, Topic};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use config::ServerConfig;

const HOME_MAP: MapId = MapId(1);
const SPAWN_RING_RADIUS: f32 = 20.0;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env();
    let _guard = setup_logging(&config)?;

    let content = ContentFactory::new(config.content_dir.clone())
        .load_all()
        .with_context(|| format!("loading content from {}", config.content_dir.display()))?;

    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            encounter: content.config.clone(),
            tick_interval: Some(config.tick_interval),
            ..RuntimeConfig::default()
        })
        .oracles(OracleManager::from_content(&content))
        .build()
        .await?;
    let handle = runtime.handle();

    let forwarder = tokio::spawn(log_notifications(handle.clone()));
    populate(&handle, content.tribes.tribe_ids()).await?;

    info!(target: "server", tick_interval = ?config.tick_interval, "encounter server running");
    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;

    info!(target: "server", "shutting down");
    forwarder.abort();
    drop(handle);
    runtime.shutdown().await?;
    Ok(())
}

/// Spawns one hostile per tribe, evenly spaced on a ring around the origin.
async fn populate(handle: &RuntimeHandle, tribes: Vec<TribeId>) -> Result<()> {
    let count = tribes.len().max(1) as f32;
    for (index, tribe) in tribes.into_iter().enumerate() {
        let angle = TAU * index as f32 / count;
        let position = Vec3::new(angle.cos(), 0.0, angle.sin()) * SPAWN_RING_RADIUS;
        let hostile = handle.spawn(tribe, HOME_MAP, position).await?;
        info!(target: "server", %hostile, %tribe, "hostile populated");
    }
    Ok(())
}

/// Writes each notification to the log as one JSON line.
async fn log_notifications(handle: RuntimeHandle) {
    let mut rx = handle.subscribe(Topic::Notification);
    drop(handle);
    loop {
        match rx.recv().await {
            Ok(Event::Notification(event)) => match serde_json::to_string(&event) {
                Ok(json) => info!(target: "server::notify", players = ?event.players, "{json}"),
                Err(error) => warn!(target: "server::notify", %error, "notification not serializable"),
            },
            Ok(_) => {}
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(target: "server::notify", skipped, "notification log lagging");
            }
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Installs the stderr layer and, when `LOG_DIR` is set, a file layer.
///
/// The returned guard must live as long as the process logs to the file.
fn setup_logging(config: &ServerConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "encounter-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = &config.log_dir {
        info!(target: "server", log_dir = %dir.display(), "file logging enabled");
    }
    Ok(guard)
}
