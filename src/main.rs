use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use files_store::{alert::LogAlerts, config::Config, FilesStore, HttpClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    match log_format.to_lowercase().as_str() {
        "gcp" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_stackdriver::layer())
                .init();
        }
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_list(false),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    info!(version = env!("CARGO_PKG_VERSION"), "files-store starting");

    let config = Config::load()?;

    let page = match std::env::var("PAGE") {
        Ok(raw) => Some(raw.parse::<u32>()?),
        Err(_) => None,
    };
    let album_id = match std::env::var("ALBUM_ID") {
        Ok(raw) => Some(raw.parse::<u64>()?),
        Err(_) => None,
    };

    let client = HttpClient::new(&config.api)?;
    info!(api_root = %client.base(), limit = config.page_limit, "Loaded configuration");
    let store = FilesStore::new(Arc::new(client), Arc::new(LogAlerts), &config);

    // Trace every committed mutation
    let mut events = store.subscribe();
    let watcher = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(mutation) => tracing::debug!(mutation = mutation.kind(), "State changed"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Mutation watcher lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    match album_id {
        Some(id) => {
            store.fetch_by_album_id(id, page).await?;
        }
        None => {
            if store.fetch(page).await.is_none() {
                anyhow::bail!("Failed to fetch files");
            }
        }
    }

    let state = store.snapshot();
    info!(
        name = state.name().unwrap_or("all files"),
        page = state.pagination().page,
        fetched = state.fetched_count(),
        total = state.total_files(),
        paginate = state.should_paginate(),
        "Listing loaded"
    );

    for file in state.files() {
        println!("{}", serde_json::to_string(file)?);
    }

    // Closing the store ends the event stream
    drop(store);
    watcher.await?;

    info!("Done");
    Ok(())
}
