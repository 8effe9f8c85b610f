mod config;
mod db;
mod entities;
mod error;
mod ingest;
mod models;
mod omdb;
mod ranking;
mod routes;
mod store;

use std::sync::Arc;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, omdb::OmdbClient, store::Store};

pub struct AppState {
    pub store: Store,
    pub omdb: OmdbClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movieapi=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = reqwest::Client::builder()
        .user_agent("movieapi/0.1")
        .timeout(config.omdb_timeout)
        .build()?;

    let db = db::connect_and_migrate(&config.database_url, config.db_max_connections).await?;

    let omdb = OmdbClient::new(
        http,
        config.omdb_api_key.clone(),
        config.omdb_base_url.clone(),
        config.omdb_rps,
    );

    let state = Arc::new(AppState { store: Store::new(db), omdb });

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
