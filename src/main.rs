mod config;
mod db;
mod entities;
mod error;
mod models;
mod movies;
mod pagination;
mod routes;
mod seed;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DatabaseConnection,
}

impl AppState {
    /// Path of the listing endpoint, used as the base of pagination links.
    pub fn listing_path(&self) -> String {
        format!("{}/movies/", self.config.api_prefix)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,theater=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);
    tracing::info!(environment = ?config.environment, database = %config.database_url, "starting");

    let db = db::connect_and_migrate(&config.database_url).await?;
    seed::seed_if_empty(&db, &config.movies_csv).await?;

    let state = Arc::new(AppState { config: config.clone(), db });

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, prefix = %config.api_prefix, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
