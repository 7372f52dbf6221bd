use axum::{routing::get, Router};
use blogai_core::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/article", get(handlers::list_articles))
        .route("/article/", get(handlers::list_articles))
        .route("/article/:id", get(handlers::get_article))
        .route("/blog/:id", get(handlers::blog_page))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(Arc::new(state))
}

/// Serves the article API and pages on `addr` until the process stops.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "🌐 Serving {} articles on http://{}",
        state.source.name(),
        listener.local_addr()?
    );
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use blogai_core::{Article, Error, Result};
}
