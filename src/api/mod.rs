//! HTTP surface under `/api/news`.

use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{Fetcher, Storage};

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app<F, S>(state: Arc<AppState<F, S>>) -> Router
where
    F: Fetcher + 'static,
    S: Storage + 'static,
{
    let cors = CorsLayer::permissive();

    Router::new()
        .route(
            "/api/news",
            get(handlers::list_articles::<F, S>).delete(handlers::delete_articles::<F, S>),
        )
        .route("/api/news/page/:page", get(handlers::articles_by_page::<F, S>))
        .route("/api/news/recent", get(handlers::recent_articles::<F, S>))
        .route("/api/news/scrape", post(handlers::scrape_first_page::<F, S>))
        .route("/api/news/scrape/all", post(handlers::scrape_all_pages::<F, S>))
        .route("/api/news/scrape/page/:page", post(handlers::scrape_page::<F, S>))
        .route("/api/news/count", get(handlers::count_articles::<F, S>))
        .route("/api/news/stats", get(handlers::stats::<F, S>))
        .route("/api/news/debug", get(handlers::debug_info::<F, S>))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
