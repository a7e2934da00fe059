use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::{fmt::Display, sync::Arc};
use tracing::error;

use super::AppState;
use crate::{Article, Fetcher, ScraperError, Storage};

/// Nominal page size of the unpaginated page listing.
const PAGE_SIZE: u32 = 20;
const DEFAULT_RECENT: usize = 5;

type SharedState<F, S> = State<Arc<AppState<F, S>>>;
type TextResponse = Result<String, (StatusCode, String)>;

fn server_error(e: ScraperError) -> StatusCode {
    error!("Request failed: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

fn server_error_text(context: &str, e: impl Display) -> (StatusCode, String) {
    error!("{}: {}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("{}: {}", context, e),
    )
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

pub async fn list_articles<F: Fetcher, S: Storage>(
    State(state): SharedState<F, S>,
) -> Result<Json<Vec<Article>>, StatusCode> {
    state.query.all_articles().await.map(Json).map_err(server_error)
}

pub async fn articles_by_page<F: Fetcher, S: Storage>(
    State(state): SharedState<F, S>,
    Path(page): Path<u32>,
) -> Result<Json<Vec<Article>>, StatusCode> {
    state
        .query
        .articles_by_page(page, PAGE_SIZE)
        .await
        .map(Json)
        .map_err(server_error)
}

pub async fn recent_articles<F: Fetcher, S: Storage>(
    State(state): SharedState<F, S>,
    Query(params): Query<RecentParams>,
) -> Result<Json<Vec<Article>>, StatusCode> {
    state
        .query
        .most_recent(params.limit.unwrap_or(DEFAULT_RECENT))
        .await
        .map(Json)
        .map_err(server_error)
}

pub async fn scrape_first_page<F: Fetcher, S: Storage>(
    State(state): SharedState<F, S>,
) -> TextResponse {
    let saved = state
        .scraper
        .scrape_first_page()
        .await
        .map_err(|e| server_error_text("Error during scraping", e))?;
    Ok(format!(
        "Scraping completed! Saved {} new articles from page 1.",
        saved.len()
    ))
}

pub async fn scrape_all_pages<F: Fetcher, S: Storage>(
    State(state): SharedState<F, S>,
) -> TextResponse {
    let run = state.scraper.scrape_all_pages().await;
    match run.error {
        None => Ok(format!(
            "All pages scraping completed! Saved {} new articles from multiple pages.",
            run.saved.len()
        )),
        Some(e) => Err(server_error_text(
            "Error during all pages scraping",
            format!(
                "{} (saved {} new articles before the failure)",
                e,
                run.saved.len()
            ),
        )),
    }
}

pub async fn scrape_page<F: Fetcher, S: Storage>(
    State(state): SharedState<F, S>,
    Path(page): Path<u32>,
) -> TextResponse {
    let saved = state
        .scraper
        .scrape_page(page)
        .await
        .map_err(|e| server_error_text(&format!("Error during page {} scraping", page), e))?;
    Ok(format!(
        "Page {} scraping completed! Saved {} new articles.",
        page,
        saved.len()
    ))
}

pub async fn delete_articles<F: Fetcher, S: Storage>(
    State(state): SharedState<F, S>,
) -> TextResponse {
    state
        .scraper
        .delete_all()
        .await
        .map_err(|e| server_error_text("Error deleting articles", e))?;
    Ok("All articles deleted successfully!".to_string())
}

pub async fn count_articles<F: Fetcher, S: Storage>(
    State(state): SharedState<F, S>,
) -> Result<Json<u64>, StatusCode> {
    state.query.count().await.map(Json).map_err(server_error)
}

pub async fn stats<F: Fetcher, S: Storage>(State(state): SharedState<F, S>) -> TextResponse {
    state
        .query
        .stats_summary()
        .await
        .map_err(|e| server_error_text("Error getting stats", e))
}

pub async fn debug_info<F: Fetcher, S: Storage>(
    State(state): SharedState<F, S>,
) -> TextResponse {
    state
        .query
        .debug_dump()
        .await
        .map_err(|e| server_error_text("Error getting debug info", e))
}
