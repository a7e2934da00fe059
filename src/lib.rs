pub mod api;
pub mod config;
pub mod nature;

mod article;
mod data;
mod error;
mod query;
mod scrape;
mod utils;

#[cfg(test)]
mod test_utils;

pub use article::{Article, NewArticle};
pub use config::ScraperConfig;
pub use data::Table;
pub use error::ScraperError;
pub use query::ArticleQuery;
pub use scrape::{ScrapeRun, Scraper};

/// Retrieves the raw markup of one listing page.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<String, ScraperError>;
}

/// Persistence for scraped articles.
///
/// Title uniqueness is not enforced here. Callers check
/// [`Storage::exists_by_title`] before inserting.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    async fn insert(&self, article: NewArticle) -> Result<Article, ScraperError>;
    async fn exists_by_title(&self, title: &str) -> Result<bool, ScraperError>;
    async fn count(&self) -> Result<u64, ScraperError>;
    async fn delete_all(&self) -> Result<u64, ScraperError>;

    /// Every stored article, newest first.
    async fn find_all_by_recency(&self) -> Result<Vec<Article>, ScraperError>;

    /// At most `limit` articles in insertion (id) order.
    async fn find_first_inserted(&self, limit: usize) -> Result<Vec<Article>, ScraperError>;
}
