//! Listing scraper for nature.com research articles.

mod crawler;
mod data;
mod fetcher;

pub use crawler::{ExtractedArticle, ItemResult, NatureCrawler};
pub use data::{ArticleTable, NatureData};
pub use fetcher::HttpFetcher;
