use crate::{Article, ScraperError, Storage};
use itertools::Itertools;
use std::sync::Arc;

/// Number of records shown by [`ArticleQuery::debug_dump`].
const DEBUG_DUMP_LEN: usize = 5;

/// Read-only views over the store.
pub struct ArticleQuery<S> {
    storage: Arc<S>,
}

impl<S: Storage> ArticleQuery<S> {
    pub fn new(storage: Arc<S>) -> Self {
        ArticleQuery { storage }
    }

    pub async fn all_articles(&self) -> Result<Vec<Article>, ScraperError> {
        self.storage.find_all_by_recency().await
    }

    /// The `n` newest articles, or all of them when fewer are stored.
    pub async fn most_recent(&self, n: usize) -> Result<Vec<Article>, ScraperError> {
        let mut articles = self.storage.find_all_by_recency().await?;
        articles.truncate(n);
        Ok(articles)
    }

    /// Not paginated: `page` and `size` are ignored and the full
    /// recency-ordered set is returned, because the store has no
    /// offset/limit query.
    pub async fn articles_by_page(
        &self,
        _page: u32,
        _size: u32,
    ) -> Result<Vec<Article>, ScraperError> {
        self.storage.find_all_by_recency().await
    }

    pub async fn count(&self) -> Result<u64, ScraperError> {
        self.storage.count().await
    }

    pub async fn stats_summary(&self) -> Result<String, ScraperError> {
        let total = self.storage.count().await?;
        Ok(format!("Total articles in database: {}", total))
    }

    /// Raw fields of the first stored articles in id order, each entry
    /// followed by a blank line.
    pub async fn debug_dump(&self) -> Result<String, ScraperError> {
        let total = self.storage.count().await?;
        let dump = self
            .storage
            .find_first_inserted(DEBUG_DUMP_LEN)
            .await?
            .iter()
            .enumerate()
            .map(|(i, article)| format!("Article {}:\n{}\n", i + 1, article))
            .join("");
        Ok(format!("Total articles: {}\n\n{}", total, dump))
    }
}
