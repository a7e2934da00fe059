use crate::{ArticleQuery, Fetcher, Scraper, Storage};

pub struct AppState<F, S> {
    pub scraper: Scraper<F, S>,
    pub query: ArticleQuery<S>,
}

impl<F: Fetcher, S: Storage> AppState<F, S> {
    pub fn new(scraper: Scraper<F, S>) -> Self {
        let query = ArticleQuery::new(scraper.storage().clone());
        AppState { scraper, query }
    }
}
