use crate::{Article, Fetcher, NewArticle, ScraperError, Storage};
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) enum Page {
    Html(String),
    /// Simulates a request that failed at the network level.
    Unreachable,
}

/// Serves canned pages. Pages that were not registered render an empty
/// listing.
pub(crate) struct StaticFetcher {
    pages: HashMap<u32, Page>,
    requested: Mutex<Vec<u32>>,
}

impl StaticFetcher {
    pub(crate) fn new() -> Self {
        StaticFetcher {
            pages: HashMap::new(),
            requested: Mutex::new(vec![]),
        }
    }

    pub(crate) fn with_page(mut self, page: u32, html: String) -> Self {
        self.pages.insert(page, Page::Html(html));
        self
    }

    pub(crate) fn with_unreachable(mut self, page: u32) -> Self {
        self.pages.insert(page, Page::Unreachable);
        self
    }

    pub(crate) fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch_page(&self, page: u32) -> Result<String, ScraperError> {
        self.requested.lock().unwrap().push(page);
        match self.pages.get(&page) {
            Some(Page::Html(html)) => Ok(html.clone()),
            Some(Page::Unreachable) => Err(ScraperError::Status {
                url: format!("http://test.invalid/?page={}", page),
                status: 504,
            }),
            None => Ok(listing(&[])),
        }
    }
}

/// Keeps articles in a vector. Never leaves the runtime, so it is safe
/// under a paused clock.
#[derive(Default)]
pub(crate) struct MemoryStorage {
    articles: Mutex<Vec<Article>>,
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn insert(&self, article: NewArticle) -> Result<Article, ScraperError> {
        let mut articles = self.articles.lock().unwrap();
        let id = articles.len() as i64 + 1;
        let article = article.bounded().into_article(id);
        articles.push(article.clone());
        Ok(article)
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool, ScraperError> {
        Ok(self.articles.lock().unwrap().iter().any(|a| a.title == title))
    }

    async fn count(&self) -> Result<u64, ScraperError> {
        Ok(self.articles.lock().unwrap().len() as u64)
    }

    async fn delete_all(&self) -> Result<u64, ScraperError> {
        let mut articles = self.articles.lock().unwrap();
        let deleted = articles.len() as u64;
        articles.clear();
        Ok(deleted)
    }

    async fn find_all_by_recency(&self) -> Result<Vec<Article>, ScraperError> {
        let mut articles = self.articles.lock().unwrap().clone();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(articles)
    }

    async fn find_first_inserted(&self, limit: usize) -> Result<Vec<Article>, ScraperError> {
        Ok(self.articles.lock().unwrap().iter().take(limit).cloned().collect())
    }
}

pub(crate) fn item(title: &str, href: &str, authors: &str, summary: &str) -> String {
    format!(
        r#"<li class="app-article-list-row__item">
            <h3><a class="c-card__link" href="{}">{}</a></h3>
            <ul class="c-author-list"><li>{}</li></ul>
            <p class="c-card__summary">{}</p>
        </li>"#,
        href, title, authors, summary
    )
}

pub(crate) fn item_without_anchor(title: &str) -> String {
    format!(
        r#"<li class="app-article-list-row__item"><h3>{}</h3></li>"#,
        title
    )
}

pub(crate) fn listing(items: &[String]) -> String {
    format!(
        "<html><body><ul>{}</ul></body></html>",
        items.concat()
    )
}

/// A listing with `count` complete items whose titles start with `prefix`.
pub(crate) fn numbered_listing(prefix: &str, count: usize) -> String {
    let items: Vec<String> = (1..=count)
        .map(|i| {
            item(
                &format!("{} {}", prefix, i),
                &format!("/articles/{}-{}", prefix.to_lowercase(), i),
                "A. Author",
                "Summary",
            )
        })
        .collect();
    listing(&items)
}
