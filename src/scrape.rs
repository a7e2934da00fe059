use crate::nature::NatureCrawler;
use crate::{Article, Fetcher, ScraperConfig, ScraperError, Storage};
use std::sync::Arc;
use tokio::{sync::Mutex, time::Duration};
use tracing::{error, info, warn};

/// Result of walking the listing page by page.
///
/// `saved` keeps what was persisted before an aborting error.
#[derive(Debug, Default)]
pub struct ScrapeRun {
    pub saved: Vec<Article>,
    pub pages_visited: u32,
    pub error: Option<ScraperError>,
}

/// Drives fetch, extract, dedupe and save.
///
/// Every scrape holds `gate` for its whole duration, so runs through the
/// same `Scraper` never interleave their title checks and inserts.
pub struct Scraper<F, S> {
    fetcher: F,
    storage: Arc<S>,
    crawler: NatureCrawler,
    max_pages: u32,
    page_delay: Duration,
    gate: Mutex<()>,
}

impl<F, S> Scraper<F, S>
where
    F: Fetcher,
    S: Storage,
{
    pub fn new(config: &ScraperConfig, fetcher: F, storage: Arc<S>) -> Self {
        Scraper {
            fetcher,
            storage,
            crawler: NatureCrawler::new(config.site_root.as_str()),
            max_pages: config.max_pages,
            page_delay: config.page_delay,
            gate: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    pub async fn scrape_first_page(&self) -> Result<Vec<Article>, ScraperError> {
        self.scrape_page(1).await
    }

    pub async fn scrape_page(&self, page: u32) -> Result<Vec<Article>, ScraperError> {
        let _guard = self.gate.lock().await;
        self.scrape_page_unguarded(page).await
    }

    /// Scrapes pages `1..=max_pages` in order, stopping at the first page
    /// that saves nothing or fails.
    pub async fn scrape_all_pages(&self) -> ScrapeRun {
        let _guard = self.gate.lock().await;
        let mut run = ScrapeRun::default();

        for page in 1..=self.max_pages {
            info!("Scraping page {} of {}", page, self.max_pages);
            run.pages_visited = page;

            match self.scrape_page_unguarded(page).await {
                Ok(articles) if articles.is_empty() => {
                    info!(
                        "No more articles found on page {}. Stopping pagination.",
                        page
                    );
                    break;
                }
                Ok(articles) => run.saved.extend(articles),
                Err(e) => {
                    error!("Error scraping page {}: {}", page, e);
                    run.error = Some(e);
                    break;
                }
            }

            if page < self.max_pages {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        info!(
            "Completed scraping all pages. Total articles saved: {}",
            run.saved.len()
        );
        run
    }

    pub async fn delete_all(&self) -> Result<u64, ScraperError> {
        let _guard = self.gate.lock().await;
        let deleted = self.storage.delete_all().await?;
        info!("All articles deleted from database ({})", deleted);
        Ok(deleted)
    }

    async fn scrape_page_unguarded(&self, page: u32) -> Result<Vec<Article>, ScraperError> {
        if page == 0 {
            return Err(ScraperError::InvalidPage(page));
        }

        info!("Starting to scrape articles from page {}", page);
        let html = self.fetcher.fetch_page(page).await.map_err(|e| {
            error!("Error fetching page {}: {}", page, e);
            e
        })?;

        let items = self.crawler.extract(&html);
        info!("Found {} articles on page {}", items.len(), page);

        let mut saved = vec![];
        for item in items {
            let item = match item {
                Ok(Some(item)) => item,
                Ok(None) => {
                    warn!("Skipping article - no title element found");
                    continue;
                }
                Err(e) => {
                    error!("Error processing individual article: {}", e);
                    continue;
                }
            };

            if item.title.is_empty() {
                warn!("Skipping article with empty title: {}", item.link);
                continue;
            }
            if item.authors.is_empty() {
                warn!("No authors found for article: {}", item.title);
            }
            if item.description.is_empty() {
                warn!("No description found for article: {}", item.title);
            }

            // Check the title as it will be stored, after truncation.
            let new_article = item.into_new_article().bounded();
            if self.storage.exists_by_title(&new_article.title).await? {
                info!("Article already exists: {}", new_article.title);
                continue;
            }

            let article = self.storage.insert(new_article).await?;
            info!("Saved article: {}", article.title);
            saved.push(article);
        }

        info!(
            "Page {} scraping completed. Saved {} new articles",
            page,
            saved.len()
        );
        Ok(saved)
    }
}
