use crate::{Fetcher, ScraperConfig, ScraperError};
use reqwest::Client;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    listing_url: String,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(HttpFetcher {
            client,
            listing_url: config.listing_url.clone(),
        })
    }

    /// The first page carries no page parameter.
    pub fn page_url(&self, page: u32) -> String {
        if page == 1 {
            format!("{}?type=article", self.listing_url)
        } else {
            format!("{}?type=article&page={}", self.listing_url, page)
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_page(&self, page: u32) -> Result<String, ScraperError> {
        let url = self.page_url(page);
        debug!("Visit {}", url);

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        debug!("Downloaded {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
