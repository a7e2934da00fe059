use std::time::Duration;

pub const LISTING_URL: &str = "https://www.nature.com/nature/articles";
pub const SITE_ROOT: &str = "https://www.nature.com";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const MAX_PAGES: u32 = 10;
pub const PAGE_DELAY: Duration = Duration::from_secs(2);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Knobs for fetching and walking the listing.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub listing_url: String,
    /// Prepended to the site-relative hrefs of listing items.
    pub site_root: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_pages: u32,
    pub page_delay: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            listing_url: LISTING_URL.to_string(),
            site_root: SITE_ROOT.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: REQUEST_TIMEOUT,
            max_pages: MAX_PAGES,
            page_delay: PAGE_DELAY,
        }
    }
}
