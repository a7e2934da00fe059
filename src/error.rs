#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("Request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed listing item: {0}")]
    Extraction(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::error::Error),

    #[error("Invalid page number {0}, pages start at 1")]
    InvalidPage(u32),
}

impl ScraperError {
    /// Network, timeout and non-success status failures.
    pub fn is_fetch(&self) -> bool {
        matches!(self, ScraperError::Fetch(_) | ScraperError::Status { .. })
    }
}
