use nature_news_scraper::nature::NatureData;
use nature_news_scraper::Storage;

async fn dedupe_titles(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let p = NatureData::new(path).await?;
    let before = p.count().await?;
    let deleted = p.delete_duplicate_titles().await?;
    println!("Deleted {} duplicate articles ({} -> {})", deleted, before, before - deleted);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("NEWS_DATABASE").ok())
        .unwrap_or_else(|| "news.db".to_string());
    dedupe_titles(&path).await
}
