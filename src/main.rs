use clap::{Args, Parser, Subcommand};
use nature_news_scraper::api::{self, AppState};
use nature_news_scraper::nature::{HttpFetcher, NatureData};
use nature_news_scraper::{ArticleQuery, Scraper, ScraperConfig, Storage};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(about = "Scrapes the nature.com article listing into SQLite and serves it over HTTP")]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "NEWS_DATABASE", default_value = "news.db")]
    database: String,

    #[command(flatten)]
    scraper: ScraperArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ScraperArgs {
    #[arg(long, env = "NEWS_LISTING_URL", default_value = nature_news_scraper::config::LISTING_URL)]
    listing_url: String,

    /// Upper bound of pages walked by a full scrape
    #[arg(long, default_value_t = nature_news_scraper::config::MAX_PAGES)]
    max_pages: u32,

    /// Pause between two pages of a full scrape
    #[arg(long, default_value_t = 2000)]
    page_delay_ms: u64,

    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,
}

impl ScraperArgs {
    fn into_config(self) -> ScraperConfig {
        ScraperConfig {
            listing_url: self.listing_url,
            max_pages: self.max_pages,
            page_delay: Duration::from_millis(self.page_delay_ms),
            timeout: Duration::from_secs(self.timeout_secs),
            ..ScraperConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: SocketAddr,

        /// Also scrape all pages every N seconds
        #[arg(long)]
        interval_secs: Option<u64>,
    },
    /// Scrape once and exit
    Scrape {
        /// Page to scrape, defaults to the first one
        #[arg(long, conflicts_with = "all")]
        page: Option<u32>,

        /// Walk every page up to the configured bound
        #[arg(long)]
        all: bool,
    },
    /// Print the newest articles
    List {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Print the number of stored articles
    Count,
    /// Print a short summary
    Stats,
    /// Delete every stored article
    Purge,
}

type AppScraper = Scraper<HttpFetcher, NatureData>;

async fn run_scheduler(state: Arc<AppState<HttpFetcher, NatureData>>, every: Duration) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        let run = state.scraper.scrape_all_pages().await;
        match run.error {
            Some(e) => error!(
                "Scheduled scrape aborted after {} new articles: {}",
                run.saved.len(),
                e
            ),
            None => info!("Scheduled scrape saved {} new articles", run.saved.len()),
        }
    }
}

async fn scrape_once(
    scraper: &AppScraper,
    page: Option<u32>,
    all: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if all {
        let run = scraper.scrape_all_pages().await;
        println!(
            "Saved {} new articles from {} pages",
            run.saved.len(),
            run.pages_visited
        );
        if let Some(e) = run.error {
            return Err(e.into());
        }
    } else {
        let page = page.unwrap_or(1);
        let saved = scraper.scrape_page(page).await?;
        println!("Saved {} new articles from page {}", saved.len(), page);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info,sqlx=warn".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let cli = Cli::parse();
    let config = cli.scraper.into_config();
    let storage = Arc::new(NatureData::new(&cli.database).await?);
    let scraper = Scraper::new(&config, HttpFetcher::new(&config)?, storage.clone());

    match cli.command {
        Command::Serve {
            addr,
            interval_secs,
        } => {
            let state = Arc::new(AppState::new(scraper));
            if let Some(secs) = interval_secs.filter(|secs| *secs > 0) {
                info!("Scraping all pages every {}s", secs);
                tokio::spawn(run_scheduler(state.clone(), Duration::from_secs(secs)));
            }
            api::serve(addr, api::create_app(state)).await?;
        }
        Command::Scrape { page, all } => scrape_once(&scraper, page, all).await?,
        Command::List { limit } => {
            for article in ArticleQuery::new(storage).most_recent(limit).await? {
                println!("[{}] {}\n    {}", article.id, article.title, article.link);
            }
        }
        Command::Count => println!("{}", storage.count().await?),
        Command::Stats => println!("{}", ArticleQuery::new(storage).stats_summary().await?),
        Command::Purge => {
            let deleted = scraper.delete_all().await?;
            println!("Deleted {} articles", deleted);
        }
    }

    Ok(())
}
