use crate::{utils, Article, NewArticle, ScraperError, Storage, Table};
use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub struct ArticleTable {
    name: String,
    pool: SqlitePool,
}

#[async_trait::async_trait]
impl Table for ArticleTable {
    type Record<'a> = &'a NewArticle;

    fn get_name(&self) -> &str {
        self.name.as_str()
    }

    fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create(&self) -> Result<(), sqlx::Error> {
        if !utils::is_table_exists(self.get_pool(), &self.name).await? {
            let query = format!(
                r#"
                        CREATE TABLE {} (
                            id INTEGER PRIMARY KEY AUTOINCREMENT,
                            title TEXT NOT NULL,
                            link TEXT NOT NULL,
                            description TEXT NOT NULL,
                            authors TEXT NOT NULL,
                            created_at DATETIME NOT NULL
                        )
                    "#,
                &self.name
            );
            sqlx::query(query.as_str()).execute(self.get_pool()).await?;
        }
        Ok(())
    }

    async fn insert<'a>(&self, record: Self::Record<'a>) -> Result<i64, sqlx::Error> {
        let mut tx = self.get_pool().begin().await?;
        let query = format!(
            r#"INSERT INTO {} (
                title,
                link,
                description,
                authors,
                created_at) VALUES (?, ?, ?, ?, ?)"#,
            self.name
        );
        let id = sqlx::query(&query)
            .bind(record.title.as_str())
            .bind(record.link.as_str())
            .bind(record.description.as_str())
            .bind(record.authors.as_str())
            .bind(record.created_at)
            .execute(&mut tx)
            .await?
            .last_insert_rowid();
        tx.commit().await?;
        Ok(id)
    }
}

impl ArticleTable {
    pub async fn fetch_by_recency(&self) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT id, title, link, description, authors, created_at FROM {} ORDER BY created_at DESC, id DESC",
            self.name
        );
        let mut articles = vec![];
        let mut rows = sqlx::query_as::<_, Article>(&query).fetch(self.get_pool());
        while let Some(article) = rows.try_next().await? {
            articles.push(article);
        }
        Ok(articles)
    }

    pub async fn fetch_by_id(&self, limit: usize) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT id, title, link, description, authors, created_at FROM {} ORDER BY id ASC LIMIT ?",
            self.name
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(self.get_pool())
            .await
    }

    /// Keeps the oldest row of every title and deletes the rest.
    pub async fn delete_duplicate_titles(&self) -> Result<u64, sqlx::Error> {
        let query = format!(
            "DELETE FROM {0} WHERE id NOT IN (SELECT MIN(id) FROM {0} GROUP BY title)",
            self.name
        );
        Ok(sqlx::query(&query)
            .execute(self.get_pool())
            .await?
            .rows_affected())
    }
}

pub struct NatureData {
    pub articles: ArticleTable,
}

impl NatureData {
    /// Opens (or creates) the database file at `path`.
    pub async fn new(path: &str) -> Result<NatureData, ScraperError> {
        let opt = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(opt).await?;
        Self::with_pool(pool).await
    }

    /// A private database that lives as long as the returned value.
    pub async fn in_memory() -> Result<NatureData, ScraperError> {
        let opt = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<NatureData, ScraperError> {
        let p = NatureData {
            articles: ArticleTable {
                name: "news_articles".to_string(),
                pool,
            },
        };

        if !utils::is_table_exists(p.articles.get_pool(), p.articles.get_name()).await? {
            tracing::debug!("Create table {}", p.articles.get_name());
            p.articles.create().await?;
        } else {
            tracing::debug!("Use table {}", p.articles.get_name());
        }

        Ok(p)
    }

    pub async fn delete_duplicate_titles(&self) -> Result<u64, ScraperError> {
        Ok(self.articles.delete_duplicate_titles().await?)
    }
}

#[async_trait::async_trait]
impl Storage for NatureData {
    async fn insert(&self, article: NewArticle) -> Result<Article, ScraperError> {
        let article = article.bounded();
        let id = self.articles.insert(&article).await?;
        Ok(article.into_article(id))
    }

    async fn exists_by_title(&self, title: &str) -> Result<bool, ScraperError> {
        Ok(self.articles.is_exist_by("title", title).await?)
    }

    async fn count(&self) -> Result<u64, ScraperError> {
        Ok(self.articles.count().await?)
    }

    async fn delete_all(&self) -> Result<u64, ScraperError> {
        Ok(self.articles.delete_all().await?)
    }

    async fn find_all_by_recency(&self) -> Result<Vec<Article>, ScraperError> {
        Ok(self.articles.fetch_by_recency().await?)
    }

    async fn find_first_inserted(&self, limit: usize) -> Result<Vec<Article>, ScraperError> {
        Ok(self.articles.fetch_by_id(limit).await?)
    }
}
