use sqlx::{Row, SqlitePool};

#[async_trait::async_trait]
pub trait Table {
    type Record<'a>;

    fn get_name(&self) -> &str;
    fn get_pool(&self) -> &SqlitePool;

    async fn create(&self) -> Result<(), sqlx::Error>;

    /// Inserts one record and returns its row id.
    async fn insert<'a>(&self, record: Self::Record<'a>) -> Result<i64, sqlx::Error>;

    async fn is_exist_by<I: AsRef<str> + Send + Sync>(
        &self,
        column: &str,
        value: I,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT id FROM {} WHERE {} = ? LIMIT 1",
            self.get_name(),
            column
        );
        Ok(sqlx::query(&query)
            .bind(value.as_ref())
            .fetch_optional(self.get_pool())
            .await?
            .is_some())
    }

    async fn delete_all(&self) -> Result<u64, sqlx::Error> {
        let query = format!("DELETE FROM {}", self.get_name());
        Ok(sqlx::query(&query)
            .execute(self.get_pool())
            .await?
            .rows_affected())
    }

    async fn count(&self) -> Result<u64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM {}", self.get_name());
        let count: i64 = sqlx::query(&query)
            .fetch_one(self.get_pool())
            .await?
            .try_get(0)?;
        Ok(count as u64)
    }
}
