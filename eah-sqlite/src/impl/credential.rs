use crate::Db;
use eah_core::ports::CredentialStore;
use tracing::{Level, event};

impl CredentialStore for Db {
    type Error = sqlx::Error;

    async fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        sqlx::query_scalar::<_, String>("select value from credential where key = $1")
            .bind(key)
            .fetch_optional(&self.reader)
            .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        sqlx::query(
            r#"
            insert into
                credential (key, value)
            values
                ($1, $2)
            on conflict (key) do update set
                value = excluded.value,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.writer)
        .await?;

        // never log the value itself
        event!(Level::DEBUG, key, "stored credential");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, Self::Error> {
        let removed = sqlx::query("delete from credential where key = $1")
            .bind(key)
            .execute(&self.writer)
            .await?
            .rows_affected()
            > 0;

        event!(Level::DEBUG, key, removed, "removed credential");
        Ok(removed)
    }
}
