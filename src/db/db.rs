use sqlx::postgres::{PgPool, PgPoolOptions};

use std::time::Duration;

use crate::common::GeneralError;

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, GeneralError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Postgres SQLSTATE for a foreign key violation.
pub(crate) const FOREIGN_KEY_VIOLATION: &str = "23503";

pub(crate) fn has_code(err: &sqlx::Error, code: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(code)
        }
        _ => false,
    }
}
