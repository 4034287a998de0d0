use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Lead, LeadCreate, LeadStatus};

pub async fn create_lead(pool: &PgPool, data: &LeadCreate) -> Result<Lead, sqlx::Error> {
    sqlx::query_as::<_, Lead>(
        r#"
        INSERT INTO leads (name, email, phone, interest, date, status, source)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(data.name.trim())
    .bind(data.email.trim())
    .bind(data.phone.trim())
    .bind(&data.interest)
    .bind(data.date)
    .bind(data.status.as_str())
    .bind(data.source.as_deref())
    .fetch_one(pool)
    .await
}

pub async fn list_leads(pool: &PgPool) -> Result<Vec<Lead>, sqlx::Error> {
    sqlx::query_as::<_, Lead>(
        r#"
        SELECT *
        FROM leads
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn list_leads_by_email(pool: &PgPool, email: &str) -> Result<Vec<Lead>, sqlx::Error> {
    sqlx::query_as::<_, Lead>(
        r#"
        SELECT *
        FROM leads
        WHERE lower(email) = lower($1)
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .bind(email.trim())
    .fetch_all(pool)
    .await
}

pub async fn get_lead(pool: &PgPool, id: Uuid) -> Result<Option<Lead>, sqlx::Error> {
    sqlx::query_as::<_, Lead>(r#"SELECT * FROM leads WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_lead_status(
    pool: &PgPool,
    id: Uuid,
    status: LeadStatus,
) -> Result<Option<Lead>, sqlx::Error> {
    sqlx::query_as::<_, Lead>(
        r#"
        UPDATE leads
        SET status = $1
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was removed.
pub async fn delete_lead(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM leads WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
