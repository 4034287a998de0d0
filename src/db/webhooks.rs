use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::WebhookError;
use crate::models::{WebhookConfig, WebhookEvent, validate_webhook_url};

pub async fn list_webhooks(pool: &PgPool) -> Result<Vec<WebhookConfig>, sqlx::Error> {
    sqlx::query_as::<_, WebhookConfig>(
        r#"
        SELECT *
        FROM webhooks
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn list_active_webhooks_for(
    pool: &PgPool,
    event: WebhookEvent,
) -> Result<Vec<WebhookConfig>, sqlx::Error> {
    sqlx::query_as::<_, WebhookConfig>(
        r#"
        SELECT *
        FROM webhooks
        WHERE active AND event = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(event.as_str())
    .fetch_all(pool)
    .await
}

pub async fn get_webhook(pool: &PgPool, id: Uuid) -> Result<WebhookConfig, WebhookError> {
    let hook = sqlx::query_as::<_, WebhookConfig>(r#"SELECT * FROM webhooks WHERE id = $1"#)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    hook.ok_or(WebhookError::NotFound(id))
}

pub async fn create_webhook(
    pool: &PgPool,
    url: &str,
    event: WebhookEvent,
) -> Result<WebhookConfig, WebhookError> {
    validate_webhook_url(url).map_err(WebhookError::Invalid)?;

    let hook = sqlx::query_as::<_, WebhookConfig>(
        r#"
        INSERT INTO webhooks (url, event)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(url.trim())
    .bind(event.as_str())
    .fetch_one(pool)
    .await?;

    Ok(hook)
}

pub async fn set_webhook_active(
    pool: &PgPool,
    id: Uuid,
    active: bool,
) -> Result<WebhookConfig, WebhookError> {
    let hook = sqlx::query_as::<_, WebhookConfig>(
        r#"
        UPDATE webhooks
        SET active = $1
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(active)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    hook.ok_or(WebhookError::NotFound(id))
}

pub async fn touch_webhook(
    pool: &PgPool,
    id: Uuid,
    at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(r#"UPDATE webhooks SET last_triggered = $1 WHERE id = $2"#)
        .bind(at)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn delete_webhook(pool: &PgPool, id: Uuid) -> Result<(), WebhookError> {
    let result = sqlx::query(r#"DELETE FROM webhooks WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(WebhookError::NotFound(id));
    }

    Ok(())
}
