use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::common::SpaceError;
use crate::models::{Space, SpaceCreate, SpaceSummary};

use super::db::{FOREIGN_KEY_VIOLATION, has_code};

pub async fn list_spaces(pool: &PgPool) -> Result<Vec<Space>, sqlx::Error> {
    sqlx::query_as::<_, Space>(
        r#"
        SELECT *
        FROM spaces
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Catalog order, for the home page highlights.
pub async fn list_featured_spaces(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<Space>, sqlx::Error> {
    sqlx::query_as::<_, Space>(
        r#"
        SELECT *
        FROM spaces
        ORDER BY created_at ASC, name ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn list_space_summaries(
    pool: &PgPool,
) -> Result<Vec<SpaceSummary>, sqlx::Error> {
    sqlx::query_as::<_, SpaceSummary>(
        r#"
        SELECT id, name, space_type
        FROM spaces
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_space(pool: &PgPool, id: Uuid) -> Result<Option<Space>, sqlx::Error> {
    sqlx::query_as::<_, Space>(
        r#"
        SELECT *
        FROM spaces
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_space(pool: &PgPool, data: &SpaceCreate) -> Result<Space, SpaceError> {
    data.validate().map_err(SpaceError::Invalid)?;

    let space = insert_space(pool, data).await?;
    Ok(space)
}

async fn insert_space<'e, E>(executor: E, data: &SpaceCreate) -> Result<Space, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, Space>(
        r#"
        INSERT INTO spaces (
            name, description, capacity, price, space_type, image,
            gallery, video_url, features, availability, items_included
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(data.name.trim())
    .bind(&data.description)
    .bind(data.capacity)
    .bind(data.price)
    .bind(data.space_type.as_str())
    .bind(&data.image)
    .bind(&data.gallery)
    .bind(data.video_url.as_deref())
    .bind(&data.features)
    .bind(data.availability.as_deref())
    .bind(data.items_included.as_deref())
    .fetch_one(executor)
    .await
}

/// Full replacement of the editable fields.
pub async fn update_space(
    pool: &PgPool,
    id: Uuid,
    data: &SpaceCreate,
) -> Result<Space, SpaceError> {
    data.validate().map_err(SpaceError::Invalid)?;

    let space = sqlx::query_as::<_, Space>(
        r#"
        UPDATE spaces
        SET
            name = $1,
            description = $2,
            capacity = $3,
            price = $4,
            space_type = $5,
            image = $6,
            gallery = $7,
            video_url = $8,
            features = $9,
            availability = $10,
            items_included = $11,
            edited_at = now()
        WHERE id = $12
        RETURNING *
        "#,
    )
    .bind(data.name.trim())
    .bind(&data.description)
    .bind(data.capacity)
    .bind(data.price)
    .bind(data.space_type.as_str())
    .bind(&data.image)
    .bind(&data.gallery)
    .bind(data.video_url.as_deref())
    .bind(&data.features)
    .bind(data.availability.as_deref())
    .bind(data.items_included.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    space.ok_or(SpaceError::NotFound(id))
}

pub async fn delete_space(pool: &PgPool, id: Uuid) -> Result<(), SpaceError> {
    let result = sqlx::query(r#"DELETE FROM spaces WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .await;

    match result {
        Ok(r) if r.rows_affected() == 0 => Err(SpaceError::NotFound(id)),
        Ok(_) => Ok(()),
        Err(e) if has_code(&e, FOREIGN_KEY_VIOLATION) => Err(SpaceError::InUse(id)),
        Err(e) => Err(SpaceError::Database(e)),
    }
}

pub async fn count_spaces(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM spaces"#)
        .fetch_one(pool)
        .await
}

/// Drops every booking and space, then inserts `catalog`, all in one
/// transaction.
pub async fn replace_all_spaces(
    pool: &PgPool,
    catalog: &[SpaceCreate],
) -> Result<Vec<Space>, SpaceError> {
    for item in catalog {
        item.validate().map_err(SpaceError::Invalid)?;
    }

    let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

    sqlx::query(r#"DELETE FROM bookings"#)
        .execute(&mut *tx)
        .await?;
    sqlx::query(r#"DELETE FROM spaces"#)
        .execute(&mut *tx)
        .await?;

    let mut spaces = Vec::with_capacity(catalog.len());
    for item in catalog {
        spaces.push(insert_space(&mut *tx, item).await?);
    }

    tx.commit().await?;

    Ok(spaces)
}
