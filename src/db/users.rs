use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::common::ProfileError;
use crate::log_err;
use crate::models::{User, UserCreate, UserIden, UserProfile, UserRole};

use super::db::Database;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Database {
    pub async fn add_user(
        &self,
        data: &UserCreate,
    ) -> Result<User, ProfileError> {
        let email = normalize_email(&data.email);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, full_name, role, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&email)
        .bind(data.full_name.trim())
        .bind(data.role.as_str())
        .bind(data.password_hash.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        match user {
            Some(u) => Ok(u),
            None => Err(ProfileError::AlreadyExists(email.into())),
        }
    }

    /// Sign-up. Always a new `user` account; an existing email, even one
    /// without a password, is `AlreadyExists`. Pre-created profiles are
    /// activated through the password reset flow.
    pub async fn register_user(
        &self,
        email: &str,
        full_name: &str,
        password_hash: &str,
    ) -> Result<User, ProfileError> {
        let email = normalize_email(email);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, full_name, role, password_hash)
            VALUES ($1, $2, 'user', $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&email)
        .bind(full_name.trim())
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        match user {
            Some(u) => Ok(u),
            None => Err(ProfileError::AlreadyExists(email.into())),
        }
    }

    pub async fn get_user(
        &self,
        data: &UserIden,
    ) -> Result<User, ProfileError> {
        let (id, email): (Option<Uuid>, Option<String>) = match data {
            UserIden::Id(id) => (Some(*id), None),
            UserIden::Email(email) => (None, Some(normalize_email(email))),
        };

        let result = sqlx::query_as::<_, User>(
            r#"SELECT * FROM users WHERE id = $1 OR email = $2"#,
        )
        .bind(id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        result.ok_or_else(|| ProfileError::NotFound(data.clone()))
    }

    pub async fn list_profiles(
        &self,
    ) -> Result<Vec<UserProfile>, ProfileError> {
        let profiles = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, email, full_name, role, protected, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }

    /// Refused for protected (seeded) accounts.
    pub async fn update_role(
        &self,
        id: Uuid,
        role: UserRole,
    ) -> Result<UserProfile, ProfileError> {
        let result = sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE users
            SET role = $1, edited_at = now()
            WHERE id = $2 AND NOT protected
            RETURNING id, email, full_name, role, protected, created_at
            "#,
        )
        .bind(role.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match result {
            Some(p) => Ok(p),
            None => match self.get_user(&id.into()).await? {
                u if u.protected => Err(ProfileError::Protected(id.into())),
                u => {
                    log_err!(self.pool, "role update affected no rows", (u.id, role));
                    Err(ProfileError::InvalidRequest(
                        "role update affected no rows".into(),
                    ))
                }
            },
        }
    }

    pub async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<User, ProfileError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET password_hash = $1, edited_at = now()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(ProfileError::NotFound(id.into()))
    }

    /// Upserts the configured super admin as a protected account.
    pub async fn seed_super_admin(
        &self,
        email: &str,
    ) -> Result<User, ProfileError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ProfileError::InvalidRequest(
                "super admin email is empty".into(),
            ));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, role, protected)
            VALUES ($1, 'super_admin', TRUE)
            ON CONFLICT (email) DO UPDATE
            SET role = 'super_admin', protected = TRUE, edited_at = now()
            RETURNING *
            "#,
        )
        .bind(&email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn create_password_reset(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ProfileError> {
        sqlx::query(
            r#"
            INSERT INTO password_resets (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Marks the token used and returns its user, if it was still valid.
    pub async fn consume_password_reset(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Uuid>, ProfileError> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE password_resets
            SET used_at = $2
            WHERE token = $1 AND used_at IS NULL AND expires_at > $2
            RETURNING user_id
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user_id)
    }
}
