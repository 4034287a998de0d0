use thiserror::Error;
use uuid::Uuid;

use crate::models::UserIden;

#[derive(Error, Debug)]
pub enum GeneralError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("User with {0} not found")]
    NotFound(UserIden),

    #[error("User with {0} already exists")]
    AlreadyExists(UserIden),

    #[error("User with {0} is protected and cannot be changed")]
    Protected(UserIden),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum SpaceError {
    #[error("Space {0} not found")]
    NotFound(Uuid),

    #[error("Space {0} still has bookings")]
    InUse(Uuid),

    #[error("Invalid space: {0}")]
    Invalid(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Booking {0} not found")]
    NotFound(Uuid),

    #[error("Space {0} does not exist")]
    UnknownSpace(Uuid),

    #[error("Invalid booking: {0}")]
    Invalid(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("Invalid submission: {0}")]
    Invalid(&'static str),

    #[error("Could not store lead: {0}")]
    Store(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Invalid webhook: {0}")]
    Invalid(&'static str),

    #[error("Webhook {0} not found")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
