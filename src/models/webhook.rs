use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[sqlx(type_name = "text")]
pub enum WebhookEvent {
    #[default]
    #[sqlx(rename = "booking.created")]
    #[serde(rename = "booking.created")]
    BookingCreated,
    #[sqlx(rename = "booking.cancelled")]
    #[serde(rename = "booking.cancelled")]
    BookingCancelled,
    #[sqlx(rename = "booking.updated")]
    #[serde(rename = "booking.updated")]
    BookingUpdated,
}

impl WebhookEvent {
    pub const ALL: [WebhookEvent; 3] = [
        Self::BookingCreated,
        Self::BookingCancelled,
        Self::BookingUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookingCreated => "booking.created",
            Self::BookingCancelled => "booking.cancelled",
            Self::BookingUpdated => "booking.updated",
        }
    }
}

impl std::fmt::Display for WebhookEvent {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for WebhookEvent {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for WebhookEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "booking.created" => Ok(Self::BookingCreated),
            "booking.cancelled" => Ok(Self::BookingCancelled),
            "booking.updated" => Ok(Self::BookingUpdated),
            _ => Err(format!("invalid webhook event: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WebhookConfig {
    pub id: Uuid,
    pub url: String,
    pub event: WebhookEvent,
    pub active: bool,
    pub last_triggered: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl WebhookConfig {
    pub fn last_triggered_label(&self) -> String {
        match self.last_triggered {
            Some(t) => t.format("%d/%m/%Y %H:%M:%S").to_string(),
            None => "Nunca".to_string(),
        }
    }
}

/// Accepts only absolute http(s) URLs with a host.
pub fn validate_webhook_url(url: &str) -> Result<(), &'static str> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or("A URL deve começar com http:// ou https://")?;

    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err("URL inválida.");
    }

    Ok(())
}
