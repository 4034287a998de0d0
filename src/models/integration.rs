use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API key metadata kept in process memory. The secret itself is only
/// shown once, at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: Uuid,
    pub name: String,
    pub prefix: String,
    #[serde(skip_serializing)]
    pub secret_hash: String,
    pub created: NaiveDate,
    pub last_used: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiLog {
    pub id: Uuid,
    pub endpoint: String,
    pub method: String,
    pub status: u16,
    pub timestamp: DateTime<Utc>,
    pub latency_ms: u64,
}

impl ApiKey {
    pub fn last_used_label(&self) -> String {
        match self.last_used {
            Some(t) => t.format("%d/%m/%Y %H:%M").to_string(),
            None => "Nunca".to_string(),
        }
    }
}

impl ApiLog {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}
