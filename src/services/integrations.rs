use chrono::NaiveDate;
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::models::{ApiKey, ApiLog};

/// Most recent delivery logs kept in memory.
pub const API_LOG_CAPACITY: usize = 50;

const KEY_PREFIX: &str = "apcef_live_";

/// A freshly generated key. `secret` is never stored.
#[derive(Debug, Clone)]
pub struct GeneratedKey {
    pub key: ApiKey,
    pub secret: String,
}

pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// API keys and delivery logs. Process-local; both are lost on restart.
#[derive(Default)]
pub struct IntegrationRegistry {
    keys: Mutex<Vec<ApiKey>>,
    logs: Mutex<VecDeque<ApiLog>>,
}

impl IntegrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_key(&self, name: &str, today: NaiveDate) -> GeneratedKey {
        let mut bytes = [0u8; 24];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let secret = format!("{}{}", KEY_PREFIX, hex::encode(bytes));

        let name = match name.trim() {
            "" => "Nova Chave",
            n => n,
        };

        let key = ApiKey {
            id: Uuid::new_v4(),
            name: name.to_string(),
            prefix: format!("{}...", &secret[..KEY_PREFIX.len() + 6]),
            secret_hash: hash_secret(&secret),
            created: today,
            last_used: None,
        };

        if let Ok(mut keys) = self.keys.lock() {
            keys.push(key.clone());
        }

        GeneratedKey { key, secret }
    }

    pub fn keys(&self) -> Vec<ApiKey> {
        self.keys.lock().map(|k| k.clone()).unwrap_or_default()
    }

    /// Returns whether a key was removed.
    pub fn revoke_key(&self, id: Uuid) -> bool {
        let Ok(mut keys) = self.keys.lock() else {
            return false;
        };
        let before = keys.len();
        keys.retain(|k| k.id != id);
        keys.len() != before
    }

    pub fn record(&self, log: ApiLog) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.push_front(log);
            logs.truncate(API_LOG_CAPACITY);
        }
    }

    /// Newest first.
    pub fn logs(&self) -> Vec<ApiLog> {
        self.logs
            .lock()
            .map(|l| l.iter().cloned().collect())
            .unwrap_or_default()
    }
}
