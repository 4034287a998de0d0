use chrono::Utc;
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

use std::time::Instant;

use crate::db;
use crate::models::{ApiLog, Booking, WebhookConfig, WebhookEvent};

use super::leads::{LeadNotifier, LeadTarget};

/// Outbound JSON posts: the fixed lead/contact hooks and the webhooks
/// registered in the admin panel.
#[derive(Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    lead_url: Option<String>,
    contact_url: Option<String>,
}

impl WebhookClient {
    pub fn new(
        client: reqwest::Client,
        lead_url: Option<String>,
        contact_url: Option<String>,
    ) -> Self {
        Self {
            client,
            lead_url,
            contact_url,
        }
    }

    pub fn url_for(&self, target: LeadTarget) -> Option<&str> {
        match target {
            LeadTarget::Reservation => self.lead_url.as_deref(),
            LeadTarget::Contact => self.contact_url.as_deref(),
        }
    }

    fn spawn_post(&self, url: String, body: Value) {
        let client = self.client.clone();

        tokio::spawn(async move {
            match client.post(&url).json(&body).send().await {
                Ok(r) if r.status().is_success() => {
                    log::debug!("webhook {} delivered", url);
                }
                Ok(r) => log::warn!("webhook {} answered {}", url, r.status()),
                Err(e) => log::warn!("webhook {} failed: {}", url, e),
            }
        });
    }

    /// Posts `{event, timestamp, data}` to every active webhook registered
    /// for `event`, in the background.
    pub fn dispatch_booking_event(&self, pool: &PgPool, event: WebhookEvent, booking: &Booking) {
        let client = self.clone();
        let pool = pool.clone();
        let body = booking_event_payload(event, booking);

        tokio::spawn(async move {
            let hooks = match db::list_active_webhooks_for(&pool, event).await {
                Ok(h) => h,
                Err(e) => {
                    log::warn!("could not load webhooks for {}: {}", event, e);
                    return;
                }
            };

            for hook in hooks {
                if let Err(e) = db::touch_webhook(&pool, hook.id, Utc::now()).await {
                    log::warn!("could not update webhook {}: {}", hook.id, e);
                }
                client.spawn_post(hook.url, body.clone());
            }
        });
    }

    /// Sends the simulated lead to one webhook and waits for the answer.
    /// Network failures are reported as status 500.
    pub async fn send_test(&self, pool: &PgPool, hook: &WebhookConfig) -> ApiLog {
        let started = Instant::now();
        let result = self
            .client
            .post(&hook.url)
            .json(&test_payload())
            .send()
            .await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let status = match result {
            Ok(r) => r.status().as_u16(),
            Err(e) => {
                log::warn!("test webhook {} failed: {}", hook.url, e);
                500
            }
        };

        let now = Utc::now();
        if let Err(e) = db::touch_webhook(pool, hook.id, now).await {
            log::error!("could not update webhook {}: {}", hook.id, e);
        }

        ApiLog {
            id: Uuid::new_v4(),
            endpoint: hook.url.clone(),
            method: "POST".to_string(),
            status,
            timestamp: now,
            latency_ms,
        }
    }
}

impl LeadNotifier for WebhookClient {
    fn notify(&self, target: LeadTarget, payload: Value) {
        match self.url_for(target) {
            Some(url) => self.spawn_post(url.to_string(), payload),
            None => log::debug!("no webhook configured for {:?}", target),
        }
    }
}

pub fn booking_event_payload(event: WebhookEvent, booking: &Booking) -> Value {
    json!({
        "event": event.as_str(),
        "timestamp": Utc::now().to_rfc3339(),
        "data": booking,
    })
}

/// Complete fake lead for the "test" button.
pub fn test_payload() -> Value {
    let suffix = Uuid::new_v4().simple().to_string();

    json!({
        "event": "test_lead_simulation",
        "timestamp": Utc::now().to_rfc3339(),
        "data": {
            "id": format!("test_{}", &suffix[..9]),
            "name": "Fabrício Teste (Simulação)",
            "email": "teste.integracao@apcef.com.br",
            "phone": "(27) 99999-8888",
            "interest": "SIMULAÇÃO: Gostaria de orçar o Salão Nobre para um evento corporativo de 150 pessoas.",
            "date": Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            "status": "new",
            "source": "admin_panel_test_button",
            "meta": {
                "space_id": "space_123",
                "space_name": "Salão Nobre",
                "origin_url": "/painel-admin/integracoes"
            }
        }
    })
}
