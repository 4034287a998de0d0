//! Analytics tags and the server-side conversion API.
//!
//! Every page builds a [`TrackingConfig`] from the loaded site settings and
//! hands it to [`ConversionTracker::track`] together with the event. The
//! returned [`ClientTags`] are rendered into the page; the conversion API
//! call, when configured, runs on a spawned task and never blocks the
//! response.

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value, json};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::common::is_safe_identifier;
use crate::models::SiteConfig;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TrackingEvent {
    PageView,
    ViewContent,
    Lead,
    Contact,
    Purchase,
}

impl TrackingEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageView => "PageView",
            Self::ViewContent => "ViewContent",
            Self::Lead => "Lead",
            Self::Contact => "Contact",
            Self::Purchase => "Purchase",
        }
    }
}

impl std::fmt::Display for TrackingEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracking identifiers for one request. Anything that is not a plain
/// identifier counts as not configured.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TrackingConfig {
    pub analytics_id: Option<String>,
    pub pixel_id: Option<String>,
    pub access_token: Option<String>,
}

impl From<&SiteConfig> for TrackingConfig {
    fn from(config: &SiteConfig) -> Self {
        let safe = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|v| is_safe_identifier(v))
                .map(str::to_string)
        };

        Self {
            analytics_id: safe(&config.google_analytics_id),
            pixel_id: safe(&config.facebook_pixel_id),
            access_token: config
                .facebook_access_token
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }
}

impl TrackingConfig {
    pub fn conversion_api_enabled(&self) -> bool {
        self.pixel_id.is_some() && self.access_token.is_some()
    }
}

/// Personal data attached to a conversion. Sent hashed only.
#[derive(Debug, Clone, Default)]
pub struct UserData {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub external_id: Option<String>,
}

/// Request facts the conversion API wants alongside the event.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub user_agent: Option<String>,
    pub fbp: Option<String>,
    pub fbc: Option<String>,
    pub source_url: Option<String>,
}

/// Lowercase hex SHA-256 of the trimmed, lowercased value. `None` when
/// nothing is left after trimming.
pub fn hash_field(value: &str) -> Option<String> {
    let normalized = value.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    Some(hex::encode(hasher.finalize()))
}

/// First token is the first name; the remaining tokens, single-spaced,
/// are the last name.
pub fn split_full_name(full_name: &str) -> (Option<String>, Option<String>) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().map(str::to_string);
    let rest: Vec<&str> = parts.collect();
    let last = (!rest.is_empty()).then(|| rest.join(" "));
    (first, last)
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HashedUserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub em: Option<[String; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ph: Option<[String; 1]>,
    #[serde(rename = "fn", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<[String; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ln: Option<[String; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ct: Option<[String; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub st: Option<[String; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zp: Option<[String; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<[String; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<[String; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fbp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fbc: Option<String>,
}

impl HashedUserData {
    pub fn new(user: &UserData, ctx: &RequestContext) -> Self {
        let hashed = |v: &Option<String>| v.as_deref().and_then(hash_field).map(|h| [h]);

        let (mut first, mut last) = (user.first_name.clone(), user.last_name.clone());
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        if blank(&first) && blank(&last) {
            if let Some(full) = user.full_name.as_deref() {
                (first, last) = split_full_name(full);
            }
        }

        let present = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            em: hashed(&user.email),
            ph: hashed(&user.phone),
            first_name: hashed(&first),
            ln: hashed(&last),
            ct: hashed(&user.city),
            st: hashed(&user.state),
            zp: hashed(&user.zip),
            country: hashed(&user.country),
            external_id: hashed(&user.external_id),
            client_user_agent: present(&ctx.user_agent),
            fbp: present(&ctx.fbp),
            fbc: present(&ctx.fbc),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerEvent {
    pub event_name: &'static str,
    pub event_time: i64,
    pub event_id: String,
    pub action_source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_source_url: Option<String>,
    pub user_data: HashedUserData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionPayload {
    pub data: Vec<ServerEvent>,
}

pub fn build_conversion_payload(
    event: TrackingEvent,
    event_id: &str,
    event_time: i64,
    params: &Value,
    user: &UserData,
    ctx: &RequestContext,
) -> ConversionPayload {
    ConversionPayload {
        data: vec![ServerEvent {
            event_name: event.as_str(),
            event_time,
            event_id: event_id.to_string(),
            action_source: "website",
            event_source_url: ctx.source_url.clone(),
            user_data: HashedUserData::new(user, ctx),
            custom_data: (!params.is_null()).then(|| params.clone()),
        }],
    }
}

pub fn conversion_url(base: &str, pixel_id: &str, access_token: &str) -> String {
    format!(
        "{}/{}/events?access_token={}",
        base.trim_end_matches('/'),
        pixel_id,
        urlencoding::encode(access_token)
    )
}

/// JSON safe to inline inside a `<script>` element.
pub fn script_json(value: &Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// One event to replay in the browser.
#[derive(Debug, Clone)]
pub struct ClientEvent {
    pub event: TrackingEvent,
    pub event_id: String,
    pub params: Value,
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        self.event.as_str()
    }

    /// Tag-manager params: the event params plus `event_id`.
    pub fn gtag_params(&self) -> String {
        let mut map = match &self.params {
            Value::Object(m) => m.clone(),
            _ => Map::new(),
        };
        map.insert("event_id".into(), Value::String(self.event_id.clone()));
        script_json(&Value::Object(map))
    }

    /// Pixel params. PageView is always tracked with none.
    pub fn pixel_params(&self) -> String {
        match (self.event, &self.params) {
            (TrackingEvent::PageView, _) | (_, Value::Null) => "{}".to_string(),
            (_, params) => script_json(params),
        }
    }

    pub fn pixel_options(&self) -> String {
        script_json(&json!({ "eventID": self.event_id }))
    }
}

/// Script tags for the page head.
#[derive(Debug, Clone, Default)]
pub struct ClientTags {
    pub analytics_id: Option<String>,
    pub pixel_id: Option<String>,
    pub events: Vec<ClientEvent>,
}

impl ClientTags {
    pub fn is_empty(&self) -> bool {
        self.analytics_id.is_none() && self.pixel_id.is_none()
    }

    pub fn extend(&mut self, other: ClientTags) {
        if self.analytics_id.is_none() {
            self.analytics_id = other.analytics_id;
        }
        if self.pixel_id.is_none() {
            self.pixel_id = other.pixel_id;
        }
        self.events.extend(other.events);
    }
}

#[derive(Clone)]
pub struct ConversionTracker {
    client: reqwest::Client,
    base_url: String,
}

impl ConversionTracker {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn track(
        &self,
        config: &TrackingConfig,
        event: TrackingEvent,
        params: Value,
        user: &UserData,
        ctx: &RequestContext,
    ) -> ClientTags {
        let event_id = Uuid::new_v4().to_string();
        let event_time = Utc::now().timestamp();

        if let (Some(pixel), Some(token)) = (&config.pixel_id, &config.access_token) {
            let payload =
                build_conversion_payload(event, &event_id, event_time, &params, user, ctx);
            let url = conversion_url(&self.base_url, pixel, token);
            self.spawn_send(url, payload);
        }

        let mut tags = ClientTags {
            analytics_id: config.analytics_id.clone(),
            pixel_id: config.pixel_id.clone(),
            events: Vec::new(),
        };

        if !tags.is_empty() {
            tags.events.push(ClientEvent {
                event,
                event_id,
                params,
            });
        }

        tags
    }

    fn spawn_send(&self, url: String, payload: ConversionPayload) {
        let client = self.client.clone();
        let event_name = payload.data.first().map(|e| e.event_name).unwrap_or("");

        tokio::spawn(async move {
            let response = match client.post(&url).json(&payload).send().await {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("conversion api {}: network error: {}", event_name, e);
                    return;
                }
            };

            let status = response.status();
            let body: Value = response.json().await.unwrap_or(Value::Null);

            if !status.is_success() {
                log::warn!("conversion api {}: status {}: {}", event_name, status, body);
            } else if let Some(err) = body.get("error") {
                log::warn!("conversion api {}: {}", event_name, err);
            } else {
                log::debug!("conversion api {}: {}", event_name, body);
            }
        });
    }
}
