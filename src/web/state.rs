use sqlx::PgPool;
use std::sync::Arc;

use venuedesk::config::AppConfig;
use venuedesk::services::integrations::IntegrationRegistry;
use venuedesk::services::tracking::ConversionTracker;
use venuedesk::services::webhooks::WebhookClient;

use crate::web::security::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub tracker: ConversionTracker,
    pub webhooks: WebhookClient,
    pub integrations: Arc<IntegrationRegistry>,
    pub rate_limiter: Arc<RateLimiter>,
}
