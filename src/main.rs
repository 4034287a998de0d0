mod web;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use env_logger::Env;

use std::sync::Arc;

use venuedesk::config::AppConfig;
use venuedesk::db::Database;
use venuedesk::services::integrations::IntegrationRegistry;
use venuedesk::services::tracking::ConversionTracker;
use venuedesk::services::webhooks::WebhookClient;

use web::middleware::SecurityHeaders;
use web::security::RateLimiter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().expect("invalid configuration");
    let db = Database::new(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database / run migrations");

    if let Some(email) = config.super_admin_email.as_deref() {
        match db.seed_super_admin(email).await {
            Ok(u) => log::info!("super admin {} ensured", u.email),
            Err(e) => log::error!("could not seed super admin: {}", e),
        }
    }

    let client = reqwest::Client::builder()
        .timeout(config.outbound_timeout)
        .build()
        .expect("Failed to build HTTP client");

    let state = Data::new(web::AppState {
        pool: db.pool.clone(),
        tracker: ConversionTracker::new(client.clone(), config.conversion_api_base.clone()),
        webhooks: WebhookClient::new(
            client,
            config.lead_webhook_url.clone(),
            config.contact_webhook_url.clone(),
        ),
        integrations: Arc::new(IntegrationRegistry::new()),
        rate_limiter: Arc::new(RateLimiter::new()),
        config: Arc::new(config.clone()),
    });

    log::info!("listening on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SecurityHeaders)
            .wrap(Logger::default())
            .configure(web::handlers::configure)
            .service(Files::new("/static", "./static").prefer_utf8(true))
            .default_service(actix_web::web::to(web::handlers::redirects::fallback))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
