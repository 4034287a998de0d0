pub mod admin_calendar;
pub mod admin_cms;
pub mod admin_integrations;
pub mod admin_leads;
pub mod admin_overview;
pub mod admin_users;
pub mod auth;
pub mod client;
pub mod public;
pub mod redirects;

use actix_web::web;

/// Every route except the fallback, which `main` installs as the default
/// service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    public::configure(cfg);
    auth::configure(cfg);
    client::configure(cfg);
    admin_overview::configure(cfg);
    admin_calendar::configure(cfg);
    admin_leads::configure(cfg);
    admin_cms::configure(cfg);
    admin_users::configure(cfg);
    admin_integrations::configure(cfg);
    redirects::configure(cfg);
}
