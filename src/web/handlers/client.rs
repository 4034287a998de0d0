use actix_web::{HttpRequest, Responder, get, web};

use venuedesk::db;

use crate::web::helpers::{load_site_config, page_meta, render, require_signed_in};
use crate::web::state::AppState;
use crate::web::templates::ClientDashboardTemplate;

/// The signed-in user's reservation requests, matched by email.
#[get("/painel-cliente")]
pub async fn dashboard(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let user = match require_signed_in(&state.pool, &req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let leads = db::list_leads_by_email(&state.pool, &user.email)
        .await
        .unwrap_or_else(|e| {
            log::error!("client dashboard: leads for {}: {}", user.id, e);
            Vec::new()
        });

    let site = load_site_config(&state.pool).await;

    render(ClientDashboardTemplate {
        meta: page_meta(&state, &req, site, Some("Minhas Reservas"), None),
        user,
        leads,
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard);
}
