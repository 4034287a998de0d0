use actix_web::{HttpRequest, Responder, get, post, web};
use uuid::Uuid;

use venuedesk::db;
use venuedesk::models::LeadStatus;
use venuedesk::services::dashboard::DashboardData;

use crate::web::forms::{LeadStatusForm, LeadsQuery, parse_opt};
use crate::web::helpers::{
    admin_shell, error_redirect, flash_from, ok_redirect, render, require_staff,
};
use crate::web::state::AppState;
use crate::web::templates::{AdminLeadsTemplate, LeadColumn};

const BASE: &str = "/painel-admin/leads";

#[get("/painel-admin/leads")]
pub async fn leads(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<LeadsQuery>,
) -> impl Responder {
    let user = match require_staff(&state.pool, &req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let data = DashboardData::load(&state.pool).await;

    let columns = LeadStatus::ALL
        .into_iter()
        .map(|status| LeadColumn {
            status,
            leads: data.leads_with(status).cloned().collect(),
        })
        .collect();

    let selected_id: Option<Uuid> = parse_opt(&query.lead);
    let selected = selected_id.and_then(|id| data.leads.iter().find(|l| l.id == id).cloned());

    render(AdminLeadsTemplate {
        shell: admin_shell(
            user,
            "leads",
            flash_from(query.ok.as_deref(), query.erro.as_deref()),
            &data.site_config,
        ),
        columns,
        statuses: LeadStatus::ALL,
        selected,
    })
}

#[post("/painel-admin/leads/{id}/status")]
pub async fn update_status(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<LeadStatusForm>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    let id = path.into_inner();
    let back = format!("{}?lead={}", BASE, id);

    let Ok(status) = form.status.parse::<LeadStatus>() else {
        return error_redirect(&back, "invalid_status");
    };

    match db::update_lead_status(&state.pool, id, status).await {
        Ok(Some(lead)) => {
            log::info!("lead {} moved to {}", lead.id, lead.status);
            ok_redirect(&back, "lead_updated")
        }
        Ok(None) => error_redirect(BASE, "not_found"),
        Err(e) => {
            log::error!("lead {} status update failed: {}", id, e);
            error_redirect(&back, "db")
        }
    }
}

#[post("/painel-admin/leads/{id}/excluir")]
pub async fn delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    let id = path.into_inner();
    match db::delete_lead(&state.pool, id).await {
        Ok(true) => ok_redirect(BASE, "lead_deleted"),
        Ok(false) => error_redirect(BASE, "not_found"),
        Err(e) => {
            log::error!("lead {} delete failed: {}", id, e);
            error_redirect(BASE, "db")
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(leads).service(update_status).service(delete);
}
