use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use uuid::Uuid;

use venuedesk::common::WebhookError;
use venuedesk::db;
use venuedesk::models::{User, WebhookEvent};
use venuedesk::services::dashboard::DashboardData;

use crate::web::forms::{ApiKeyForm, FlashQuery, WebhookForm, parse_opt};
use crate::web::helpers::{
    admin_shell, error_redirect, ok_redirect, render, require_staff, today,
};
use crate::web::state::AppState;
use crate::web::templates::{AdminIntegrationsTemplate, Flash};

const BASE: &str = "/painel-admin/integracoes";

async fn render_page(
    state: &AppState,
    user: User,
    flash: Option<Flash>,
    new_secret: Option<String>,
) -> HttpResponse {
    let data = DashboardData::load(&state.pool).await;

    render(AdminIntegrationsTemplate {
        shell: admin_shell(user, "integrations", flash, &data.site_config),
        keys: state.integrations.keys(),
        new_secret,
        webhooks: data.webhooks,
        events: WebhookEvent::ALL,
        logs: state.integrations.logs(),
    })
}

fn webhook_failed(e: WebhookError) -> HttpResponse {
    match e {
        WebhookError::Invalid(msg) => error_redirect(BASE, msg),
        WebhookError::NotFound(_) => error_redirect(BASE, "not_found"),
        WebhookError::Database(e) => {
            log::error!("webhook write failed: {}", e);
            error_redirect(BASE, "db")
        }
    }
}

#[get("/painel-admin/integracoes")]
pub async fn integrations(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<FlashQuery>,
) -> impl Responder {
    let user = match require_staff(&state.pool, &req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    render_page(&state, user, query.flash(), None).await
}

/// Rendered directly: the secret is shown once and never stored in clear.
#[post("/painel-admin/integracoes/chaves")]
pub async fn generate_key(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ApiKeyForm>,
) -> impl Responder {
    let user = match require_staff(&state.pool, &req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let generated = state.integrations.generate_key(&form.name, today());
    log::info!("{} generated API key {}", user.email, generated.key.prefix);

    let flash = Flash {
        success: true,
        text: "Chave gerada. Copie agora: ela não será exibida novamente.".to_string(),
    };
    render_page(&state, user, Some(flash), Some(generated.secret)).await
}

#[post("/painel-admin/integracoes/chaves/{id}/revogar")]
pub async fn revoke_key(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    if state.integrations.revoke_key(path.into_inner()) {
        ok_redirect(BASE, "key_revoked")
    } else {
        error_redirect(BASE, "not_found")
    }
}

#[post("/painel-admin/integracoes/webhooks")]
pub async fn create_webhook(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<WebhookForm>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    let event: WebhookEvent = parse_opt(&form.event).unwrap_or_default();

    match db::create_webhook(&state.pool, &form.url, event).await {
        Ok(hook) => {
            log::info!("webhook {} registered for {}", hook.url, hook.event);
            ok_redirect(BASE, "webhook_saved")
        }
        Err(e) => webhook_failed(e),
    }
}

#[post("/painel-admin/integracoes/webhooks/{id}/alternar")]
pub async fn toggle_webhook(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    let id = path.into_inner();
    let hook = match db::get_webhook(&state.pool, id).await {
        Ok(h) => h,
        Err(e) => return webhook_failed(e),
    };

    match db::set_webhook_active(&state.pool, id, !hook.active).await {
        Ok(_) => ok_redirect(BASE, "webhook_updated"),
        Err(e) => webhook_failed(e),
    }
}

#[post("/painel-admin/integracoes/webhooks/{id}/excluir")]
pub async fn delete_webhook(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    match db::delete_webhook(&state.pool, path.into_inner()).await {
        Ok(()) => ok_redirect(BASE, "webhook_deleted"),
        Err(e) => webhook_failed(e),
    }
}

/// Delivers the sample lead and waits for the answer so the log shows
/// status and latency.
#[post("/painel-admin/integracoes/webhooks/{id}/testar")]
pub async fn test_webhook(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    let hook = match db::get_webhook(&state.pool, path.into_inner()).await {
        Ok(h) => h,
        Err(e) => return webhook_failed(e),
    };

    let log_entry = state.webhooks.send_test(&state.pool, &hook).await;
    let success = log_entry.is_success();
    state.integrations.record(log_entry);

    if success {
        ok_redirect(BASE, "webhook_sent")
    } else {
        error_redirect(BASE, "webhook_failed")
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(integrations)
        .service(generate_key)
        .service(revoke_key)
        .service(create_webhook)
        .service(toggle_webhook)
        .service(delete_webhook)
        .service(test_webhook);
}
