use actix_web::{HttpRequest, Responder, get, post, web};
use uuid::Uuid;

use venuedesk::common::SpaceError;
use venuedesk::db;
use venuedesk::models::{SiteConfigUpdate, SpaceType};
use venuedesk::services::catalog::default_spaces;
use venuedesk::services::dashboard::DashboardData;

use crate::web::forms::{CmsQuery, SiteConfigForm, SpaceForm, parse_opt};
use crate::web::helpers::{
    admin_shell, error_redirect, flash_from, ok_redirect, render, require_staff,
};
use crate::web::state::AppState;
use crate::web::templates::{AdminCmsTemplate, SpaceEditor};

const CONFIG_TAB: &str = "/painel-admin/cms?aba=config";
const SPACES_TAB: &str = "/painel-admin/cms?aba=espacos";

#[get("/painel-admin/cms")]
pub async fn cms(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<CmsQuery>,
) -> impl Responder {
    let user = match require_staff(&state.pool, &req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let data = DashboardData::load(&state.pool).await;

    let editing: Option<Uuid> = parse_opt(&query.editar);
    let editor = match editing {
        Some(id) => data
            .spaces
            .iter()
            .find(|s| s.id == id)
            .map(SpaceEditor::edit),
        None if query.novo.is_some() => Some(SpaceEditor::new_space()),
        None => None,
    };

    let section = match query.aba.as_deref() {
        _ if editor.is_some() => "espacos",
        Some("espacos") => "espacos",
        _ => "config",
    };

    render(AdminCmsTemplate {
        shell: admin_shell(
            user,
            "cms",
            flash_from(query.ok.as_deref(), query.erro.as_deref()),
            &data.site_config,
        ),
        section,
        config: data.site_config,
        spaces: data.spaces,
        types: SpaceType::ALL,
        editor,
    })
}

#[post("/painel-admin/cms/config")]
pub async fn save_config(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<SiteConfigForm>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    let update = SiteConfigUpdate::from(form.into_inner());
    if let Err(msg) = update.validate() {
        return error_redirect(CONFIG_TAB, msg);
    }

    match db::update_site_config(&state.pool, update).await {
        Ok(_) => ok_redirect(CONFIG_TAB, "config_saved"),
        Err(e) => {
            log::error!("site settings update failed: {}", e);
            error_redirect(CONFIG_TAB, "db")
        }
    }
}

fn space_failed(e: SpaceError, back: &str) -> actix_web::HttpResponse {
    match e {
        SpaceError::Invalid(msg) => error_redirect(back, msg),
        SpaceError::NotFound(_) => error_redirect(SPACES_TAB, "not_found"),
        SpaceError::InUse(_) => error_redirect(SPACES_TAB, "space_in_use"),
        SpaceError::Database(e) => {
            log::error!("space write failed: {}", e);
            error_redirect(back, "db")
        }
    }
}

#[post("/painel-admin/cms/espacos")]
pub async fn create_space(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<SpaceForm>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    let back = format!("{}&novo=1", SPACES_TAB);
    let data = match form.to_create() {
        Ok(d) => d,
        Err(msg) => return error_redirect(&back, msg),
    };

    match db::create_space(&state.pool, &data).await {
        Ok(space) => {
            log::info!("space {} created", space.id);
            ok_redirect(SPACES_TAB, "space_saved")
        }
        Err(e) => space_failed(e, &back),
    }
}

#[post("/painel-admin/cms/espacos/{id}")]
pub async fn update_space(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<SpaceForm>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    let id = path.into_inner();
    let back = format!("{}&editar={}", SPACES_TAB, id);
    let data = match form.to_create() {
        Ok(d) => d,
        Err(msg) => return error_redirect(&back, msg),
    };

    match db::update_space(&state.pool, id, &data).await {
        Ok(_) => ok_redirect(SPACES_TAB, "space_saved"),
        Err(e) => space_failed(e, &back),
    }
}

#[post("/painel-admin/cms/espacos/{id}/excluir")]
pub async fn delete_space(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    let id = path.into_inner();
    match db::delete_space(&state.pool, id).await {
        Ok(()) => {
            log::info!("space {} deleted", id);
            ok_redirect(SPACES_TAB, "space_deleted")
        }
        Err(e) => space_failed(e, SPACES_TAB),
    }
}

/// Wipes bookings and spaces and loads the built-in catalog.
#[post("/painel-admin/cms/restaurar")]
pub async fn restore_defaults(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let user = match require_staff(&state.pool, &req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    match db::replace_all_spaces(&state.pool, &default_spaces()).await {
        Ok(spaces) => {
            log::warn!(
                "{} restored the default catalog ({} spaces)",
                user.email,
                spaces.len()
            );
            ok_redirect(SPACES_TAB, "spaces_restored")
        }
        Err(e) => space_failed(e, SPACES_TAB),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(cms)
        .service(save_config)
        .service(create_space)
        .service(delete_space)
        .service(update_space)
        .service(restore_defaults);
}
