use actix_web::{HttpRequest, Responder, get, post, web};
use uuid::Uuid;

use venuedesk::common::ProfileError;
use venuedesk::common::validate_email;
use venuedesk::db::Database;
use venuedesk::models::{UserCreate, UserRole};
use venuedesk::services::dashboard::DashboardData;

use crate::web::forms::{FlashQuery, RoleForm, UserCreateForm};
use crate::web::helpers::{admin_shell, error_redirect, ok_redirect, render, require_staff};
use crate::web::state::AppState;
use crate::web::templates::AdminUsersTemplate;

const BASE: &str = "/painel-admin/usuarios";

#[get("/painel-admin/usuarios")]
pub async fn users(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<FlashQuery>,
) -> impl Responder {
    let user = match require_staff(&state.pool, &req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let data = DashboardData::load(&state.pool).await;
    let can_manage_roles = user.role.can_manage_roles();

    render(AdminUsersTemplate {
        shell: admin_shell(user, "users", query.flash(), &data.site_config),
        profiles: data.profiles,
        roles: UserRole::ALL,
        can_manage_roles,
    })
}

/// Pre-creates a profile without a password; its owner sets one through
/// the password reset link. Editors may only create clients.
#[post("/painel-admin/usuarios")]
pub async fn create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<UserCreateForm>,
) -> impl Responder {
    let user = match require_staff(&state.pool, &req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let email = form.email.trim();
    if form.full_name.trim().is_empty() {
        return error_redirect(BASE, "Informe o nome.");
    }
    if !validate_email(email) {
        return error_redirect(BASE, "E-mail inválido.");
    }

    let role = form.role.parse::<UserRole>().unwrap_or_default();
    if role != UserRole::User && !user.role.can_manage_roles() {
        return error_redirect(BASE, "forbidden");
    }

    let data = UserCreate {
        email: email.to_string(),
        full_name: form.full_name.trim().to_string(),
        role,
        password_hash: None,
    };

    match Database::from_pool(state.pool.clone()).add_user(&data).await {
        Ok(created) => {
            log::info!("{} created profile {} ({})", user.email, created.email, created.role);
            ok_redirect(BASE, "user_created")
        }
        Err(ProfileError::AlreadyExists(_)) => error_redirect(BASE, "exists"),
        Err(e) => {
            log::error!("profile creation failed: {}", e);
            error_redirect(BASE, "db")
        }
    }
}

#[post("/painel-admin/usuarios/{id}/papel")]
pub async fn change_role(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<RoleForm>,
) -> impl Responder {
    let user = match require_staff(&state.pool, &req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    if !user.role.can_manage_roles() {
        return error_redirect(BASE, "forbidden");
    }

    let Ok(role) = form.role.parse::<UserRole>() else {
        return error_redirect(BASE, "Papel inválido.");
    };

    let id = path.into_inner();
    match Database::from_pool(state.pool.clone())
        .update_role(id, role)
        .await
    {
        Ok(profile) => {
            log::info!("{} set role of {} to {}", user.email, profile.email, profile.role);
            ok_redirect(BASE, "role_updated")
        }
        Err(ProfileError::Protected(_)) => error_redirect(BASE, "protected"),
        Err(ProfileError::NotFound(_)) => error_redirect(BASE, "not_found"),
        Err(e) => {
            log::error!("role update for {} failed: {}", id, e);
            error_redirect(BASE, "db")
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users).service(create).service(change_role);
}
