use actix_web::{HttpRequest, HttpResponse, http::StatusCode};
use askama::Template;
use chrono::{Local, NaiveDate};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use venuedesk::db::{self, Database};
use venuedesk::models::{SiteConfig, User, UserIden};
use venuedesk::services::tracking::{
    ClientTags, RequestContext, TrackingConfig, TrackingEvent, UserData,
};

use crate::web::forms::FlashQuery;
use crate::web::security::SESSION_COOKIE;
use crate::web::state::AppState;
use crate::web::templates::{AdminShell, Flash, PageMeta};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn current_user_id(req: &HttpRequest) -> Option<Uuid> {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(&s).ok())
}

pub async fn current_user(pool: &PgPool, req: &HttpRequest) -> Option<User> {
    let uid = current_user_id(req)?;

    match Database::from_pool(pool.clone())
        .get_user(&UserIden::Id(uid))
        .await
    {
        Ok(u) => Some(u),
        Err(e) => {
            log::warn!("session user {} not loaded: {}", uid, e);
            None
        }
    }
}

/// Back-office pages: super admins and editors only.
pub async fn require_staff(pool: &PgPool, req: &HttpRequest) -> Result<User, HttpResponse> {
    match current_user(pool, req).await {
        Some(u) if u.role.is_staff() => Ok(u),
        Some(_) => Err(redirect("/login-admin?erro=denied")),
        None => Err(redirect("/login-admin")),
    }
}

pub async fn require_signed_in(pool: &PgPool, req: &HttpRequest) -> Result<User, HttpResponse> {
    current_user(pool, req)
        .await
        .ok_or_else(|| redirect("/login-cliente"))
}

pub fn redirect(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location.as_ref()))
        .finish()
}

/// Redirect carrying a toast: `key` is `ok` or `erro`, `value` a known
/// code or a message.
pub fn flash_redirect(path: &str, key: &str, value: &str) -> HttpResponse {
    let sep = if path.contains('?') { '&' } else { '?' };
    redirect(format!("{}{}{}={}", path, sep, key, urlencoding::encode(value)))
}

pub fn ok_redirect(path: &str, code: &str) -> HttpResponse {
    flash_redirect(path, "ok", code)
}

pub fn error_redirect(path: &str, code: &str) -> HttpResponse {
    flash_redirect(path, "erro", code)
}

pub fn render<T: Template>(t: T) -> HttpResponse {
    render_status(StatusCode::OK, t)
}

pub fn render_status<T: Template>(status: StatusCode, t: T) -> HttpResponse {
    match t.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("template error: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Template error: {e}"))
        }
    }
}

/// Site settings for rendering; the built-in copy when the row cannot be
/// read.
pub async fn load_site_config(pool: &PgPool) -> SiteConfig {
    match db::get_site_config(pool).await {
        Ok(c) => c,
        Err(e) => {
            log::error!("failed to load site settings: {}", e);
            SiteConfig::default()
        }
    }
}

pub fn request_context(req: &HttpRequest) -> RequestContext {
    let source_url = {
        let info = req.connection_info();
        format!("{}://{}{}", info.scheme(), info.host(), req.uri())
    };
    let cookie = |name: &str| {
        req.cookie(name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    };

    RequestContext {
        user_agent: req
            .headers()
            .get("User-Agent")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        fbp: cookie("_fbp"),
        fbc: cookie("_fbc"),
        source_url: Some(source_url),
    }
}

/// Runs the tracker for one event on this request.
pub fn track(
    state: &AppState,
    req: &HttpRequest,
    site: &SiteConfig,
    event: TrackingEvent,
    params: Value,
    user: &UserData,
) -> ClientTags {
    state.tracker.track(
        &TrackingConfig::from(site),
        event,
        params,
        user,
        &request_context(req),
    )
}

/// Page chrome plus a PageView.
pub fn page_meta(
    state: &AppState,
    req: &HttpRequest,
    site: SiteConfig,
    title: Option<&str>,
    description: Option<&str>,
) -> PageMeta {
    let tags = track(
        state,
        req,
        &site,
        TrackingEvent::PageView,
        Value::Null,
        &UserData::default(),
    );

    PageMeta {
        title: site.page_title(title),
        description: description
            .map(str::to_string)
            .unwrap_or_else(|| site.seo_description.clone()),
        path: req.path().to_string(),
        canonical: format!("{}{}", state.config.public_base_url, req.path()),
        site,
        tags,
    }
}

pub fn admin_shell(
    user: User,
    tab: &'static str,
    flash: Option<Flash>,
    site: &SiteConfig,
) -> AdminShell {
    AdminShell {
        user,
        tab,
        flash,
        site_name: site.site_name.clone(),
    }
}

pub fn flash_text(kind_ok: bool, code: &str) -> String {
    let known = if kind_ok {
        match code {
            "booking_created" => Some("Reserva criada com sucesso!"),
            "booking_updated" => Some("Status da reserva atualizado."),
            "lead_updated" => Some("Lead atualizado."),
            "lead_deleted" => Some("Lead excluído."),
            "config_saved" => Some("Configurações salvas com sucesso!"),
            "space_saved" => Some("Espaço salvo com sucesso!"),
            "space_deleted" => Some("Espaço excluído."),
            "spaces_restored" => Some("Banco de dados atualizado com sucesso!"),
            "user_created" => Some("Perfil criado com sucesso!"),
            "role_updated" => Some("Permissão atualizada."),
            "key_revoked" => Some("Chave revogada."),
            "webhook_saved" => Some("Webhook salvo com sucesso!"),
            "webhook_updated" => Some("Webhook atualizado."),
            "webhook_deleted" => Some("Webhook removido."),
            "webhook_sent" => Some("Webhook disparado com sucesso!"),
            _ => None,
        }
    } else {
        match code {
            "db" => Some("Erro ao acessar o banco de dados. Tente novamente."),
            "not_found" => Some("Registro não encontrado."),
            "forbidden" => Some("Você não tem permissão para esta ação."),
            "protected" => Some("Este usuário é protegido e não pode ser alterado."),
            "exists" => Some("Já existe um usuário com este e-mail."),
            "space_in_use" => Some("Este espaço possui reservas e não pode ser excluído."),
            "unknown_space" => Some("Espaço não encontrado."),
            "invalid_status" => Some("Status inválido."),
            "webhook_failed" => Some("Falha ao disparar webhook."),
            _ => None,
        }
    };

    known.map(str::to_string).unwrap_or_else(|| code.to_string())
}

pub fn flash_from(ok: Option<&str>, erro: Option<&str>) -> Option<Flash> {
    if let Some(code) = erro.filter(|c| !c.is_empty()) {
        return Some(Flash {
            success: false,
            text: flash_text(false, code),
        });
    }

    ok.filter(|c| !c.is_empty()).map(|code| Flash {
        success: true,
        text: flash_text(true, code),
    })
}

impl FlashQuery {
    pub fn flash(&self) -> Option<Flash> {
        flash_from(self.ok.as_deref(), self.erro.as_deref())
    }
}
