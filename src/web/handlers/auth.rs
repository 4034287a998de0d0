use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use chrono::Utc;

use venuedesk::common::{ProfileError, non_empty, validate_email};
use venuedesk::db::Database;
use venuedesk::models::{User, UserIden};
use venuedesk::services::auth::{
    LoginPortal, PasswordManager, generate_reset_token, login_destination, reset_expiry,
    validate_password,
};

use crate::web::forms::{
    FlashQuery, LoginForm, ResetForm, ResetQuery, ResetRequestForm, SignupForm,
};
use crate::web::helpers::{load_site_config, page_meta, redirect, render, render_status};
use crate::web::security::{cleared_session_cookie, client_ip, session_cookie};
use crate::web::state::AppState;
use crate::web::templates::{
    ForgotPasswordTemplate, LoginTemplate, ResetPasswordTemplate, SignupTemplate,
};

const INVALID_CREDENTIALS: &str = "E-mail ou senha inválidos.";
const INTERNAL: &str = "Ocorreu um erro interno. Tente novamente.";

fn login_messages(query: &FlashQuery) -> (Option<String>, Option<String>) {
    let error = query.erro.as_deref().map(|code| match code {
        "denied" => "Acesso restrito à equipe administrativa.".to_string(),
        "session" => "Faça login para continuar.".to_string(),
        other => other.to_string(),
    });
    let info = query.ok.as_deref().map(|code| match code {
        "password_updated" => "Senha atualizada. Faça login com a nova senha.".to_string(),
        "logout" => "Você saiu da sua conta.".to_string(),
        other => other.to_string(),
    });
    (error, info)
}

async fn render_login(
    state: &AppState,
    req: &HttpRequest,
    portal: LoginPortal,
    status: StatusCode,
    error: Option<String>,
    info: Option<String>,
) -> HttpResponse {
    let site = load_site_config(&state.pool).await;
    let (heading, title) = match portal {
        LoginPortal::Client => ("Área do Cliente", "Login do Cliente"),
        LoginPortal::Admin => ("Acesso Administrativo", "Login Administrativo"),
    };

    render_status(
        status,
        LoginTemplate {
            meta: page_meta(state, req, site, Some(title), None),
            heading,
            action: portal.path(),
            is_admin: portal == LoginPortal::Admin,
            error,
            info,
        },
    )
}

#[get("/login-cliente")]
pub async fn client_login_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<FlashQuery>,
) -> impl Responder {
    let (error, info) = login_messages(&query);
    render_login(&state, &req, LoginPortal::Client, StatusCode::OK, error, info).await
}

#[get("/login-admin")]
pub async fn admin_login_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<FlashQuery>,
) -> impl Responder {
    let (error, info) = login_messages(&query);
    render_login(&state, &req, LoginPortal::Admin, StatusCode::OK, error, info).await
}

async fn login(
    state: &AppState,
    req: &HttpRequest,
    form: LoginForm,
    portal: LoginPortal,
) -> HttpResponse {
    let fail = |status: StatusCode, msg: &str| {
        render_login(state, req, portal, status, Some(msg.to_string()), None)
    };

    if !state.rate_limiter.allow_login(&client_ip(req)) {
        return fail(
            StatusCode::TOO_MANY_REQUESTS,
            "Muitas tentativas. Aguarde alguns minutos e tente novamente.",
        )
        .await;
    }

    let email = form.email.trim().to_lowercase();
    if email.is_empty() || form.password.is_empty() {
        return fail(StatusCode::UNPROCESSABLE_ENTITY, "Informe e-mail e senha.").await;
    }

    let db = Database::from_pool(state.pool.clone());
    let user: Option<User> = match db.get_user(&UserIden::Email(email)).await {
        Ok(u) => Some(u),
        Err(ProfileError::NotFound(_)) => None,
        Err(e) => {
            log::error!("login lookup failed: {}", e);
            return fail(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL).await;
        }
    };

    // Always runs one verification, whether or not the account exists.
    let valid = PasswordManager::verify_login(
        &form.password,
        user.as_ref().and_then(|u| u.password_hash.as_deref()),
    );

    let Some(user) = user.filter(|_| valid) else {
        return fail(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS).await;
    };

    let Some(path) = login_destination(user.role, portal).path() else {
        log::info!("client account {} refused on admin portal", user.id);
        return fail(
            StatusCode::FORBIDDEN,
            "Esta conta não tem acesso administrativo. Use a área do cliente.",
        )
        .await;
    };

    log::info!("user {} signed in ({})", user.id, user.role);

    HttpResponse::SeeOther()
        .cookie(session_cookie(user.id, state.config.secure_cookies))
        .insert_header(("Location", path))
        .finish()
}

#[post("/login-cliente")]
pub async fn client_login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> impl Responder {
    login(&state, &req, form.into_inner(), LoginPortal::Client).await
}

#[post("/login-admin")]
pub async fn admin_login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> impl Responder {
    login(&state, &req, form.into_inner(), LoginPortal::Admin).await
}

#[get("/cadastro")]
pub async fn signup_form(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let site = load_site_config(&state.pool).await;
    render(SignupTemplate {
        meta: page_meta(&state, &req, site, Some("Criar Conta"), None),
        full_name: String::new(),
        email: String::new(),
        error: None,
    })
}

async fn signup_failed(
    state: &AppState,
    req: &HttpRequest,
    form: &SignupForm,
    status: StatusCode,
    msg: &str,
) -> HttpResponse {
    let site = load_site_config(&state.pool).await;
    render_status(
        status,
        SignupTemplate {
            meta: page_meta(state, req, site, Some("Criar Conta"), None),
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            error: Some(msg.to_string()),
        },
    )
}

fn check_signup(form: &SignupForm) -> Result<(), &'static str> {
    if non_empty(&form.full_name).is_none() {
        return Err("Informe seu nome completo.");
    }
    if !validate_email(&form.email) {
        return Err("Informe um e-mail válido.");
    }
    validate_password(&form.password)?;
    if form.password != form.password_confirm {
        return Err("As senhas não conferem.");
    }
    Ok(())
}

#[post("/cadastro")]
pub async fn signup_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<SignupForm>,
) -> impl Responder {
    let form = form.into_inner();

    let failed = |status: StatusCode, msg: &'static str| {
        signup_failed(&state, &req, &form, status, msg)
    };

    if let Err(msg) = check_signup(&form) {
        return failed(StatusCode::UNPROCESSABLE_ENTITY, msg).await;
    }

    let password_hash = match PasswordManager::hash_password(&form.password) {
        Ok(h) => h,
        Err(e) => {
            log::error!("password hashing failed: {}", e);
            return failed(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL).await;
        }
    };

    let db = Database::from_pool(state.pool.clone());
    let user = match db
        .register_user(&form.email, &form.full_name, &password_hash)
        .await
    {
        Ok(u) => u,
        Err(ProfileError::AlreadyExists(_)) => {
            return failed(
                StatusCode::CONFLICT,
                "Já existe uma conta com este e-mail. Faça login ou use \"Esqueci minha senha\" para definir uma senha.",
            )
            .await;
        }
        Err(e) => {
            log::error!("sign-up failed: {}", e);
            return failed(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL).await;
        }
    };

    log::info!("account {} registered", user.id);

    let path = login_destination(user.role, LoginPortal::Client)
        .path()
        .unwrap_or("/painel-cliente");

    HttpResponse::SeeOther()
        .cookie(session_cookie(user.id, state.config.secure_cookies))
        .insert_header(("Location", path))
        .finish()
}

#[get("/recuperar-senha")]
pub async fn forgot_form(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let site = load_site_config(&state.pool).await;
    render(ForgotPasswordTemplate {
        meta: page_meta(&state, &req, site, Some("Recuperar Senha"), None),
        sent: false,
        error: None,
    })
}

#[post("/recuperar-senha")]
pub async fn forgot_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ResetRequestForm>,
) -> impl Responder {
    let site = load_site_config(&state.pool).await;
    let meta = page_meta(&state, &req, site, Some("Recuperar Senha"), None);

    if !state.rate_limiter.allow_password_reset(&client_ip(&req)) {
        return render_status(
            StatusCode::TOO_MANY_REQUESTS,
            ForgotPasswordTemplate {
                meta,
                sent: false,
                error: Some("Muitas solicitações. Tente novamente mais tarde.".into()),
            },
        );
    }

    let db = Database::from_pool(state.pool.clone());
    match db.get_user(&UserIden::Email(form.email.clone())).await {
        Ok(user) => {
            let token = generate_reset_token();
            match db
                .create_password_reset(user.id, &token, reset_expiry(Utc::now()))
                .await
            {
                // Mail delivery is not wired up; operators relay the link.
                Ok(()) => log::info!(
                    "password reset for {}: {}/redefinir-senha?token={}",
                    user.email,
                    state.config.public_base_url,
                    token
                ),
                Err(e) => log::error!("could not store reset token: {}", e),
            }
        }
        Err(ProfileError::NotFound(_)) => {
            log::info!("password reset requested for unknown email");
        }
        Err(e) => log::error!("password reset lookup failed: {}", e),
    }

    // Same answer whether or not the email exists.
    render(ForgotPasswordTemplate {
        meta,
        sent: true,
        error: None,
    })
}

#[get("/redefinir-senha")]
pub async fn reset_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ResetQuery>,
) -> impl Responder {
    let Some(token) = query.token.as_deref().and_then(non_empty) else {
        return redirect("/recuperar-senha");
    };

    let site = load_site_config(&state.pool).await;
    render(ResetPasswordTemplate {
        meta: page_meta(&state, &req, site, Some("Nova Senha"), None),
        token: token.to_string(),
        error: None,
    })
}

async fn reset_failed(
    state: &AppState,
    req: &HttpRequest,
    form: &ResetForm,
    status: StatusCode,
    msg: &str,
) -> HttpResponse {
    let site = load_site_config(&state.pool).await;
    render_status(
        status,
        ResetPasswordTemplate {
            meta: page_meta(state, req, site, Some("Nova Senha"), None),
            token: form.token.clone(),
            error: Some(msg.to_string()),
        },
    )
}

#[post("/redefinir-senha")]
pub async fn reset_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ResetForm>,
) -> impl Responder {
    let form = form.into_inner();

    let failed = |status: StatusCode, msg: &'static str| {
        reset_failed(&state, &req, &form, status, msg)
    };

    if let Err(msg) = validate_password(&form.password) {
        return failed(StatusCode::UNPROCESSABLE_ENTITY, msg).await;
    }
    if form.password != form.password_confirm {
        return failed(StatusCode::UNPROCESSABLE_ENTITY, "As senhas não conferem.").await;
    }

    let password_hash = match PasswordManager::hash_password(&form.password) {
        Ok(h) => h,
        Err(e) => {
            log::error!("password hashing failed: {}", e);
            return failed(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL).await;
        }
    };

    let db = Database::from_pool(state.pool.clone());
    let user_id = match db.consume_password_reset(form.token.trim(), Utc::now()).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            return failed(
                StatusCode::GONE,
                "Link inválido ou expirado. Solicite um novo.",
            )
            .await;
        }
        Err(e) => {
            log::error!("reset token lookup failed: {}", e);
            return failed(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL).await;
        }
    };

    if let Err(e) = db.update_password(user_id, &password_hash).await {
        log::error!("password update for {} failed: {}", user_id, e);
        return failed(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL).await;
    }

    log::info!("password reset completed for {}", user_id);
    redirect("/login-cliente?ok=password_updated")
}

#[get("/sair")]
pub async fn logout(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::SeeOther()
        .cookie(cleared_session_cookie(state.config.secure_cookies))
        .insert_header(("Location", "/login-cliente?ok=logout"))
        .finish()
}

#[post("/sair")]
pub async fn logout_post(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::SeeOther()
        .cookie(cleared_session_cookie(state.config.secure_cookies))
        .insert_header(("Location", "/"))
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(client_login_form)
        .service(client_login_submit)
        .service(admin_login_form)
        .service(admin_login_submit)
        .service(signup_form)
        .service(signup_submit)
        .service(forgot_form)
        .service(forgot_submit)
        .service(reset_form)
        .service(reset_submit)
        .service(logout)
        .service(logout_post);
}
