use actix_web::{HttpResponse, Responder, get, web};

fn permanent(location: &str) -> HttpResponse {
    HttpResponse::PermanentRedirect()
        .insert_header(("Location", location))
        .finish()
}

#[get("/spaces")]
pub async fn spaces() -> impl Responder {
    permanent("/espacos")
}

#[get("/spaces/{id}")]
pub async fn space(path: web::Path<String>) -> impl Responder {
    permanent(&format!("/espacos/{}", urlencoding::encode(&path.into_inner())))
}

#[get("/about")]
pub async fn about() -> impl Responder {
    permanent("/sobre")
}

#[get("/contact")]
pub async fn contact() -> impl Responder {
    permanent("/contato")
}

#[get("/sitemap")]
pub async fn sitemap() -> impl Responder {
    permanent("/mapa-do-site")
}

#[get("/client-login")]
pub async fn client_login() -> impl Responder {
    permanent("/login-cliente")
}

#[get("/admin-login")]
pub async fn admin_login() -> impl Responder {
    permanent("/login-admin")
}

/// Anything unmatched goes home.
pub async fn fallback() -> HttpResponse {
    HttpResponse::Found()
        .insert_header(("Location", "/"))
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(spaces)
        .service(space)
        .service(about)
        .service(contact)
        .service(sitemap)
        .service(client_login)
        .service(admin_login);
}
