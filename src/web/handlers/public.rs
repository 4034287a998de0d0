use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use serde_json::json;
use uuid::Uuid;

use venuedesk::common::LeadError;
use venuedesk::db::{self, Database};
use venuedesk::models::{SiteConfig, Space, SpaceType};
use venuedesk::services::calendar::{CalendarMonth, build_month_grid};
use venuedesk::services::leads::{LeadSubmission, submit_lead};
use venuedesk::services::tracking::{TrackingEvent, UserData};

use crate::web::forms::{
    ContactFormData, ReservationForm, SpaceDetailQuery, SpacesQuery, parse_date, parse_opt,
};
use crate::web::helpers::{load_site_config, page_meta, redirect, render, render_status, today, track};
use crate::web::state::AppState;
use crate::web::templates::{
    AboutTemplate, ContactTemplate, EVENT_TYPES, HomeTemplate, SitemapTemplate,
    SitemapXmlTemplate, SpaceDetailTemplate, SpacesTemplate, weekdays,
};

const STORE_FAILED: &str = "Não foi possível enviar agora. Tente novamente em instantes.";

#[get("/")]
pub async fn home(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let site = load_site_config(&state.pool).await;
    let featured = db::list_featured_spaces(&state.pool, 3)
        .await
        .unwrap_or_else(|e| {
            log::error!("home: failed to load spaces: {}", e);
            Vec::new()
        });

    render(HomeTemplate {
        meta: page_meta(&state, &req, site, None, None),
        featured,
    })
}

#[get("/espacos")]
pub async fn spaces(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<SpacesQuery>,
) -> impl Responder {
    let site = load_site_config(&state.pool).await;
    let all = db::list_spaces(&state.pool).await.unwrap_or_else(|e| {
        log::error!("spaces: failed to load: {}", e);
        Vec::new()
    });

    let mut types: Vec<SpaceType> = Vec::new();
    for s in &all {
        if !types.contains(&s.space_type) {
            types.push(s.space_type);
        }
    }

    let type_filter: Option<SpaceType> = parse_opt(&query.tipo);
    let min_capacity: i32 = parse_opt(&query.capacidade).unwrap_or(0);

    let listed = all
        .into_iter()
        .filter(|s| type_filter.is_none_or(|t| s.space_type == t))
        .filter(|s| s.capacity >= min_capacity)
        .collect();

    render(SpacesTemplate {
        meta: page_meta(&state, &req, site, Some("Espaços"), None),
        spaces: listed,
        types,
        selected_type: type_filter.map(|t| t.as_str().to_string()).unwrap_or_default(),
        selected_capacity: if min_capacity > 0 {
            min_capacity.to_string()
        } else {
            String::new()
        },
    })
}

async fn find_space(state: &AppState, id: &str) -> Option<Space> {
    let id = Uuid::parse_str(id).ok()?;

    match db::get_space(&state.pool, id).await {
        Ok(space) => space,
        Err(e) => {
            log::error!("space {}: failed to load: {}", id, e);
            None
        }
    }
}

fn view_content_params(space: &Space) -> serde_json::Value {
    json!({
        "content_name": space.name,
        "content_type": "product",
        "content_ids": [space.id],
        "value": space.price_value(),
        "currency": "BRL",
    })
}

struct DetailOutcome {
    form: ReservationForm,
    error: Option<String>,
    success: bool,
}

fn render_space_detail(
    state: &AppState,
    req: &HttpRequest,
    site: SiteConfig,
    space: Space,
    month: Option<CalendarMonth>,
    outcome: DetailOutcome,
    lead_user: Option<UserData>,
) -> HttpResponse {
    let today = today();
    let selected = parse_date(&outcome.form.date).filter(|d| *d >= today);
    let month = month
        .or_else(|| selected.map(CalendarMonth::containing))
        .unwrap_or_else(|| CalendarMonth::containing(today));

    let mut meta = page_meta(
        state,
        req,
        site,
        Some(&space.name),
        Some(&space.description),
    );
    let view = track(
        state,
        req,
        &meta.site,
        TrackingEvent::ViewContent,
        view_content_params(&space),
        &UserData::default(),
    );
    meta.tags.extend(view);

    if let Some(user) = lead_user {
        let lead = track(
            state,
            req,
            &meta.site,
            TrackingEvent::Lead,
            json!({
                "content_name": space.name,
                "content_category": "Booking Request",
                "value": space.price_value(),
                "currency": "BRL",
                "date": outcome.form.date.clone().unwrap_or_default(),
            }),
            &user,
        );
        meta.tags.extend(lead);
    }

    let status = if outcome.error.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };

    render_status(
        status,
        SpaceDetailTemplate {
            meta,
            picker: build_month_grid(month, &[], None, today),
            prev_month: month.prev().to_string(),
            next_month: month.next().to_string(),
            weekdays: weekdays(),
            selected_iso: selected
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            selected_label: selected
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            space,
            form: outcome.form,
            error: outcome.error,
            success: outcome.success,
        },
    )
}

#[get("/espacos/{id}")]
pub async fn space_detail(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<SpaceDetailQuery>,
) -> impl Responder {
    let Some(space) = find_space(&state, &path.into_inner()).await else {
        return redirect("/espacos");
    };
    let site = load_site_config(&state.pool).await;

    let form = ReservationForm {
        date: query.data.clone(),
        ..Default::default()
    };

    render_space_detail(
        &state,
        &req,
        site,
        space,
        parse_opt(&query.mes),
        DetailOutcome {
            form,
            error: None,
            success: false,
        },
        None,
    )
}

#[post("/espacos/{id}/reserva")]
pub async fn reserve(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    form: web::Form<ReservationForm>,
) -> impl Responder {
    let Some(space) = find_space(&state, &path.into_inner()).await else {
        return redirect("/espacos");
    };
    let site = load_site_config(&state.pool).await;
    let form = form.into_inner();

    let submission = LeadSubmission::Reservation(form.to_submission(space.id, &space.name));

    match submit_lead(&state.pool, &state.webhooks, &submission, today()).await {
        Ok(lead) => {
            log::info!("reservation request {} for space {}", lead.id, space.id);
            let user = UserData {
                email: Some(form.email.clone()),
                phone: Some(form.whatsapp.clone()),
                full_name: Some(form.name.clone()),
                ..Default::default()
            };
            let outcome = DetailOutcome {
                form: ReservationForm {
                    date: form.date.clone(),
                    ..Default::default()
                },
                error: None,
                success: true,
            };
            let month = parse_date(&form.date).map(CalendarMonth::containing);
            render_space_detail(&state, &req, site, space, month, outcome, Some(user))
        }
        Err(LeadError::Invalid(msg)) => render_space_detail(
            &state,
            &req,
            site,
            space,
            None,
            DetailOutcome {
                form,
                error: Some(msg.to_string()),
                success: false,
            },
            None,
        ),
        Err(e) => {
            log::error!("reservation request failed: {}", e);
            render_space_detail(
                &state,
                &req,
                site,
                space,
                None,
                DetailOutcome {
                    form,
                    error: Some(STORE_FAILED.to_string()),
                    success: false,
                },
                None,
            )
        }
    }
}

#[get("/sobre")]
pub async fn about(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let site = load_site_config(&state.pool).await;
    render(AboutTemplate {
        meta: page_meta(&state, &req, site, Some("Sobre"), None),
    })
}

#[get("/contato")]
pub async fn contact(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let site = load_site_config(&state.pool).await;
    render(ContactTemplate {
        meta: page_meta(&state, &req, site, Some("Contato"), None),
        form: ContactFormData {
            event_type: EVENT_TYPES[0].to_string(),
            ..Default::default()
        },
        event_types: EVENT_TYPES,
        error: None,
        success: false,
    })
}

#[post("/contato")]
pub async fn contact_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ContactFormData>,
) -> impl Responder {
    let site = load_site_config(&state.pool).await;
    let form = form.into_inner();
    let submission = LeadSubmission::Contact(form.to_submission());

    let result = submit_lead(&state.pool, &state.webhooks, &submission, today()).await;

    let mut meta = page_meta(&state, &req, site, Some("Contato"), None);

    let (form, error, status) = match result {
        Ok(lead) => {
            log::info!("contact lead {} stored", lead.id);
            let user = UserData {
                email: Some(form.email.clone()),
                phone: Some(form.phone.clone()),
                full_name: Some(form.name.clone()),
                ..Default::default()
            };
            let tags = track(
                &state,
                &req,
                &meta.site,
                TrackingEvent::Lead,
                json!({ "content_category": "Contact" }),
                &user,
            );
            meta.tags.extend(tags);

            let blank = ContactFormData {
                event_type: EVENT_TYPES[0].to_string(),
                ..Default::default()
            };
            (blank, None, StatusCode::OK)
        }
        Err(LeadError::Invalid(msg)) => {
            (form, Some(msg.to_string()), StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(e) => {
            log::error!("contact form failed: {}", e);
            (form, Some(STORE_FAILED.to_string()), StatusCode::OK)
        }
    };

    let success = error.is_none();
    render_status(
        status,
        ContactTemplate {
            meta,
            form,
            event_types: EVENT_TYPES,
            error,
            success,
        },
    )
}

#[get("/mapa-do-site")]
pub async fn sitemap_page(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let site = load_site_config(&state.pool).await;
    let summaries = db::list_space_summaries(&state.pool).await.unwrap_or_default();

    render(SitemapTemplate {
        meta: page_meta(&state, &req, site, Some("Mapa do Site"), None),
        spaces: summaries,
    })
}

#[get("/sitemap.xml")]
pub async fn sitemap_xml(state: web::Data<AppState>) -> impl Responder {
    let summaries = db::list_space_summaries(&state.pool).await.unwrap_or_default();
    let page = SitemapXmlTemplate {
        base_url: state.config.public_base_url.clone(),
        spaces: summaries,
    };

    match askama::Template::render(&page) {
        Ok(body) => HttpResponse::Ok()
            .content_type("application/xml; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("sitemap.xml: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/robots.txt")]
pub async fn robots(state: web::Data<AppState>) -> impl Responder {
    let body = format!(
        "User-agent: *\nAllow: /\nDisallow: /painel-admin\nDisallow: /painel-cliente\n\nSitemap: {}/sitemap.xml\n",
        state.config.public_base_url
    );

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body)
}

#[get("/healthz")]
pub async fn healthz(state: web::Data<AppState>) -> impl Responder {
    match Database::from_pool(state.pool.clone()).ping().await {
        Ok(()) => HttpResponse::Ok().body("ok"),
        Err(e) => {
            log::error!("health check failed: {}", e);
            HttpResponse::ServiceUnavailable().body("database unavailable")
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(spaces)
        .service(space_detail)
        .service(reserve)
        .service(about)
        .service(contact)
        .service(contact_submit)
        .service(sitemap_page)
        .service(sitemap_xml)
        .service(robots)
        .service(healthz);
}
