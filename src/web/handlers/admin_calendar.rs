use actix_web::{HttpRequest, Responder, get, post, web};
use uuid::Uuid;

use venuedesk::common::BookingError;
use venuedesk::db;
use venuedesk::models::{BookingStatus, SpaceSummary, WebhookEvent};
use venuedesk::services::calendar::{CalendarMonth, build_month_grid};
use venuedesk::services::dashboard::DashboardData;

use crate::web::forms::{BookingForm, BookingStatusForm, CalendarQuery, parse_date, parse_opt};
use crate::web::helpers::{
    admin_shell, error_redirect, flash_from, ok_redirect, render, require_staff, today,
};
use crate::web::state::AppState;
use crate::web::templates::{AdminCalendarTemplate, DayPanel, weekdays};

const BASE: &str = "/painel-admin/calendario";

fn calendar_path(month: &str, space: Option<&str>, day: Option<&str>) -> String {
    let mut path = format!("{}?mes={}", BASE, month);
    if let Some(space) = space.filter(|s| !s.is_empty()) {
        path.push_str(&format!("&espaco={}", space));
    }
    if let Some(day) = day.filter(|d| !d.is_empty()) {
        path.push_str(&format!("&dia={}", day));
    }
    path
}

#[get("/painel-admin/calendario")]
pub async fn calendar(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<CalendarQuery>,
) -> impl Responder {
    let user = match require_staff(&state.pool, &req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let data = DashboardData::load(&state.pool).await;
    let today = today();

    let selected_day = parse_date(&query.dia);
    let month: CalendarMonth = parse_opt(&query.mes)
        .or_else(|| selected_day.map(CalendarMonth::containing))
        .unwrap_or_else(|| CalendarMonth::containing(today));
    let filter: Option<Uuid> = parse_opt(&query.espaco);

    let grid = build_month_grid(month, &data.bookings, filter, today);

    let panel = selected_day.map(|date| DayPanel {
        date_iso: date.format("%Y-%m-%d").to_string(),
        date_label: date.format("%d/%m/%Y").to_string(),
        bookings: data
            .bookings
            .iter()
            .filter(|b| b.date == date)
            .filter(|b| filter.is_none_or(|id| b.space_id == id))
            .map(|b| (b.clone(), data.space_name(b).to_string()))
            .collect(),
    });

    let spaces = data
        .spaces
        .iter()
        .map(|s| SpaceSummary {
            id: s.id,
            name: s.name.clone(),
            space_type: s.space_type,
        })
        .collect();

    render(AdminCalendarTemplate {
        shell: admin_shell(
            user,
            "calendar",
            flash_from(query.ok.as_deref(), query.erro.as_deref()),
            &data.site_config,
        ),
        grid,
        month: month.to_string(),
        prev_month: month.prev().to_string(),
        next_month: month.next().to_string(),
        weekdays: weekdays(),
        spaces,
        filter: filter.map(|id| id.to_string()).unwrap_or_default(),
        statuses: BookingStatus::ALL,
        panel,
    })
}

#[post("/painel-admin/calendario/reservas")]
pub async fn create_booking(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<BookingForm>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    let fallback = calendar_path(
        &CalendarMonth::containing(today()).to_string(),
        None,
        Some(form.date.trim()),
    );

    let data = match form.to_create() {
        Ok(d) => d,
        Err(msg) => return error_redirect(&fallback, msg),
    };

    let back = calendar_path(
        &CalendarMonth::containing(data.date).to_string(),
        None,
        Some(&data.date.format("%Y-%m-%d").to_string()),
    );

    match db::create_booking(&state.pool, &data).await {
        Ok(booking) => {
            log::info!("booking {} created for {}", booking.id, booking.date);
            state
                .webhooks
                .dispatch_booking_event(&state.pool, WebhookEvent::BookingCreated, &booking);
            ok_redirect(&back, "booking_created")
        }
        Err(BookingError::UnknownSpace(_)) => error_redirect(&back, "unknown_space"),
        Err(BookingError::Invalid(msg)) => error_redirect(&back, msg),
        Err(e) => {
            log::error!("create booking failed: {}", e);
            error_redirect(&back, "db")
        }
    }
}

#[post("/painel-admin/calendario/reservas/{id}/status")]
pub async fn update_status(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<BookingStatusForm>,
) -> impl Responder {
    if let Err(resp) = require_staff(&state.pool, &req).await {
        return resp;
    }

    let id = path.into_inner();
    let month = form
        .mes
        .clone()
        .unwrap_or_else(|| CalendarMonth::containing(today()).to_string());

    let Some(status) = form.status() else {
        return error_redirect(&calendar_path(&month, form.espaco.as_deref(), None), "invalid_status");
    };

    match db::update_booking_status(&state.pool, id, status).await {
        Ok(booking) => {
            let event = if status == BookingStatus::Cancelled {
                WebhookEvent::BookingCancelled
            } else {
                WebhookEvent::BookingUpdated
            };
            state
                .webhooks
                .dispatch_booking_event(&state.pool, event, &booking);

            let day = booking.date.format("%Y-%m-%d").to_string();
            ok_redirect(
                &calendar_path(&month, form.espaco.as_deref(), Some(&day)),
                "booking_updated",
            )
        }
        Err(BookingError::NotFound(_)) => {
            error_redirect(&calendar_path(&month, form.espaco.as_deref(), None), "not_found")
        }
        Err(e) => {
            log::error!("booking {} status update failed: {}", id, e);
            error_redirect(&calendar_path(&month, form.espaco.as_deref(), None), "db")
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(calendar)
        .service(create_booking)
        .service(update_status);
}
