use actix_web::{HttpRequest, Responder, get, web};

use venuedesk::services::calendar::CalendarMonth;
use venuedesk::services::dashboard::DashboardData;

use crate::web::forms::FlashQuery;
use crate::web::helpers::{admin_shell, render, require_staff, today};
use crate::web::state::AppState;
use crate::web::templates::AdminOverviewTemplate;

#[get("/painel-admin")]
pub async fn overview(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<FlashQuery>,
) -> impl Responder {
    let user = match require_staff(&state.pool, &req).await {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    let data = DashboardData::load(&state.pool).await;
    let today = today();
    let summary = data.overview(today);

    let page = AdminOverviewTemplate {
        month_title: CalendarMonth::containing(today).title(),
        bookings_this_month: summary.bookings_this_month,
        new_leads: summary.new_leads,
        occupancy: summary.occupancy,
        recent_bookings: summary
            .recent_bookings
            .iter()
            .map(|(b, name)| ((*b).clone(), name.to_string()))
            .collect(),
        recent_leads: summary.recent_leads.into_iter().cloned().collect(),
        shell: admin_shell(user, "overview", query.flash(), &data.site_config),
    };

    render(page)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(overview);
}
