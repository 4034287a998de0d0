use chrono::NaiveDate;
use sqlx::PgPool;

use crate::db::{self, Database};
use crate::models::{Booking, Lead, LeadStatus, SiteConfig, Space, UserProfile, WebhookConfig};

use super::calendar::{CalendarMonth, bookings_in_month, occupancy_rate};

/// Everything the back office shows, read in one go.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub leads: Vec<Lead>,
    pub bookings: Vec<Booking>,
    pub spaces: Vec<Space>,
    pub profiles: Vec<UserProfile>,
    pub site_config: SiteConfig,
    pub webhooks: Vec<WebhookConfig>,
}

fn or_empty<T: Default, E: std::fmt::Display>(what: &str, result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            log::error!("dashboard: failed to load {}: {}", what, e);
            T::default()
        }
    }
}

impl DashboardData {
    /// Runs the six reads concurrently. A failed read yields an empty list
    /// (or the default site config) instead of failing the page.
    pub async fn load(pool: &PgPool) -> Self {
        let users = Database::from_pool(pool.clone());

        let (leads, bookings, spaces, profiles, site_config, webhooks) = futures_util::join!(
            db::list_leads(pool),
            db::list_bookings(pool),
            db::list_spaces(pool),
            users.list_profiles(),
            db::get_site_config(pool),
            db::list_webhooks(pool),
        );

        Self {
            leads: or_empty("leads", leads),
            bookings: or_empty("bookings", bookings),
            spaces: or_empty("spaces", spaces),
            profiles: or_empty("profiles", profiles),
            site_config: or_empty("site config", site_config),
            webhooks: or_empty("webhooks", webhooks),
        }
    }

    pub fn space_name(&self, booking: &Booking) -> &str {
        self.spaces
            .iter()
            .find(|s| s.id == booking.space_id)
            .map(|s| s.name.as_str())
            .unwrap_or("Espaço removido")
    }

    pub fn overview(&self, today: NaiveDate) -> Overview<'_> {
        let month = CalendarMonth::containing(today);

        Overview {
            bookings_this_month: bookings_in_month(month, &self.bookings),
            new_leads: self.leads_with(LeadStatus::New).count(),
            occupancy: occupancy_rate(month, &self.bookings, self.spaces.len()),
            recent_bookings: self
                .bookings
                .iter()
                .take(5)
                .map(|b| (b, self.space_name(b)))
                .collect(),
            recent_leads: self.leads.iter().take(5).collect(),
        }
    }

    pub fn leads_with(&self, status: LeadStatus) -> impl Iterator<Item = &Lead> {
        self.leads.iter().filter(move |l| l.status == status)
    }
}

/// Numbers and lists for the overview tab.
#[derive(Debug)]
pub struct Overview<'a> {
    pub bookings_this_month: usize,
    pub new_leads: usize,
    pub occupancy: u32,
    pub recent_bookings: Vec<(&'a Booking, &'a str)>,
    pub recent_leads: Vec<&'a Lead>,
}
