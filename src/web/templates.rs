use askama::Template;

use std::fmt::Display;

use venuedesk::models::{
    ApiKey, ApiLog, Booking, BookingStatus, Lead, LeadStatus, SiteConfig, Space, SpaceSummary,
    SpaceType, User, UserProfile, UserRole, WebhookConfig, WebhookEvent, list_to_lines,
};
use venuedesk::services::calendar::{MonthGrid, WEEKDAY_LABELS};
use venuedesk::services::tracking::ClientTags;

use crate::web::forms::{ContactFormData, ReservationForm};

pub const EVENT_TYPES: [&str; 5] = [
    "Casamento",
    "Aniversário",
    "Corporativo",
    "Formatura",
    "Outro",
];

/// Head and navigation data shared by every public page.
pub struct PageMeta {
    pub site: SiteConfig,
    pub title: String,
    pub description: String,
    pub path: String,
    pub canonical: String,
    pub tags: ClientTags,
}

impl PageMeta {
    pub fn nav_class(&self, prefix: &str) -> &'static str {
        let active = if prefix == "/" {
            self.path == "/"
        } else {
            self.path.starts_with(prefix)
        };
        if active { "nav-link active" } else { "nav-link" }
    }
}

pub struct Flash {
    pub success: bool,
    pub text: String,
}

/// Sidebar, header and toast of the back office.
pub struct AdminShell {
    pub user: User,
    pub tab: &'static str,
    pub flash: Option<Flash>,
    pub site_name: String,
}

impl AdminShell {
    pub fn tab_class(&self, tab: &str) -> &'static str {
        if self.tab == tab { "tab active" } else { "tab" }
    }
}

// ---------------------------------------------------------------- public

#[derive(Template)]
#[template(path = "public/home.html")]
pub struct HomeTemplate {
    pub meta: PageMeta,
    pub featured: Vec<Space>,
}

#[derive(Template)]
#[template(path = "public/spaces.html")]
pub struct SpacesTemplate {
    pub meta: PageMeta,
    pub spaces: Vec<Space>,
    pub types: Vec<SpaceType>,
    pub selected_type: String,
    pub selected_capacity: String,
}

#[derive(Template)]
#[template(path = "public/space_detail.html")]
pub struct SpaceDetailTemplate {
    pub meta: PageMeta,
    pub space: Space,
    pub picker: MonthGrid,
    pub prev_month: String,
    pub next_month: String,
    pub weekdays: [&'static str; 7],
    pub selected_iso: String,
    pub selected_label: String,
    pub form: ReservationForm,
    pub error: Option<String>,
    pub success: bool,
}

#[derive(Template)]
#[template(path = "public/about.html")]
pub struct AboutTemplate {
    pub meta: PageMeta,
}

#[derive(Template)]
#[template(path = "public/contact.html")]
pub struct ContactTemplate {
    pub meta: PageMeta,
    pub form: ContactFormData,
    pub event_types: [&'static str; 5],
    pub error: Option<String>,
    pub success: bool,
}

impl ContactTemplate {
    pub fn event_selected(&self, event_type: impl Display) -> bool {
        self.form.event_type == event_type.to_string()
    }
}

#[derive(Template)]
#[template(path = "public/sitemap.html")]
pub struct SitemapTemplate {
    pub meta: PageMeta,
    pub spaces: Vec<SpaceSummary>,
}

#[derive(Template)]
#[template(path = "sitemap.xml")]
pub struct SitemapXmlTemplate {
    pub base_url: String,
    pub spaces: Vec<SpaceSummary>,
}

// ---------------------------------------------------------------- auth

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub meta: PageMeta,
    pub heading: &'static str,
    pub action: &'static str,
    pub is_admin: bool,
    pub error: Option<String>,
    pub info: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub meta: PageMeta,
    pub full_name: String,
    pub email: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/forgot.html")]
pub struct ForgotPasswordTemplate {
    pub meta: PageMeta,
    pub sent: bool,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/reset.html")]
pub struct ResetPasswordTemplate {
    pub meta: PageMeta,
    pub token: String,
    pub error: Option<String>,
}

// ---------------------------------------------------------------- client

#[derive(Template)]
#[template(path = "client/dashboard.html")]
pub struct ClientDashboardTemplate {
    pub meta: PageMeta,
    pub user: User,
    pub leads: Vec<Lead>,
}

// ---------------------------------------------------------------- admin

#[derive(Template)]
#[template(path = "admin/overview.html")]
pub struct AdminOverviewTemplate {
    pub shell: AdminShell,
    pub month_title: String,
    pub bookings_this_month: usize,
    pub new_leads: usize,
    pub occupancy: u32,
    pub recent_bookings: Vec<(Booking, String)>,
    pub recent_leads: Vec<Lead>,
}

pub struct DayPanel {
    pub date_iso: String,
    pub date_label: String,
    pub bookings: Vec<(Booking, String)>,
}

#[derive(Template)]
#[template(path = "admin/calendar.html")]
pub struct AdminCalendarTemplate {
    pub shell: AdminShell,
    pub grid: MonthGrid,
    pub month: String,
    pub prev_month: String,
    pub next_month: String,
    pub weekdays: [&'static str; 7],
    pub spaces: Vec<SpaceSummary>,
    pub filter: String,
    pub statuses: [BookingStatus; 3],
    pub panel: Option<DayPanel>,
}

impl AdminCalendarTemplate {
    /// Query string that keeps month and space filter.
    pub fn day_link(&self, date: impl Display) -> String {
        let mut link = format!("?mes={}&dia={}", self.month, date);
        if !self.filter.is_empty() {
            link.push_str(&format!("&espaco={}", self.filter));
        }
        link
    }

    pub fn month_link(&self, month: impl Display) -> String {
        if self.filter.is_empty() {
            format!("?mes={}", month)
        } else {
            format!("?mes={}&espaco={}", month, self.filter)
        }
    }

    pub fn space_selected(&self, id: impl Display) -> bool {
        self.filter == id.to_string()
    }
}

pub struct LeadColumn {
    pub status: LeadStatus,
    pub leads: Vec<Lead>,
}

#[derive(Template)]
#[template(path = "admin/leads.html")]
pub struct AdminLeadsTemplate {
    pub shell: AdminShell,
    pub columns: Vec<LeadColumn>,
    pub statuses: [LeadStatus; 3],
    pub selected: Option<Lead>,
}

/// Values of the space create/edit form.
pub struct SpaceEditor {
    pub action: String,
    pub heading: &'static str,
    pub name: String,
    pub description: String,
    pub capacity: String,
    pub price: String,
    pub space_type: SpaceType,
    pub image: String,
    pub gallery: String,
    pub video_url: String,
    pub features: String,
    pub availability: String,
    pub items_included: String,
}

impl SpaceEditor {
    pub fn new_space() -> Self {
        Self {
            action: "/painel-admin/cms/espacos".to_string(),
            heading: "Novo Espaço",
            name: String::new(),
            description: String::new(),
            capacity: String::new(),
            price: String::new(),
            space_type: SpaceType::default(),
            image: String::new(),
            gallery: String::new(),
            video_url: String::new(),
            features: String::new(),
            availability: String::new(),
            items_included: String::new(),
        }
    }

    pub fn edit(space: &Space) -> Self {
        Self {
            action: format!("/painel-admin/cms/espacos/{}", space.id),
            heading: "Editar Espaço",
            name: space.name.clone(),
            description: space.description.clone(),
            capacity: space.capacity.to_string(),
            price: space.price.map(|p| p.to_string()).unwrap_or_default(),
            space_type: space.space_type,
            image: space.image.clone(),
            gallery: list_to_lines(&space.gallery),
            video_url: space.video().to_string(),
            features: list_to_lines(&space.features),
            availability: space.availability_text().to_string(),
            items_included: list_to_lines(space.items()),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/cms.html")]
pub struct AdminCmsTemplate {
    pub shell: AdminShell,
    pub section: &'static str,
    pub config: SiteConfig,
    pub spaces: Vec<Space>,
    pub types: [SpaceType; 5],
    pub editor: Option<SpaceEditor>,
}

#[derive(Template)]
#[template(path = "admin/users.html")]
pub struct AdminUsersTemplate {
    pub shell: AdminShell,
    pub profiles: Vec<UserProfile>,
    pub roles: [UserRole; 3],
    pub can_manage_roles: bool,
}

#[derive(Template)]
#[template(path = "admin/integrations.html")]
pub struct AdminIntegrationsTemplate {
    pub shell: AdminShell,
    pub keys: Vec<ApiKey>,
    pub new_secret: Option<String>,
    pub webhooks: Vec<WebhookConfig>,
    pub events: [WebhookEvent; 3],
    pub logs: Vec<ApiLog>,
}

pub fn weekdays() -> [&'static str; 7] {
    WEEKDAY_LABELS
}
