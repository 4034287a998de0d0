use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use std::str::FromStr;

use venuedesk::models::{
    BookingCreate, BookingStatus, SiteConfigUpdate, SpaceCreate, SpaceType, lines_to_list,
};
use venuedesk::services::leads::{ContactForm, ReservationRequest};

/// Parses an optional form field, treating blank as absent.
pub fn parse_opt<T: FromStr>(value: &Option<String>) -> Option<T> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

pub fn parse_date(value: &Option<String>) -> Option<NaiveDate> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
}

/// Dots that only separate groups of three digits ("1.500",
/// "2.000.000") are thousands separators.
fn dotted_thousands(value: &str) -> bool {
    let mut groups = value.split('.');
    let head_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && g.chars().all(|c| c.is_ascii_digit()));
    let mut rest = groups.peekable();
    head_ok
        && rest.peek().is_some()
        && rest.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

/// Money typed by people: "1.500,00", "R$ 1.500", "1500.5", "R$ 300".
pub fn parse_money(value: &Option<String>) -> Result<Option<Decimal>, &'static str> {
    let Some(raw) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let cleaned: String = raw
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if dotted_thousands(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    let amount = Decimal::from_str(&normalized).map_err(|_| "Valor inválido.")?;
    if amount.is_sign_negative() {
        return Err("O valor não pode ser negativo.");
    }
    Ok(Some(amount.round_dp(2)))
}

#[derive(Deserialize, Default)]
pub struct FlashQuery {
    pub ok: Option<String>,
    pub erro: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Deserialize)]
pub struct ResetRequestForm {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetQuery {
    pub token: Option<String>,
}

#[derive(Deserialize)]
pub struct ResetForm {
    pub token: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Deserialize, Default, Clone)]
pub struct ContactFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub event_type: String,
    pub date: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ContactFormData {
    pub fn to_submission(&self) -> ContactForm {
        ContactForm {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            event_type: match self.event_type.trim() {
                "" => "Casamento".to_string(),
                t => t.to_string(),
            },
            date: parse_date(&self.date),
            message: self.message.clone(),
        }
    }

    pub fn date_value(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }
}

#[derive(Deserialize, Default, Clone)]
pub struct ReservationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub entity_name: String,
    pub date: Option<String>,
    #[serde(default)]
    pub observations: String,
}

impl ReservationForm {
    pub fn to_submission(&self, space_id: Uuid, space_name: &str) -> ReservationRequest {
        ReservationRequest {
            space_id,
            space_name: space_name.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            whatsapp: self.whatsapp.clone(),
            entity_name: self.entity_name.clone(),
            date: parse_date(&self.date),
            observations: self.observations.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct SpacesQuery {
    pub tipo: Option<String>,
    pub capacidade: Option<String>,
}

#[derive(Deserialize)]
pub struct SpaceDetailQuery {
    pub mes: Option<String>,
    pub data: Option<String>,
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub mes: Option<String>,
    pub espaco: Option<String>,
    pub dia: Option<String>,
    pub ok: Option<String>,
    pub erro: Option<String>,
}

#[derive(Deserialize)]
pub struct BookingForm {
    pub space_id: String,
    pub date: String,
    pub client_name: String,
    pub status: Option<String>,
    pub total_value: Option<String>,
}

impl BookingForm {
    pub fn to_create(&self) -> Result<BookingCreate, &'static str> {
        let space_id = Uuid::parse_str(self.space_id.trim()).map_err(|_| "Selecione um espaço.")?;
        let date = parse_date(&Some(self.date.clone())).ok_or("Informe uma data válida.")?;

        let data = BookingCreate {
            space_id,
            date,
            client_name: self.client_name.trim().to_string(),
            status: parse_opt(&self.status).unwrap_or_default(),
            total_value: parse_money(&self.total_value)?,
        };
        data.validate()?;
        Ok(data)
    }
}

#[derive(Deserialize)]
pub struct BookingStatusForm {
    pub status: String,
    pub mes: Option<String>,
    pub espaco: Option<String>,
}

impl BookingStatusForm {
    pub fn status(&self) -> Option<BookingStatus> {
        self.status.parse().ok()
    }
}

#[derive(Deserialize)]
pub struct LeadsQuery {
    pub lead: Option<String>,
    pub ok: Option<String>,
    pub erro: Option<String>,
}

#[derive(Deserialize)]
pub struct LeadStatusForm {
    pub status: String,
}

#[derive(Deserialize)]
pub struct CmsQuery {
    pub aba: Option<String>,
    pub editar: Option<String>,
    pub novo: Option<String>,
    pub ok: Option<String>,
    pub erro: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SiteConfigForm {
    pub site_name: String,
    pub seo_title: String,
    pub seo_description: String,
    pub keywords: String,
    pub logo_url: String,
    pub favicon_url: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_button_text: String,
    pub hero_background: String,
    pub about_banner: String,
    pub about_title: String,
    pub about_subtitle: String,
    pub about_history_title: String,
    pub about_history_text: String,
    pub contact_banner: String,
    pub contact_title: String,
    pub contact_subtitle: String,
    pub contact_whatsapp: String,
    pub contact_email: String,
    pub spaces_banner: String,
    pub spaces_title: String,
    pub spaces_subtitle: String,
    pub google_analytics_id: String,
    pub facebook_pixel_id: String,
    pub facebook_access_token: String,
}

impl From<SiteConfigForm> for SiteConfigUpdate {
    fn from(f: SiteConfigForm) -> Self {
        SiteConfigUpdate {
            site_name: f.site_name,
            seo_title: f.seo_title,
            seo_description: f.seo_description,
            keywords: f.keywords,
            logo_url: f.logo_url,
            favicon_url: f.favicon_url,
            hero_title: f.hero_title,
            hero_subtitle: f.hero_subtitle,
            hero_button_text: f.hero_button_text,
            hero_background: f.hero_background,
            about_banner: f.about_banner,
            about_title: f.about_title,
            about_subtitle: f.about_subtitle,
            about_history_title: f.about_history_title,
            about_history_text: f.about_history_text,
            contact_banner: f.contact_banner,
            contact_title: f.contact_title,
            contact_subtitle: f.contact_subtitle,
            contact_whatsapp: f.contact_whatsapp,
            contact_email: f.contact_email,
            spaces_banner: f.spaces_banner,
            spaces_title: f.spaces_title,
            spaces_subtitle: f.spaces_subtitle,
            google_analytics_id: Some(f.google_analytics_id),
            facebook_pixel_id: Some(f.facebook_pixel_id),
            facebook_access_token: Some(f.facebook_access_token),
        }
        .normalized()
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SpaceForm {
    pub name: String,
    pub description: String,
    pub capacity: String,
    pub price: Option<String>,
    pub space_type: String,
    pub image: String,
    pub gallery: String,
    pub video_url: String,
    pub features: String,
    pub availability: String,
    pub items_included: String,
}

impl SpaceForm {
    pub fn to_create(&self) -> Result<SpaceCreate, &'static str> {
        let capacity = match self.capacity.trim() {
            "" => 0,
            c => c.parse::<i32>().map_err(|_| "Capacidade inválida.")?,
        };
        if capacity < 0 {
            return Err("Capacidade inválida.");
        }

        let blank_to_none = |v: &str| {
            let v = v.trim();
            (!v.is_empty()).then(|| v.to_string())
        };
        let items = lines_to_list(&self.items_included);

        let data = SpaceCreate {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            capacity,
            price: parse_money(&self.price)?,
            space_type: self.space_type.parse::<SpaceType>().unwrap_or_default(),
            image: self.image.trim().to_string(),
            gallery: lines_to_list(&self.gallery),
            video_url: blank_to_none(&self.video_url),
            features: lines_to_list(&self.features),
            availability: blank_to_none(&self.availability),
            items_included: (!items.is_empty()).then_some(items),
        };
        data.validate()?;
        Ok(data)
    }
}

#[derive(Deserialize)]
pub struct UserCreateForm {
    pub full_name: String,
    pub email: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct RoleForm {
    pub role: String,
}

#[derive(Deserialize)]
pub struct ApiKeyForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
pub struct WebhookForm {
    pub url: String,
    pub event: Option<String>,
}
