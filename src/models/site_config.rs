use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The singleton `site_settings` row: marketing copy, SEO metadata and
/// third-party tracking identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SiteConfig {
    pub id: Uuid,
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

    pub google_analytics_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub facebook_access_token: Option<String>,

    pub edited_at: DateTime<Utc>,
}

/// Everything the CMS "global configuration" tab can write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfigUpdate {
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

    pub google_analytics_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub facebook_access_token: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            site_name: "APCEF Eventos".into(),
            seo_title: "APCEF Eventos - Espaços para Festas e Eventos".into(),
            seo_description: "Cerimoniais, festas sociais e eventos corporativos na melhor estrutura do estado.".into(),
            keywords: "eventos, festas, casamento, corporativo, serra, espirito santo".into(),
            logo_url: String::new(),
            favicon_url: String::new(),

            hero_title: "Seu Evento Merece Este Cenário".into(),
            hero_subtitle: "Cerimoniais, festas sociais e eventos corporativos na melhor estrutura do estado.".into(),
            hero_button_text: "Conhecer Espaços".into(),
            hero_background: "https://picsum.photos/id/16/1920/1080".into(),

            about_banner: "https://picsum.photos/id/124/1920/1080".into(),
            about_title: "Muito mais que um clube.".into(),
            about_subtitle: "Uma família.".into(),
            about_history_title: "Tradição em Bem-Receber".into(),
            about_history_text: "A Associação do Pessoal da Caixa Econômica Federal do Espírito Santo (APCEF/ES) foi fundada com o objetivo de criar um refúgio...".into(),

            contact_banner: "https://picsum.photos/id/42/1920/1080".into(),
            contact_title: "Vamos planejar seu evento?".into(),
            contact_subtitle: "Nossa equipe de especialistas está pronta para tirar suas dúvidas.".into(),
            contact_whatsapp: "(27) 3333-3333".into(),
            contact_email: "eventos@apcefes.com.br".into(),

            spaces_banner: "https://picsum.photos/id/16/1920/600".into(),
            spaces_title: "Nossos Espaços".into(),
            spaces_subtitle: "Conheça nossa estrutura completa. Do churrasco em família à convenção para milhares de pessoas.".into(),

            google_analytics_id: None,
            facebook_pixel_id: None,
            facebook_access_token: None,

            edited_at: DateTime::<Utc>::default(),
        }
    }
}

impl SiteConfig {
    /// `<title>` for a page: "Page | Site" or just the SEO title.
    pub fn page_title(&self, page: Option<&str>) -> String {
        match page.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) => format!("{} | {}", p, self.site_name),
            None => self.seo_title.clone(),
        }
    }

    pub fn whatsapp_link(&self) -> String {
        super::whatsapp_link(&self.contact_whatsapp)
    }

    pub fn analytics_id(&self) -> &str {
        self.google_analytics_id.as_deref().unwrap_or("")
    }

    pub fn pixel_id(&self) -> &str {
        self.facebook_pixel_id.as_deref().unwrap_or("")
    }

    pub fn access_token(&self) -> &str {
        self.facebook_access_token.as_deref().unwrap_or("")
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SiteConfigUpdate {
    /// Empty tracking identifiers mean "not configured".
    pub fn normalized(mut self) -> Self {
        self.google_analytics_id = blank_to_none(self.google_analytics_id);
        self.facebook_pixel_id = blank_to_none(self.facebook_pixel_id);
        self.facebook_access_token =
            blank_to_none(self.facebook_access_token);
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.site_name.trim().is_empty() {
            return Err("O nome do site é obrigatório.");
        }
        Ok(())
    }
}

impl From<&SiteConfig> for SiteConfigUpdate {
    fn from(c: &SiteConfig) -> Self {
        Self {
            site_name: c.site_name.clone(),
            seo_title: c.seo_title.clone(),
            seo_description: c.seo_description.clone(),
            keywords: c.keywords.clone(),
            logo_url: c.logo_url.clone(),
            favicon_url: c.favicon_url.clone(),
            hero_title: c.hero_title.clone(),
            hero_subtitle: c.hero_subtitle.clone(),
            hero_button_text: c.hero_button_text.clone(),
            hero_background: c.hero_background.clone(),
            about_banner: c.about_banner.clone(),
            about_title: c.about_title.clone(),
            about_subtitle: c.about_subtitle.clone(),
            about_history_title: c.about_history_title.clone(),
            about_history_text: c.about_history_text.clone(),
            contact_banner: c.contact_banner.clone(),
            contact_title: c.contact_title.clone(),
            contact_subtitle: c.contact_subtitle.clone(),
            contact_whatsapp: c.contact_whatsapp.clone(),
            contact_email: c.contact_email.clone(),
            spaces_banner: c.spaces_banner.clone(),
            spaces_title: c.spaces_title.clone(),
            spaces_subtitle: c.spaces_subtitle.clone(),
            google_analytics_id: c.google_analytics_id.clone(),
            facebook_pixel_id: c.facebook_pixel_id.clone(),
            facebook_access_token: c.facebook_access_token.clone(),
        }
    }
}
