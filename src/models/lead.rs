use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Converted,
}

impl LeadStatus {
    /// Kanban column order.
    pub const ALL: [LeadStatus; 3] =
        [Self::New, Self::Contacted, Self::Converted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Converted => "converted",
        }
    }

    pub fn column_title(&self) -> &'static str {
        match self {
            Self::New => "Novos Interessados",
            Self::Contacted => "Em Negociação",
            Self::Converted => "Fechados / Pagos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "Novo",
            Self::Contacted => "Em andamento",
            Self::Converted => "Fechado",
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for LeadStatus {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "converted" => Ok(Self::Converted),
            _ => Err(format!("invalid lead status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub interest: String,
    pub date: NaiveDate,
    pub status: LeadStatus,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub interest: String,
    pub date: NaiveDate,
    pub status: LeadStatus,
    pub source: Option<String>,
}

impl Lead {
    pub fn whatsapp_link(&self) -> String {
        whatsapp_link(&self.phone)
    }

    /// First characters of the interest text, for cards.
    pub fn interest_preview(&self) -> String {
        const LEN: usize = 30;
        let mut chars = self.interest.chars();
        let preview: String = chars.by_ref().take(LEN).collect();
        if chars.next().is_some() {
            format!("{preview}...")
        } else {
            preview
        }
    }
}

/// Brazilian WhatsApp deep link; non-digits are stripped.
pub fn whatsapp_link(phone: &str) -> String {
    let digits: String =
        phone.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/55{digits}")
}
