use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
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
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] =
        [Self::Pending, Self::Confirmed, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Confirmed => "Confirmado",
            Self::Cancelled => "Cancelado",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for BookingStatus {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid booking status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub space_id: Uuid,
    pub date: NaiveDate,
    pub client_name: String,
    pub status: BookingStatus,
    pub total_value: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingCreate {
    pub space_id: Uuid,
    pub date: NaiveDate,
    pub client_name: String,
    pub status: BookingStatus,
    pub total_value: Option<Decimal>,
}

impl Booking {
    pub fn value_label(&self) -> String {
        match self.total_value {
            Some(v) => format!("R$ {}", v.round_dp(2)),
            None => "-".to_string(),
        }
    }
}

impl BookingCreate {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.client_name.trim().is_empty() {
            return Err("Informe o nome do cliente.");
        }

        if self.total_value.is_some_and(|v| v.is_sign_negative()) {
            return Err("O valor não pode ser negativo.");
        }

        Ok(())
    }
}
