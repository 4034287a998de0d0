use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::SpaceType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Space {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub price: Option<Decimal>,
    pub space_type: SpaceType,
    pub image: String,
    pub gallery: Vec<String>,
    pub video_url: Option<String>,
    pub features: Vec<String>,
    pub availability: Option<String>,
    pub items_included: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

/// Fields written by the CMS form. Used for both insert and full update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceCreate {
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub price: Option<Decimal>,
    pub space_type: SpaceType,
    pub image: String,
    pub gallery: Vec<String>,
    pub video_url: Option<String>,
    pub features: Vec<String>,
    pub availability: Option<String>,
    pub items_included: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpaceSummary {
    pub id: Uuid,
    pub name: String,
    pub space_type: SpaceType,
}

impl Space {
    /// Gallery if it has entries, otherwise the cover image alone.
    pub fn gallery_images(&self) -> Vec<&str> {
        if !self.gallery.is_empty() {
            return self.gallery.iter().map(String::as_str).collect();
        }

        if self.image.is_empty() {
            Vec::new()
        } else {
            vec![self.image.as_str()]
        }
    }

    pub fn price_label(&self) -> String {
        match self.price {
            Some(p) => format!("R$ {}", p.round_dp(2)),
            None => "Sob consulta".to_string(),
        }
    }

    /// Price as a plain number for analytics; 0 when on request.
    pub fn price_value(&self) -> f64 {
        self.price.and_then(|p| p.to_f64()).unwrap_or(0.0)
    }

    pub fn items(&self) -> &[String] {
        self.items_included.as_deref().unwrap_or(&[])
    }

    pub fn availability_text(&self) -> &str {
        self.availability.as_deref().unwrap_or("")
    }

    pub fn video(&self) -> &str {
        self.video_url.as_deref().unwrap_or("")
    }

    pub fn to_create(&self) -> SpaceCreate {
        SpaceCreate {
            name: self.name.clone(),
            description: self.description.clone(),
            capacity: self.capacity,
            price: self.price,
            space_type: self.space_type,
            image: self.image.clone(),
            gallery: self.gallery.clone(),
            video_url: self.video_url.clone(),
            features: self.features.clone(),
            availability: self.availability.clone(),
            items_included: self.items_included.clone(),
        }
    }
}

impl SpaceCreate {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("O nome do espaço é obrigatório.");
        }

        if self.capacity < 0 {
            return Err("A capacidade não pode ser negativa.");
        }

        if self.price.is_some_and(|p| p.is_sign_negative()) {
            return Err("O preço não pode ser negativo.");
        }

        Ok(())
    }
}

/// Splits a textarea into trimmed, non-empty lines, keeping their order.
pub fn lines_to_list(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn list_to_lines(items: &[String]) -> String {
    items.join("\n")
}
