//! Modelo de TransferZone
//!
//! Una zona agrupa ubicaciones que se cotizan como una sola unidad de
//! distancia. Mapea a la tabla transfer_zones con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Zona de traslados - mapea exactamente a la tabla transfer_zones
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Zone {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub country_code: String,
    /// Multiplicador relativo de distancia desde el punto de referencia.
    /// Invariante: siempre > 0.
    pub distance_multiplier: Decimal,
    /// Microzonas y hoteles destacados que resuelven a esta zona por nombre
    pub aliases: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Zone {
    /// Match case-insensitive de un nombre mostrado contra el nombre de la
    /// zona o su lista de aliases
    pub fn matches_alias(&self, candidate: &str) -> bool {
        let needle = candidate.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        if self.name.to_lowercase() == needle {
            return true;
        }
        self.aliases.iter().any(|alias| alias.to_lowercase() == needle)
    }
}

/// Payload de upsert de zona (superficie admin)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewZone {
    #[validate(length(min = 2, max = 64))]
    pub slug: String,

    #[validate(length(min = 2, max = 160))]
    pub name: String,

    #[validate(length(min = 2, max = 3))]
    pub country_code: String,

    pub distance_multiplier: Decimal,

    #[serde(default)]
    pub aliases: Vec<String>,
}
