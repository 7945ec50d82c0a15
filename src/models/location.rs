//! Modelo de TransferLocation
//!
//! Una ubicación (aeropuerto u hotel) es la unidad que el cliente pide;
//! las zonas son la unidad que se cotiza. Mapea a transfer_locations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use validator::Validate;

/// Tipo de ubicación - mapea al ENUM transfer_location_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "transfer_location_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LocationType {
    Airport,
    Hotel,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Airport => "AIRPORT",
            LocationType::Hotel => "HOTEL",
        }
    }
}

/// Ubicación de traslado - mapea exactamente a la tabla transfer_locations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub location_type: LocationType,
    /// Asignación explícita de zona; si falta, el resolver aplica aliases
    pub zone_id: Option<String>,
    /// Nombre del destino declarado (p.ej. "Cap Cana"), segunda llave del
    /// matching por alias
    pub destination_name: Option<String>,
    pub country_code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload de upsert de ubicación (superficie admin)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewLocation {
    #[validate(length(min = 2, max = 96))]
    pub slug: String,

    #[validate(length(min = 2, max = 200))]
    pub name: String,

    pub location_type: LocationType,

    pub zone_id: Option<String>,

    pub destination_name: Option<String>,

    #[validate(length(min = 2, max = 3))]
    pub country_code: String,
}
