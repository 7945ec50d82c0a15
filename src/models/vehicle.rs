//! Modelo de TransferVehicle
//!
//! Este módulo contiene el struct Vehicle y su categoría. La categoría
//! alimenta el multiplicador de la fórmula estática y el filtro premium.
//! Mapea exactamente a la tabla transfer_vehicles con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use validator::Validate;

/// Categoría del vehículo - mapea al ENUM vehicle_category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "vehicle_category", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleCategory {
    Sedan,
    Van,
    Suv,
    Vip,
    Bus,
}

impl VehicleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::Sedan => "SEDAN",
            VehicleCategory::Van => "VAN",
            VehicleCategory::Suv => "SUV",
            VehicleCategory::Vip => "VIP",
            VehicleCategory::Bus => "BUS",
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla transfer_vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub category: VehicleCategory,
    pub min_pax: i32,
    pub max_pax: i32,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Un vehículo solo se ofrece si los pasajeros caen en su envelope
    /// de capacidad (inclusive en ambos extremos)
    pub fn accepts_passengers(&self, passengers: i32) -> bool {
        passengers >= self.min_pax && passengers <= self.max_pax
    }
}

/// Payload de upsert de vehículo (superficie admin)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewVehicle {
    #[validate(length(min = 2, max = 64))]
    pub slug: String,

    #[validate(length(min = 2, max = 120))]
    pub name: String,

    pub category: VehicleCategory,

    #[validate(range(min = 1, max = 60))]
    pub min_pax: i32,

    #[validate(range(min = 1, max = 60))]
    pub max_pax: i32,

    pub image_url: Option<String>,
}
