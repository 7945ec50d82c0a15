//! DTOs del cotizador de traslados

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::quote::{QuoteSource, TripType};
use crate::models::vehicle::Vehicle;

/// Request de cotización tal como lo envían los widgets de reserva
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuoteRequest {
    #[validate(length(min = 1))]
    pub origin_location_id: String,

    #[validate(length(min = 1))]
    pub destination_location_id: String,

    #[validate(range(min = 1, max = 60))]
    pub passengers: i32,

    #[serde(default)]
    pub trip_type: TripType,
}

/// Entrada de vehículo en la respuesta de cotización
#[derive(Debug, Clone, Serialize)]
pub struct QuoteVehicleResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    pub min_pax: i32,
    pub max_pax: i32,
    pub price: f64,
    pub source: QuoteSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl QuoteVehicleResponse {
    pub fn from_vehicle(vehicle: &Vehicle, price: Decimal, source: QuoteSource) -> Self {
        Self {
            id: vehicle.id.clone(),
            name: vehicle.name.clone(),
            category: vehicle.category.as_str().to_string(),
            min_pax: vehicle.min_pax,
            max_pax: vehicle.max_pax,
            price: price.to_f64().unwrap_or(0.0),
            source,
            image_url: vehicle.image_url.clone(),
        }
    }
}

/// Respuesta de cotización
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    pub currency: String,
    pub vehicles: Vec<QuoteVehicleResponse>,
}

/// Query del typeahead de ubicaciones
#[derive(Debug, Deserialize)]
pub struct LocationSearchQuery {
    pub query: Option<String>,
    pub limit: Option<i64>,
}

/// Resumen de ubicación para el typeahead
#[derive(Debug, Serialize)]
pub struct LocationSummaryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub location_type: String,
    pub zone_name: Option<String>,
}

/// Respuesta del typeahead de ubicaciones
#[derive(Debug, Serialize)]
pub struct LocationSearchResponse {
    pub locations: Vec<LocationSummaryResponse>,
}
