//! Modelo de Quote
//!
//! Una cotización es transitoria: se fabrica por request y se descarta
//! con la respuesta. El tag `source` indica qué capa de precedencia
//! resolvió el precio.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Capa de precedencia que resolvió el precio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Override,
    Route,
    Formula,
}

/// Tipo de viaje solicitado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TripType {
    #[default]
    #[serde(rename = "one-way")]
    OneWay,
    #[serde(rename = "round-trip")]
    RoundTrip,
}

/// Cotización resuelta para un vehículo concreto (no se persiste)
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub origin_location_id: String,
    pub destination_location_id: String,
    pub vehicle_id: String,
    pub passengers: i32,
    pub resolved_price: Decimal,
    pub source: QuoteSource,
}
