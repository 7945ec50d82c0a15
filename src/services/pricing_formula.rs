//! Fórmula estática de precios
//!
//! Tier de fallback cuando no hay tarifa persistida para el corredor:
//! precio = base × multiplicador de vehículo × multiplicador de zona ×
//! factor de tipo de viaje, redondeado a 2 decimales.

use rust_decimal::Decimal;

use crate::models::quote::TripType;
use crate::models::vehicle::VehicleCategory;
use crate::models::zone::Zone;
use crate::services::vehicle_classifier::category_multiplier;

/// El par de zonas se cotiza por el extremo más lejano del punto de
/// referencia
pub fn zone_pair_multiplier(origin: &Zone, destination: &Zone) -> Decimal {
    origin.distance_multiplier.max(destination.distance_multiplier)
}

/// 1.0 para ida; el factor configurado (descuento por tramo) para ida y
/// vuelta
pub fn trip_type_factor(trip_type: TripType, round_trip_factor: Decimal) -> Decimal {
    match trip_type {
        TripType::OneWay => Decimal::ONE,
        TripType::RoundTrip => round_trip_factor,
    }
}

pub fn formula_price(
    base_price: Decimal,
    category: VehicleCategory,
    origin_zone: &Zone,
    destination_zone: &Zone,
    trip_type: TripType,
    round_trip_factor: Decimal,
) -> Decimal {
    let price = base_price
        * category_multiplier(category)
        * zone_pair_multiplier(origin_zone, destination_zone)
        * trip_type_factor(trip_type, round_trip_factor);
    price.round_dp(2)
}
