//! Modelo de TransferRoute
//!
//! Una ruta es un par de zonas sin dirección, almacenado en orden
//! canónico (id menor primero) para que A→B y B→A resuelvan al mismo
//! registro. Mapea a transfer_routes, transfer_route_prices y
//! transfer_route_price_overrides.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Llave canónica de una ruta: par de zonas con id menor primero.
/// Invariante: `zone_a_id <= zone_b_id`; se normaliza en el constructor,
/// nunca en los call sites.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    zone_a_id: String,
    zone_b_id: String,
}

impl RouteKey {
    pub fn new(zone_a: &str, zone_b: &str) -> Self {
        if zone_a <= zone_b {
            Self {
                zone_a_id: zone_a.to_string(),
                zone_b_id: zone_b.to_string(),
            }
        } else {
            Self {
                zone_a_id: zone_b.to_string(),
                zone_b_id: zone_a.to_string(),
            }
        }
    }

    pub fn zone_a_id(&self) -> &str {
        &self.zone_a_id
    }

    pub fn zone_b_id(&self) -> &str {
        &self.zone_b_id
    }

    /// Id determinístico de la ruta para upserts idempotentes
    pub fn route_id(&self) -> String {
        format!("{}--{}", self.zone_a_id, self.zone_b_id)
    }
}

/// Route principal - mapea exactamente a la tabla transfer_routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: String,
    pub zone_a_id: String,
    pub zone_b_id: String,
    pub country_code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Route {
    pub fn key(&self) -> RouteKey {
        RouteKey::new(&self.zone_a_id, &self.zone_b_id)
    }
}

/// Precio base por (ruta, vehículo) - mapea a transfer_route_prices
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoutePrice {
    pub route_id: String,
    pub vehicle_id: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Excepción de precio scoped a ubicaciones concretas dentro de una ruta.
/// Un endpoint en None significa "aplica sin importar ese extremo".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoutePriceOverride {
    pub id: Uuid,
    pub route_id: String,
    pub vehicle_id: String,
    pub origin_location_id: Option<String>,
    pub destination_location_id: Option<String>,
    pub price: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload de upsert de override (superficie admin)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewOverride {
    #[validate(length(min = 1))]
    pub route_id: String,

    #[validate(length(min = 1))]
    pub vehicle_id: String,

    pub origin_location_id: Option<String>,

    pub destination_location_id: Option<String>,

    pub price: Decimal,

    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_key_is_symmetric() {
        let ab = RouteKey::new("PUJ_BAVARO", "SANTO_DOMINGO");
        let ba = RouteKey::new("SANTO_DOMINGO", "PUJ_BAVARO");
        assert_eq!(ab, ba);
        assert_eq!(ab.route_id(), ba.route_id());
        assert_eq!(ab.zone_a_id(), "PUJ_BAVARO");
        assert_eq!(ab.zone_b_id(), "SANTO_DOMINGO");
    }

    #[test]
    fn test_route_key_same_zone_pair() {
        let key = RouteKey::new("PUJ_BAVARO", "PUJ_BAVARO");
        assert_eq!(key.zone_a_id(), key.zone_b_id());
        assert_eq!(key.route_id(), "PUJ_BAVARO--PUJ_BAVARO");
    }
}
