//! Contrato de acceso al almacén de datos de pricing
//!
//! El resolver de cotizaciones recibe un `PricingStore` construido
//! explícitamente (inyección de dependencias), de modo que los tests
//! sustituyen el Postgres real por el fixture en memoria sin tocar
//! ninguna otra pieza.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::location::{Location, NewLocation};
use crate::models::route::{NewOverride, Route, RouteKey, RoutePrice, RoutePriceOverride};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::models::zone::{NewZone, Zone};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{
    validate_pax_envelope, validate_positive_multiplier, validate_positive_price,
};

/// Operaciones de lectura consumidas por el motor más las escrituras de
/// la superficie admin/seed. Las lecturas no tienen efectos secundarios;
/// las escrituras son upserts de fila única.
#[async_trait]
pub trait PricingStore: Send + Sync {
    async fn get_zone(&self, id: &str) -> AppResult<Option<Zone>>;
    async fn find_zone_by_slug(&self, slug: &str) -> AppResult<Option<Zone>>;
    async fn list_zones(&self, country_code: &str) -> AppResult<Vec<Zone>>;

    async fn get_location(&self, id: &str) -> AppResult<Option<Location>>;
    async fn find_location_by_slug(&self, slug: &str) -> AppResult<Option<Location>>;
    async fn search_locations(&self, query: &str, limit: i64) -> AppResult<Vec<Location>>;

    async fn get_vehicle(&self, id: &str) -> AppResult<Option<Vehicle>>;
    async fn list_active_vehicles(&self) -> AppResult<Vec<Vehicle>>;

    async fn get_route(&self, key: &RouteKey) -> AppResult<Option<Route>>;
    async fn get_route_price(
        &self,
        route_id: &str,
        vehicle_id: &str,
    ) -> AppResult<Option<RoutePrice>>;
    async fn list_route_prices(&self, route_id: &str) -> AppResult<Vec<RoutePrice>>;
    async fn list_route_overrides(&self, route_id: &str) -> AppResult<Vec<RoutePriceOverride>>;

    /// Overrides de un vehículo concreto dentro de una ruta
    async fn list_overrides(
        &self,
        route_id: &str,
        vehicle_id: &str,
    ) -> AppResult<Vec<RoutePriceOverride>> {
        let overrides = self.list_route_overrides(route_id).await?;
        Ok(overrides
            .into_iter()
            .filter(|o| o.vehicle_id == vehicle_id)
            .collect())
    }

    async fn upsert_zone(&self, zone: NewZone) -> AppResult<Zone>;
    async fn delete_zone(&self, id: &str) -> AppResult<()>;
    async fn upsert_location(&self, location: NewLocation) -> AppResult<Location>;
    async fn upsert_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;
    async fn upsert_route(&self, zone_a_id: &str, zone_b_id: &str) -> AppResult<Route>;
    async fn upsert_route_price(
        &self,
        route_id: &str,
        vehicle_id: &str,
        price: Decimal,
    ) -> AppResult<RoutePrice>;
    async fn upsert_override(&self, payload: NewOverride) -> AppResult<RoutePriceOverride>;
}

/// Reglas del write path compartidas entre implementaciones

pub(crate) fn validate_new_zone(zone: &NewZone) -> AppResult<()> {
    zone.validate_payload()?;
    validate_positive_multiplier(zone.distance_multiplier)
}

pub(crate) fn validate_new_vehicle(vehicle: &NewVehicle) -> AppResult<()> {
    vehicle.validate_payload()?;
    validate_pax_envelope(vehicle.min_pax, vehicle.max_pax)
}

pub(crate) fn validate_new_override(payload: &NewOverride) -> AppResult<()> {
    payload.validate_payload()?;
    validate_positive_price(payload.price)
}

/// Atajo para correr las validaciones derive de `validator` devolviendo
/// el AppError del sistema
pub(crate) trait ValidatePayload {
    fn validate_payload(&self) -> AppResult<()>;
}

impl<T: validator::Validate> ValidatePayload for T {
    fn validate_payload(&self) -> AppResult<()> {
        self.validate().map_err(AppError::Validation)
    }
}
