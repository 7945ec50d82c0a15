//! Repositorio de pricing en memoria
//!
//! Fixture para tests y entornos sin base de datos. Aplica exactamente
//! las mismas reglas del write path que el repositorio Postgres para que
//! los tests del resolver ejerciten el contrato completo.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::location::{Location, NewLocation};
use crate::models::route::{NewOverride, Route, RouteKey, RoutePrice, RoutePriceOverride};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::models::zone::{NewZone, Zone};
use crate::repositories::store::{
    validate_new_override, validate_new_vehicle, validate_new_zone, PricingStore, ValidatePayload,
};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{validate_positive_price, validate_same_country};

#[derive(Default)]
struct MemoryState {
    zones: HashMap<String, Zone>,
    locations: HashMap<String, Location>,
    vehicles: HashMap<String, Vehicle>,
    routes: HashMap<String, Route>,
    prices: HashMap<(String, String), RoutePrice>,
    overrides: Vec<RoutePriceOverride>,
}

pub struct InMemoryPricingRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryPricingRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
        }
    }
}

impl Default for InMemoryPricingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PricingStore for InMemoryPricingRepository {
    async fn get_zone(&self, id: &str) -> AppResult<Option<Zone>> {
        let state = self.state.read().await;
        Ok(state.zones.get(id).cloned())
    }

    async fn find_zone_by_slug(&self, slug: &str) -> AppResult<Option<Zone>> {
        let state = self.state.read().await;
        Ok(state.zones.values().find(|z| z.slug == slug).cloned())
    }

    async fn list_zones(&self, country_code: &str) -> AppResult<Vec<Zone>> {
        let state = self.state.read().await;
        let mut zones: Vec<Zone> = state
            .zones
            .values()
            .filter(|z| z.active && z.country_code == country_code)
            .cloned()
            .collect();
        zones.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(zones)
    }

    async fn get_location(&self, id: &str) -> AppResult<Option<Location>> {
        let state = self.state.read().await;
        Ok(state.locations.get(id).cloned())
    }

    async fn find_location_by_slug(&self, slug: &str) -> AppResult<Option<Location>> {
        let state = self.state.read().await;
        Ok(state.locations.values().find(|l| l.slug == slug).cloned())
    }

    async fn search_locations(&self, query: &str, limit: i64) -> AppResult<Vec<Location>> {
        let needle = query.trim().to_lowercase();
        let state = self.state.read().await;
        let mut matches: Vec<Location> = state
            .locations
            .values()
            .filter(|l| {
                l.active
                    && (l.name.to_lowercase().contains(&needle)
                        || l.slug.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.truncate(limit.max(0) as usize);
        Ok(matches)
    }

    async fn get_vehicle(&self, id: &str) -> AppResult<Option<Vehicle>> {
        let state = self.state.read().await;
        Ok(state.vehicles.get(id).cloned())
    }

    async fn list_active_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let state = self.state.read().await;
        let mut vehicles: Vec<Vehicle> =
            state.vehicles.values().filter(|v| v.active).cloned().collect();
        vehicles.sort_by(|a, b| a.min_pax.cmp(&b.min_pax).then_with(|| a.name.cmp(&b.name)));
        Ok(vehicles)
    }

    async fn get_route(&self, key: &RouteKey) -> AppResult<Option<Route>> {
        let state = self.state.read().await;
        Ok(state
            .routes
            .values()
            .find(|r| r.active && r.key() == *key)
            .cloned())
    }

    async fn get_route_price(
        &self,
        route_id: &str,
        vehicle_id: &str,
    ) -> AppResult<Option<RoutePrice>> {
        let state = self.state.read().await;
        Ok(state
            .prices
            .get(&(route_id.to_string(), vehicle_id.to_string()))
            .cloned())
    }

    async fn list_route_prices(&self, route_id: &str) -> AppResult<Vec<RoutePrice>> {
        let state = self.state.read().await;
        Ok(state
            .prices
            .values()
            .filter(|p| p.route_id == route_id)
            .cloned()
            .collect())
    }

    async fn list_route_overrides(&self, route_id: &str) -> AppResult<Vec<RoutePriceOverride>> {
        let state = self.state.read().await;
        Ok(state
            .overrides
            .iter()
            .filter(|o| o.route_id == route_id)
            .cloned()
            .collect())
    }

    async fn upsert_zone(&self, zone: NewZone) -> AppResult<Zone> {
        validate_new_zone(&zone)?;

        let mut state = self.state.write().await;
        let stored = Zone {
            id: zone.slug.clone(),
            slug: zone.slug.clone(),
            name: zone.name.clone(),
            country_code: zone.country_code.clone(),
            distance_multiplier: zone.distance_multiplier,
            aliases: zone.aliases.iter().map(|a| a.trim().to_string()).collect(),
            active: true,
            created_at: state
                .zones
                .get(&zone.slug)
                .map(|z| z.created_at)
                .unwrap_or_else(Utc::now),
        };
        state.zones.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn delete_zone(&self, id: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.locations.values().any(|l| l.zone_id.as_deref() == Some(id)) {
            return Err(AppError::Conflict(format!(
                "La zona '{}' tiene ubicaciones asignadas y no puede eliminarse",
                id
            )));
        }
        state.zones.remove(id);
        Ok(())
    }

    async fn upsert_location(&self, location: NewLocation) -> AppResult<Location> {
        location.validate_payload()?;

        let mut state = self.state.write().await;
        if let Some(zone_id) = &location.zone_id {
            if !state.zones.contains_key(zone_id) {
                return Err(AppError::BadRequest(format!(
                    "La zona '{}' no existe",
                    zone_id
                )));
            }
        }
        let stored = Location {
            id: location.slug.clone(),
            slug: location.slug.clone(),
            name: location.name.clone(),
            location_type: location.location_type,
            zone_id: location.zone_id.clone(),
            destination_name: location.destination_name.clone(),
            country_code: location.country_code.clone(),
            active: true,
            created_at: state
                .locations
                .get(&location.slug)
                .map(|l| l.created_at)
                .unwrap_or_else(Utc::now),
        };
        state.locations.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn upsert_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        validate_new_vehicle(&vehicle)?;

        let mut state = self.state.write().await;
        let stored = Vehicle {
            id: vehicle.slug.clone(),
            slug: vehicle.slug.clone(),
            name: vehicle.name.clone(),
            category: vehicle.category,
            min_pax: vehicle.min_pax,
            max_pax: vehicle.max_pax,
            image_url: vehicle.image_url.clone(),
            active: true,
            created_at: state
                .vehicles
                .get(&vehicle.slug)
                .map(|v| v.created_at)
                .unwrap_or_else(Utc::now),
        };
        state.vehicles.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn upsert_route(&self, zone_a_id: &str, zone_b_id: &str) -> AppResult<Route> {
        let mut state = self.state.write().await;
        let zone_a = state
            .zones
            .get(zone_a_id)
            .cloned()
            .ok_or_else(|| AppError::BadRequest(format!("La zona '{}' no existe", zone_a_id)))?;
        let zone_b = state
            .zones
            .get(zone_b_id)
            .cloned()
            .ok_or_else(|| AppError::BadRequest(format!("La zona '{}' no existe", zone_b_id)))?;
        validate_same_country(&zone_a, &zone_b)?;

        let key = RouteKey::new(&zone_a.id, &zone_b.id);
        let route_id = key.route_id();
        let stored = Route {
            id: route_id.clone(),
            zone_a_id: key.zone_a_id().to_string(),
            zone_b_id: key.zone_b_id().to_string(),
            country_code: zone_a.country_code.clone(),
            active: true,
            created_at: state
                .routes
                .get(&route_id)
                .map(|r| r.created_at)
                .unwrap_or_else(Utc::now),
        };
        state.routes.insert(route_id, stored.clone());
        Ok(stored)
    }

    async fn upsert_route_price(
        &self,
        route_id: &str,
        vehicle_id: &str,
        price: Decimal,
    ) -> AppResult<RoutePrice> {
        validate_positive_price(price)?;

        let mut state = self.state.write().await;
        if !state.routes.contains_key(route_id) {
            return Err(AppError::BadRequest(format!("La ruta '{}' no existe", route_id)));
        }
        if !state.vehicles.contains_key(vehicle_id) {
            return Err(AppError::BadRequest(format!(
                "El vehículo '{}' no existe",
                vehicle_id
            )));
        }
        let stored = RoutePrice {
            route_id: route_id.to_string(),
            vehicle_id: vehicle_id.to_string(),
            price,
            created_at: Utc::now(),
        };
        state
            .prices
            .insert((route_id.to_string(), vehicle_id.to_string()), stored.clone());
        Ok(stored)
    }

    async fn upsert_override(&self, payload: NewOverride) -> AppResult<RoutePriceOverride> {
        validate_new_override(&payload)?;

        let mut state = self.state.write().await;
        if !state.routes.contains_key(&payload.route_id) {
            return Err(AppError::BadRequest(format!(
                "La ruta '{}' no existe",
                payload.route_id
            )));
        }
        if !state.vehicles.contains_key(&payload.vehicle_id) {
            return Err(AppError::BadRequest(format!(
                "El vehículo '{}' no existe",
                payload.vehicle_id
            )));
        }
        for endpoint in [&payload.origin_location_id, &payload.destination_location_id] {
            if let Some(location_id) = endpoint {
                if !state.locations.contains_key(location_id) {
                    return Err(AppError::BadRequest(format!(
                        "La ubicación '{}' no existe",
                        location_id
                    )));
                }
            }
        }

        // El scope exacto (ruta, vehículo, extremos) identifica al override
        let existing = state.overrides.iter().position(|o| {
            o.route_id == payload.route_id
                && o.vehicle_id == payload.vehicle_id
                && o.origin_location_id == payload.origin_location_id
                && o.destination_location_id == payload.destination_location_id
        });

        let stored = match existing {
            Some(index) => {
                let current = &mut state.overrides[index];
                current.price = payload.price;
                current.notes = payload.notes.clone();
                current.clone()
            }
            None => {
                let created = RoutePriceOverride {
                    id: Uuid::new_v4(),
                    route_id: payload.route_id.clone(),
                    vehicle_id: payload.vehicle_id.clone(),
                    origin_location_id: payload.origin_location_id.clone(),
                    destination_location_id: payload.destination_location_id.clone(),
                    price: payload.price,
                    notes: payload.notes.clone(),
                    created_at: Utc::now(),
                };
                state.overrides.push(created.clone());
                created
            }
        };

        Ok(stored)
    }
}
