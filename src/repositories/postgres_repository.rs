//! Repositorio de pricing sobre PostgreSQL
//!
//! Acceso keyed de lectura más los upserts de fila única de la
//! superficie admin/seed. Toda normalización de pares de zonas pasa por
//! `RouteKey` antes de tocar la base.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
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

pub struct PostgresPricingRepository {
    pool: PgPool,
}

impl PostgresPricingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn require_zone(&self, id: &str) -> AppResult<Zone> {
        self.get_zone(id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("La zona '{}' no existe", id)))
    }

    async fn require_vehicle(&self, id: &str) -> AppResult<Vehicle> {
        self.get_vehicle(id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("El vehículo '{}' no existe", id)))
    }

    async fn require_route(&self, id: &str) -> AppResult<Route> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM transfer_routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        route.ok_or_else(|| AppError::BadRequest(format!("La ruta '{}' no existe", id)))
    }

    async fn require_location(&self, id: &str) -> AppResult<Location> {
        self.get_location(id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("La ubicación '{}' no existe", id)))
    }
}

#[async_trait]
impl PricingStore for PostgresPricingRepository {
    async fn get_zone(&self, id: &str) -> AppResult<Option<Zone>> {
        let zone = sqlx::query_as::<_, Zone>("SELECT * FROM transfer_zones WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(zone)
    }

    async fn find_zone_by_slug(&self, slug: &str) -> AppResult<Option<Zone>> {
        let zone = sqlx::query_as::<_, Zone>("SELECT * FROM transfer_zones WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(zone)
    }

    async fn list_zones(&self, country_code: &str) -> AppResult<Vec<Zone>> {
        let zones = sqlx::query_as::<_, Zone>(
            "SELECT * FROM transfer_zones WHERE country_code = $1 AND active ORDER BY name",
        )
        .bind(country_code)
        .fetch_all(&self.pool)
        .await?;
        Ok(zones)
    }

    async fn get_location(&self, id: &str) -> AppResult<Option<Location>> {
        let location =
            sqlx::query_as::<_, Location>("SELECT * FROM transfer_locations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(location)
    }

    async fn find_location_by_slug(&self, slug: &str) -> AppResult<Option<Location>> {
        let location =
            sqlx::query_as::<_, Location>("SELECT * FROM transfer_locations WHERE slug = $1")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;
        Ok(location)
    }

    async fn search_locations(&self, query: &str, limit: i64) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT * FROM transfer_locations
            WHERE active AND (name ILIKE '%' || $1 || '%' OR slug ILIKE '%' || $1 || '%')
            ORDER BY name
            LIMIT $2
            "#,
        )
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }

    async fn get_vehicle(&self, id: &str) -> AppResult<Option<Vehicle>> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM transfer_vehicles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(vehicle)
    }

    async fn list_active_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM transfer_vehicles WHERE active ORDER BY min_pax, name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    async fn get_route(&self, key: &RouteKey) -> AppResult<Option<Route>> {
        let route = sqlx::query_as::<_, Route>(
            "SELECT * FROM transfer_routes WHERE zone_a_id = $1 AND zone_b_id = $2 AND active",
        )
        .bind(key.zone_a_id())
        .bind(key.zone_b_id())
        .fetch_optional(&self.pool)
        .await?;
        Ok(route)
    }

    async fn get_route_price(
        &self,
        route_id: &str,
        vehicle_id: &str,
    ) -> AppResult<Option<RoutePrice>> {
        let price = sqlx::query_as::<_, RoutePrice>(
            "SELECT * FROM transfer_route_prices WHERE route_id = $1 AND vehicle_id = $2",
        )
        .bind(route_id)
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(price)
    }

    async fn list_route_prices(&self, route_id: &str) -> AppResult<Vec<RoutePrice>> {
        let prices = sqlx::query_as::<_, RoutePrice>(
            "SELECT * FROM transfer_route_prices WHERE route_id = $1",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(prices)
    }

    async fn list_route_overrides(&self, route_id: &str) -> AppResult<Vec<RoutePriceOverride>> {
        let overrides = sqlx::query_as::<_, RoutePriceOverride>(
            "SELECT * FROM transfer_route_price_overrides WHERE route_id = $1",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(overrides)
    }

    async fn upsert_zone(&self, zone: NewZone) -> AppResult<Zone> {
        validate_new_zone(&zone)?;

        let aliases: Vec<String> = zone.aliases.iter().map(|a| a.trim().to_string()).collect();
        let stored = sqlx::query_as::<_, Zone>(
            r#"
            INSERT INTO transfer_zones (id, slug, name, country_code, distance_multiplier, aliases, active, created_at)
            VALUES ($1, $1, $2, $3, $4, $5, TRUE, $6)
            ON CONFLICT (slug) DO UPDATE
            SET name = EXCLUDED.name,
                country_code = EXCLUDED.country_code,
                distance_multiplier = EXCLUDED.distance_multiplier,
                aliases = EXCLUDED.aliases,
                active = TRUE
            RETURNING *
            "#,
        )
        .bind(&zone.slug)
        .bind(&zone.name)
        .bind(&zone.country_code)
        .bind(zone.distance_multiplier)
        .bind(&aliases)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn delete_zone(&self, id: &str) -> AppResult<()> {
        let (has_locations,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM transfer_locations WHERE zone_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if has_locations {
            return Err(AppError::Conflict(format!(
                "La zona '{}' tiene ubicaciones asignadas y no puede eliminarse",
                id
            )));
        }

        sqlx::query("DELETE FROM transfer_zones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn upsert_location(&self, location: NewLocation) -> AppResult<Location> {
        location.validate_payload()?;
        if let Some(zone_id) = &location.zone_id {
            self.require_zone(zone_id).await?;
        }

        let stored = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO transfer_locations (id, slug, name, location_type, zone_id, destination_name, country_code, active, created_at)
            VALUES ($1, $1, $2, $3, $4, $5, $6, TRUE, $7)
            ON CONFLICT (slug) DO UPDATE
            SET name = EXCLUDED.name,
                location_type = EXCLUDED.location_type,
                zone_id = EXCLUDED.zone_id,
                destination_name = EXCLUDED.destination_name,
                country_code = EXCLUDED.country_code,
                active = TRUE
            RETURNING *
            "#,
        )
        .bind(&location.slug)
        .bind(&location.name)
        .bind(location.location_type)
        .bind(&location.zone_id)
        .bind(&location.destination_name)
        .bind(&location.country_code)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn upsert_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        validate_new_vehicle(&vehicle)?;

        let stored = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO transfer_vehicles (id, slug, name, category, min_pax, max_pax, image_url, active, created_at)
            VALUES ($1, $1, $2, $3, $4, $5, $6, TRUE, $7)
            ON CONFLICT (slug) DO UPDATE
            SET name = EXCLUDED.name,
                category = EXCLUDED.category,
                min_pax = EXCLUDED.min_pax,
                max_pax = EXCLUDED.max_pax,
                image_url = EXCLUDED.image_url,
                active = TRUE
            RETURNING *
            "#,
        )
        .bind(&vehicle.slug)
        .bind(&vehicle.name)
        .bind(vehicle.category)
        .bind(vehicle.min_pax)
        .bind(vehicle.max_pax)
        .bind(&vehicle.image_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn upsert_route(&self, zone_a_id: &str, zone_b_id: &str) -> AppResult<Route> {
        let zone_a = self.require_zone(zone_a_id).await?;
        let zone_b = self.require_zone(zone_b_id).await?;
        validate_same_country(&zone_a, &zone_b)?;

        let key = RouteKey::new(&zone_a.id, &zone_b.id);
        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO transfer_routes (id, zone_a_id, zone_b_id, country_code, active, created_at)
            VALUES ($1, $2, $3, $4, TRUE, $5)
            ON CONFLICT (zone_a_id, zone_b_id) DO UPDATE SET active = TRUE
            RETURNING *
            "#,
        )
        .bind(key.route_id())
        .bind(key.zone_a_id())
        .bind(key.zone_b_id())
        .bind(&zone_a.country_code)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(route)
    }

    async fn upsert_route_price(
        &self,
        route_id: &str,
        vehicle_id: &str,
        price: Decimal,
    ) -> AppResult<RoutePrice> {
        validate_positive_price(price)?;
        self.require_route(route_id).await?;
        self.require_vehicle(vehicle_id).await?;

        let stored = sqlx::query_as::<_, RoutePrice>(
            r#"
            INSERT INTO transfer_route_prices (route_id, vehicle_id, price, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (route_id, vehicle_id) DO UPDATE SET price = EXCLUDED.price
            RETURNING *
            "#,
        )
        .bind(route_id)
        .bind(vehicle_id)
        .bind(price)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn upsert_override(&self, payload: NewOverride) -> AppResult<RoutePriceOverride> {
        validate_new_override(&payload)?;
        self.require_route(&payload.route_id).await?;
        self.require_vehicle(&payload.vehicle_id).await?;
        if let Some(origin_id) = &payload.origin_location_id {
            self.require_location(origin_id).await?;
        }
        if let Some(destination_id) = &payload.destination_location_id {
            self.require_location(destination_id).await?;
        }

        // Un override se identifica por su scope exacto (ruta, vehículo,
        // extremos); IS NOT DISTINCT FROM trata NULL como valor
        let existing = sqlx::query_as::<_, RoutePriceOverride>(
            r#"
            SELECT * FROM transfer_route_price_overrides
            WHERE route_id = $1 AND vehicle_id = $2
              AND origin_location_id IS NOT DISTINCT FROM $3
              AND destination_location_id IS NOT DISTINCT FROM $4
            "#,
        )
        .bind(&payload.route_id)
        .bind(&payload.vehicle_id)
        .bind(&payload.origin_location_id)
        .bind(&payload.destination_location_id)
        .fetch_optional(&self.pool)
        .await?;

        let stored = match existing {
            Some(current) => {
                sqlx::query_as::<_, RoutePriceOverride>(
                    r#"
                    UPDATE transfer_route_price_overrides
                    SET price = $2, notes = $3
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(current.id)
                .bind(payload.price)
                .bind(&payload.notes)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, RoutePriceOverride>(
                    r#"
                    INSERT INTO transfer_route_price_overrides
                        (id, route_id, vehicle_id, origin_location_id, destination_location_id, price, notes, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    RETURNING *
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(&payload.route_id)
                .bind(&payload.vehicle_id)
                .bind(&payload.origin_location_id)
                .bind(&payload.destination_location_id)
                .bind(payload.price)
                .bind(&payload.notes)
                .bind(Utc::now())
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(stored)
    }
}
