//! Resolver de cotizaciones
//!
//! Orquesta la resolución de precio por vehículo en orden estricto de
//! precedencia: override exacto → override parcial (destino antes que
//! origen) → tarifa de ruta → fórmula estática. El tag `source` del
//! resultado indica qué capa resolvió, para observabilidad y tests.

use std::collections::HashMap;
use std::sync::Arc;

use futures::try_join;
use rust_decimal::Decimal;

use crate::config::environment::PricingSettings;
use crate::models::location::Location;
use crate::models::quote::{Quote, QuoteSource, TripType};
use crate::models::route::{Route, RouteKey, RoutePriceOverride};
use crate::models::vehicle::Vehicle;
use crate::models::zone::Zone;
use crate::repositories::PricingStore;
use crate::services::location_resolver::LocationResolver;
use crate::services::pricing_formula::formula_price;
use crate::services::vehicle_classifier::{category_multiplier, is_premium, premium_rank};
use crate::utils::errors::{AppError, AppResult};

pub const QUOTE_CURRENCY: &str = "USD";

/// Scope de matching de un override, del más específico al más general.
/// `RouteLevel` cierra la cadena con la tarifa base de la ruta.
enum OverrideScope<'a> {
    Exact {
        origin: &'a str,
        destination: &'a str,
    },
    DestinationOnly {
        destination: &'a str,
    },
    OriginOnly {
        origin: &'a str,
    },
    RouteLevel,
}

impl<'a> OverrideScope<'a> {
    fn matches(&self, candidate: &RoutePriceOverride) -> bool {
        match self {
            OverrideScope::Exact {
                origin,
                destination,
            } => {
                candidate.origin_location_id.as_deref() == Some(*origin)
                    && candidate.destination_location_id.as_deref() == Some(*destination)
            }
            OverrideScope::DestinationOnly { destination } => {
                candidate.origin_location_id.is_none()
                    && candidate.destination_location_id.as_deref() == Some(*destination)
            }
            OverrideScope::OriginOnly { origin } => {
                candidate.origin_location_id.as_deref() == Some(*origin)
                    && candidate.destination_location_id.is_none()
            }
            OverrideScope::RouteLevel => false,
        }
    }
}

/// Precio resuelto para un vehículo dentro de una respuesta de cotización
#[derive(Debug, Clone)]
pub struct PricedVehicle {
    pub vehicle: Vehicle,
    pub price: Decimal,
    pub source: QuoteSource,
}

/// Resultado de cotizar un corredor completo
#[derive(Debug)]
pub struct VehicleQuotes {
    pub origin: Location,
    pub destination: Location,
    pub route_id: Option<String>,
    pub vehicles: Vec<PricedVehicle>,
}

/// Contexto de ruta cargado una sola vez por request
struct RouteContext {
    origin: Location,
    destination: Location,
    origin_zone: Zone,
    destination_zone: Zone,
    route: Option<Route>,
    route_prices: HashMap<String, Decimal>,
    overrides: Vec<RoutePriceOverride>,
}

pub struct QuoteService {
    store: Arc<dyn PricingStore>,
    resolver: LocationResolver,
    settings: PricingSettings,
}

impl QuoteService {
    pub fn new(store: Arc<dyn PricingStore>, settings: PricingSettings) -> Self {
        let resolver =
            LocationResolver::new(store.clone(), settings.default_zone_slug.clone());
        Self {
            store,
            resolver,
            settings,
        }
    }

    /// Cotiza el corredor para toda la flota activa, filtrando por
    /// capacidad y ordenando por multiplicador de categoría
    pub async fn quote_vehicles(
        &self,
        origin_location_id: &str,
        destination_location_id: &str,
        passengers: i32,
        trip_type: TripType,
    ) -> AppResult<VehicleQuotes> {
        let (ctx, vehicles) = self
            .prepare(origin_location_id, destination_location_id, passengers)
            .await?;

        let mut priced = self.price_eligible(&ctx, &vehicles, passengers, trip_type);
        priced.sort_by(|a, b| {
            category_multiplier(a.vehicle.category)
                .cmp(&category_multiplier(b.vehicle.category))
                .then_with(|| a.vehicle.name.cmp(&b.vehicle.name))
        });

        Ok(Self::into_quotes(ctx, priced))
    }

    /// Variante premium: filtra con el predicado del clasificador y cae a
    /// la lista completa ordenada por multiplicador si nada califica —
    /// nunca responde vacío mientras exista flota activa
    pub async fn quote_premium_vehicles(
        &self,
        origin_location_id: &str,
        destination_location_id: &str,
        passengers: i32,
        trip_type: TripType,
    ) -> AppResult<VehicleQuotes> {
        let (ctx, vehicles) = self
            .prepare(origin_location_id, destination_location_id, passengers)
            .await?;

        let priced = self.price_eligible(&ctx, &vehicles, passengers, trip_type);
        let mut premium: Vec<PricedVehicle> = priced
            .iter()
            .filter(|p| is_premium(&p.vehicle))
            .cloned()
            .collect();

        let selected = if premium.is_empty() {
            let mut all = priced;
            all.sort_by(|a, b| {
                category_multiplier(a.vehicle.category)
                    .cmp(&category_multiplier(b.vehicle.category))
                    .then_with(|| a.vehicle.name.cmp(&b.vehicle.name))
            });
            all
        } else {
            premium.sort_by(|a, b| {
                premium_rank(&a.vehicle)
                    .cmp(&premium_rank(&b.vehicle))
                    .then_with(|| a.vehicle.name.cmp(&b.vehicle.name))
            });
            premium
        };

        Ok(Self::into_quotes(ctx, selected))
    }

    /// Resuelve la cotización de un vehículo concreto. Los pasajeros no
    /// cambian el precio: solo filtran la lista ofrecida en los flujos de
    /// listado
    pub async fn resolve_quote(
        &self,
        origin_location_id: &str,
        destination_location_id: &str,
        vehicle_id: &str,
        passengers: i32,
        trip_type: TripType,
    ) -> AppResult<Quote> {
        let (ctx, _) = self
            .prepare(origin_location_id, destination_location_id, passengers)
            .await?;

        let vehicle = self
            .store
            .get_vehicle(vehicle_id)
            .await?
            .filter(|v| v.active)
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let (price, source) = self.price_for_vehicle(&ctx, &vehicle, trip_type);
        Ok(Quote {
            origin_location_id: ctx.origin.id,
            destination_location_id: ctx.destination.id,
            vehicle_id: vehicle.id,
            passengers,
            resolved_price: price,
            source,
        })
    }

    async fn prepare(
        &self,
        origin_location_id: &str,
        destination_location_id: &str,
        passengers: i32,
    ) -> AppResult<(RouteContext, Vec<Vehicle>)> {
        if passengers <= 0 {
            return Err(AppError::BadRequest(
                "Indica la cantidad de pasajeros".to_string(),
            ));
        }
        if origin_location_id == destination_location_id {
            return Err(AppError::BadRequest(
                "Debes enviar origen y destino distintos".to_string(),
            ));
        }

        let (origin, destination) = try_join!(
            self.find_location(origin_location_id),
            self.find_location(destination_location_id)
        )?;
        let origin = origin
            .filter(|l| l.active)
            .ok_or_else(|| AppError::NotFound("Origen o destino no encontrados".to_string()))?;
        let destination = destination
            .filter(|l| l.active)
            .ok_or_else(|| AppError::NotFound("Origen o destino no encontrados".to_string()))?;

        let ctx = self.load_route_context(origin, destination).await?;

        let vehicles = self.store.list_active_vehicles().await?;
        if vehicles.is_empty() {
            return Err(AppError::NotQuotable(
                "No hay vehículos activos configurados".to_string(),
            ));
        }

        Ok((ctx, vehicles))
    }

    /// Las ubicaciones se referencian por id o por slug indistintamente:
    /// los widgets de landing mandan slugs, el checkout manda ids
    async fn find_location(&self, reference: &str) -> AppResult<Option<Location>> {
        if let Some(location) = self.store.get_location(reference).await? {
            return Ok(Some(location));
        }
        self.store.find_location_by_slug(reference).await
    }

    async fn load_route_context(
        &self,
        origin: Location,
        destination: Location,
    ) -> AppResult<RouteContext> {
        let (origin_zone, destination_zone) = try_join!(
            self.resolver.resolve_zone(&origin),
            self.resolver.resolve_zone(&destination)
        )?;

        let key = RouteKey::new(&origin_zone.id, &destination_zone.id);
        let route = self.store.get_route(&key).await?;

        let (route_prices, overrides) = match &route {
            Some(route) => {
                let (prices, overrides) = try_join!(
                    self.store.list_route_prices(&route.id),
                    self.store.list_route_overrides(&route.id)
                )?;
                let prices = prices
                    .into_iter()
                    .map(|p| (p.vehicle_id, p.price))
                    .collect();
                (prices, overrides)
            }
            None => (HashMap::new(), Vec::new()),
        };

        Ok(RouteContext {
            origin,
            destination,
            origin_zone,
            destination_zone,
            route,
            route_prices,
            overrides,
        })
    }

    fn price_eligible(
        &self,
        ctx: &RouteContext,
        vehicles: &[Vehicle],
        passengers: i32,
        trip_type: TripType,
    ) -> Vec<PricedVehicle> {
        vehicles
            .iter()
            .filter(|v| v.accepts_passengers(passengers))
            .map(|vehicle| {
                let (price, source) = self.price_for_vehicle(ctx, vehicle, trip_type);
                PricedVehicle {
                    vehicle: vehicle.clone(),
                    price,
                    source,
                }
            })
            .collect()
    }

    /// Cadena de precedencia por vehículo. Cada scope se intenta solo si
    /// el anterior no produjo match
    fn price_for_vehicle(
        &self,
        ctx: &RouteContext,
        vehicle: &Vehicle,
        trip_type: TripType,
    ) -> (Decimal, QuoteSource) {
        let vehicle_overrides: Vec<&RoutePriceOverride> = ctx
            .overrides
            .iter()
            .filter(|o| o.vehicle_id == vehicle.id)
            .collect();

        let scopes = [
            OverrideScope::Exact {
                origin: &ctx.origin.id,
                destination: &ctx.destination.id,
            },
            OverrideScope::DestinationOnly {
                destination: &ctx.destination.id,
            },
            OverrideScope::OriginOnly {
                origin: &ctx.origin.id,
            },
            OverrideScope::RouteLevel,
        ];

        for scope in &scopes {
            if let OverrideScope::RouteLevel = scope {
                if let Some(price) = ctx.route_prices.get(&vehicle.id) {
                    return (*price, QuoteSource::Route);
                }
            } else if let Some(matched) = vehicle_overrides.iter().find(|o| scope.matches(o)) {
                return (matched.price, QuoteSource::Override);
            }
        }

        let price = formula_price(
            self.settings.base_price,
            vehicle.category,
            &ctx.origin_zone,
            &ctx.destination_zone,
            trip_type,
            self.settings.round_trip_factor,
        );
        (price, QuoteSource::Formula)
    }

    fn into_quotes(ctx: RouteContext, vehicles: Vec<PricedVehicle>) -> VehicleQuotes {
        VehicleQuotes {
            route_id: ctx.route.map(|r| r.id),
            origin: ctx.origin,
            destination: ctx.destination,
            vehicles,
        }
    }
}
