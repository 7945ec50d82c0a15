//! Controller de cotizaciones
//!
//! Valida los requests entrantes, delega en el QuoteService y arma las
//! respuestas de la API.

use std::collections::HashMap;
use std::sync::Arc;

use validator::Validate;

use crate::config::environment::PricingSettings;
use crate::dto::quote_dto::{
    LocationSearchQuery, LocationSearchResponse, LocationSummaryResponse, QuoteRequest,
    QuoteResponse, QuoteVehicleResponse,
};
use crate::repositories::PricingStore;
use crate::services::quote_service::{QuoteService, VehicleQuotes, QUOTE_CURRENCY};
use crate::utils::errors::AppError;

pub struct QuoteController {
    store: Arc<dyn PricingStore>,
    service: QuoteService,
}

impl QuoteController {
    pub fn new(store: Arc<dyn PricingStore>, settings: PricingSettings) -> Self {
        Self {
            service: QuoteService::new(store.clone(), settings),
            store,
        }
    }

    pub async fn quote(&self, request: QuoteRequest) -> Result<QuoteResponse, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let quotes = self
            .service
            .quote_vehicles(
                &request.origin_location_id,
                &request.destination_location_id,
                request.passengers,
                request.trip_type,
            )
            .await?;

        Ok(Self::to_response(quotes))
    }

    pub async fn premium_quote(&self, request: QuoteRequest) -> Result<QuoteResponse, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let quotes = self
            .service
            .quote_premium_vehicles(
                &request.origin_location_id,
                &request.destination_location_id,
                request.passengers,
                request.trip_type,
            )
            .await?;

        Ok(Self::to_response(quotes))
    }

    pub async fn search_locations(
        &self,
        query: LocationSearchQuery,
        country_code: &str,
    ) -> Result<LocationSearchResponse, AppError> {
        let term = query.query.unwrap_or_default();
        if term.trim().is_empty() {
            return Ok(LocationSearchResponse { locations: vec![] });
        }
        let limit = query.limit.unwrap_or(8).clamp(1, 25);

        let locations = self.store.search_locations(term.trim(), limit).await?;
        let zones = self.store.list_zones(country_code).await?;
        let zone_names: HashMap<&str, &str> = zones
            .iter()
            .map(|z| (z.id.as_str(), z.name.as_str()))
            .collect();

        let locations = locations
            .into_iter()
            .map(|location| {
                let zone_name = location
                    .zone_id
                    .as_deref()
                    .and_then(|id| zone_names.get(id))
                    .map(|name| name.to_string());
                LocationSummaryResponse {
                    id: location.id,
                    name: location.name,
                    slug: location.slug,
                    location_type: location.location_type.as_str().to_string(),
                    zone_name,
                }
            })
            .collect();

        Ok(LocationSearchResponse { locations })
    }

    fn to_response(quotes: VehicleQuotes) -> QuoteResponse {
        QuoteResponse {
            route_id: quotes.route_id,
            currency: QUOTE_CURRENCY.to_string(),
            vehicles: quotes
                .vehicles
                .iter()
                .map(|p| QuoteVehicleResponse::from_vehicle(&p.vehicle, p.price, p.source))
                .collect(),
        }
    }
}
