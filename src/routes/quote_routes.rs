//! Rutas de cotización de traslados

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::config::environment::PricingSettings;
use crate::controllers::quote_controller::QuoteController;
use crate::dto::quote_dto::{LocationSearchQuery, LocationSearchResponse, QuoteRequest, QuoteResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_transfer_router() -> Router<AppState> {
    Router::new()
        .route("/quote", post(quote_transfer))
        .route("/premium-quote", post(quote_premium_transfer))
        .route("/locations", get(search_locations))
}

async fn quote_transfer(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = QuoteController::new(state.store.clone(), PricingSettings::from(&state.config));
    let response = controller.quote(request).await?;
    Ok(Json(response))
}

async fn quote_premium_transfer(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = QuoteController::new(state.store.clone(), PricingSettings::from(&state.config));
    let response = controller.premium_quote(request).await?;
    Ok(Json(response))
}

async fn search_locations(
    State(state): State<AppState>,
    Query(query): Query<LocationSearchQuery>,
) -> Result<Json<LocationSearchResponse>, AppError> {
    let controller = QuoteController::new(state.store.clone(), PricingSettings::from(&state.config));
    let response = controller
        .search_locations(query, &state.config.country_code)
        .await?;
    Ok(Json(response))
}
