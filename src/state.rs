//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El store se inyecta como trait object
//! para que los tests monten la app sobre el repositorio en memoria.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::PricingStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PricingStore>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn PricingStore>, config: EnvironmentConfig) -> Self {
        Self { store, config }
    }
}
