//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y los parámetros de
//! pricing (precio base, factor de ida y vuelta, zona por defecto).

use std::env;

use rust_decimal::Decimal;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub country_code: String,
    pub base_price: Decimal,
    pub round_trip_factor: Decimal,
    /// Zona a la que degradan las ubicaciones sin match de alias. Vacío
    /// explícito la desactiva y esas ubicaciones dejan de ser cotizables.
    pub default_zone_slug: Option<String>,
}

impl EnvironmentConfig {
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|value| {
                    value
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            country_code: env::var("TRANSFER_COUNTRY_CODE").unwrap_or_else(|_| "RD".to_string()),
            base_price: decimal_var("TRANSFER_BASE_PRICE", "35.0"),
            round_trip_factor: decimal_var("ROUND_TRIP_FACTOR", "0.9"),
            default_zone_slug: default_zone_var(),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parámetros que consume el motor de cotización
#[derive(Debug, Clone)]
pub struct PricingSettings {
    pub base_price: Decimal,
    pub round_trip_factor: Decimal,
    pub default_zone_slug: Option<String>,
}

impl From<&EnvironmentConfig> for PricingSettings {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            base_price: config.base_price,
            round_trip_factor: config.round_trip_factor,
            default_zone_slug: config.default_zone_slug.clone(),
        }
    }
}

fn decimal_var(name: &str, default: &str) -> Decimal {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| panic!("{} must be a valid decimal number", name))
}

fn default_zone_var() -> Option<String> {
    match env::var("DEFAULT_TRANSFER_ZONE") {
        Ok(value) if value.trim().is_empty() => None,
        Ok(value) => Some(value.trim().to_string()),
        Err(_) => Some("PUJ_BAVARO".to_string()),
    }
}
