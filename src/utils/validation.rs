//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar los datos de
//! referencia antes de escribirlos al store.

use rust_decimal::Decimal;

use crate::models::zone::Zone;
use crate::utils::errors::AppError;

/// Validar que un precio sea positivo
pub fn validate_positive_price(price: Decimal) -> Result<(), AppError> {
    if price <= Decimal::ZERO {
        return Err(AppError::BadRequest("El precio debe ser mayor que cero".to_string()));
    }
    Ok(())
}

/// Validar que un multiplicador de distancia sea positivo
pub fn validate_positive_multiplier(multiplier: Decimal) -> Result<(), AppError> {
    if multiplier <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "El multiplicador de distancia debe ser mayor que cero".to_string(),
        ));
    }
    Ok(())
}

/// Validar el envelope de capacidad de un vehículo
pub fn validate_pax_envelope(min_pax: i32, max_pax: i32) -> Result<(), AppError> {
    if min_pax < 1 {
        return Err(AppError::BadRequest("min_pax debe ser al menos 1".to_string()));
    }
    if min_pax > max_pax {
        return Err(AppError::BadRequest(
            "min_pax no puede ser mayor que max_pax".to_string(),
        ));
    }
    Ok(())
}

/// Las rutas solo pueden unir zonas del mismo país
pub fn validate_same_country(zone_a: &Zone, zone_b: &Zone) -> Result<(), AppError> {
    if zone_a.country_code != zone_b.country_code {
        return Err(AppError::Conflict(format!(
            "Las zonas '{}' y '{}' pertenecen a países distintos",
            zone_a.slug, zone_b.slug
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_price() {
        assert!(validate_positive_price(Decimal::new(1500, 2)).is_ok());
        assert!(validate_positive_price(Decimal::ZERO).is_err());
        assert!(validate_positive_price(Decimal::new(-10, 0)).is_err());
    }

    #[test]
    fn test_pax_envelope() {
        assert!(validate_pax_envelope(1, 3).is_ok());
        assert!(validate_pax_envelope(3, 3).is_ok());
        assert!(validate_pax_envelope(0, 3).is_err());
        assert!(validate_pax_envelope(5, 3).is_err());
    }
}
