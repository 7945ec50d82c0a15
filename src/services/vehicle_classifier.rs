//! Clasificador de vehículos
//!
//! Mapea la categoría de un vehículo al multiplicador de la fórmula
//! estática y decide qué vehículos califican para el flujo premium.

use rust_decimal::Decimal;

use crate::models::vehicle::{Vehicle, VehicleCategory};

/// Tokens de modelos de lujo que promueven un vehículo a premium aunque
/// su categoría no lo diga. Regla heredada del catálogo comercial: el
/// nombre del modelo manda sobre la metadata.
// TODO: promover esta regla a una columna is_premium en transfer_vehicles;
// hoy vive en los nombres de los modelos.
const LUXURY_NAME_TOKENS: [&str; 3] = ["cadillac", "suburban", "escalade"];

/// Multiplicador de la categoría para el tier de fórmula
pub fn category_multiplier(category: VehicleCategory) -> Decimal {
    match category {
        VehicleCategory::Sedan => Decimal::new(10, 1),
        VehicleCategory::Van => Decimal::new(17, 1),
        VehicleCategory::Suv => Decimal::new(34, 1),
        VehicleCategory::Vip => Decimal::new(46, 1),
        VehicleCategory::Bus => Decimal::new(60, 1),
    }
}

/// Un vehículo es premium si su categoría es SUV o VIP, o si su nombre
/// contiene uno de los modelos de lujo conocidos (case-insensitive)
pub fn is_premium(vehicle: &Vehicle) -> bool {
    if matches!(vehicle.category, VehicleCategory::Suv | VehicleCategory::Vip) {
        return true;
    }
    let name = vehicle.name.to_lowercase();
    LUXURY_NAME_TOKENS.iter().any(|token| name.contains(token))
}

/// Orden de presentación del flujo premium: Escalade primero, luego
/// Suburban, luego VIP, luego SUV genérico, el resto al final
pub fn premium_rank(vehicle: &Vehicle) -> u8 {
    let name = vehicle.name.to_lowercase();
    if name.contains("cadillac") || name.contains("escalade") {
        return 0;
    }
    if name.contains("suburban") {
        return 1;
    }
    match vehicle.category {
        VehicleCategory::Vip => 2,
        VehicleCategory::Suv => 3,
        _ => 9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn vehicle(name: &str, category: VehicleCategory) -> Vehicle {
        Vehicle {
            id: name.to_lowercase().replace(' ', "-"),
            slug: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            category,
            min_pax: 1,
            max_pax: 6,
            image_url: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_premium_by_category() {
        assert!(is_premium(&vehicle("Camioneta Grande", VehicleCategory::Suv)));
        assert!(is_premium(&vehicle("Clase Alta", VehicleCategory::Vip)));
        assert!(!is_premium(&vehicle("Sedán Ejecutivo", VehicleCategory::Sedan)));
        assert!(!is_premium(&vehicle("Van Estándar", VehicleCategory::Van)));
    }

    #[test]
    fn test_premium_by_luxury_name_token() {
        // el nombre promueve aunque la categoría no sea premium
        assert!(is_premium(&vehicle("Chevrolet SUBURBAN", VehicleCategory::Van)));
        assert!(is_premium(&vehicle("Cadillac Escalade ESV", VehicleCategory::Sedan)));
    }

    #[test]
    fn test_premium_rank_ordering() {
        let escalade = vehicle("Cadillac Escalade", VehicleCategory::Vip);
        let suburban = vehicle("Chevrolet Suburban", VehicleCategory::Suv);
        let vip = vehicle("Mercedes Clase V", VehicleCategory::Vip);
        let suv = vehicle("SUV Premium", VehicleCategory::Suv);
        let sedan = vehicle("Sedán Ejecutivo", VehicleCategory::Sedan);

        assert!(premium_rank(&escalade) < premium_rank(&suburban));
        assert!(premium_rank(&suburban) < premium_rank(&vip));
        assert!(premium_rank(&vip) < premium_rank(&suv));
        assert!(premium_rank(&suv) < premium_rank(&sedan));
    }

    #[test]
    fn test_multipliers_grow_with_category() {
        assert_eq!(category_multiplier(VehicleCategory::Sedan), Decimal::ONE);
        assert!(category_multiplier(VehicleCategory::Van) > category_multiplier(VehicleCategory::Sedan));
        assert!(category_multiplier(VehicleCategory::Suv) > category_multiplier(VehicleCategory::Van));
        assert!(category_multiplier(VehicleCategory::Bus) > category_multiplier(VehicleCategory::Vip));
    }
}
