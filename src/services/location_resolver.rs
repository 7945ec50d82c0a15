//! Resolver de ubicación a zona
//!
//! Toda ubicación activa debe resolver a exactamente una zona. La
//! asignación explícita gana; si falta, se escanean los aliases del
//! catálogo de zonas contra el nombre mostrado y el destino declarado.
//! Una ubicación sin match degrada a la zona por defecto configurada:
//! debe seguir siendo cotizable a tarifa conservadora, nunca rechazarse.

use std::sync::Arc;

use crate::models::location::Location;
use crate::models::zone::Zone;
use crate::repositories::PricingStore;
use crate::utils::errors::{AppError, AppResult};

pub struct LocationResolver {
    store: Arc<dyn PricingStore>,
    default_zone_slug: Option<String>,
}

impl LocationResolver {
    pub fn new(store: Arc<dyn PricingStore>, default_zone_slug: Option<String>) -> Self {
        Self {
            store,
            default_zone_slug,
        }
    }

    /// Lookup puro, sin efectos secundarios
    pub async fn resolve_zone(&self, location: &Location) -> AppResult<Zone> {
        if let Some(zone_id) = &location.zone_id {
            if let Some(zone) = self.store.get_zone(zone_id).await? {
                return Ok(zone);
            }
            // asignación colgante: cae al matching por alias en vez de
            // rechazar la ubicación
        }

        let zones = self.store.list_zones(&location.country_code).await?;
        for zone in &zones {
            if zone.matches_alias(&location.name) {
                return Ok(zone.clone());
            }
            if let Some(destination_name) = &location.destination_name {
                if zone.matches_alias(destination_name) {
                    return Ok(zone.clone());
                }
            }
        }

        self.default_zone().await
    }

    async fn default_zone(&self) -> AppResult<Zone> {
        let slug = self.default_zone_slug.as_deref().ok_or_else(|| {
            AppError::NotQuotable(
                "No hay zona por defecto configurada para resolver esta ubicación".to_string(),
            )
        })?;
        self.store
            .find_zone_by_slug(slug)
            .await?
            .ok_or_else(|| {
                AppError::NotQuotable(format!("La zona por defecto '{}' no existe", slug))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::{LocationType, NewLocation};
    use crate::models::zone::NewZone;
    use crate::repositories::InMemoryPricingRepository;
    use rust_decimal::Decimal;

    async fn store_with_zones() -> Arc<dyn PricingStore> {
        let store = InMemoryPricingRepository::new();
        store
            .upsert_zone(NewZone {
                slug: "PUJ_BAVARO".to_string(),
                name: "Punta Cana / Bávaro".to_string(),
                country_code: "RD".to_string(),
                distance_multiplier: Decimal::ONE,
                aliases: vec!["Cap Cana".to_string(), "Hard Rock PC".to_string()],
            })
            .await
            .unwrap();
        store
            .upsert_zone(NewZone {
                slug: "SANTO_DOMINGO".to_string(),
                name: "Santo Domingo".to_string(),
                country_code: "RD".to_string(),
                distance_multiplier: Decimal::new(45, 1),
                aliases: vec!["Juan Dolio".to_string()],
            })
            .await
            .unwrap();
        Arc::new(store)
    }

    fn hotel(slug: &str, name: &str, zone_id: Option<&str>, destination_name: Option<&str>) -> Location {
        Location {
            id: slug.to_string(),
            slug: slug.to_string(),
            name: name.to_string(),
            location_type: LocationType::Hotel,
            zone_id: zone_id.map(String::from),
            destination_name: destination_name.map(String::from),
            country_code: "RD".to_string(),
            active: true,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_explicit_zone_assignment_wins() {
        let store = store_with_zones().await;
        let resolver = LocationResolver::new(store, Some("PUJ_BAVARO".to_string()));
        // el nombre matchea un alias de Santo Domingo, pero la asignación
        // explícita manda
        let location = hotel("h1", "Juan Dolio Resort", Some("PUJ_BAVARO"), None);
        let zone = resolver.resolve_zone(&location).await.unwrap();
        assert_eq!(zone.slug, "PUJ_BAVARO");
    }

    #[tokio::test]
    async fn test_alias_match_on_display_name() {
        let store = store_with_zones().await;
        let resolver = LocationResolver::new(store, None);
        let location = hotel("h2", "hard rock pc", None, None);
        let zone = resolver.resolve_zone(&location).await.unwrap();
        assert_eq!(zone.slug, "PUJ_BAVARO");
    }

    #[tokio::test]
    async fn test_alias_match_on_destination_name() {
        let store = store_with_zones().await;
        let resolver = LocationResolver::new(store, None);
        let location = hotel("h3", "Hotel Desconocido", None, Some("Juan Dolio"));
        let zone = resolver.resolve_zone(&location).await.unwrap();
        assert_eq!(zone.slug, "SANTO_DOMINGO");
    }

    #[tokio::test]
    async fn test_unmatched_location_falls_back_to_default_zone() {
        let store = store_with_zones().await;
        let resolver = LocationResolver::new(store, Some("PUJ_BAVARO".to_string()));
        let location = hotel("h4", "Hotel Sin Registro", None, None);
        let zone = resolver.resolve_zone(&location).await.unwrap();
        assert_eq!(zone.slug, "PUJ_BAVARO");
    }

    #[tokio::test]
    async fn test_missing_default_zone_is_not_quotable() {
        let store = store_with_zones().await;
        let resolver = LocationResolver::new(store, None);
        let location = hotel("h5", "Hotel Sin Registro", None, None);
        let result = resolver.resolve_zone(&location).await;
        assert!(matches!(result, Err(AppError::NotQuotable(_))));
    }

    #[tokio::test]
    async fn test_dangling_zone_assignment_degrades_to_alias() {
        let store = store_with_zones().await;
        let resolver = LocationResolver::new(store, None);
        let location = hotel("h6", "Cap Cana", Some("ZONA_BORRADA"), None);
        let zone = resolver.resolve_zone(&location).await.unwrap();
        assert_eq!(zone.slug, "PUJ_BAVARO");
    }

    // NewLocation sin zona se persiste y resuelve por alias end-to-end
    #[tokio::test]
    async fn test_resolver_over_stored_location() {
        let store = store_with_zones().await;
        let stored = store
            .upsert_location(NewLocation {
                slug: "hotel-cap-cana".to_string(),
                name: "Cap Cana".to_string(),
                location_type: LocationType::Hotel,
                zone_id: None,
                destination_name: None,
                country_code: "RD".to_string(),
            })
            .await
            .unwrap();
        let resolver = LocationResolver::new(store, None);
        let zone = resolver.resolve_zone(&stored).await.unwrap();
        assert_eq!(zone.slug, "PUJ_BAVARO");
    }
}
