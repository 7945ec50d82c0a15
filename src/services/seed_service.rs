//! Instalación del catálogo base
//!
//! Un despliegue fresco debe cotizar de inmediato: al arrancar se
//! upsertea el catálogo embebido (zonas con aliases y multiplicadores,
//! flota por defecto, rutas canónicas y tarifas por vehículo). Los
//! upserts son idempotentes, así que correr el seed en cada arranque es
//! seguro.

use log::info;

use crate::data::zone_catalog::{DEFAULT_AIRPORTS, ZONE_CATALOG};
use crate::models::location::{LocationType, NewLocation};
use crate::models::vehicle::{NewVehicle, VehicleCategory};
use crate::models::zone::NewZone;
use crate::repositories::PricingStore;
use crate::utils::errors::AppResult;

/// Flota por defecto del despliegue dominicano
pub fn default_fleet() -> Vec<NewVehicle> {
    vec![
        NewVehicle {
            slug: "sedan".to_string(),
            name: "Sedán Ejecutivo".to_string(),
            category: VehicleCategory::Sedan,
            min_pax: 1,
            max_pax: 3,
            image_url: Some("/cars/sedan.png".to_string()),
        },
        NewVehicle {
            slug: "van-estandar".to_string(),
            name: "Van Estándar".to_string(),
            category: VehicleCategory::Van,
            min_pax: 1,
            max_pax: 8,
            image_url: Some("/cars/van.png".to_string()),
        },
        NewVehicle {
            slug: "suv-suburban".to_string(),
            name: "Chevrolet Suburban".to_string(),
            category: VehicleCategory::Suv,
            min_pax: 1,
            max_pax: 6,
            image_url: Some("/transfer/suv.png".to_string()),
        },
        NewVehicle {
            slug: "vip-escalade".to_string(),
            name: "Cadillac Escalade".to_string(),
            category: VehicleCategory::Vip,
            min_pax: 1,
            max_pax: 6,
            image_url: Some("/transfer/suv.png".to_string()),
        },
        NewVehicle {
            slug: "minibus".to_string(),
            name: "Minibús Turístico".to_string(),
            category: VehicleCategory::Bus,
            min_pax: 9,
            max_pax: 20,
            image_url: Some("/cars/bus.png".to_string()),
        },
    ]
}

fn catalog_fare_for(
    category: VehicleCategory,
    fare: &crate::data::zone_catalog::CatalogFare,
) -> Option<rust_decimal::Decimal> {
    match category {
        VehicleCategory::Sedan => Some(fare.sedan),
        VehicleCategory::Van => Some(fare.van),
        VehicleCategory::Suv => Some(fare.suv),
        // VIP y BUS no tienen tarifa de catálogo: los cubre la fórmula
        VehicleCategory::Vip | VehicleCategory::Bus => None,
    }
}

pub async fn ensure_default_pricing_config(
    store: &dyn PricingStore,
    country_code: &str,
) -> AppResult<()> {
    info!("Instalando catálogo base de traslados ({})", country_code);

    for zone in ZONE_CATALOG.iter() {
        store
            .upsert_zone(NewZone {
                slug: zone.slug.to_string(),
                name: zone.name.to_string(),
                country_code: country_code.to_string(),
                distance_multiplier: zone.multiplier,
                aliases: zone.aliases.iter().map(|a| a.to_string()).collect(),
            })
            .await?;
    }

    for (slug, name, zone_slug) in DEFAULT_AIRPORTS {
        store
            .upsert_location(NewLocation {
                slug: slug.to_string(),
                name: name.to_string(),
                location_type: LocationType::Airport,
                zone_id: Some(zone_slug.to_string()),
                destination_name: None,
                country_code: country_code.to_string(),
            })
            .await?;
    }

    let fleet = default_fleet();
    for vehicle in &fleet {
        store.upsert_vehicle(vehicle.clone()).await?;
    }

    let mut installed_fares = 0usize;
    for zone in ZONE_CATALOG.iter() {
        for fare in &zone.fares {
            let route = store.upsert_route(zone.slug, fare.destination).await?;
            for vehicle in &fleet {
                if let Some(price) = catalog_fare_for(vehicle.category, fare) {
                    store
                        .upsert_route_price(&route.id, &vehicle.slug, price)
                        .await?;
                    installed_fares += 1;
                }
            }
        }
    }

    info!(
        "Catálogo base instalado: {} zonas, {} vehículos, {} tarifas",
        ZONE_CATALOG.len(),
        fleet.len(),
        installed_fares
    );
    Ok(())
}
