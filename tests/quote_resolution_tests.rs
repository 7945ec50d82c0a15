//! Tests de resolución de cotizaciones
//!
//! Ejercitan el resolver completo contra el repositorio en memoria:
//! precedencia de overrides, simetría de rutas, fallback de fórmula,
//! filtrado por capacidad y reglas del write path.

use std::sync::Arc;

use rust_decimal::Decimal;

use transfer_pricing::config::environment::PricingSettings;
use transfer_pricing::models::location::{LocationType, NewLocation};
use transfer_pricing::models::quote::{QuoteSource, TripType};
use transfer_pricing::models::route::{NewOverride, RouteKey};
use transfer_pricing::models::vehicle::{NewVehicle, VehicleCategory};
use transfer_pricing::models::zone::NewZone;
use transfer_pricing::repositories::{InMemoryPricingRepository, PricingStore};
use transfer_pricing::services::quote_service::QuoteService;
use transfer_pricing::services::seed_service::ensure_default_pricing_config;
use transfer_pricing::utils::errors::AppError;

const INTERCONTINENTAL: &str = "intercontinental-real-santo-domingo";
const CATALONIA: &str = "catalonia-santo-domingo";
const BAVARO_PALACE: &str = "bavaro-palace";
const AIRPORT_PUJ: &str = "airport-puj";

fn settings() -> PricingSettings {
    PricingSettings {
        base_price: Decimal::from(35),
        round_trip_factor: Decimal::new(9, 1),
        default_zone_slug: Some("PUJ_BAVARO".to_string()),
    }
}

fn zone(slug: &str, name: &str, multiplier: Decimal) -> NewZone {
    NewZone {
        slug: slug.to_string(),
        name: name.to_string(),
        country_code: "RD".to_string(),
        distance_multiplier: multiplier,
        aliases: vec![],
    }
}

fn hotel(slug: &str, name: &str, zone_id: &str) -> NewLocation {
    NewLocation {
        slug: slug.to_string(),
        name: name.to_string(),
        location_type: LocationType::Hotel,
        zone_id: Some(zone_id.to_string()),
        destination_name: None,
        country_code: "RD".to_string(),
    }
}

fn vehicle(slug: &str, name: &str, category: VehicleCategory, min_pax: i32, max_pax: i32) -> NewVehicle {
    NewVehicle {
        slug: slug.to_string(),
        name: name.to_string(),
        category,
        min_pax,
        max_pax,
        image_url: None,
    }
}

/// Fixture base: dos zonas, un aeropuerto y tres hoteles, flota sin
/// vehículos premium
async fn fixture_store() -> Arc<dyn PricingStore> {
    let store = InMemoryPricingRepository::new();

    store
        .upsert_zone(zone("PUJ_BAVARO", "Punta Cana / Bávaro", Decimal::ONE))
        .await
        .unwrap();
    store
        .upsert_zone(zone("SANTO_DOMINGO", "Santo Domingo", Decimal::new(45, 1)))
        .await
        .unwrap();

    store
        .upsert_location(NewLocation {
            slug: AIRPORT_PUJ.to_string(),
            name: "Aeropuerto Punta Cana (PUJ)".to_string(),
            location_type: LocationType::Airport,
            zone_id: Some("PUJ_BAVARO".to_string()),
            destination_name: None,
            country_code: "RD".to_string(),
        })
        .await
        .unwrap();
    store
        .upsert_location(hotel(BAVARO_PALACE, "Bávaro Palace", "PUJ_BAVARO"))
        .await
        .unwrap();
    store
        .upsert_location(hotel(INTERCONTINENTAL, "InterContinental Real Santo Domingo", "SANTO_DOMINGO"))
        .await
        .unwrap();
    store
        .upsert_location(hotel(CATALONIA, "Catalonia Santo Domingo", "SANTO_DOMINGO"))
        .await
        .unwrap();

    store
        .upsert_vehicle(vehicle("sedan", "Sedán Ejecutivo", VehicleCategory::Sedan, 1, 3))
        .await
        .unwrap();
    store
        .upsert_vehicle(vehicle("van-estandar", "Van Estándar", VehicleCategory::Van, 1, 8))
        .await
        .unwrap();
    store
        .upsert_vehicle(vehicle("minibus", "Minibús Turístico", VehicleCategory::Bus, 9, 20))
        .await
        .unwrap();

    Arc::new(store)
}

/// Fixture con tarifa de ruta persistida PUJ ↔ Santo Domingo
async fn fixture_with_route_price() -> (Arc<dyn PricingStore>, String) {
    let store = fixture_store().await;
    let route = store.upsert_route("SANTO_DOMINGO", "PUJ_BAVARO").await.unwrap();
    store
        .upsert_route_price(&route.id, "sedan", Decimal::from(150))
        .await
        .unwrap();
    (store, route.id)
}

fn price_of<'a>(
    quotes: &'a transfer_pricing::services::quote_service::VehicleQuotes,
    vehicle_id: &str,
) -> &'a transfer_pricing::services::quote_service::PricedVehicle {
    quotes
        .vehicles
        .iter()
        .find(|p| p.vehicle.id == vehicle_id)
        .unwrap_or_else(|| panic!("el vehículo '{}' no está en la respuesta", vehicle_id))
}

#[tokio::test]
async fn route_key_is_symmetric_for_all_pairs() {
    let pairs = [
        ("PUJ_BAVARO", "SANTO_DOMINGO"),
        ("SAMANA", "NORTE_CIBAO"),
        ("PUJ_BAVARO", "PUJ_BAVARO"),
    ];
    for (a, b) in pairs {
        assert_eq!(RouteKey::new(a, b), RouteKey::new(b, a));
    }
}

#[tokio::test]
async fn formula_round_trip_scenario() {
    // sin ruta persistida: 35 × 1.0 × 1.0 × 0.9 = 31.5
    let store = fixture_store().await;
    let service = QuoteService::new(store, settings());

    let quotes = service
        .quote_vehicles(AIRPORT_PUJ, BAVARO_PALACE, 2, TripType::RoundTrip)
        .await
        .unwrap();

    let sedan = price_of(&quotes, "sedan");
    assert_eq!(sedan.price, Decimal::new(315, 1));
    assert_eq!(sedan.source, QuoteSource::Formula);
    assert!(quotes.route_id.is_none());
}

#[tokio::test]
async fn formula_one_way_keeps_base_price() {
    let store = fixture_store().await;
    let service = QuoteService::new(store, settings());

    let quotes = service
        .quote_vehicles(AIRPORT_PUJ, BAVARO_PALACE, 2, TripType::OneWay)
        .await
        .unwrap();

    let sedan = price_of(&quotes, "sedan");
    assert_eq!(sedan.price, Decimal::from(35));
    assert_eq!(sedan.source, QuoteSource::Formula);
}

#[tokio::test]
async fn destination_override_beats_route_price_only_for_that_hotel() {
    let (store, route_id) = fixture_with_route_price().await;
    store
        .upsert_override(NewOverride {
            route_id: route_id.clone(),
            vehicle_id: "sedan".to_string(),
            origin_location_id: None,
            destination_location_id: Some(INTERCONTINENTAL.to_string()),
            price: Decimal::from(180),
            notes: None,
        })
        .await
        .unwrap();

    let service = QuoteService::new(store, settings());

    // hacia el hotel del override gana el override
    let quotes = service
        .quote_vehicles(AIRPORT_PUJ, INTERCONTINENTAL, 2, TripType::OneWay)
        .await
        .unwrap();
    let sedan = price_of(&quotes, "sedan");
    assert_eq!(sedan.price, Decimal::from(180));
    assert_eq!(sedan.source, QuoteSource::Override);

    // hacia otro hotel de la misma ruta manda la tarifa de ruta
    let quotes = service
        .quote_vehicles(AIRPORT_PUJ, CATALONIA, 2, TripType::OneWay)
        .await
        .unwrap();
    let sedan = price_of(&quotes, "sedan");
    assert_eq!(sedan.price, Decimal::from(150));
    assert_eq!(sedan.source, QuoteSource::Route);
}

#[tokio::test]
async fn exact_override_wins_over_everything() {
    let (store, route_id) = fixture_with_route_price().await;
    store
        .upsert_override(NewOverride {
            route_id: route_id.clone(),
            vehicle_id: "sedan".to_string(),
            origin_location_id: None,
            destination_location_id: Some(INTERCONTINENTAL.to_string()),
            price: Decimal::from(180),
            notes: None,
        })
        .await
        .unwrap();
    store
        .upsert_override(NewOverride {
            route_id: route_id.clone(),
            vehicle_id: "sedan".to_string(),
            origin_location_id: Some(AIRPORT_PUJ.to_string()),
            destination_location_id: Some(INTERCONTINENTAL.to_string()),
            price: Decimal::from(200),
            notes: Some("recogida VIP en PUJ".to_string()),
        })
        .await
        .unwrap();

    let service = QuoteService::new(store, settings());

    let quotes = service
        .quote_vehicles(AIRPORT_PUJ, INTERCONTINENTAL, 2, TripType::OneWay)
        .await
        .unwrap();
    let sedan = price_of(&quotes, "sedan");
    assert_eq!(sedan.price, Decimal::from(200));
    assert_eq!(sedan.source, QuoteSource::Override);

    // desde otro origen el exacto no aplica y cae al scope de destino
    let quotes = service
        .quote_vehicles(BAVARO_PALACE, INTERCONTINENTAL, 2, TripType::OneWay)
        .await
        .unwrap();
    let sedan = price_of(&quotes, "sedan");
    assert_eq!(sedan.price, Decimal::from(180));
}

#[tokio::test]
async fn destination_scope_beats_origin_scope() {
    let (store, route_id) = fixture_with_route_price().await;
    store
        .upsert_override(NewOverride {
            route_id: route_id.clone(),
            vehicle_id: "sedan".to_string(),
            origin_location_id: Some(AIRPORT_PUJ.to_string()),
            destination_location_id: None,
            price: Decimal::from(170),
            notes: None,
        })
        .await
        .unwrap();
    store
        .upsert_override(NewOverride {
            route_id,
            vehicle_id: "sedan".to_string(),
            origin_location_id: None,
            destination_location_id: Some(INTERCONTINENTAL.to_string()),
            price: Decimal::from(180),
            notes: None,
        })
        .await
        .unwrap();

    let service = QuoteService::new(store, settings());
    let quotes = service
        .quote_vehicles(AIRPORT_PUJ, INTERCONTINENTAL, 2, TripType::OneWay)
        .await
        .unwrap();

    let sedan = price_of(&quotes, "sedan");
    assert_eq!(sedan.price, Decimal::from(180));
    assert_eq!(sedan.source, QuoteSource::Override);
}

#[tokio::test]
async fn list_overrides_is_scoped_to_the_vehicle() {
    let (store, route_id) = fixture_with_route_price().await;
    store
        .upsert_override(NewOverride {
            route_id: route_id.clone(),
            vehicle_id: "sedan".to_string(),
            origin_location_id: None,
            destination_location_id: Some(INTERCONTINENTAL.to_string()),
            price: Decimal::from(180),
            notes: None,
        })
        .await
        .unwrap();
    store
        .upsert_override(NewOverride {
            route_id: route_id.clone(),
            vehicle_id: "van-estandar".to_string(),
            origin_location_id: None,
            destination_location_id: Some(INTERCONTINENTAL.to_string()),
            price: Decimal::from(260),
            notes: None,
        })
        .await
        .unwrap();

    let sedan_overrides = store.list_overrides(&route_id, "sedan").await.unwrap();
    assert_eq!(sedan_overrides.len(), 1);
    assert_eq!(sedan_overrides[0].price, Decimal::from(180));

    let all = store.list_route_overrides(&route_id).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn route_resolves_in_both_directions() {
    let (store, _) = fixture_with_route_price().await;
    let service = QuoteService::new(store, settings());

    let outbound = service
        .quote_vehicles(AIRPORT_PUJ, CATALONIA, 2, TripType::OneWay)
        .await
        .unwrap();
    let inbound = service
        .quote_vehicles(CATALONIA, AIRPORT_PUJ, 2, TripType::OneWay)
        .await
        .unwrap();

    assert_eq!(outbound.route_id, inbound.route_id);
    assert_eq!(price_of(&outbound, "sedan").price, price_of(&inbound, "sedan").price);
    assert_eq!(price_of(&inbound, "sedan").source, QuoteSource::Route);
}

#[tokio::test]
async fn capacity_envelope_filters_vehicles() {
    let (store, _) = fixture_with_route_price().await;
    let service = QuoteService::new(store, settings());

    // 5 pasajeros: el sedán (max 3) queda fuera aunque sea el más barato
    let quotes = service
        .quote_vehicles(AIRPORT_PUJ, CATALONIA, 5, TripType::OneWay)
        .await
        .unwrap();
    assert!(!quotes.vehicles.iter().any(|p| p.vehicle.id == "sedan"));
    assert!(quotes.vehicles.iter().any(|p| p.vehicle.id == "van-estandar"));

    // 10 pasajeros: solo el minibús
    let quotes = service
        .quote_vehicles(AIRPORT_PUJ, CATALONIA, 10, TripType::OneWay)
        .await
        .unwrap();
    let ids: Vec<&str> = quotes.vehicles.iter().map(|p| p.vehicle.id.as_str()).collect();
    assert_eq!(ids, vec!["minibus"]);
}

#[tokio::test]
async fn identical_requests_resolve_identically() {
    let (store, _) = fixture_with_route_price().await;
    let service = QuoteService::new(store, settings());

    let first = service
        .quote_vehicles(AIRPORT_PUJ, INTERCONTINENTAL, 2, TripType::RoundTrip)
        .await
        .unwrap();
    let second = service
        .quote_vehicles(AIRPORT_PUJ, INTERCONTINENTAL, 2, TripType::RoundTrip)
        .await
        .unwrap();

    assert_eq!(first.vehicles.len(), second.vehicles.len());
    for (a, b) in first.vehicles.iter().zip(second.vehicles.iter()) {
        assert_eq!(a.vehicle.id, b.vehicle.id);
        assert_eq!(a.price, b.price);
        assert_eq!(a.source, b.source);
    }
}

#[tokio::test]
async fn unknown_vehicle_does_not_fail_the_request() {
    let (store, _) = fixture_with_route_price().await;
    let service = QuoteService::new(store.clone(), settings());

    let result = service
        .resolve_quote(AIRPORT_PUJ, CATALONIA, "vehiculo-fantasma", 2, TripType::OneWay)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    // el resto de la flota sigue cotizando
    let quotes = service
        .quote_vehicles(AIRPORT_PUJ, CATALONIA, 2, TripType::OneWay)
        .await
        .unwrap();
    assert!(!quotes.vehicles.is_empty());
}

#[tokio::test]
async fn resolve_quote_carries_source_tag() {
    let (store, _) = fixture_with_route_price().await;
    let service = QuoteService::new(store, settings());

    let quote = service
        .resolve_quote(AIRPORT_PUJ, CATALONIA, "sedan", 2, TripType::OneWay)
        .await
        .unwrap();
    assert_eq!(quote.resolved_price, Decimal::from(150));
    assert_eq!(quote.source, QuoteSource::Route);
    assert_eq!(quote.vehicle_id, "sedan");

    let quote = service
        .resolve_quote(AIRPORT_PUJ, CATALONIA, "van-estandar", 2, TripType::OneWay)
        .await
        .unwrap();
    assert_eq!(quote.source, QuoteSource::Formula);
}

#[tokio::test]
async fn premium_filter_falls_back_to_full_fleet() {
    let (store, _) = fixture_with_route_price().await;
    let service = QuoteService::new(store.clone(), settings());

    // la flota base no tiene vehículos premium: responde la lista
    // completa ordenada por multiplicador, nunca vacía
    let quotes = service
        .quote_premium_vehicles(AIRPORT_PUJ, CATALONIA, 2, TripType::OneWay)
        .await
        .unwrap();
    assert_eq!(quotes.vehicles.len(), 2);
    assert_eq!(quotes.vehicles[0].vehicle.id, "sedan");

    // con una Suburban en la flota, el filtro premium manda
    store
        .upsert_vehicle(vehicle(
            "suv-suburban",
            "Chevrolet Suburban",
            VehicleCategory::Suv,
            1,
            6,
        ))
        .await
        .unwrap();
    let quotes = service
        .quote_premium_vehicles(AIRPORT_PUJ, CATALONIA, 2, TripType::OneWay)
        .await
        .unwrap();
    let ids: Vec<&str> = quotes.vehicles.iter().map(|p| p.vehicle.id.as_str()).collect();
    assert_eq!(ids, vec!["suv-suburban"]);
}

#[tokio::test]
async fn missing_default_zone_is_not_quotable() {
    let store = InMemoryPricingRepository::new();
    store
        .upsert_location(NewLocation {
            slug: "origen-sin-zona".to_string(),
            name: "Origen Sin Zona".to_string(),
            location_type: LocationType::Hotel,
            zone_id: None,
            destination_name: None,
            country_code: "RD".to_string(),
        })
        .await
        .unwrap();
    store
        .upsert_location(NewLocation {
            slug: "destino-sin-zona".to_string(),
            name: "Destino Sin Zona".to_string(),
            location_type: LocationType::Hotel,
            zone_id: None,
            destination_name: None,
            country_code: "RD".to_string(),
        })
        .await
        .unwrap();
    store
        .upsert_vehicle(vehicle("sedan", "Sedán Ejecutivo", VehicleCategory::Sedan, 1, 3))
        .await
        .unwrap();

    let service = QuoteService::new(
        Arc::new(store),
        PricingSettings {
            base_price: Decimal::from(35),
            round_trip_factor: Decimal::new(9, 1),
            default_zone_slug: None,
        },
    );

    let result = service
        .quote_vehicles("origen-sin-zona", "destino-sin-zona", 2, TripType::OneWay)
        .await;
    assert!(matches!(result, Err(AppError::NotQuotable(_))));
}

#[tokio::test]
async fn no_active_vehicles_is_not_quotable() {
    let store = InMemoryPricingRepository::new();
    store
        .upsert_zone(zone("PUJ_BAVARO", "Punta Cana / Bávaro", Decimal::ONE))
        .await
        .unwrap();
    store
        .upsert_location(hotel(BAVARO_PALACE, "Bávaro Palace", "PUJ_BAVARO"))
        .await
        .unwrap();
    store
        .upsert_location(hotel("otro-hotel", "Otro Hotel", "PUJ_BAVARO"))
        .await
        .unwrap();

    let service = QuoteService::new(Arc::new(store), settings());
    let result = service
        .quote_vehicles(BAVARO_PALACE, "otro-hotel", 2, TripType::OneWay)
        .await;
    assert!(matches!(result, Err(AppError::NotQuotable(_))));
}

#[tokio::test]
async fn invalid_input_is_rejected_before_resolution() {
    let (store, _) = fixture_with_route_price().await;
    let service = QuoteService::new(store, settings());

    let result = service
        .quote_vehicles(AIRPORT_PUJ, AIRPORT_PUJ, 2, TripType::OneWay)
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service
        .quote_vehicles(AIRPORT_PUJ, CATALONIA, 0, TripType::OneWay)
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service
        .quote_vehicles("no-existe", CATALONIA, 2, TripType::OneWay)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn cross_country_route_is_rejected_on_write() {
    let store = fixture_store().await;
    store
        .upsert_zone(NewZone {
            slug: "CANCUN".to_string(),
            name: "Cancún".to_string(),
            country_code: "MX".to_string(),
            distance_multiplier: Decimal::ONE,
            aliases: vec![],
        })
        .await
        .unwrap();

    let result = store.upsert_route("PUJ_BAVARO", "CANCUN").await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn zone_with_locations_cannot_be_deleted() {
    let store = fixture_store().await;

    let result = store.delete_zone("SANTO_DOMINGO").await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    // una zona sin ubicaciones sí se elimina
    store
        .upsert_zone(zone("ZONA_VACIA", "Zona Vacía", Decimal::ONE))
        .await
        .unwrap();
    store.delete_zone("ZONA_VACIA").await.unwrap();
    assert!(store.get_zone("ZONA_VACIA").await.unwrap().is_none());
}

#[tokio::test]
async fn seeded_catalog_quotes_end_to_end() {
    let store = InMemoryPricingRepository::new();
    ensure_default_pricing_config(&store, "RD").await.unwrap();
    let store: Arc<dyn PricingStore> = Arc::new(store);

    // hotel nuevo sin zona asignada: resuelve por alias del catálogo
    store
        .upsert_location(NewLocation {
            slug: "hotel-majestic-colonial".to_string(),
            name: "Majestic Colonial".to_string(),
            location_type: LocationType::Hotel,
            zone_id: None,
            destination_name: None,
            country_code: "RD".to_string(),
        })
        .await
        .unwrap();

    let service = QuoteService::new(store, settings());
    let quotes = service
        .quote_vehicles("airport-puj", "hotel-majestic-colonial", 2, TripType::OneWay)
        .await
        .unwrap();

    // tarifa intra-zona PUJ del catálogo, no fórmula
    let sedan = price_of(&quotes, "sedan");
    assert_eq!(sedan.price, Decimal::from(35));
    assert_eq!(sedan.source, QuoteSource::Route);
    assert!(quotes.route_id.is_some());
}
