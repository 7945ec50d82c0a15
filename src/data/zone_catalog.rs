//! Catálogo base de zonas y tarifas de traslado
//!
//! Tabla de referencia del despliegue dominicano: siete zonas con sus
//! microzonas/hoteles destacados (aliases del resolver), el multiplicador
//! relativo de distancia y la matriz de tarifas por categoría. El seed
//! service la instala vía upserts al arrancar; los aliases alimentan el
//! matching por nombre cuando una ubicación llega sin zona asignada.

use lazy_static::lazy_static;
use rust_decimal::Decimal;

/// Tarifa de catálogo hacia una zona destino, por categoría de vehículo
#[derive(Debug, Clone)]
pub struct CatalogFare {
    pub destination: &'static str,
    pub sedan: Decimal,
    pub van: Decimal,
    pub suv: Decimal,
}

/// Zona del catálogo base
#[derive(Debug, Clone)]
pub struct CatalogZone {
    pub slug: &'static str,
    pub name: &'static str,
    pub multiplier: Decimal,
    pub aliases: Vec<&'static str>,
    pub fares: Vec<CatalogFare>,
}

fn fare(destination: &'static str, sedan: i64, van: i64, suv: i64) -> CatalogFare {
    CatalogFare {
        destination,
        sedan: Decimal::from(sedan),
        van: Decimal::from(van),
        suv: Decimal::from(suv),
    }
}

lazy_static! {
    pub static ref ZONE_CATALOG: Vec<CatalogZone> = vec![
        CatalogZone {
            slug: "PUJ_BAVARO",
            name: "Punta Cana / Bávaro / Cap Cana",
            multiplier: Decimal::new(10, 1),
            aliases: vec![
                "Cap Cana",
                "Punta Cana Village",
                "Bávaro Cortecito",
                "Los Corales",
                "Arena Gorda",
                "Playa Blanca",
                "Barceló Bávaro Palace",
                "Hard Rock PC",
                "Iberostar Grand",
                "Majestic Colonial",
                "Secrets Royal Beach",
                "Tortuga Bay",
            ],
            fares: vec![
                fare("PUJ_BAVARO", 35, 60, 120),
                fare("UVERO_MICHES", 75, 110, 190),
                fare("ROMANA_BAYAHIBE", 95, 145, 250),
                fare("SANTO_DOMINGO", 175, 260, 450),
                fare("SAMANA", 350, 490, 750),
                fare("NORTE_CIBAO", 420, 580, 890),
                fare("SUR_PROFUNDO", 550, 750, 1100),
            ],
        },
        CatalogZone {
            slug: "UVERO_MICHES",
            name: "Uvero Alto / Miches",
            multiplier: Decimal::new(21, 1),
            aliases: vec![
                "Uvero Alto",
                "Miches",
                "Sabana de la Mar",
                "Playa Esmeralda",
                "Nickelodeon",
                "Dreams Onyx",
                "Excellence El Carmen",
                "Temptation Miches",
                "Club Med Michès",
            ],
            fares: vec![
                fare("UVERO_MICHES", 45, 75, 140),
                fare("PUJ_BAVARO", 75, 110, 190),
                fare("ROMANA_BAYAHIBE", 120, 180, 310),
                fare("SANTO_DOMINGO", 210, 310, 520),
                fare("SAMANA", 280, 410, 680),
                fare("NORTE_CIBAO", 450, 620, 950),
                fare("SUR_PROFUNDO", 580, 790, 1200),
            ],
        },
        CatalogZone {
            slug: "ROMANA_BAYAHIBE",
            name: "La Romana / Bayahibe",
            multiplier: Decimal::new(27, 1),
            aliases: vec![
                "La Romana City",
                "Casa de Campo",
                "Bayahibe Village",
                "Dominicus",
                "Hilton La Romana",
                "Dreams Dominicus",
                "Viva Wyndham Maya",
                "Iberostar Hacienda Dominicus",
            ],
            fares: vec![
                fare("ROMANA_BAYAHIBE", 40, 65, 130),
                fare("PUJ_BAVARO", 95, 145, 250),
                fare("UVERO_MICHES", 120, 180, 310),
                fare("SANTO_DOMINGO", 110, 165, 280),
                fare("SAMANA", 320, 460, 780),
                fare("NORTE_CIBAO", 350, 490, 820),
                fare("SUR_PROFUNDO", 450, 630, 990),
            ],
        },
        CatalogZone {
            slug: "SANTO_DOMINGO",
            name: "Santo Domingo / Juan Dolio",
            multiplier: Decimal::new(45, 1),
            aliases: vec![
                "Distrito Nacional",
                "SDQ Airport",
                "Boca Chica",
                "Juan Dolio",
                "JW Marriott",
                "Renaissance Jaragua",
                "El Embajador",
                "Emotions Juan Dolio",
                "Hodelpa Nicolás de Ovando",
            ],
            fares: vec![
                fare("SANTO_DOMINGO", 45, 70, 150),
                fare("PUJ_BAVARO", 175, 260, 450),
                fare("UVERO_MICHES", 210, 310, 520),
                fare("ROMANA_BAYAHIBE", 110, 165, 280),
                fare("SAMANA", 195, 285, 490),
                fare("NORTE_CIBAO", 185, 270, 460),
                fare("SUR_PROFUNDO", 280, 410, 690),
            ],
        },
        CatalogZone {
            slug: "SAMANA",
            name: "Samaná / Las Terrenas",
            multiplier: Decimal::new(100, 1),
            aliases: vec![
                "Las Terrenas",
                "Las Galeras",
                "Samaná Port",
                "El Limón",
                "Cosón",
                "Bahia Principe Cayo Levantado",
                "Sublime Samana",
                "The Bannister",
                "Viva V Samaná",
            ],
            fares: vec![
                fare("SAMANA", 60, 95, 180),
                fare("PUJ_BAVARO", 350, 490, 750),
                fare("UVERO_MICHES", 280, 410, 680),
                fare("ROMANA_BAYAHIBE", 320, 460, 780),
                fare("SANTO_DOMINGO", 195, 285, 490),
                fare("NORTE_CIBAO", 220, 320, 550),
                fare("SUR_PROFUNDO", 480, 690, 1100),
            ],
        },
        CatalogZone {
            slug: "NORTE_CIBAO",
            name: "Norte / Cibao",
            multiplier: Decimal::new(120, 1),
            aliases: vec![
                "Santiago (STI)",
                "Puerto Plata (POP)",
                "Cabarete",
                "Sosúa",
                "Hodelpa Gran Almirante",
                "Senator Puerto Plata",
                "Iberostar Costa Dorada",
                "BlueBay Villas",
            ],
            fares: vec![
                fare("NORTE_CIBAO", 50, 85, 160),
                fare("PUJ_BAVARO", 420, 580, 890),
                fare("SANTO_DOMINGO", 185, 270, 460),
                fare("SAMANA", 220, 320, 550),
                fare("SUR_PROFUNDO", 390, 560, 920),
            ],
        },
        CatalogZone {
            slug: "SUR_PROFUNDO",
            name: "Sur Profundo",
            multiplier: Decimal::new(157, 1),
            aliases: vec![
                "Barahona",
                "Pedernales",
                "Bahía de las Águilas",
                "Baní",
                "Eco-del-Mar",
                "Hotel Guarocuya",
                "Casa del Mar Barahona",
            ],
            fares: vec![
                fare("SUR_PROFUNDO", 70, 110, 210),
                fare("SANTO_DOMINGO", 280, 410, 690),
                fare("PUJ_BAVARO", 550, 750, 1100),
            ],
        },
    ];
}

/// Aeropuertos por defecto con su zona de arranque
pub const DEFAULT_AIRPORTS: [(&str, &str, &str); 4] = [
    ("airport-puj", "Aeropuerto Punta Cana (PUJ)", "PUJ_BAVARO"),
    ("airport-sdq", "Aeropuerto Las Américas (SDQ)", "SANTO_DOMINGO"),
    ("airport-pop", "Aeropuerto Gregorio Luperón (POP)", "NORTE_CIBAO"),
    ("airport-lrm", "Aeropuerto La Romana (LRM)", "ROMANA_BAYAHIBE"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_fares_reference_known_zones() {
        let slugs: Vec<&str> = ZONE_CATALOG.iter().map(|z| z.slug).collect();
        for zone in ZONE_CATALOG.iter() {
            for fare in &zone.fares {
                assert!(
                    slugs.contains(&fare.destination),
                    "tarifa de {} apunta a zona desconocida {}",
                    zone.slug,
                    fare.destination
                );
            }
        }
    }

    #[test]
    fn test_catalog_multipliers_positive() {
        for zone in ZONE_CATALOG.iter() {
            assert!(zone.multiplier > Decimal::ZERO, "{}", zone.slug);
        }
    }
}
