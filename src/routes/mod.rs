//! Rutas de la API

pub mod quote_routes;
