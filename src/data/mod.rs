//! Datos de referencia embebidos

pub mod zone_catalog;
