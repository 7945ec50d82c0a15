//! Controllers de la API

pub mod quote_controller;
