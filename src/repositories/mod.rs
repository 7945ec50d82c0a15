//! Repositorios de acceso a datos
//!
//! `PricingStore` es el contrato; Postgres lo implementa en producción y
//! la variante en memoria sirve de fixture para tests.

pub mod memory_repository;
pub mod postgres_repository;
pub mod store;

pub use memory_repository::InMemoryPricingRepository;
pub use postgres_repository::PostgresPricingRepository;
pub use store::PricingStore;
