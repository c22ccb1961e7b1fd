//! Módulo de base de datos
//!
//! Maneja la conexión, el schema de PostgreSQL y el catálogo inicial

pub mod connection;
pub mod migrations;
pub mod seed;

pub use connection::create_pool;
pub use seed::load_catalog;
