//! Configuración de conexión a PostgreSQL
//!
//! Este módulo maneja la conexión a la base de datos PostgreSQL.

use anyhow::Result;
use sqlx::PgPool;

use crate::config::database::{mask_database_url, DatabaseConfig};

use super::migrations::run_migrations;

/// Crear un pool de conexiones y dejar el schema listo
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    log::info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(database_url));

    let pool = DatabaseConfig::new(database_url).create_pool().await?;
    run_migrations(&pool).await?;

    log::info!("✅ PostgreSQL conectado exitosamente");
    Ok(pool)
}
