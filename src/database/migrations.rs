//! Bootstrap del schema
//!
//! Sentencias idempotentes; se ejecutan una por una al arrancar.

use sqlx::PgPool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS pois (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        latitude DOUBLE PRECISION NOT NULL,
        longitude DOUBLE PRECISION NOT NULL,
        epoch TEXT NOT NULL DEFAULT '',
        category TEXT NOT NULL DEFAULT '',
        importance INTEGER NOT NULL DEFAULT 5,
        year_built INTEGER,
        architect TEXT,
        style TEXT,
        photos TEXT[] NOT NULL DEFAULT '{}',
        wikipedia_url TEXT,
        metadata JSONB,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_pois_epoch ON pois (epoch)",
    "CREATE INDEX IF NOT EXISTS idx_pois_category ON pois (category)",
    r#"
    CREATE TABLE IF NOT EXISTS routes (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        total_distance DOUBLE PRECISION NOT NULL DEFAULT 0,
        estimated_duration INTEGER NOT NULL,
        epochs TEXT[] NOT NULL DEFAULT '{}',
        categories TEXT[] NOT NULL DEFAULT '{}',
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS waypoints (
        id UUID PRIMARY KEY,
        route_id UUID NOT NULL REFERENCES routes (id) ON DELETE CASCADE,
        poi_id UUID NOT NULL REFERENCES pois (id),
        waypoint_order INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        UNIQUE (route_id, waypoint_order)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_waypoints_route ON waypoints (route_id)",
    r#"
    CREATE TABLE IF NOT EXISTS contents (
        id UUID PRIMARY KEY,
        waypoint_id UUID NOT NULL UNIQUE REFERENCES waypoints (id) ON DELETE CASCADE,
        text TEXT NOT NULL,
        audio_url TEXT NOT NULL DEFAULT '',
        audio_path TEXT NOT NULL DEFAULT '',
        duration INTEGER NOT NULL DEFAULT 0,
        photos TEXT[] NOT NULL DEFAULT '{}',
        generated BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
];

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    log::info!("🗄️ Schema verificado ({} sentencias)", SCHEMA.len());
    Ok(())
}
