use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn, Level};

use audioguide_backend::build_router;
use audioguide_backend::config::EnvironmentConfig;
use audioguide_backend::database::{create_pool, load_catalog};
use audioguide_backend::repositories::Repositories;
use audioguide_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = if config.is_development() { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🎧 Audioguide API - rutas a pie con audioguía");
    info!("================================================");

    // Almacenamiento: PostgreSQL si hay DATABASE_URL, memoria si no
    let repositories = match config.database_url.as_deref() {
        Some(url) => match create_pool(url).await {
            Ok(pool) => Repositories::postgres(pool),
            Err(e) => {
                error!("❌ Error conectando a la base de datos: {}", e);
                return Err(anyhow::anyhow!("Error de base de datos: {}", e));
            }
        },
        None => {
            warn!("⚠️ DATABASE_URL no configurada, usando almacenamiento en memoria");
            Repositories::in_memory()
        }
    };

    let app_state = AppState::with_yandex(config.clone(), repositories);

    // Catálogo inicial
    if let Some(path) = config.poi_catalog_path.as_deref() {
        match load_catalog(path).await {
            Ok(catalog) => {
                app_state.poi_service.seed_if_empty(catalog).await?;
            }
            Err(e) => error!("❌ No se pudo cargar el catálogo de POIs: {:#}", e),
        }
    }

    let app = build_router(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en {}", config.server_url());
    info!("📂 Audio en {}", config.audio_dir.display());
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health - Health check");
    info!("🗺️ Rutas:");
    info!("   POST /api/routes/generate - Generar ruta (contenido en segundo plano)");
    info!("   POST /api/routes/generate-audio - Generar ruta y descargar el MP3");
    info!("   GET  /api/routes/:route_id - Detalle de la ruta");
    info!("   GET  /api/routes/:route_id/audio - Audio completo de la ruta");
    info!("📍 POIs:");
    info!("   GET  /api/pois - Listar POIs (?epoch=&category=)");
    info!("   GET  /api/pois/:poi_id - Obtener POI");
    info!("🔊 Audio:");
    info!("   GET  /api/audio/:waypoint_id - Audio de una parada");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
