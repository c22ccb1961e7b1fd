use axum::Router;

use crate::state::AppState;

pub mod audio_routes;
pub mod health_routes;
pub mod poi_routes;
pub mod route_routes;

/// Todas las rutas de la API bajo `/api`
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/health", health_routes::create_health_router())
        .nest("/api/routes", route_routes::create_route_router())
        .nest("/api/pois", poi_routes::create_poi_router())
        .nest("/api/audio", audio_routes::create_audio_router())
}
