//! Middleware de CORS
//!
//! La app cliente (móvil o web) puede servirse desde otro origen.

use http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// CORS abierto, para desarrollo o cuando no hay orígenes configurados
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// CORS limitado a `origins`; los valores inválidos se ignoran.
/// `origins` no puede contener `*`.
pub fn cors_middleware_with_origins(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("⚠️ Origen CORS inválido ignorado: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .max_age(std::time::Duration::from_secs(3600))
}

/// Elige la política según la configuración
pub fn cors_for(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|origin| origin.trim() == "*") {
        cors_middleware()
    } else {
        cors_middleware_with_origins(origins)
    }
}
