//! Modelo de Route y Waypoint
//!
//! Una ruta es dueña exclusiva de sus waypoints; cada waypoint empareja
//! un POI con su posición (1..N) dentro de la ruta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::content::Content;
use super::poi::Poi;

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Metros. No se calcula todavía, siempre 0
    pub total_distance: f64,
    /// Minutos, copia de la duración pedida
    pub estimated_duration: i32,
    pub epochs: Vec<String>,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Datos para crear una ruta
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub name: String,
    pub description: String,
    pub estimated_duration: i32,
    pub epochs: Vec<String>,
    pub categories: Vec<String>,
}

impl NewRoute {
    pub fn into_route(self) -> Route {
        Route {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            total_distance: 0.0,
            estimated_duration: self.estimated_duration,
            epochs: self.epochs,
            categories: self.categories,
            created_at: Utc::now(),
        }
    }
}

/// Waypoint - mapea a la tabla waypoints
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Waypoint {
    pub id: Uuid,
    pub route_id: Uuid,
    pub poi_id: Uuid,
    #[sqlx(rename = "waypoint_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

/// Parada de una ruta con su POI y, si ya existe, su contenido
#[derive(Debug, Clone)]
pub struct RouteStop {
    pub waypoint: Waypoint,
    pub poi: Poi,
    pub content: Option<Content>,
}

impl RouteStop {
    /// Único criterio de "audio listo" para una parada
    pub fn audio_ready(&self) -> bool {
        self.content.as_ref().is_some_and(Content::has_audio)
    }
}
