use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{Content, NewPoi, Route, RouteStop, DEFAULT_IMPORTANCE};
use crate::utils::validation::validate_coordinates;

// Punto geográfico
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_point"))]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

fn validate_point(point: &Point) -> Result<(), ValidationError> {
    validate_coordinates(point.lat, point.lon)
}

// Lugar propuesto por el cliente
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_custom_poi"))]
pub struct CustomPoiRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub epoch: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

fn validate_custom_poi(custom: &CustomPoiRequest) -> Result<(), ValidationError> {
    validate_coordinates(custom.latitude, custom.longitude)
}

impl From<CustomPoiRequest> for NewPoi {
    fn from(custom: CustomPoiRequest) -> Self {
        NewPoi {
            name: custom.name,
            description: custom.description,
            latitude: custom.latitude,
            longitude: custom.longitude,
            epoch: custom.epoch.unwrap_or_default(),
            category: custom.category.unwrap_or_default(),
            importance: DEFAULT_IMPORTANCE,
            year_built: None,
            architect: None,
            style: None,
            photos: Vec::new(),
            wikipedia_url: None,
            metadata: None,
        }
    }
}

// Request para generar una ruta (modo asíncrono y síncrono)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RouteRequest {
    #[validate]
    pub start_point: Point,
    #[validate(range(min = 15, max = 180))]
    pub duration_minutes: i32,
    #[serde(default)]
    pub epochs: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub max_waypoints: i32,
    /// POIs concretos del catálogo, en el orden de visita deseado
    #[serde(default)]
    pub poi_ids: Vec<String>,
    #[serde(default)]
    #[validate]
    pub custom_pois: Vec<CustomPoiRequest>,
}

// Detalle del contenido de una parada
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDetails {
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub audio_url: String,
    pub duration_seconds: i32,
    pub photos: Vec<String>,
}

impl From<&Content> for ContentDetails {
    fn from(content: &Content) -> Self {
        Self {
            text: content.text.clone(),
            audio_url: content.audio_url.clone(),
            duration_seconds: content.duration,
            photos: content.photos.clone(),
        }
    }
}

// Detalle de una parada
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointDetails {
    pub id: String,
    pub poi_id: String,
    pub name: String,
    pub description: String,
    pub coordinates: Point,
    pub epoch: String,
    pub category: String,
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<ContentDetails>,
}

impl From<&RouteStop> for WaypointDetails {
    fn from(stop: &RouteStop) -> Self {
        Self {
            id: stop.waypoint.id.to_string(),
            poi_id: stop.poi.id.to_string(),
            name: stop.poi.name.clone(),
            description: stop.poi.description.clone(),
            coordinates: Point {
                lat: stop.poi.latitude,
                lon: stop.poi.longitude,
            },
            epoch: stop.poi.epoch.clone(),
            category: stop.poi.category.clone(),
            order: stop.waypoint.order,
            content: stop.content.as_ref().map(ContentDetails::from),
        }
    }
}

// Response de ruta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub route_id: String,
    pub name: String,
    pub description: String,
    pub total_distance: f64,
    pub estimated_duration: i32,
    pub epochs: Vec<String>,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub waypoints: Vec<WaypointDetails>,
}

impl RouteResponse {
    pub fn from_parts(route: &Route, stops: &[RouteStop]) -> Self {
        let mut waypoints: Vec<WaypointDetails> = stops.iter().map(WaypointDetails::from).collect();
        waypoints.sort_by_key(|wp| wp.order);

        Self {
            route_id: route.id.to_string(),
            name: route.name.clone(),
            description: route.description.clone(),
            total_distance: route.total_distance,
            estimated_duration: route.estimated_duration,
            epochs: route.epochs.clone(),
            categories: route.categories.clone(),
            created_at: route.created_at,
            waypoints,
        }
    }
}
