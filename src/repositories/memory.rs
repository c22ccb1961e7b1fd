//! Almacenamiento en memoria
//!
//! Se usa cuando no hay `DATABASE_URL` y en los tests. Aplica las mismas
//! reglas de unicidad que el schema PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ContentRepository, PoiRepository, RouteRepository};
use crate::models::{Content, NewContent, NewPoi, NewRoute, Poi, Route, Waypoint};
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
pub struct InMemoryStore {
    // Vec para conservar el orden de inserción
    pois: RwLock<Vec<Poi>>,
    routes: RwLock<HashMap<Uuid, Route>>,
    waypoints: RwLock<Vec<Waypoint>>,
    contents: RwLock<HashMap<Uuid, Content>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de rutas creadas
    pub async fn route_count(&self) -> usize {
        self.routes.read().await.len()
    }
}

fn matches_filter(value: &str, filter: &[String]) -> bool {
    filter.is_empty() || filter.iter().any(|f| f == value)
}

#[async_trait]
impl PoiRepository for InMemoryStore {
    async fn find_filtered(&self, epochs: &[String], categories: &[String]) -> AppResult<Vec<Poi>> {
        let pois = self.pois.read().await;
        Ok(pois
            .iter()
            .filter(|poi| matches_filter(&poi.epoch, epochs) && matches_filter(&poi.category, categories))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Poi>> {
        Ok(self.pois.read().await.iter().find(|poi| poi.id == id).cloned())
    }

    async fn create(&self, poi: NewPoi) -> AppResult<Poi> {
        let poi = poi.into_poi();
        self.pois.write().await.push(poi.clone());
        Ok(poi)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.pois.read().await.len() as i64)
    }
}

#[async_trait]
impl RouteRepository for InMemoryStore {
    async fn create(&self, route: NewRoute) -> AppResult<Route> {
        let route = route.into_route();
        self.routes.write().await.insert(route.id, route.clone());
        Ok(route)
    }

    async fn create_waypoints(&self, route_id: Uuid, poi_ids: &[Uuid]) -> AppResult<Vec<Waypoint>> {
        if !self.routes.read().await.contains_key(&route_id) {
            return Err(AppError::NotFound(format!("Route '{}' not found", route_id)));
        }

        let created: Vec<Waypoint> = poi_ids
            .iter()
            .enumerate()
            .map(|(index, poi_id)| Waypoint {
                id: Uuid::new_v4(),
                route_id,
                poi_id: *poi_id,
                order: index as i32 + 1,
                created_at: Utc::now(),
            })
            .collect();

        self.waypoints.write().await.extend(created.iter().cloned());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        Ok(self.routes.read().await.get(&id).cloned())
    }

    async fn find_waypoints(&self, route_id: Uuid) -> AppResult<Vec<Waypoint>> {
        let mut waypoints: Vec<Waypoint> = self
            .waypoints
            .read()
            .await
            .iter()
            .filter(|wp| wp.route_id == route_id)
            .cloned()
            .collect();
        waypoints.sort_by_key(|wp| wp.order);
        Ok(waypoints)
    }
}

#[async_trait]
impl ContentRepository for InMemoryStore {
    async fn create(&self, content: NewContent) -> AppResult<Content> {
        let mut contents = self.contents.write().await;
        if contents.contains_key(&content.waypoint_id) {
            return Err(AppError::Conflict(format!(
                "Content for waypoint '{}' already exists",
                content.waypoint_id
            )));
        }

        let content = content.into_content();
        contents.insert(content.waypoint_id, content.clone());
        Ok(content)
    }

    async fn find_by_waypoint(&self, waypoint_id: Uuid) -> AppResult<Option<Content>> {
        Ok(self.contents.read().await.get(&waypoint_id).cloned())
    }
}
