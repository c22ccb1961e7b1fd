//! Repositorios
//!
//! Acceso a POIs, rutas/waypoints y contenidos detrás de traits, con una
//! implementación PostgreSQL y otra en memoria (modo desarrollo y tests).

pub mod content_repository;
pub mod memory;
pub mod poi_repository;
pub mod route_repository;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Content, NewContent, NewPoi, NewRoute, Poi, Route, Waypoint};
use crate::utils::errors::AppResult;

pub use content_repository::PgContentRepository;
pub use memory::InMemoryStore;
pub use poi_repository::PgPoiRepository;
pub use route_repository::PgRouteRepository;

#[async_trait]
pub trait PoiRepository: Send + Sync {
    /// Filtros de igualdad tipo IN; un filtro vacío no restringe nada
    async fn find_filtered(&self, epochs: &[String], categories: &[String]) -> AppResult<Vec<Poi>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Poi>>;

    async fn create(&self, poi: NewPoi) -> AppResult<Poi>;

    async fn count(&self) -> AppResult<i64>;
}

#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn create(&self, route: NewRoute) -> AppResult<Route>;

    /// Crea un waypoint por POI con `order` = posición 1..N en la lista
    async fn create_waypoints(&self, route_id: Uuid, poi_ids: &[Uuid]) -> AppResult<Vec<Waypoint>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>>;

    /// Waypoints de la ruta ordenados por `order`
    async fn find_waypoints(&self, route_id: Uuid) -> AppResult<Vec<Waypoint>>;
}

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Falla con `Conflict` si el waypoint ya tiene contenido
    async fn create(&self, content: NewContent) -> AppResult<Content>;

    async fn find_by_waypoint(&self, waypoint_id: Uuid) -> AppResult<Option<Content>>;
}

/// Conjunto de repositorios compartido por el estado de la aplicación
#[derive(Clone)]
pub struct Repositories {
    pub pois: Arc<dyn PoiRepository>,
    pub routes: Arc<dyn RouteRepository>,
    pub contents: Arc<dyn ContentRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            pois: Arc::new(PgPoiRepository::new(pool.clone())),
            routes: Arc::new(PgRouteRepository::new(pool.clone())),
            contents: Arc::new(PgContentRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }

    pub fn from_store(store: Arc<InMemoryStore>) -> Self {
        Self {
            pois: store.clone(),
            routes: store.clone(),
            contents: store,
        }
    }
}
