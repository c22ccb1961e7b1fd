//! Servicio de POIs
//!
//! Búsqueda de lugares cercanos (escaneo lineal + Haversine), resolución
//! de IDs explícitos y creación de lugares propuestos por el cliente.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{NewPoi, Poi};
use crate::repositories::PoiRepository;
use crate::services::geo::{haversine_distance, rank_by_importance};
use crate::utils::errors::{AppError, AppResult};

pub struct PoiService {
    repository: Arc<dyn PoiRepository>,
}

impl PoiService {
    pub fn new(repository: Arc<dyn PoiRepository>) -> Self {
        Self { repository }
    }

    /// POIs a `radius_meters` o menos del centro, ordenados por importancia.
    /// Un resultado vacío no es un error aquí.
    pub async fn find_nearby(
        &self,
        lat: f64,
        lon: f64,
        radius_meters: f64,
        epochs: &[String],
        categories: &[String],
    ) -> AppResult<Vec<Poi>> {
        let candidates = self.repository.find_filtered(epochs, categories).await?;
        let total = candidates.len();

        let mut nearby: Vec<Poi> = candidates
            .into_iter()
            .filter(|poi| haversine_distance(lat, lon, poi.latitude, poi.longitude) <= radius_meters)
            .collect();

        rank_by_importance(&mut nearby);

        log::debug!(
            "📍 {} de {} POIs dentro de {:.0} m de ({}, {})",
            nearby.len(),
            total,
            radius_meters,
            lat,
            lon
        );

        Ok(nearby)
    }

    /// Listado con filtros de igualdad simples, por importancia y nombre
    pub async fn list(&self, epoch: Option<&str>, category: Option<&str>) -> AppResult<Vec<Poi>> {
        let epochs: Vec<String> = epoch.map(str::to_string).into_iter().collect();
        let categories: Vec<String> = category.map(str::to_string).into_iter().collect();

        let mut pois = self.repository.find_filtered(&epochs, &categories).await?;
        pois.sort_by(|a, b| b.importance.cmp(&a.importance).then_with(|| a.name.cmp(&b.name)));
        Ok(pois)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Option<Poi>> {
        self.repository.find_by_id(id).await
    }

    /// Resuelve IDs en el mismo orden de entrada; falla en el primero que
    /// no se pueda resolver.
    pub async fn resolve_ids(&self, ids: &[String]) -> AppResult<Vec<Poi>> {
        let mut uuids = Vec::with_capacity(ids.len());
        for id in ids {
            let uuid = Uuid::parse_str(id.trim())
                .map_err(|_| AppError::BadRequest(format!("invalid POI ID: {}", id)))?;
            uuids.push(uuid);
        }

        let mut pois = Vec::with_capacity(uuids.len());
        for uuid in uuids {
            let poi = self
                .repository
                .find_by_id(uuid)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("POI not found: {}", uuid)))?;
            pois.push(poi);
        }

        Ok(pois)
    }

    /// Persiste cada lugar como POI nuevo; cualquier fallo aborta el lote
    pub async fn create_batch(&self, new_pois: Vec<NewPoi>) -> AppResult<Vec<Poi>> {
        let mut pois = Vec::with_capacity(new_pois.len());
        for new_poi in new_pois {
            let name = new_poi.name.clone();
            let poi = self.repository.create(new_poi).await.map_err(|e| {
                log::error!("❌ No se pudo crear el POI '{}': {}", name, e);
                AppError::Internal(format!("failed to create custom POI '{}': {}", name, e))
            })?;
            pois.push(poi);
        }
        Ok(pois)
    }

    /// Carga el catálogo inicial si el almacén está vacío
    pub async fn seed_if_empty(&self, catalog: Vec<NewPoi>) -> AppResult<usize> {
        if self.repository.count().await? > 0 {
            log::info!("📚 Catálogo de POIs ya presente, no se importa");
            return Ok(0);
        }

        let created = self.create_batch(catalog).await?.len();
        log::info!("📚 Importados {} POIs al catálogo", created);
        Ok(created)
    }
}
