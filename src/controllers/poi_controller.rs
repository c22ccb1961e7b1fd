use std::sync::Arc;

use crate::dto::poi_dto::PoiFilters;
use crate::models::Poi;
use crate::services::PoiService;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::parse_uuid;

pub struct PoiController {
    service: Arc<PoiService>,
}

impl PoiController {
    pub fn new(service: Arc<PoiService>) -> Self {
        Self { service }
    }

    pub async fn list(&self, filters: PoiFilters) -> AppResult<Vec<Poi>> {
        self.service.list(filters.epoch(), filters.category()).await
    }

    pub async fn get_by_id(&self, poi_id: &str) -> AppResult<Poi> {
        let id = parse_uuid(poi_id, "POI")?;
        self.service
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("POI not found".to_string()))
    }
}
