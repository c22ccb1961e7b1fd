use std::sync::Arc;

use crate::dto::audio_dto::AudioFile;
use crate::services::RouteService;
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_uuid;

pub struct AudioController {
    service: Arc<RouteService>,
}

impl AudioController {
    pub fn new(service: Arc<RouteService>) -> Self {
        Self { service }
    }

    pub async fn waypoint_audio(&self, waypoint_id: &str) -> AppResult<AudioFile> {
        let waypoint_id = parse_uuid(waypoint_id, "waypoint")?;
        let path = self.service.waypoint_audio(waypoint_id).await?;
        AudioFile::open(&path).await
    }
}
