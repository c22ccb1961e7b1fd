use std::sync::Arc;

use validator::Validate;

use crate::dto::audio_dto::{AudioFile, AudioNotReadyResponse, AudioPartialResponse, RouteAudioResponse};
use crate::dto::route_dto::{RouteRequest, RouteResponse};
use crate::services::{RouteAudio, RouteService};
use crate::utils::errors::AppResult;
use crate::utils::validation::parse_uuid;

pub struct RouteController {
    service: Arc<RouteService>,
}

impl RouteController {
    pub fn new(service: Arc<RouteService>) -> Self {
        Self { service }
    }

    /// Crea la ruta y deja la generación de contenido en segundo plano
    pub async fn generate(&self, request: RouteRequest) -> AppResult<RouteResponse> {
        request.validate()?;
        self.service.generate_route(&request).await
    }

    /// Genera todo en línea y devuelve el MP3 de la ruta
    pub async fn generate_with_audio(&self, request: RouteRequest) -> AppResult<AudioFile> {
        request.validate()?;
        let generated = self.service.generate_route_with_audio(&request).await?;
        let file = AudioFile::open(&generated.audio_path).await?;
        Ok(file.as_route_download(generated.route.id))
    }

    pub async fn get_by_id(&self, route_id: &str) -> AppResult<RouteResponse> {
        let route_id = parse_uuid(route_id, "route")?;
        self.service.route_details(route_id).await
    }

    pub async fn audio(&self, route_id: &str) -> AppResult<RouteAudioResponse> {
        let route_id = parse_uuid(route_id, "route")?;

        let response = match self.service.route_audio(route_id).await? {
            RouteAudio::NotReady { pending } => RouteAudioResponse::NotReady(AudioNotReadyResponse::new(pending)),
            RouteAudio::Partial { ready, total, pending } => {
                RouteAudioResponse::Partial(AudioPartialResponse::new(ready, total, pending))
            }
            RouteAudio::File(path) => {
                let file = AudioFile::open(&path).await?;
                RouteAudioResponse::File(file.as_route_download(route_id))
            }
        };

        Ok(response)
    }
}
