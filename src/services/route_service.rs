//! Ensamblado de rutas
//!
//! Selecciona los POIs (IDs explícitos > lugares propuestos > búsqueda
//! automática), crea la ruta con sus waypoints y lanza la generación de
//! narración + audio, en línea o en segundo plano.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::dto::route_dto::{RouteRequest, RouteResponse};
use crate::models::content::audio_url_for;
use crate::models::{Category, Content, Epoch, NewContent, NewPoi, NewRoute, Poi, Route, RouteStop, Waypoint};
use crate::repositories::{ContentRepository, Repositories};
use crate::services::audio_service::{self, AudioReadiness};
use crate::services::content_service::ContentService;
use crate::services::geo::search_radius_meters;
use crate::services::poi_service::PoiService;
use crate::services::tts_service::TtsService;
use crate::utils::errors::{AppError, AppResult, GenerationStage};

pub const DEFAULT_MAX_WAYPOINTS: usize = 5;
pub const MAX_WAYPOINTS_LIMIT: usize = 10;

pub const ROUTE_DESCRIPTION: &str = "Автоматически сгенерированный маршрут";
pub const ROUTE_WITH_AUDIO_DESCRIPTION: &str = "Автоматически сгенерированный маршрут с аудио";

const GENERIC_ROUTE_NAME: &str = "Экскурсия";

/// Nombre legible: `"<Adj> Москва: <Sustantivo>"`, con "Экскурсия" cuando
/// la época no se reconoce
pub fn route_name(epochs: &[String], interests: &[String]) -> String {
    let mut name = match epochs.first().and_then(|tag| Epoch::from_tag(tag)) {
        Some(epoch) => format!("{} Москва", epoch.route_adjective()),
        None => GENERIC_ROUTE_NAME.to_string(),
    };

    if let Some(category) = interests.first().and_then(|tag| Category::from_tag(tag)) {
        name.push_str(": ");
        name.push_str(category.route_noun());
    }

    name
}

/// Tope de paradas en búsqueda automática; 5 si no viene o está fuera de rango
pub fn effective_max_waypoints(requested: i32) -> usize {
    match usize::try_from(requested) {
        Ok(n) if (1..=MAX_WAYPOINTS_LIMIT).contains(&n) => n,
        _ => DEFAULT_MAX_WAYPOINTS,
    }
}

/// Resultado de consultar el audio completo de una ruta
#[derive(Debug, Clone, PartialEq)]
pub enum RouteAudio {
    NotReady { pending: Vec<String> },
    Partial {
        ready: usize,
        total: usize,
        pending: Vec<String>,
    },
    File(PathBuf),
}

/// Ruta generada en modo síncrono junto con su archivo de audio
#[derive(Debug, Clone)]
pub struct GeneratedAudioRoute {
    pub route: Route,
    pub audio_path: PathBuf,
}

/// Genera narración, audio y contenido de una parada
#[derive(Clone)]
pub struct StopContentGenerator {
    contents: Arc<dyn ContentRepository>,
    content_service: Arc<ContentService>,
    tts_service: Arc<TtsService>,
}

impl StopContentGenerator {
    pub fn new(
        contents: Arc<dyn ContentRepository>,
        content_service: Arc<ContentService>,
        tts_service: Arc<TtsService>,
    ) -> Self {
        Self {
            contents,
            content_service,
            tts_service,
        }
    }

    pub async fn generate_for_stop(&self, waypoint: &Waypoint, poi: &Poi) -> AppResult<Content> {
        let text = self
            .content_service
            .generate_description(poi)
            .await
            .map_err(|e| AppError::Generation {
                stop: poi.name.clone(),
                stage: GenerationStage::Narration,
                message: format!("Failed to generate content for {}: {}", poi.name, e),
            })?;

        let audio = self
            .tts_service
            .generate_audio(&text, &waypoint.id.to_string())
            .await
            .map_err(|e| AppError::Generation {
                stop: poi.name.clone(),
                stage: GenerationStage::Audio,
                message: format!("Failed to generate audio for {}: {}", poi.name, e),
            })?;

        let new_content = NewContent {
            waypoint_id: waypoint.id,
            text,
            audio_url: audio_url_for(waypoint.id),
            audio_path: audio.path.display().to_string(),
            duration: audio.duration_seconds,
            photos: poi.photos.clone(),
        };

        self.contents.create(new_content).await.map_err(|e| {
            log::error!("❌ No se pudo guardar el contenido de '{}': {}", poi.name, e);
            AppError::Generation {
                stop: poi.name.clone(),
                stage: GenerationStage::Persist,
                message: format!("Failed to save content for {}", poi.name),
            }
        })
    }

    /// Tarea desacoplada: sin handle, sin reintentos; los fallos solo se loguean
    pub fn spawn_batch(&self, route_id: Uuid, stops: Vec<(Waypoint, Poi)>) {
        let generator = self.clone();
        tokio::spawn(async move {
            let total = stops.len();
            let mut generated = 0;

            for (waypoint, poi) in &stops {
                match generator.generate_for_stop(waypoint, poi).await {
                    Ok(_) => {
                        generated += 1;
                        log::info!("🎧 Contenido listo para '{}' ({}/{})", poi.name, waypoint.order, total);
                    }
                    Err(e) => {
                        log::warn!("⚠️ Parada '{}' omitida en la ruta {}: {}", poi.name, route_id, e);
                    }
                }
            }

            log::info!("✅ Generación en segundo plano terminada para la ruta {}: {}/{}", route_id, generated, total);
        });
    }
}

pub struct RouteService {
    repositories: Repositories,
    poi_service: PoiService,
    generator: StopContentGenerator,
    audio_dir: PathBuf,
}

impl RouteService {
    pub fn new(
        repositories: Repositories,
        content_service: Arc<ContentService>,
        tts_service: Arc<TtsService>,
    ) -> Self {
        let audio_dir = tts_service.audio_dir().to_path_buf();
        Self {
            poi_service: PoiService::new(repositories.pois.clone()),
            generator: StopContentGenerator::new(repositories.contents.clone(), content_service, tts_service),
            repositories,
            audio_dir,
        }
    }

    /// Modo asíncrono: responde con la ruta en cuanto existen los waypoints
    pub async fn generate_route(&self, request: &RouteRequest) -> AppResult<RouteResponse> {
        let pois = self.select_pois(request).await?;
        let (route, waypoints) = self.create_route(request, &pois, ROUTE_DESCRIPTION).await?;

        let stops: Vec<RouteStop> = waypoints
            .iter()
            .cloned()
            .zip(pois.iter().cloned())
            .map(|(waypoint, poi)| RouteStop {
                waypoint,
                poi,
                content: None,
            })
            .collect();

        self.generator
            .spawn_batch(route.id, waypoints.into_iter().zip(pois).collect());

        Ok(RouteResponse::from_parts(&route, &stops))
    }

    /// Modo síncrono: genera todo en línea y devuelve un único MP3.
    ///
    /// El primer fallo aborta la petición; el contenido ya creado se queda.
    pub async fn generate_route_with_audio(&self, request: &RouteRequest) -> AppResult<GeneratedAudioRoute> {
        let pois = self.select_pois(request).await?;
        let (route, waypoints) = self
            .create_route(request, &pois, ROUTE_WITH_AUDIO_DESCRIPTION)
            .await?;

        let mut files = Vec::with_capacity(waypoints.len());
        for (waypoint, poi) in waypoints.iter().zip(&pois) {
            let content = self.generator.generate_for_stop(waypoint, poi).await?;
            files.push(PathBuf::from(content.audio_path));
        }

        let audio_path = single_or_merged(&files, &self.audio_dir, route.id).await?;
        log::info!("🎧 Ruta {} generada con audio: {}", route.id, audio_path.display());

        Ok(GeneratedAudioRoute { route, audio_path })
    }

    pub async fn route_details(&self, route_id: Uuid) -> AppResult<RouteResponse> {
        let route = self.find_route(route_id).await?;
        let stops = self.load_stops(route_id).await?;
        Ok(RouteResponse::from_parts(&route, &stops))
    }

    /// Estado del audio de la ruta, calculado en cada consulta
    pub async fn route_audio(&self, route_id: Uuid) -> AppResult<RouteAudio> {
        self.find_route(route_id).await?;

        let stops = self.load_stops(route_id).await?;
        if stops.is_empty() {
            return Err(AppError::NotFound("No waypoints in route".to_string()));
        }

        match audio_service::classify(&stops) {
            AudioReadiness::NoneReady { pending } => Ok(RouteAudio::NotReady { pending }),
            AudioReadiness::Partial { ready, total, pending } => Ok(RouteAudio::Partial { ready, total, pending }),
            AudioReadiness::Ready { files } => {
                let path = single_or_merged(&files, &self.audio_dir, route_id).await?;
                Ok(RouteAudio::File(path))
            }
        }
    }

    /// Archivo de audio de una sola parada
    pub async fn waypoint_audio(&self, waypoint_id: Uuid) -> AppResult<PathBuf> {
        let content = self
            .repositories
            .contents
            .find_by_waypoint(waypoint_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Audio not found".to_string()))?;

        if !content.has_audio() {
            return Err(AppError::NotFound("Audio not generated yet".to_string()));
        }

        Ok(PathBuf::from(content.audio_path))
    }

    /// Paradas de la ruta en orden de visita, con su POI y contenido
    pub async fn load_stops(&self, route_id: Uuid) -> AppResult<Vec<RouteStop>> {
        let waypoints = self.repositories.routes.find_waypoints(route_id).await?;

        let mut stops = Vec::with_capacity(waypoints.len());
        for waypoint in waypoints {
            let poi = self
                .repositories
                .pois
                .find_by_id(waypoint.poi_id)
                .await?
                .ok_or_else(|| AppError::Internal(format!("POI {} of waypoint {} is missing", waypoint.poi_id, waypoint.id)))?;
            let content = self.repositories.contents.find_by_waypoint(waypoint.id).await?;

            stops.push(RouteStop { waypoint, poi, content });
        }

        Ok(stops)
    }

    async fn find_route(&self, route_id: Uuid) -> AppResult<Route> {
        self.repositories
            .routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))
    }

    async fn select_pois(&self, request: &RouteRequest) -> AppResult<Vec<Poi>> {
        if !request.poi_ids.is_empty() {
            return self.poi_service.resolve_ids(&request.poi_ids).await;
        }

        if !request.custom_pois.is_empty() {
            let new_pois: Vec<NewPoi> = request.custom_pois.iter().cloned().map(NewPoi::from).collect();
            return self.poi_service.create_batch(new_pois).await;
        }

        let radius = search_radius_meters(request.duration_minutes);
        let mut pois = self
            .poi_service
            .find_nearby(
                request.start_point.lat,
                request.start_point.lon,
                radius,
                &request.epochs,
                &request.interests,
            )
            .await?;

        pois.truncate(effective_max_waypoints(request.max_waypoints));

        if pois.is_empty() {
            return Err(AppError::NotFound("No POIs found matching criteria".to_string()));
        }

        Ok(pois)
    }

    async fn create_route(
        &self,
        request: &RouteRequest,
        pois: &[Poi],
        description: &str,
    ) -> AppResult<(Route, Vec<Waypoint>)> {
        let new_route = NewRoute {
            name: route_name(&request.epochs, &request.interests),
            description: description.to_string(),
            estimated_duration: request.duration_minutes,
            epochs: request.epochs.clone(),
            categories: request.interests.clone(),
        };

        let route = self.repositories.routes.create(new_route).await?;
        let poi_ids: Vec<Uuid> = pois.iter().map(|poi| poi.id).collect();
        let waypoints = self.repositories.routes.create_waypoints(route.id, &poi_ids).await?;

        log::info!("🗺️ Ruta '{}' ({}) creada con {} paradas", route.name, route.id, waypoints.len());

        Ok((route, waypoints))
    }
}

/// Una sola parada se entrega tal cual; varias se concatenan
async fn single_or_merged(files: &[PathBuf], audio_dir: &Path, route_id: Uuid) -> AppResult<PathBuf> {
    match files {
        [] => Err(AppError::NotFound("No audio files generated yet".to_string())),
        [single] => Ok(single.clone()),
        _ => {
            let output = audio_service::merged_audio_path(audio_dir, route_id);
            Ok(audio_service::merge_audio_files(files, &output).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_route_name() {
        assert_eq!(route_name(&tags(&["medieval"]), &tags(&["architecture"])), "Средневековая Москва: Архитектура");
        assert_eq!(route_name(&tags(&["soviet", "modern"]), &[]), "Советская Москва");
        assert_eq!(route_name(&[], &tags(&["art"])), "Экскурсия: Искусство");
        assert_eq!(route_name(&tags(&["baroque"]), &tags(&["food"])), "Экскурсия");
        assert_eq!(route_name(&[], &[]), "Экскурсия");
    }

    #[test]
    fn test_route_name_tags_are_case_sensitive() {
        assert_eq!(route_name(&tags(&["Medieval"]), &tags(&["Architecture"])), "Экскурсия");
        assert_eq!(route_name(&tags(&["medieval"]), &tags(&["ART"])), "Средневековая Москва");
    }

    #[test]
    fn test_effective_max_waypoints() {
        assert_eq!(effective_max_waypoints(0), 5);
        assert_eq!(effective_max_waypoints(-1), 5);
        assert_eq!(effective_max_waypoints(3), 3);
        assert_eq!(effective_max_waypoints(10), 10);
        assert_eq!(effective_max_waypoints(20), 5);
    }
}
