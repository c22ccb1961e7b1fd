//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use reqwest::Client;

use crate::clients::{SpeechKitClient, YandexGptClient, YandexSearchClient};
use crate::config::environment::EnvironmentConfig;
use crate::repositories::Repositories;
use crate::services::{ContentService, PassageSearch, PoiService, RouteService, SpeechBackend, TextGenerator, TtsService};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub poi_service: Arc<PoiService>,
    pub route_service: Arc<RouteService>,
}

impl AppState {
    /// Estado con colaboradores explícitos (tests y arranque)
    pub fn new(
        config: EnvironmentConfig,
        repositories: Repositories,
        generator: Arc<dyn TextGenerator>,
        search: Option<Arc<dyn PassageSearch>>,
        speech: Arc<dyn SpeechBackend>,
    ) -> Self {
        let content_service = Arc::new(ContentService::new(generator, search));
        let tts_service = Arc::new(TtsService::new(speech, config.audio_dir.clone()));

        Self {
            poi_service: Arc::new(PoiService::new(repositories.pois.clone())),
            route_service: Arc::new(RouteService::new(repositories, content_service, tts_service)),
            config,
        }
    }

    /// Estado de producción con los clientes de Yandex Cloud
    pub fn with_yandex(config: EnvironmentConfig, repositories: Repositories) -> Self {
        let http_client = Client::new();

        let generator: Arc<dyn TextGenerator> = Arc::new(YandexGptClient::new(http_client.clone(), &config));
        let speech: Arc<dyn SpeechBackend> = Arc::new(SpeechKitClient::new(http_client.clone(), &config));
        let search = YandexSearchClient::from_config(http_client, &config)
            .map(|client| Arc::new(client) as Arc<dyn PassageSearch>);

        if !config.search_enabled() {
            log::info!("🔎 Búsqueda web desactivada (faltan YANDEX_SEARCH_USER / YANDEX_SEARCH_KEY)");
        }
        if config.yandex_api_key.is_none() {
            log::warn!("⚠️ YANDEX_API_KEY no configurada: la generación de contenido fallará");
        }

        Self::new(config, repositories, generator, search, speech)
    }
}
