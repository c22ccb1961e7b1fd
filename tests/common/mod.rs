#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tempfile::TempDir;
use uuid::Uuid;

use audioguide_backend::config::EnvironmentConfig;
use audioguide_backend::dto::route_dto::RouteRequest;
use audioguide_backend::models::{Content, NewContent, NewPoi, Poi};
use audioguide_backend::repositories::{ContentRepository, InMemoryStore, PoiRepository, Repositories};
use audioguide_backend::services::content_service::{ContentError, TextGenerator};
use audioguide_backend::services::tts_service::{SpeechBackend, SpeechError};
use audioguide_backend::services::RouteAudio;
use audioguide_backend::state::AppState;

pub const RED_SQUARE: (f64, f64) = (55.7539, 37.6208);

/// Devuelve una narración fija; falla para los lugares de `fail_for`
#[derive(Default)]
pub struct ScriptedGenerator {
    pub fail_for: Vec<String>,
}

impl ScriptedGenerator {
    pub fn failing_for(names: &[&str]) -> Self {
        Self {
            fail_for: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, ContentError> {
        let name = user_prompt
            .lines()
            .find_map(|line| line.strip_prefix("Название: "))
            .unwrap_or_default()
            .to_string();

        if self.fail_for.contains(&name) {
            return Err(ContentError::EmptyResult);
        }

        Ok(format!("Представьте себе {}. Обратите внимание на детали.", name))
    }
}

/// "Sintetiza" devolviendo los bytes del texto
#[derive(Default)]
pub struct EchoSpeech {
    pub fail: bool,
}

#[async_trait]
impl SpeechBackend for EchoSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        if self.fail {
            return Err(SpeechError::MissingCredentials("YANDEX_API_KEY"));
        }
        Ok(text.as_bytes().to_vec())
    }
}

pub struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub state: AppState,
    pub audio_dir: TempDir,
}

pub fn setup_with(generator: ScriptedGenerator, speech: EchoSpeech) -> TestContext {
    let audio_dir = tempfile::tempdir().unwrap();
    let store = Arc::new(InMemoryStore::new());
    let config = EnvironmentConfig {
        audio_dir: audio_dir.path().to_path_buf(),
        ..EnvironmentConfig::default()
    };

    let state = AppState::new(
        config,
        Repositories::from_store(store.clone()),
        Arc::new(generator),
        None,
        Arc::new(speech),
    );

    TestContext { store, state, audio_dir }
}

pub fn setup() -> TestContext {
    setup_with(ScriptedGenerator::default(), EchoSpeech::default())
}

pub fn new_poi(name: &str, lat: f64, lon: f64, importance: i32, epoch: &str, category: &str) -> NewPoi {
    NewPoi {
        name: name.to_string(),
        description: format!("Описание: {}", name),
        latitude: lat,
        longitude: lon,
        epoch: epoch.to_string(),
        category: category.to_string(),
        importance,
        year_built: None,
        architect: None,
        style: None,
        photos: vec![format!("https://example.com/{}.jpg", importance)],
        wikipedia_url: None,
        metadata: None,
    }
}

/// POI a unos `index * 100` metros al norte de la Plaza Roja
pub fn nearby_poi(name: &str, index: usize, importance: i32) -> NewPoi {
    new_poi(
        name,
        RED_SQUARE.0 + 0.0009 * index as f64,
        RED_SQUARE.1,
        importance,
        "soviet",
        "architecture",
    )
}

pub async fn seed(store: &InMemoryStore, pois: Vec<NewPoi>) -> Vec<Poi> {
    let mut created = Vec::new();
    for poi in pois {
        created.push(PoiRepository::create(store, poi).await.unwrap());
    }
    created
}

pub fn route_request(body: Value) -> RouteRequest {
    serde_json::from_value(body).unwrap()
}

/// Guarda un MP3 de prueba y su contenido para un waypoint
pub async fn attach_audio(ctx: &TestContext, waypoint_id: &str, bytes: &[u8]) -> Content {
    let waypoint_id = Uuid::parse_str(waypoint_id).unwrap();
    let path: PathBuf = ctx.audio_dir.path().join(format!("{}.mp3", waypoint_id));
    tokio::fs::write(&path, bytes).await.unwrap();

    let content = NewContent {
        waypoint_id,
        text: "текст".to_string(),
        audio_url: format!("/api/audio/{}", waypoint_id),
        audio_path: path.display().to_string(),
        duration: 1,
        photos: vec![],
    };
    ContentRepository::create(ctx.store.as_ref(), content).await.unwrap()
}

/// Consulta el audio de la ruta hasta que `done` se cumpla o se agote el tiempo
pub async fn poll_route_audio<F>(ctx: &TestContext, route_id: Uuid, done: F) -> Vec<RouteAudio>
where
    F: Fn(&RouteAudio) -> bool,
{
    let mut seen = Vec::new();
    for _ in 0..200 {
        let audio = ctx.state.route_service.route_audio(route_id).await.unwrap();
        let finished = done(&audio);
        seen.push(audio);
        if finished {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    seen
}

/// Espera a que la tarea en segundo plano haya terminado de recorrer las paradas
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
