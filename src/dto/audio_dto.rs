use std::io::{self, ErrorKind};
use std::path::Path;

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

// Archivo MP3 listo para enviar, leído por trozos desde disco
pub struct AudioFile {
    file: File,
    len: u64,
    /// Si está presente, se envía como descarga con este nombre
    pub download_name: Option<String>,
}

impl AudioFile {
    /// Abre el MP3; el handle sigue siendo válido aunque otro merge lo reemplace
    pub async fn open(path: &Path) -> AppResult<Self> {
        let file = File::open(path).await.map_err(|e| audio_io_error(path, e))?;
        let len = file.metadata().await.map_err(|e| audio_io_error(path, e))?.len();

        Ok(Self {
            file,
            len,
            download_name: None,
        })
    }

    /// Descarga `route_<8 primeros caracteres del id>.mp3`
    pub fn as_route_download(mut self, route_id: Uuid) -> Self {
        let id = route_id.to_string();
        self.download_name = Some(format!("route_{}.mp3", &id[..8]));
        self
    }

    pub fn size_bytes(&self) -> u64 {
        self.len
    }
}

fn audio_io_error(path: &Path, e: io::Error) -> AppError {
    match e.kind() {
        ErrorKind::NotFound => AppError::NotFound("Audio file not found".to_string()),
        _ => AppError::Internal(format!("failed to read {}: {}", path.display(), e)),
    }
}

impl IntoResponse for AudioFile {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(self.len));
        if let Some(name) = &self.download_name {
            match HeaderValue::from_str(&format!("attachment; filename={}", name)) {
                Ok(value) => {
                    headers.insert(header::CONTENT_DISPOSITION, value);
                }
                Err(e) => log::warn!("⚠️ Nombre de descarga inválido '{}': {}", name, e),
            }
        }

        let body = Body::from_stream(ReaderStream::new(self.file));
        (StatusCode::OK, headers, body).into_response()
    }
}

// Ninguna parada tiene audio todavía (404)
#[derive(Debug, Clone, Serialize)]
pub struct AudioNotReadyResponse {
    pub error: String,
    pub pending: Vec<String>,
    pub message: String,
}

impl AudioNotReadyResponse {
    pub fn new(pending: Vec<String>) -> Self {
        Self {
            error: "No audio files generated yet".to_string(),
            pending,
            message: "Audio is being generated. Please try again in 1-2 minutes".to_string(),
        }
    }
}

// Algunas paradas tienen audio (206)
#[derive(Debug, Clone, Serialize)]
pub struct AudioPartialResponse {
    pub error: String,
    pub ready: usize,
    pub total: usize,
    pub pending: Vec<String>,
    pub message: String,
}

impl AudioPartialResponse {
    pub fn new(ready: usize, total: usize, pending: Vec<String>) -> Self {
        Self {
            error: "Some audio files are not ready yet".to_string(),
            ready,
            total,
            pending,
            message: format!("Only {} of {} audio files are ready", ready, total),
        }
    }
}

// Respuesta de GET /api/routes/:route_id/audio
pub enum RouteAudioResponse {
    File(AudioFile),
    Partial(AudioPartialResponse),
    NotReady(AudioNotReadyResponse),
}

impl IntoResponse for RouteAudioResponse {
    fn into_response(self) -> Response {
        match self {
            RouteAudioResponse::File(file) => file.into_response(),
            RouteAudioResponse::Partial(body) => (StatusCode::PARTIAL_CONTENT, Json(body)).into_response(),
            RouteAudioResponse::NotReady(body) => (StatusCode::NOT_FOUND, Json(body)).into_response(),
        }
    }
}
