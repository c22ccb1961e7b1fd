//! Servicio de síntesis de voz
//!
//! Convierte la narración en MP3 mediante un `SpeechBackend`, guarda el
//! archivo en el directorio de audio y estima la duración hablada.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Palabras por minuto asumidas para la estimación
pub const WORDS_PER_MINUTE: usize = 150;

/// Caracteres (bytes) por palabra asumidos para la estimación
pub const BYTES_PER_WORD: usize = 5;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("{0} not set")]
    MissingCredentials(&'static str),

    #[error("failed to call speech service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("speech service error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("failed to write audio file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Servicio externo de síntesis: texto -> bytes MP3
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}

/// Audio persistido de una parada
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAudio {
    pub path: PathBuf,
    pub duration_seconds: i32,
}

pub struct TtsService {
    backend: Arc<dyn SpeechBackend>,
    audio_dir: PathBuf,
}

impl TtsService {
    pub fn new(backend: Arc<dyn SpeechBackend>, audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            audio_dir: audio_dir.into(),
        }
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Sintetiza `text` y lo guarda como `<audio_dir>/<filename>.mp3`
    pub async fn generate_audio(&self, text: &str, filename: &str) -> Result<SynthesizedAudio, SpeechError> {
        let audio = self.backend.synthesize(text).await?;

        tokio::fs::create_dir_all(&self.audio_dir)
            .await
            .map_err(|source| SpeechError::Io {
                path: self.audio_dir.display().to_string(),
                source,
            })?;

        let path = self.audio_dir.join(format!("{}.mp3", filename));
        tokio::fs::write(&path, &audio)
            .await
            .map_err(|source| SpeechError::Io {
                path: path.display().to_string(),
                source,
            })?;

        log::debug!("🔊 Audio guardado en {} ({} bytes)", path.display(), audio.len());

        Ok(SynthesizedAudio {
            path,
            duration_seconds: estimate_duration_seconds(text),
        })
    }
}

/// Estimación aproximada: `palabras ≈ bytes / 5`, a 150 palabras por minuto
pub fn estimate_duration_seconds(text: &str) -> i32 {
    let words = text.len() / BYTES_PER_WORD;
    (words * 60 / WORDS_PER_MINUTE) as i32
}
