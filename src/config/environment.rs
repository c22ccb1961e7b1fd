//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_GPT_URL: &str = "https://llm.api.cloud.yandex.net/foundationModels/v1/completion";
pub const DEFAULT_TTS_URL: &str = "https://tts.api.cloud.yandex.net/speech/v1/tts:synthesize";
pub const DEFAULT_SEARCH_URL: &str = "https://yandex.ru/search/xml";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: Option<String>,
    pub cors_origins: Vec<String>,
    /// Directorio donde se guardan los MP3 generados
    pub audio_dir: PathBuf,
    pub poi_catalog_path: Option<PathBuf>,
    // Yandex Cloud
    pub yandex_api_key: Option<String>,
    pub yandex_folder_id: String,
    pub yandex_voice: String,
    pub yandex_search_user: Option<String>,
    pub yandex_search_key: Option<String>,
    pub yandex_gpt_url: String,
    pub yandex_tts_url: String,
    pub yandex_search_url: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8080,
            host: "0.0.0.0".to_string(),
            database_url: None,
            cors_origins: Vec::new(),
            audio_dir: PathBuf::from("./audio"),
            poi_catalog_path: None,
            yandex_api_key: None,
            yandex_folder_id: String::new(),
            yandex_voice: "alena".to_string(),
            yandex_search_user: None,
            yandex_search_key: None,
            yandex_gpt_url: DEFAULT_GPT_URL.to_string(),
            yandex_tts_url: DEFAULT_TTS_URL.to_string(),
            yandex_search_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Construir la configuración a partir de las variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match optional_var("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow!("PORT must be a valid number, got '{}'", port))?,
            None => defaults.port,
        };

        Ok(Self {
            environment: optional_var("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: optional_var("HOST").unwrap_or(defaults.host),
            database_url: optional_var("DATABASE_URL"),
            cors_origins: optional_var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            audio_dir: optional_var("AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.audio_dir),
            poi_catalog_path: optional_var("POI_CATALOG_PATH").map(PathBuf::from),
            yandex_api_key: optional_var("YANDEX_API_KEY"),
            yandex_folder_id: optional_var("YANDEX_FOLDER_ID").unwrap_or_default(),
            yandex_voice: optional_var("YANDEX_VOICE").unwrap_or(defaults.yandex_voice),
            yandex_search_user: optional_var("YANDEX_SEARCH_USER"),
            yandex_search_key: optional_var("YANDEX_SEARCH_KEY"),
            yandex_gpt_url: optional_var("YANDEX_GPT_URL").unwrap_or(defaults.yandex_gpt_url),
            yandex_tts_url: optional_var("YANDEX_TTS_URL").unwrap_or(defaults.yandex_tts_url),
            yandex_search_url: optional_var("YANDEX_SEARCH_URL")
                .unwrap_or(defaults.yandex_search_url),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// La búsqueda web solo se activa con usuario y clave
    pub fn search_enabled(&self) -> bool {
        self.yandex_search_user.is_some() && self.yandex_search_key.is_some()
    }
}

/// Variable de entorno opcional; las vacías cuentan como ausentes
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
