//! Servicio de generación de narración
//!
//! Construye el prompt a partir de los atributos del POI, lo enriquece
//! (opcionalmente) con pasajes de búsqueda web y delega la generación en
//! un `TextGenerator`.

use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::models::Poi;

/// Máximo de pasajes de búsqueda que se incorporan al prompt
pub const MAX_PASSAGES: usize = 3;

pub const SYSTEM_PROMPT: &str = "Ты - профессиональный экскурсовод с отличным знанием истории и умением увлекательно рассказывать. Твои рассказы точны, интересны и без ошибок. Ты специализируешься на истории Москвы и России.";

const NARRATION_REQUIREMENTS: &str = "Требования к рассказу:
- Длина: 2-3 минуты чтения (300-400 слов)
- Стиль: живой, увлекательный, но точный
- Включи интересные факты и легенды
- Без речевых ошибок и анахронизмов
- Используй яркие образы и эмоции
- Обращайся к слушателю на \"вы\"
- Начни с интригующей фразы
- Закончи призывом обратить внимание на детали

Формат: Чистый текст без заголовков и разметки.";

lazy_static! {
    static ref PASSAGE_RE: Regex = Regex::new(r"(?s)<passage>(.*?)</passage>").unwrap();
}

/// Errores de los colaboradores de texto (LLM y búsqueda)
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{0} not set")]
    MissingCredentials(&'static str),

    #[error("failed to call {service}: {source}")]
    Transport {
        service: &'static str,
        source: reqwest::Error,
    },

    #[error("{service} error (status {status}): {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to decode {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    #[error("no alternatives in response")]
    EmptyResult,
}

/// Servicio externo de generación de texto (par system + user)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ContentError>;
}

/// Servicio externo de búsqueda web; devuelve la respuesta cruda
#[async_trait]
pub trait PassageSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, ContentError>;
}

pub struct ContentService {
    generator: Arc<dyn TextGenerator>,
    search: Option<Arc<dyn PassageSearch>>,
}

impl ContentService {
    pub fn new(generator: Arc<dyn TextGenerator>, search: Option<Arc<dyn PassageSearch>>) -> Self {
        Self { generator, search }
    }

    /// Genera la narración de un lugar
    pub async fn generate_description(&self, poi: &Poi) -> Result<String, ContentError> {
        let additional_info = self.search_for_poi(poi).await.unwrap_or_default();
        let prompt = build_prompt(poi, &additional_info);

        let text = self.generator.complete(SYSTEM_PROMPT, &prompt).await?;
        if text.trim().is_empty() {
            return Err(ContentError::EmptyResult);
        }

        Ok(text)
    }

    /// Enriquecimiento best-effort: cualquier fallo se ignora
    async fn search_for_poi(&self, poi: &Poi) -> Option<String> {
        let search = self.search.as_ref()?;
        let query = search_query(poi);

        match search.search(&query).await {
            Ok(raw) => {
                let passages = extract_passages(&raw);
                if passages.is_empty() {
                    return None;
                }
                let joined = passages
                    .into_iter()
                    .take(MAX_PASSAGES)
                    .collect::<Vec<_>>()
                    .join(" ");
                Some(joined)
            }
            Err(e) => {
                log::debug!("🔎 Búsqueda sin resultados para '{}': {}", poi.name, e);
                None
            }
        }
    }
}

pub fn search_query(poi: &Poi) -> String {
    format!("{} Москва история", poi.name)
}

/// Extrae los textos entre `<passage>` y `</passage>`, sin marcado `<hlword>`
pub fn extract_passages(raw: &str) -> Vec<String> {
    PASSAGE_RE
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .replace("<hlword>", "")
                .replace("</hlword>", "")
                .trim()
                .to_string()
        })
        .filter(|p| !p.is_empty())
        .collect()
}

/// Prompt de usuario para la narración de un POI
pub fn build_prompt(poi: &Poi, additional_info: &str) -> String {
    let epoch = poi.epoch_tag().map(|e| e.prompt_name()).unwrap_or("");
    let category = poi.category_tag().map(|c| c.prompt_name()).unwrap_or("");

    let mut prompt = format!(
        "Создай увлекательный рассказ для аудиогида о следующем месте:\n\nНазвание: {}\nОписание: {}\nЭпоха: {}\nКатегория: {}",
        poi.name, poi.description, epoch, category
    );

    if let Some(year) = poi.year_built.filter(|y| *y > 0) {
        prompt.push_str(&format!("\nГод постройки: {}", year));
    }
    if let Some(architect) = poi.architect.as_deref().filter(|a| !a.is_empty()) {
        prompt.push_str(&format!("\nАрхитектор: {}", architect));
    }
    if let Some(style) = poi.style.as_deref().filter(|s| !s.is_empty()) {
        prompt.push_str(&format!("\nСтиль: {}", style));
    }
    if !additional_info.is_empty() {
        prompt.push_str(&format!(
            "\n\nДополнительная информация из интернета:\n{}",
            additional_info
        ));
    }

    prompt.push_str("\n\n");
    prompt.push_str(NARRATION_REQUIREMENTS);
    prompt
}
