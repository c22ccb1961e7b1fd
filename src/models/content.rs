//! Modelo de Content
//!
//! Texto narrado + audio de una parada. Se crea después del waypoint
//! y nunca se borra ni se desmarca.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Content - mapea a la tabla contents (uno por waypoint como máximo)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Content {
    pub id: Uuid,
    pub waypoint_id: Uuid,
    pub text: String,
    pub audio_url: String,
    pub audio_path: String,
    /// Segundos estimados
    pub duration: i32,
    pub photos: Vec<String>,
    pub generated: bool,
    pub created_at: DateTime<Utc>,
}

impl Content {
    pub fn has_audio(&self) -> bool {
        !self.audio_path.is_empty()
    }
}

/// Datos para crear un contenido
#[derive(Debug, Clone)]
pub struct NewContent {
    pub waypoint_id: Uuid,
    pub text: String,
    pub audio_url: String,
    pub audio_path: String,
    pub duration: i32,
    pub photos: Vec<String>,
}

impl NewContent {
    pub fn into_content(self) -> Content {
        Content {
            id: Uuid::new_v4(),
            waypoint_id: self.waypoint_id,
            text: self.text,
            audio_url: self.audio_url,
            audio_path: self.audio_path,
            duration: self.duration,
            photos: self.photos,
            generated: true,
            created_at: Utc::now(),
        }
    }
}

/// URL pública del audio de una parada
pub fn audio_url_for(waypoint_id: Uuid) -> String {
    format!("/api/audio/{}", waypoint_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_with_path(path: &str) -> Content {
        NewContent {
            waypoint_id: Uuid::new_v4(),
            text: "Текст".into(),
            audio_url: String::new(),
            audio_path: path.into(),
            duration: 10,
            photos: vec![],
        }
        .into_content()
    }

    #[test]
    fn test_has_audio_requires_path() {
        assert!(content_with_path("./audio/a.mp3").has_audio());
        assert!(!content_with_path("").has_audio());
    }

    #[test]
    fn test_new_content_is_marked_generated() {
        assert!(content_with_path("x").generated);
    }

    #[test]
    fn test_audio_url_for() {
        let id = Uuid::new_v4();
        assert_eq!(audio_url_for(id), format!("/api/audio/{}", id));
    }
}
