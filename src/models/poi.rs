//! Modelo de POI (punto de interés)
//!
//! Un POI es un lugar con atributos descriptivos y geográficos fijos.
//! Se comparte entre rutas; una ruta nunca es dueña de sus POIs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Importancia asignada a los lugares propuestos por el cliente
pub const DEFAULT_IMPORTANCE: i32 = 5;

/// Época histórica - mapea al campo `epoch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Epoch {
    Medieval,
    Imperial,
    Soviet,
    Modern,
}

impl Epoch {
    pub const ALL: [Epoch; 4] = [Epoch::Medieval, Epoch::Imperial, Epoch::Soviet, Epoch::Modern];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|epoch| epoch.tag() == tag)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Epoch::Medieval => "medieval",
            Epoch::Imperial => "imperial",
            Epoch::Soviet => "soviet",
            Epoch::Modern => "modern",
        }
    }

    /// Adjetivo usado en el nombre de la ruta
    pub fn route_adjective(&self) -> &'static str {
        match self {
            Epoch::Medieval => "Средневековая",
            Epoch::Imperial => "Императорская",
            Epoch::Soviet => "Советская",
            Epoch::Modern => "Современная",
        }
    }

    /// Nombre de la época para el prompt de narración
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Epoch::Medieval => "средневековье",
            Epoch::Imperial => "имперский период",
            Epoch::Soviet => "советский период",
            Epoch::Modern => "современность",
        }
    }
}

/// Categoría temática - mapea al campo `category`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Architecture,
    History,
    Culture,
    Religion,
    Art,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Architecture,
        Category::History,
        Category::Culture,
        Category::Religion,
        Category::Art,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.tag() == tag)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Category::Architecture => "architecture",
            Category::History => "history",
            Category::Culture => "culture",
            Category::Religion => "religion",
            Category::Art => "art",
        }
    }

    /// Sustantivo usado en el nombre de la ruta
    pub fn route_noun(&self) -> &'static str {
        match self {
            Category::Architecture => "Архитектура",
            Category::History => "История",
            Category::Culture => "Культура",
            Category::Religion => "Религия",
            Category::Art => "Искусство",
        }
    }

    pub fn prompt_name(&self) -> &'static str {
        match self {
            Category::Architecture => "архитектура",
            Category::History => "история",
            Category::Culture => "культура",
            Category::Religion => "религия",
            Category::Art => "искусство",
        }
    }
}

/// POI principal - mapea exactamente a la tabla pois
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Poi {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub epoch: String,
    pub category: String,
    /// 1-10
    pub importance: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub photos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Json<serde_json::Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Poi {
    pub fn epoch_tag(&self) -> Option<Epoch> {
        Epoch::from_tag(&self.epoch)
    }

    pub fn category_tag(&self) -> Option<Category> {
        Category::from_tag(&self.category)
    }
}

fn default_importance() -> i32 {
    DEFAULT_IMPORTANCE
}

/// Datos para crear un POI (catálogo o lugar propuesto por el cliente)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPoi {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub epoch: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_importance")]
    pub importance: i32,
    #[serde(default)]
    pub year_built: Option<i32>,
    #[serde(default)]
    pub architect: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub wikipedia_url: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl NewPoi {
    /// Materializar el registro con identidad y timestamps nuevos
    pub fn into_poi(self) -> Poi {
        let now = Utc::now();
        Poi {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            latitude: self.latitude,
            longitude: self.longitude,
            epoch: self.epoch,
            category: self.category,
            importance: self.importance,
            year_built: self.year_built,
            architect: self.architect,
            style: self.style,
            photos: self.photos,
            wikipedia_url: self.wikipedia_url,
            metadata: self.metadata.map(Json),
            created_at: now,
            updated_at: now,
        }
    }
}
