//! Catálogo inicial de POIs
//!
//! Lee un array JSON de POIs (mismo formato que `NewPoi`). La importación
//! solo ocurre si el almacén está vacío, ver `PoiService::seed_if_empty`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::models::NewPoi;

pub async fn load_catalog(path: &Path) -> Result<Vec<NewPoi>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read POI catalog {}", path.display()))?;

    let catalog: Vec<NewPoi> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid POI catalog {}", path.display()))?;

    log::debug!("📚 {} POIs leídos de {}", catalog.len(), path.display());
    Ok(catalog)
}
