use serde::Deserialize;

use crate::utils::validation::is_blank;

// Filtros para el listado de POIs
#[derive(Debug, Default, Deserialize)]
pub struct PoiFilters {
    pub epoch: Option<String>,
    pub category: Option<String>,
}

impl PoiFilters {
    pub fn epoch(&self) -> Option<&str> {
        self.epoch.as_deref().filter(|e| !is_blank(e))
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !is_blank(c))
    }
}
