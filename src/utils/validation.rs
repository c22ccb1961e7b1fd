//! Utilidades de validación
//!
//! Helpers para convertir identificadores recibidos por la API.

use uuid::Uuid;
use validator::ValidationError;

use crate::utils::errors::{AppError, AppResult};

/// Validar y convertir string a UUID, nombrando el tipo de recurso en el error
pub fn parse_uuid(value: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", resource)))
}

/// Validar que un string no esté vacío
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validar coordenadas en grados decimales
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), ValidationError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        return Err(error);
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lon);
        return Err(error);
    }
    Ok(())
}
