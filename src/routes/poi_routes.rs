use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::poi_controller::PoiController;
use crate::dto::poi_dto::PoiFilters;
use crate::models::Poi;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_poi_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pois))
        .route("/:poi_id", get(get_poi))
}

async fn list_pois(
    State(state): State<AppState>,
    Query(filters): Query<PoiFilters>,
) -> Result<Json<Vec<Poi>>, AppError> {
    let controller = PoiController::new(state.poi_service.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_poi(
    State(state): State<AppState>,
    Path(poi_id): Path<String>,
) -> Result<Json<Poi>, AppError> {
    let controller = PoiController::new(state.poi_service.clone());
    let response = controller.get_by_id(&poi_id).await?;
    Ok(Json(response))
}
