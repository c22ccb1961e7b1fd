use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::route_controller::RouteController;
use crate::dto::audio_dto::{AudioFile, RouteAudioResponse};
use crate::dto::route_dto::{RouteRequest, RouteResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_route))
        .route("/generate-audio", post(generate_route_with_audio))
        .route("/:route_id", get(get_route))
        .route("/:route_id/audio", get(get_route_audio))
}

async fn generate_route(
    State(state): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteResponse>, AppError> {
    let Json(request) = payload?;
    let controller = RouteController::new(state.route_service.clone());
    let response = controller.generate(request).await?;
    Ok(Json(response))
}

async fn generate_route_with_audio(
    State(state): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<AudioFile, AppError> {
    let Json(request) = payload?;
    let controller = RouteController::new(state.route_service.clone());
    controller.generate_with_audio(request).await
}

async fn get_route(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> Result<Json<RouteResponse>, AppError> {
    let controller = RouteController::new(state.route_service.clone());
    let response = controller.get_by_id(&route_id).await?;
    Ok(Json(response))
}

async fn get_route_audio(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> Result<RouteAudioResponse, AppError> {
    let controller = RouteController::new(state.route_service.clone());
    controller.audio(&route_id).await
}
