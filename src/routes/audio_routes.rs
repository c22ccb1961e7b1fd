use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use crate::controllers::audio_controller::AudioController;
use crate::dto::audio_dto::AudioFile;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_audio_router() -> Router<AppState> {
    Router::new().route("/:waypoint_id", get(get_waypoint_audio))
}

async fn get_waypoint_audio(
    State(state): State<AppState>,
    Path(waypoint_id): Path<String>,
) -> Result<AudioFile, AppError> {
    let controller = AudioController::new(state.route_service.clone());
    controller.waypoint_audio(&waypoint_id).await
}
