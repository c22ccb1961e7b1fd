mod common;

use axum::body::Body;
use http::{header, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use audioguide_backend::build_router;

use common::*;

async fn send(ctx: &TestContext, request: Request<Body>) -> Response<Body> {
    build_router(ctx.state.clone()).oneshot(request).await.unwrap()
}

async fn get(ctx: &TestContext, uri: &str) -> Response<Body> {
    send(ctx, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(ctx: &TestContext, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(ctx, request).await
}

async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn generate_body() -> String {
    json!({
        "start_point": { "lat": RED_SQUARE.0, "lon": RED_SQUARE.1 },
        "duration_minutes": 60
    })
    .to_string()
}

#[tokio::test]
async fn test_health() {
    let ctx = setup();
    let response = get(&ctx, "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Audioguide API is running");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_list_pois_with_filters() {
    let ctx = setup();
    seed(
        &ctx.store,
        vec![
            new_poi("Парк Горького", 55.7304, 37.6012, 8, "soviet", "culture"),
            new_poi("МГУ", 55.7033, 37.5297, 10, "soviet", "architecture"),
            new_poi("Кремль", 55.7520, 37.6175, 10, "medieval", "history"),
        ],
    )
    .await;

    let body = body_json(get(&ctx, "/api/pois").await).await;
    let names: Vec<&str> = body.as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Кремль", "МГУ", "Парк Горького"]);

    let body = body_json(get(&ctx, "/api/pois?epoch=soviet").await).await;
    let names: Vec<&str> = body.as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["МГУ", "Парк Горького"]);

    let body = body_json(get(&ctx, "/api/pois?epoch=soviet&category=culture").await).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_poi() {
    let ctx = setup();
    let pois = seed(&ctx.store, vec![nearby_poi("Рядом", 1, 5)]).await;

    let response = get(&ctx, &format!("/api/pois/{}", pois[0].id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Рядом");

    let response = get(&ctx, &format!("/api/pois/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&ctx, "/api/pois/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid POI ID");
}

#[tokio::test]
async fn test_generate_rejects_invalid_bodies() {
    let ctx = setup();

    let response = post_json(&ctx, "/api/routes/generate", "{not json".to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(&ctx, "/api/routes/generate", json!({ "duration_minutes": 60 }).to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({
        "start_point": { "lat": RED_SQUARE.0, "lon": RED_SQUARE.1 },
        "duration_minutes": 5
    });
    let response = post_json(&ctx, "/api/routes/generate", body.to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_generate_and_fetch_route() {
    let ctx = setup();
    seed(&ctx.store, vec![nearby_poi("Первый", 1, 7), nearby_poi("Второй", 2, 5)]).await;

    let response = post_json(&ctx, "/api/routes/generate", generate_body()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["waypoints"].as_array().unwrap().len(), 2);
    assert_eq!(created["waypoints"][0]["name"], "Первый");
    assert_eq!(created["waypoints"][0]["order"], 1);

    let route_id = created["route_id"].as_str().unwrap();
    let response = get(&ctx, &format!("/api/routes/{}", route_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["route_id"], route_id);

    let response = get(&ctx, "/api/routes/oops").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid route ID");

    let response = get(&ctx, &format!("/api/routes/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_with_no_matches_is_not_found() {
    let ctx = setup();

    let response = post_json(&ctx, "/api/routes/generate", generate_body()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "No POIs found matching criteria");
}

#[tokio::test]
async fn test_route_audio_pending_and_partial() {
    let ctx = setup_with(ScriptedGenerator::failing_for(&["Первый", "Второй"]), EchoSpeech::default());
    seed(&ctx.store, vec![nearby_poi("Первый", 1, 7), nearby_poi("Второй", 2, 5)]).await;

    let created = body_json(post_json(&ctx, "/api/routes/generate", generate_body()).await).await;
    let route_id = created["route_id"].as_str().unwrap().to_string();
    settle().await;

    let response = get(&ctx, &format!("/api/routes/{}/audio", route_id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No audio files generated yet");
    assert_eq!(body["pending"], json!(["Первый", "Второй"]));

    attach_audio(&ctx, created["waypoints"][0]["id"].as_str().unwrap(), b"abc").await;

    let response = get(&ctx, &format!("/api/routes/{}/audio", route_id)).await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Some audio files are not ready yet");
    assert_eq!(body["ready"], 1);
    assert_eq!(body["total"], 2);
    assert_eq!(body["pending"], json!(["Второй"]));
    assert_eq!(body["message"], "Only 1 of 2 audio files are ready");

    attach_audio(&ctx, created["waypoints"][1]["id"].as_str().unwrap(), b"def").await;

    let response = get(&ctx, &format!("/api/routes/{}/audio", route_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!("attachment; filename=route_{}.mp3", &route_id[..8]).as_str()
    );
    assert_eq!(body_bytes(response).await, b"abcdef".to_vec());
}

#[tokio::test]
async fn test_generate_audio_downloads_mp3() {
    let ctx = setup();
    seed(&ctx.store, vec![nearby_poi("Первый", 1, 7), nearby_poi("Второй", 2, 5)]).await;

    let response = post_json(&ctx, "/api/routes/generate-audio", generate_body()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=route_"));

    let audio = String::from_utf8(body_bytes(response).await).unwrap();
    let first = audio.find("Первый").unwrap();
    let second = audio.find("Второй").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn test_generate_audio_failure_names_stop() {
    let ctx = setup_with(ScriptedGenerator::failing_for(&["Второй"]), EchoSpeech::default());
    seed(&ctx.store, vec![nearby_poi("Первый", 1, 7), nearby_poi("Второй", 2, 5)]).await;

    let response = post_json(&ctx, "/api/routes/generate-audio", generate_body()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["details"]["stop"], "Второй");
    assert_eq!(body["details"]["stage"], "narration");
}

#[tokio::test]
async fn test_waypoint_audio() {
    let ctx = setup_with(ScriptedGenerator::failing_for(&["Первый"]), EchoSpeech::default());
    seed(&ctx.store, vec![nearby_poi("Первый", 1, 7)]).await;

    let created = body_json(post_json(&ctx, "/api/routes/generate", generate_body()).await).await;
    let waypoint_id = created["waypoints"][0]["id"].as_str().unwrap().to_string();
    settle().await;

    let response = get(&ctx, &format!("/api/audio/{}", waypoint_id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    attach_audio(&ctx, &waypoint_id, b"mp3-bytes").await;

    let response = get(&ctx, &format!("/api/audio/{}", waypoint_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(body_bytes(response).await, b"mp3-bytes".to_vec());

    let response = get(&ctx, "/api/audio/bad-id").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
