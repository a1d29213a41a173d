use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;
use wellness_api::routes;
use wellness_api::state::AppState;

fn app() -> Router {
    routes::router(AppState::detached())
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, request).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_reports_service_and_configuration() {
    let (status, body) = get(app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "wellness-api");
    assert_eq!(body["openai_configured"], false);
    assert!(body["endpoints"].as_array().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn health_score_returns_composite_and_breakdown() {
    let payload = json!({
        "biometricData": {
            "sleep": {"hours": 8, "quality": 10},
            "energy": 10,
            "stress": 0,
            "mood": 10,
            "physicalActivity": 6
        }
    });
    let (status, body) = post_json(app(), "/api/ai/health-score", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overall"], 100);
    assert_eq!(body["trend"], "excellent");
    assert_eq!(body["breakdown"]["activity"], 100);
}

#[tokio::test]
async fn health_score_defaults_missing_fields() {
    let (status, body) = post_json(app(), "/api/ai/health-score", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overall"], 61);
    assert_eq!(body["trend"], "good");
}

#[tokio::test]
async fn recommendations_fire_every_branch_on_a_bad_day() {
    let payload = json!({
        "biometricData": {
            "sleep": {"quality": 5},
            "energy": 3,
            "stress": 8,
            "physicalActivity": 1
        }
    });
    let (status, body) = post_json(app(), "/api/ai/recommendations", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priority"], "high");
    assert_eq!(body["timeframe"], "immediate");
    let actions = body["actions"].as_str().expect("actions");
    assert!(actions.contains("routine del sonno"));
    assert!(actions.contains("pause attive"));
    assert!(actions.contains("rilassamento"));
    assert!(actions.contains("attività fisica"));
}

#[tokio::test]
async fn recommendations_default_to_maintain_habits() {
    let payload = json!({
        "biometricData": {
            "sleep": {"quality": 9},
            "energy": 9,
            "stress": 2,
            "physicalActivity": 6
        }
    });
    let (status, body) = post_json(app(), "/api/ai/recommendations", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["actions"], "Mantieni le tue abitudini attuali.");
    assert_eq!(body["tips"], "Continua così!");
    assert_eq!(body["priority"], "medium");
}

#[tokio::test]
async fn predictions_cover_the_horizon_with_bounded_scores() {
    let (status, body) = post_json(app(), "/api/ai/predict-biometrics", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let predictions = body["predictions"].as_array().expect("predictions");
    assert_eq!(predictions.len(), 12);
    for (i, p) in predictions.iter().enumerate() {
        assert_eq!(p["timeframe"], format!("{}h", i + 1));
        let score = p["vitalityScore"].as_u64().expect("score");
        assert!((20..=100).contains(&score));
        let dipped = p["risks"]
            .as_array()
            .is_some_and(|r| r.iter().any(|v| v == "energy_dip"));
        assert_eq!(dipped, score < 50);
    }
    assert!(body["alerts"].is_array());
}

#[tokio::test]
async fn prediction_horizon_is_adjustable_and_capped() {
    let (_, body) = post_json(
        app(),
        "/api/ai/predict-biometrics",
        json!({"horizonHours": 3}),
    )
    .await;
    assert_eq!(body["predictions"].as_array().expect("predictions").len(), 3);

    let (_, body) = post_json(
        app(),
        "/api/ai/predict-biometrics",
        json!({"horizonHours": 500}),
    )
    .await;
    assert_eq!(body["predictions"].as_array().expect("predictions").len(), 72);
}

#[tokio::test]
async fn analysis_without_a_completion_client_serves_the_fallback() {
    let payload = json!({
        "biometricData": {
            "sleep": {"hours": 7, "quality": 7},
            "energy": 6,
            "stress": 5,
            "mood": 7
        },
        "userGoal": {"description": "Dormire meglio"}
    });
    let (status, body) = post_json(app(), "/api/ai/health-analysis", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 62);
    assert!(body["prediction"].as_str().is_some());
    assert!(body["motivation"].as_str().expect("motivation").contains("Dormire meglio"));
    assert!(body["action"].as_str().is_some());
    assert!(body["extraTip"].as_str().is_some());
}

#[tokio::test]
async fn coach_chat_without_a_completion_client_routes_keywords() {
    let payload = json!({
        "message": "Oggi ho poca energia",
        "biometricData": {"energy": 4}
    });
    let (status, body) = post_json(app(), "/api/ai/coach-chat", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["response"].as_str().expect("response").contains("energia"));
    assert!(body["energyAnalysis"].as_str().is_some());
    assert!(body["stressActions"].as_str().is_some());
    assert!(body["score"].as_u64().is_some());
}

#[tokio::test]
async fn terra_snapshot_without_credentials_is_unavailable() {
    let (status, body) = get(app(), "/api/terra/users/u1/snapshot").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().expect("error").contains("terra"));
}

#[tokio::test]
async fn unknown_routes_list_available_endpoints() {
    let (status, body) = get(app(), "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "endpoint not found");
    assert!(body["available_endpoints"].as_array().is_some());
}
