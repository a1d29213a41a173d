//! HTTP surface: one axum router, JSON in, JSON out.
//!
//! Every analysis handler follows the same shape: normalize the snapshot,
//! try the text-generation collaborator when one is configured, fall back to
//! the deterministic engine output when the call or the structured parse
//! fails. Parse failure is routine here, not exceptional.

use std::time::Duration;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use chrono::{Local, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use crate::engine::snapshot::{BiometricInput, Goal, Snapshot};
use crate::engine::{
    fallback_analysis, fallback_coach_reply, fallback_score, predict_vitality, primary_score,
    recommend,
};
use crate::error::{ApiError, ApiResult};
use crate::prompts;
use crate::state::AppState;
use crate::terra_adapter;
use terra_client::WebhookPayload;
use terra_client::webhook::verify_signature;

const SERVICE_NAME: &str = "wellness-api";
const DEFAULT_HORIZON_HOURS: u32 = 12;
const MAX_HORIZON_HOURS: u32 = 72;

const ENDPOINTS: &[&str] = &[
    "GET /api/health",
    "POST /api/ai/health-analysis",
    "POST /api/ai/coach-chat",
    "POST /api/ai/health-score",
    "POST /api/ai/recommendations",
    "POST /api/ai/predict-biometrics",
    "POST /api/terra/webhook",
    "GET /api/terra/users/{user_id}/snapshot",
];

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/ai/health-analysis", post(health_analysis))
        .route("/api/ai/coach-chat", post(coach_chat))
        .route("/api/ai/health-score", post(health_score))
        .route("/api/ai/recommendations", post(recommendations))
        .route("/api/ai/predict-biometrics", post(predict_biometrics))
        .route("/api/terra/webhook", post(terra_webhook))
        .route("/api/terra/users/{user_id}/snapshot", get(terra_snapshot))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AnalysisRequest {
    biometric_data: BiometricInput,
    user_goal: Goal,
    query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CoachRequest {
    message: String,
    biometric_data: BiometricInput,
    user_goal: Goal,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ScoreRequest {
    biometric_data: BiometricInput,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PredictRequest {
    biometric_data: BiometricInput,
    horizon_hours: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct HistoryQuery {
    days_back: Option<u32>,
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "timestamp": Utc::now().to_rfc3339(),
        "openai_configured": state.llm.is_some(),
        "endpoints": ENDPOINTS,
    }))
}

/// Run the completion flow; `None` means "use the fallback".
async fn run_completion(state: &AppState, prompt: &str, max_tokens: u32) -> Option<Value> {
    let llm = state.llm.as_ref()?;
    match llm.complete(prompt, max_tokens).await {
        Ok(text) => {
            let parsed = crate::llm::extract_json(&text);
            if parsed.is_none() {
                tracing::debug!("completion output failed structured parse, using fallback");
            }
            parsed
        }
        Err(e) => {
            tracing::warn!(error = %e, "completion request failed, using fallback");
            None
        }
    }
}

async fn health_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> ApiResult<Json<Value>> {
    let snapshot = Snapshot::normalize(&req.biometric_data);
    let prompt = prompts::health_analysis_prompt(&snapshot, &req.user_goal, req.query.as_deref());

    let body = match run_completion(&state, &prompt, 1000).await {
        Some(mut value) => {
            // The model occasionally forgets the numeric score; backfill it
            // so the client contract holds.
            if value.get("score").and_then(Value::as_u64).is_none() {
                value["score"] = json!(fallback_score(&snapshot));
            }
            value
        }
        None => to_json(&fallback_analysis(&snapshot, &req.user_goal))?,
    };
    Ok(Json(body))
}

async fn coach_chat(
    State(state): State<AppState>,
    Json(req): Json<CoachRequest>,
) -> ApiResult<Json<Value>> {
    let snapshot = Snapshot::normalize(&req.biometric_data);
    let prompt = prompts::coach_chat_prompt(&req.message, &snapshot, &req.user_goal);

    let body = match run_completion(&state, &prompt, 1500).await {
        Some(mut value) => {
            if value.get("score").and_then(Value::as_u64).is_none() {
                value["score"] = json!(fallback_score(&snapshot));
            }
            value
        }
        None => to_json(&fallback_coach_reply(&req.message, &snapshot, &req.user_goal))?,
    };
    Ok(Json(body))
}

async fn health_score(Json(req): Json<ScoreRequest>) -> ApiResult<Json<Value>> {
    let snapshot = Snapshot::normalize(&req.biometric_data);
    Ok(Json(to_json(&primary_score(&snapshot))?))
}

async fn recommendations(Json(req): Json<ScoreRequest>) -> ApiResult<Json<Value>> {
    let snapshot = Snapshot::normalize(&req.biometric_data);
    Ok(Json(to_json(&recommend(&snapshot))?))
}

async fn predict_biometrics(Json(req): Json<PredictRequest>) -> ApiResult<Json<Value>> {
    let snapshot = Snapshot::normalize(&req.biometric_data);
    let horizon = req
        .horizon_hours
        .unwrap_or(DEFAULT_HORIZON_HOURS)
        .min(MAX_HORIZON_HOURS);
    let forecast = predict_vitality(&snapshot, horizon, Local::now().naive_local());
    Ok(Json(to_json(&forecast)?))
}

async fn terra_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    if let Some(secret) = &state.signing_secret {
        let signature = headers
            .get("terra-signature")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing terra-signature header".into()))?;
        if !verify_signature(secret, &body, signature) {
            metrics::counter!("terra_webhooks_total", "outcome" => "rejected").increment(1);
            return Err(ApiError::Unauthorized("webhook signature mismatch".into()));
        }
    } else {
        tracing::warn!("no signing secret configured, accepting webhook without verification");
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("invalid webhook payload: {e}")))?;

    let id = webhook_event_id(&payload);
    if state.dedupe.is_duplicate(&id).await {
        metrics::counter!("terra_webhooks_total", "outcome" => "duplicate").increment(1);
        return Ok(Json(json!({ "ok": true, "duplicate": true })));
    }
    metrics::counter!("terra_webhooks_total", "outcome" => "accepted").increment(1);

    let input = terra_adapter::snapshot_from_webhook(&payload);
    let snapshot = Snapshot::normalize(&input);
    let goal = Goal {
        description: Some("Migliorare il benessere generale".into()),
        category: Some("energy".into()),
    };

    let prompt = prompts::health_analysis_prompt(&snapshot, &goal, None);
    let analysis = match run_completion(&state, &prompt, 1000).await {
        Some(value) => value,
        None => to_json(&fallback_analysis(&snapshot, &goal))?,
    };
    tracing::info!(
        event = %id,
        kind = %payload.kind,
        score = analysis.get("score").and_then(serde_json::Value::as_u64),
        "webhook analysis complete"
    );

    Ok(Json(json!({ "ok": true, "id": id })))
}

/// Stable id for dedupe: deliveries carry no envelope id, so derive one from
/// the user and delivery timestamp, falling back to a random one.
fn webhook_event_id(payload: &WebhookPayload) -> String {
    match &payload.user {
        Some(user) => {
            let stamp = user.last_webhook_update.as_deref().unwrap_or("initial");
            format!("{}:{}:{}", user.user_id, payload.kind, stamp)
        }
        None => uuid::Uuid::new_v4().to_string(),
    }
}

async fn terra_snapshot(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Value>> {
    let terra = state
        .terra
        .as_ref()
        .ok_or(ApiError::NotConfigured("terra"))?;

    let sleep = terra.get_sleep(&user_id, query.days_back).await?;
    let daily = terra.get_daily(&user_id, query.days_back).await?;

    let input = terra_adapter::snapshot_from_history(&sleep, &daily);
    let snapshot = Snapshot::normalize(&input);
    Ok(Json(json!({
        "userId": user_id,
        "snapshot": snapshot,
        "score": primary_score(&snapshot),
    })))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "endpoint not found",
            "available_endpoints": ENDPOINTS,
        })),
    )
}

fn to_json<T: serde::Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}
