use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::server::error::ApiError;
use crate::server::AppState;
use crate::voting::types::VoteType;

/// Fixed proof-of-concept token handed to every login.
const DEMO_TOKEN: &str = "kaul-demo-token";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub id: u32,
    pub vote_type: VoteType,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterRequest {
    pub counter_id: String,
}

/// GET /subjects
pub async fn get_subjects(State(state): State<Arc<AppState>>) -> Json<Value> {
    let snapshot = state.engine.lock().unwrap().snapshot();
    Json(json!({
        "subjects": snapshot.subjects,
        "users": snapshot.users,
        "userProfiles": snapshot.profiles,
    }))
}

/// POST /vote
pub async fn record_vote(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::InvalidRequest)?;
    let outcome =
        state
            .engine
            .lock()
            .unwrap()
            .record_vote(request.id, request.vote_type, &request.user_id)?;
    Ok(Json(json!({
        "success": true,
        "subjects": outcome.subjects,
        "user": outcome.user,
        "message": outcome.message,
    })))
}

/// POST /login (proof-of-concept stub, the credentials are ignored)
pub async fn login() -> Json<Value> {
    Json(json!({ "token": DEMO_TOKEN }))
}

/// POST /api/v1/counter/increment
pub async fn increment_counter(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CounterRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|_| ApiError::InvalidRequest)?;
    let count = state
        .counters
        .lock()
        .unwrap()
        .increment(&request.counter_id)?;
    Ok(Json(json!({ "success": true, "count": count })))
}
