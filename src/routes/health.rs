//! # 헬스체크(Health Check) 핸들러
//!
//! - `GET /health` → `{ "status": "ok" }`
//!
//! DB에 `SELECT 1`을 보내 연결 풀이 살아 있는지까지 확인합니다.
//! DB에 접근할 수 없으면 500 응답이 됩니다.

use crate::{db, error::AppError, routes::todos::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /health` — 서버와 DB 상태를 확인합니다.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    db::ping(&state.pool).await?;
    Ok(Json(json!({
        "status": "ok"
    })))
}
