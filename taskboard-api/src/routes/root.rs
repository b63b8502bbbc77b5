/// Liveness endpoint
///
/// `GET /` - public, answers as long as the process is serving.

use axum::Json;
use serde_json::{json, Value};

/// Root liveness message
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Taskboard API"
    }))
}
