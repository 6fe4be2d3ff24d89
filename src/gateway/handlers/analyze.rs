//! 投诉分析处理器

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::{json, Value};

use crate::gateway::state::AppState;

/// 可调用函数协议的信封字段
const ENVELOPE_DATA: &str = "data";
const ENVELOPE_RESULT: &str = "result";

/// POST /analyze_grievance 处理器
///
/// 请求体不是合法 JSON 时按空负载处理，由校验逻辑返回错误响应，
/// 保证调用方总能拿到 `{success, analysis | error}` 结构。
/// 裸负载的校验失败返回 400；信封请求始终返回 200。
pub async fn handle_analyze_grievance(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let (payload, enveloped) = unwrap_envelope(payload);

    let response = state.analyzer().respond(&payload).await;

    // 信封协议下函数返回值一律是 200 的 `{"result": ...}`，包括校验失败
    if enveloped {
        return (StatusCode::OK, Json(json!({ ENVELOPE_RESULT: response }))).into_response();
    }

    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response)).into_response()
}

/// 拆开 `{"data": {...}}` 形式的信封
///
/// 只有顶层带 `data` 且不带 `image_base64` 时才视为信封。
fn unwrap_envelope(payload: Value) -> (Value, bool) {
    match payload {
        Value::Object(mut obj)
            if obj.contains_key(ENVELOPE_DATA) && !obj.contains_key("image_base64") =>
        {
            let inner = obj.remove(ENVELOPE_DATA).unwrap_or(Value::Null);
            (inner, true)
        }
        other => (other, false),
    }
}
