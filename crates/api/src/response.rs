//! Shared response envelope for API handlers.
//!
//! Every successful response is a JSON object carrying `"success": true`
//! next to the payload's own fields; errors carry `"success": false` (see
//! [`crate::error::AppError`]).

use axum::Json;
use serde::Serialize;

/// `{ "success": true, ...T }` envelope. `T` must serialize as a map.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

/// Wrap a payload in the success envelope.
pub fn success<T: Serialize>(data: T) -> Json<SuccessResponse<T>> {
    Json(SuccessResponse {
        success: true,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Payload {
        gold_spent: i64,
    }

    #[test]
    fn envelope_flattens_payload() {
        let Json(body) = success(Payload { gold_spent: 400 });
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"success": true, "goldSpent": 400})
        );
    }
}
