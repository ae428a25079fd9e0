use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

/// Body for a successful reservation submission.
#[derive(Serialize)]
pub struct Saved {
    pub message: String,
    pub id: Uuid,
}

/// Common error body. `errors` is present only for itemized validation
/// failures, keeping every error response in the `{message, errors?}` shape.
#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

pub fn created(id: Uuid) -> Response {
    let body = Saved {
        message: "Saved".to_string(),
        id,
    };
    (StatusCode::CREATED, Json(body)).into_response()
}

pub fn error(status: StatusCode, message: impl Into<String>, errors: Option<Vec<String>>) -> Response {
    let body = ErrorBody {
        message: message.into(),
        errors,
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_absent_errors() {
        let body = ErrorBody {
            message: "Server error".to_string(),
            errors: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"message":"Server error"}"#);
    }

    #[test]
    fn error_body_lists_validation_messages() {
        let body = ErrorBody {
            message: "Validation failed".to_string(),
            errors: Some(vec!["email is required".to_string()]),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"message":"Validation failed","errors":["email is required"]}"#
        );
    }
}
