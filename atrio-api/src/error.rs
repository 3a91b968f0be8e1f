use atrio_shared::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Validation {
        message: String,
        fields: HashMap<String, Vec<String>>,
    },
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::new(msg)),
            AppError::Validation { message, fields } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody::with_fields(message, fields),
            ),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal Server Error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}

/// Run the payload's field checks, mapping failures to a 422 with the
/// per-field message map.
pub fn validate_payload<T: validator::Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errors| AppError::Validation {
        message: "validation failed".to_string(),
        fields: atrio_core::collect_field_errors(&errors),
    })
}

/// 422 pinned to a single field.
pub fn field_error(field: &str, message: &str) -> AppError {
    let mut fields = std::collections::HashMap::new();
    fields.insert(field.to_string(), vec![message.to_string()]);
    AppError::Validation {
        message: "validation failed".to_string(),
        fields,
    }
}
