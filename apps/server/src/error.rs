use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kepengen_core::errors::{Error as CoreError, ErrorKind};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ErrorKind>,
    message: String,
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::Core(e) => (status_for(e.kind()), Some(e.kind())),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, None),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, None),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            kind,
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_distinct_status() {
        let kinds = [
            ErrorKind::Unauthenticated,
            ErrorKind::Forbidden,
            ErrorKind::NotFound,
            ErrorKind::InvalidInput,
            ErrorKind::StoreUnavailable,
            ErrorKind::Conflict,
            ErrorKind::Internal,
        ];
        let codes: Vec<u16> = kinds.iter().map(|k| status_for(*k).as_u16()).collect();
        assert_eq!(codes, vec![401, 403, 404, 400, 503, 409, 500]);
    }

    #[test]
    fn test_core_not_found_is_404() {
        let response = ApiError::from(CoreError::NotFound("Goal g1".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
