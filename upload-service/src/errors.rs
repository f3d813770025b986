use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::CommonError;

use crate::storage::StorageError;

/// HTTP-facing error wrapper
#[derive(Debug)]
pub struct ApiError(pub CommonError);

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError(CommonError::InvalidInput(msg.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.0.to_body())).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError(err.into())
    }
}
