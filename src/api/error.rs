// API error module
// Maps handler failures onto status codes and `{message}` bodies

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use thiserror::Error;

use crate::http;
use crate::logger;
use crate::model::ValidationError;
use crate::store::StoreError;

pub type ApiResult = Result<Response<Full<Bytes>>, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Failed to read request body: {0}")]
    Body(String),

    #[error("{0} not found.")]
    NotFound(&'static str),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub const fn project_not_found() -> Self {
        Self::NotFound("Project")
    }

    pub const fn task_not_found() -> Self {
        Self::NotFound("Task")
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidJson(_) | Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Storage details are logged, not sent to the client
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let status = self.status();
        if let Self::Storage(ref err) = self {
            logger::log_error(&err.to_string());
            return http::message_response(status, "Internal server error.");
        }
        http::message_response(status, &self.to_string())
    }
}
