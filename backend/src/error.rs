use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cloud::CloudError;
use ply_source::PlySourceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BackendError>;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Multipart error")]
    Multipart(#[from] MultipartError),

    #[error("PLY decode failed: {0}")]
    Decode(#[from] PlySourceError),

    #[error("Normalization failed: {0}")]
    Cloud(#[from] CloudError),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = match self {
            BackendError::BadRequest(_) => StatusCode::BAD_REQUEST,
            BackendError::Multipart(_) => StatusCode::BAD_REQUEST,
            BackendError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BackendError::Cloud(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BackendError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_clouds_map_to_unprocessable() {
        let response = BackendError::from(CloudError::Degenerate).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn bad_uploads_map_to_bad_request() {
        let response = BackendError::BadRequest("Invalid file type".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
