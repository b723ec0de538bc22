use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_vector::VectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Prompt template error: {0}")]
    Template(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl SearchError {
    /// The underlying cause text, without the stage prefix.
    ///
    /// Used when assembling the user-facing failure message, which names the
    /// pipeline rather than the failing stage.
    pub fn cause(&self) -> &str {
        match self {
            SearchError::Validation(msg)
            | SearchError::Embedding(msg)
            | SearchError::VectorStore(msg)
            | SearchError::Completion(msg)
            | SearchError::Template(msg) => msg,
        }
    }
}

impl From<VectorError> for SearchError {
    fn from(err: VectorError) -> Self {
        match err {
            VectorError::Embedding(msg) => SearchError::Embedding(msg),
            VectorError::Validation(msg) => SearchError::Validation(msg),
            other => SearchError::VectorStore(other.to_string()),
        }
    }
}

/// Convert SearchError to AppError for standardized HTTP error responses
impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(msg) => AppError::BadRequest(msg),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
