use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_vector::VectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Vector error: {0}")]
    Vector(#[from] VectorError),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<quick_xml::DeError> for ProductError {
    fn from(err: quick_xml::DeError) -> Self {
        ProductError::Catalog(err.to_string())
    }
}

/// Convert ProductError to AppError for standardized HTTP error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Catalog(msg) => AppError::BadRequest(format!("Catalog error: {}", msg)),
            ProductError::Io(e) => AppError::BadRequest(format!("Cannot read catalog: {}", e)),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Vector(e) => e.into(),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
