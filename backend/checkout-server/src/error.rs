use axum::{
    response::{IntoResponse, Response},
    Json,
};
use domain_types::errors::{ApiError, ApplicationErrorResponse};
use http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid host for socket: {0}")]
    AddressError(#[from] std::net::AddrParseError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Error returned from HTTP handlers.
#[derive(Debug)]
pub struct ApiErrorResponse(pub error_stack::Report<ApplicationErrorResponse>);

impl From<error_stack::Report<ApplicationErrorResponse>> for ApiErrorResponse {
    fn from(report: error_stack::Report<ApplicationErrorResponse>) -> Self {
        Self(report)
    }
}

impl ApiErrorResponse {
    pub fn not_found(path: &str) -> Self {
        Self(
            ApplicationErrorResponse::NotFound(ApiError {
                sub_code: "ROUTE_NOT_FOUND".to_owned(),
                error_identifier: 404,
                error_message: format!("No route for {path}"),
                error_object: None,
            })
            .into(),
        )
    }

    fn status_code(&self) -> StatusCode {
        match self.0.current_context() {
            ApplicationErrorResponse::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationErrorResponse::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::info!(error = ?self.0, %status, "request rejected");
        (status, Json(self.0.current_context().api_error().clone())).into_response()
    }
}
