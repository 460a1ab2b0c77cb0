use strum::Display;

#[derive(Debug, Clone, thiserror::Error, Display)]
pub enum ApplicationErrorResponse {
    NotFound(ApiError),
    BadRequest(ApiError),
}

impl ApplicationErrorResponse {
    pub fn api_error(&self) -> &ApiError {
        match self {
            Self::NotFound(error) | Self::BadRequest(error) => error,
        }
    }
}

#[derive(Debug, serde::Serialize, Clone)]
pub struct ApiError {
    pub sub_code: String,
    pub error_identifier: u16,
    pub error_message: String,
    pub error_object: Option<serde_json::Value>,
}
