use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn status() -> ApiSuccess<StatusResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        StatusResponseData {
            message: "Welcome to the MSA Social App",
            status: "Running",
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponseData {
    pub message: &'static str,
    pub status: &'static str,
}
