use crate::utils::error::LibraryError;
use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch item data";
pub const NOT_FOUND_MESSAGE: &str = "Item not found";
pub const BAD_IMAGE_TYPE_MESSAGE: &str = "Invalid image type";
pub const BAD_PATH_MESSAGE: &str = "Invalid request path";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Endpoint not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

impl LibraryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LibraryError::NotFound { .. } => StatusCode::NOT_FOUND,
            LibraryError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            LibraryError::BadImageType { .. } | LibraryError::BadPath { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 回給呼叫端的固定訊息，內部錯誤細節只寫進 log
    pub fn public_message(&self) -> &'static str {
        match self {
            LibraryError::Fetch(_) => FETCH_FAILED_MESSAGE,
            LibraryError::NotFound { .. } => NOT_FOUND_MESSAGE,
            LibraryError::BadImageType { .. } => BAD_IMAGE_TYPE_MESSAGE,
            LibraryError::BadPath { .. } => BAD_PATH_MESSAGE,
            LibraryError::RouteNotFound { .. } => ROUTE_NOT_FOUND_MESSAGE,
            _ => INTERNAL_ERROR_MESSAGE,
        }
    }
}

/// 路徑參數無法解碼 (例如非 UTF-8 的百分比編碼) 時改回 JSON 格式的 400
impl From<PathRejection> for LibraryError {
    fn from(rejection: PathRejection) -> Self {
        LibraryError::BadPath {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("❌ Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        failure(status, self.public_message())
    }
}

/// 統一的失敗回應格式 `{success: false, error}`
pub fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"success": false, "error": message}))).into_response()
}

/// 請求處理中發生 panic 時的最後防線，細節只記錄不回傳
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!("❌ Handler panicked: {}", detail);

    failure(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}
