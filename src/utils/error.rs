use thiserror::Error;

/// 上游資料來源 (catalog JSON) 抓取失敗的分類
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error while fetching catalog: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Catalog source responded with HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Catalog body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid data format: expected a JSON array")]
    NotArray,
}

impl FetchError {
    pub fn reason(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::Parse(_) => "parse",
            FetchError::NotArray => "not_array",
        }
    }
}

/// 服務內所有錯誤，HTTP 狀態碼對應寫在 `api::error`
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Failed to fetch item data: {0}")]
    Fetch(#[from] FetchError),

    #[error("Item not found: {id}")]
    NotFound { id: String },

    #[error("Invalid image type: {kind}")]
    BadImageType { kind: String },

    #[error("Invalid path parameter: {message}")]
    BadPath { message: String },

    #[error("No route for {path}")]
    RouteNotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl LibraryError {
    pub fn internal(message: impl Into<String>) -> Self {
        LibraryError::Internal {
            message: message.into(),
        }
    }

    /// 啟動階段 (設定檔、監聽埠) 失敗時給使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            LibraryError::IoError(e) => format!("Could not read a required file or socket: {}", e),
            LibraryError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            LibraryError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid value for '{}': {}", value, field, reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_reasons() {
        assert_eq!(FetchError::HttpStatus { status: 503 }.reason(), "http_status");
        assert_eq!(FetchError::NotArray.reason(), "not_array");

        let parse = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        assert_eq!(FetchError::Parse(parse).reason(), "parse");
    }

    #[test]
    fn test_user_friendly_message_for_config_errors() {
        let err = LibraryError::InvalidConfigValueError {
            field: "source.timeout_seconds".to_string(),
            value: "99".to_string(),
            reason: "Value must be between 1 and 30".to_string(),
        };
        let message = err.user_friendly_message();
        assert!(message.contains("source.timeout_seconds"));
        assert!(message.contains("99"));
    }
}
