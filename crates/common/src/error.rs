use thiserror::Error;

use crate::types::RequestParams;

/// Failure to obtain a usable status response.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Connection error ({params}): {source}")]
    Connection {
        params: RequestParams,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with an error-shaped payload (`error` / `code`).
    #[error("Upstream error `{indicator}` ({params}): {}", .message.as_deref().unwrap_or("no message"))]
    Upstream {
        indicator: String,
        message: Option<String>,
        params: RequestParams,
    },

    #[error("Malformed response ({params}): {reason}")]
    Malformed {
        reason: String,
        params: RequestParams,
    },
}

impl FetchError {
    pub fn params(&self) -> RequestParams {
        match self {
            FetchError::Connection { params, .. }
            | FetchError::Upstream { params, .. }
            | FetchError::Malformed { params, .. } => *params,
        }
    }
}

/// A submission carries a status outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown review status `{status}` for submission \"{name}\"")]
pub struct UnknownStatusError {
    pub status: String,
    pub name: String,
}

/// The messaging channel refused a message.
#[derive(Debug, Error)]
#[error("Failed to deliver message to chat {chat_id}: {source}")]
pub struct DispatchError {
    pub chat_id: i64,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Any failure that ends a poll cycle early. None of them are fatal.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatusError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display_includes_message() {
        let err = FetchError::Upstream {
            indicator: "not_authenticated".to_string(),
            message: Some("Учетные данные не были предоставлены.".to_string()),
            params: RequestParams { from_date: 10 },
        };
        let rendered = err.to_string();
        assert!(rendered.contains("not_authenticated"));
        assert!(rendered.contains("from_date=10"));
        assert!(rendered.contains("Учетные данные"));
    }

    #[test]
    fn test_upstream_display_without_message() {
        let err = FetchError::Upstream {
            indicator: "invalid_token".to_string(),
            message: None,
            params: RequestParams { from_date: 0 },
        };
        assert_eq!(
            err.to_string(),
            "Upstream error `invalid_token` (from_date=0): no message"
        );
    }

    #[test]
    fn test_cycle_error_is_transparent() {
        let err: CycleError = UnknownStatusError {
            status: "pending".to_string(),
            name: "Y".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Unknown review status `pending` for submission \"Y\""
        );
    }
}
