use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Lower bound (Unix seconds) of the next status query window.
///
/// Only ever moves forward: a server-reported timestamp older than the
/// current position is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PollCursor(u64);

impl PollCursor {
    pub fn new(timestamp: u64) -> Self {
        Self(timestamp)
    }

    /// Cursor positioned at the current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now().timestamp().max(0) as u64)
    }

    pub fn timestamp(&self) -> u64 {
        self.0
    }

    /// Move the cursor to `next`. Returns `false` (cursor untouched) when
    /// `next` lies before the current position.
    pub fn advance(&mut self, next: u64) -> bool {
        if next < self.0 {
            tracing::warn!(
                cursor = self.0,
                next,
                "Server reported an older current_date, keeping cursor"
            );
            return false;
        }
        self.0 = next;
        true
    }
}

impl std::fmt::Display for PollCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One homework submission as reported by the status API.
///
/// `status` is kept raw so that unrecognized values can be reported verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(rename = "homework_name")]
    pub name: String,
    pub status: String,
}

/// Successful status API response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResponse {
    /// Most recent first, as ordered by the server
    pub submissions: Vec<SubmissionRecord>,
    /// Server-reported `current_date`, if present
    pub next_cursor: Option<u64>,
}

impl FetchResponse {
    pub fn latest(&self) -> Option<&SubmissionRecord> {
        self.submissions.first()
    }
}

/// Query parameters of a status request, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequestParams {
    pub from_date: u64,
}

impl std::fmt::Display for RequestParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "from_date={}", self.from_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_advances_forward() {
        let mut cursor = PollCursor::new(100);
        assert!(cursor.advance(100));
        assert!(cursor.advance(250));
        assert_eq!(cursor.timestamp(), 250);
    }

    #[test]
    fn test_cursor_never_regresses() {
        let mut cursor = PollCursor::new(500);
        assert!(!cursor.advance(499));
        assert_eq!(cursor.timestamp(), 500);
    }

    #[test]
    fn test_submission_record_wire_names() {
        let record: SubmissionRecord = serde_json::from_value(serde_json::json!({
            "id": 7,
            "homework_name": "hw05_final",
            "status": "approved",
            "reviewer_comment": "ok"
        }))
        .unwrap();
        assert_eq!(record.name, "hw05_final");
        assert_eq!(record.status, "approved");
    }

    #[test]
    fn test_latest_is_first() {
        let response = FetchResponse {
            submissions: vec![
                SubmissionRecord {
                    name: "new".to_string(),
                    status: "reviewing".to_string(),
                },
                SubmissionRecord {
                    name: "old".to_string(),
                    status: "approved".to_string(),
                },
            ],
            next_cursor: None,
        };
        assert_eq!(response.latest().map(|r| r.name.as_str()), Some("new"));
        assert!(FetchResponse::default().latest().is_none());
    }
}
