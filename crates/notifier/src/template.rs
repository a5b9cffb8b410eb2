//! Status translator: turns a submission's review status into the message
//! the student receives.
//!
//! Every [`ReviewStatus`] has exactly one template, enforced by the exhaustive
//! `match` in [`ReviewStatus::template`]. Raw statuses outside the known set
//! fail with [`UnknownStatusError`] instead of producing a placeholder.

use std::str::FromStr;

use herald_common::error::UnknownStatusError;
use herald_common::types::SubmissionRecord;

/// Placeholder substituted with the submission name.
const NAME_PLACEHOLDER: &str = "{name}";

/// Review states reported by the status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    Reviewing,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Reviewing,
        ReviewStatus::Approved,
        ReviewStatus::Rejected,
    ];

    /// Localized message template; `{name}` is replaced by the submission name.
    pub const fn template(self) -> &'static str {
        match self {
            ReviewStatus::Reviewing => "Ваша работа \"{name}\" принята к рассмотрению.",
            ReviewStatus::Approved => {
                "У вас проверили работу \"{name}\"!\n\n\
                 Ревьюеру всё понравилось, можно приступать к следующему уроку."
            }
            ReviewStatus::Rejected => {
                "У вас проверили работу \"{name}\"!\n\n\
                 К сожалению в работе нашлись ошибки."
            }
        }
    }

    /// Render the template for a submission.
    pub fn render(self, name: &str) -> String {
        self.template().replace(NAME_PLACEHOLDER, name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Reviewing => "reviewing",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reviewing" => Ok(ReviewStatus::Reviewing),
            "approved" => Ok(ReviewStatus::Approved),
            "rejected" => Ok(ReviewStatus::Rejected),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translate a submission record into a notification message.
pub fn translate(record: &SubmissionRecord) -> Result<String, UnknownStatusError> {
    let status = record
        .status
        .parse::<ReviewStatus>()
        .map_err(|status| UnknownStatusError {
            status,
            name: record.name.clone(),
        })?;

    tracing::debug!(%status, name = %record.name, "Translated submission status");
    Ok(status.render(&record.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, status: &str) -> SubmissionRecord {
        SubmissionRecord {
            name: name.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_translate_approved() {
        let message = translate(&record("X", "approved")).unwrap();
        assert_eq!(
            message,
            "У вас проверили работу \"X\"!\n\n\
             Ревьюеру всё понравилось, можно приступать к следующему уроку."
        );
    }

    #[test]
    fn test_translate_rejected() {
        let message = translate(&record("hw02_sql", "rejected")).unwrap();
        assert_eq!(
            message,
            "У вас проверили работу \"hw02_sql\"!\n\nК сожалению в работе нашлись ошибки."
        );
    }

    #[test]
    fn test_translate_reviewing() {
        let message = translate(&record("hw03", "reviewing")).unwrap();
        assert_eq!(message, "Ваша работа \"hw03\" принята к рассмотрению.");
    }

    #[test]
    fn test_translate_unknown_status() {
        let err = translate(&record("Y", "pending")).unwrap_err();
        assert_eq!(err.status, "pending");
        assert_eq!(err.name, "Y");
    }

    #[test]
    fn test_status_parsing_is_case_sensitive() {
        assert!(translate(&record("Y", "Approved")).is_err());
        assert!(translate(&record("Y", "")).is_err());
    }

    #[test]
    fn test_every_status_round_trips_and_names_submission() {
        for status in ReviewStatus::ALL {
            assert_eq!(status.as_str().parse::<ReviewStatus>(), Ok(status));
            assert!(status.render("unique-name").contains("\"unique-name\""));
            assert!(!status.render("n").contains(NAME_PLACEHOLDER));
        }
    }
}
