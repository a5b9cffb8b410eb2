//! Review watcher, the poll/translate/notify loop.
//!
//! Each cycle:
//! 1. Fetches submissions updated since the cursor
//! 2. Translates the most recent one into a message
//! 3. Sends it through the message sink
//! 4. Advances the cursor to the server-reported `current_date`
//!
//! Failures never stop the loop. A failed fetch or delivery keeps the cursor
//! where it was and retries after the short backoff interval; an unknown
//! status skips the notification but still advances the cursor.

use std::time::Duration;

use herald_common::config::AppConfig;
use herald_common::error::CycleError;
use herald_common::types::PollCursor;
use herald_notifier::MessageSink;
use herald_notifier::template;

use crate::fetcher::StatusSource;

/// How one poll cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No submissions in the window
    Idle,
    /// Latest submission translated and delivered
    Notified,
    FetchFailed,
    TranslationFailed,
    DispatchFailed,
}

impl CycleOutcome {
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            CycleOutcome::FetchFailed
                | CycleOutcome::TranslationFailed
                | CycleOutcome::DispatchFailed
        )
    }
}

/// Normal poll interval and post-failure backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub normal: Duration,
    pub backoff: Duration,
}

impl PollIntervals {
    pub fn delay_for(&self, outcome: CycleOutcome) -> Duration {
        if outcome.is_failure() {
            self.backoff
        } else {
            self.normal
        }
    }
}

impl From<&AppConfig> for PollIntervals {
    fn from(config: &AppConfig) -> Self {
        Self {
            normal: config.poll_interval,
            backoff: config.retry_interval,
        }
    }
}

/// Polls one student's review statuses and notifies on the latest change.
pub struct ReviewWatcher<S, N> {
    source: S,
    sink: N,
    cursor: PollCursor,
    intervals: PollIntervals,
}

impl<S: StatusSource, N: MessageSink> ReviewWatcher<S, N> {
    pub fn new(source: S, sink: N, cursor: PollCursor, intervals: PollIntervals) -> Self {
        Self {
            source,
            sink,
            cursor,
            intervals,
        }
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    /// Start the polling loop. Runs until the task is dropped.
    pub async fn run(&mut self) {
        tracing::info!(
            cursor = %self.cursor,
            poll_interval_secs = self.intervals.normal.as_secs(),
            retry_interval_secs = self.intervals.backoff.as_secs(),
            "Review watcher started"
        );

        loop {
            let outcome = self.run_cycle().await;
            let delay = self.intervals.delay_for(outcome);

            tracing::debug!(
                ?outcome,
                cursor = %self.cursor,
                delay_secs = delay.as_secs(),
                "Cycle finished"
            );

            tokio::time::sleep(delay).await;
        }
    }

    /// Run a single fetch → translate → notify cycle and report how it ended.
    /// Every failure is logged here.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(outcome) => outcome,
            Err(CycleError::Fetch(e)) => {
                tracing::error!(
                    error = %e,
                    from_date = e.params().from_date,
                    "Failed to fetch review statuses"
                );
                CycleOutcome::FetchFailed
            }
            Err(CycleError::UnknownStatus(e)) => {
                tracing::error!(
                    error = %e,
                    status = %e.status,
                    cursor = %self.cursor,
                    "Skipping notification for unrecognized status"
                );
                CycleOutcome::TranslationFailed
            }
            Err(CycleError::Dispatch(e)) => {
                tracing::error!(
                    error = %e,
                    cursor = %self.cursor,
                    "Failed to deliver notification, will retry"
                );
                CycleOutcome::DispatchFailed
            }
        }
    }

    async fn poll_once(&mut self) -> Result<CycleOutcome, CycleError> {
        let response = self.source.fetch(self.cursor).await?;

        let Some(latest) = response.latest() else {
            self.advance(response.next_cursor);
            return Ok(CycleOutcome::Idle);
        };

        tracing::debug!(
            submissions = response.submissions.len(),
            name = %latest.name,
            status = %latest.status,
            "Received submission update"
        );

        let message = match template::translate(latest) {
            Ok(message) => message,
            Err(e) => {
                self.advance(response.next_cursor);
                return Err(e.into());
            }
        };

        // Cursor stays put on a failed send so the update is fetched again.
        self.sink.send(&message).await?;
        self.advance(response.next_cursor);

        Ok(CycleOutcome::Notified)
    }

    fn advance(&mut self, next_cursor: Option<u64>) {
        if let Some(next) = next_cursor {
            self.cursor.advance(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_use_backoff() {
        let intervals = PollIntervals {
            normal: Duration::from_secs(300),
            backoff: Duration::from_secs(5),
        };
        assert_eq!(intervals.delay_for(CycleOutcome::Idle), Duration::from_secs(300));
        assert_eq!(intervals.delay_for(CycleOutcome::Notified), Duration::from_secs(300));
        assert_eq!(intervals.delay_for(CycleOutcome::FetchFailed), Duration::from_secs(5));
        assert_eq!(
            intervals.delay_for(CycleOutcome::TranslationFailed),
            Duration::from_secs(5)
        );
        assert_eq!(
            intervals.delay_for(CycleOutcome::DispatchFailed),
            Duration::from_secs(5)
        );
    }
}
