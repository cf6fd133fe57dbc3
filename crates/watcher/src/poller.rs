//! Status poll loop.
//!
//! Each iteration fetches everything that changed since the cursor, validates
//! the payload, compares the newest record's status with the last one seen and
//! notifies on a transition. Every iteration ends with the same fixed wait,
//! whether it succeeded or failed. The loop itself never exits.

use std::time::Duration;

use chrono::Utc;
use serde_json::Value;

use herald_common::types::HomeworkStatus;
use herald_notifier::{Notifier, notify};

use crate::client::StatusSource;
use crate::error::{FetchError, PollError, ShapeError};
use crate::formatter;
use crate::validator;

/// Prefix of the message sent when the status API cannot be reached.
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the status API";

/// Classified outcome of one fetch + validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult {
    /// Raw `homeworks` entries, newest first.
    Success {
        records: Vec<Value>,
        current_date: Option<i64>,
    },
    TransportError(String),
    UpstreamError(String),
    ProtocolError(u16),
    ShapeError(ShapeError),
}

impl PollResult {
    /// Classify a raw fetch result, running the validator on success.
    pub fn from_fetch(fetched: Result<Value, FetchError>) -> Self {
        match fetched {
            Ok(payload) => match validator::validate(&payload) {
                Ok(records) => PollResult::Success {
                    records,
                    current_date: validator::current_date(&payload),
                },
                Err(e) => PollResult::ShapeError(e),
            },
            Err(FetchError::Transport(reason)) => PollResult::TransportError(reason),
            Err(FetchError::UpstreamError(message)) => PollResult::UpstreamError(message),
            Err(FetchError::StatusCode(code)) => PollResult::ProtocolError(code),
            Err(FetchError::Decode(reason)) => {
                PollResult::ShapeError(ShapeError::Malformed(reason))
            }
        }
    }
}

/// What a successful iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// API unreachable; an "unreachable" notification was attempted.
    Unreachable,
    /// Nothing changed upstream since the cursor.
    NoRecords,
    /// Newest status equals the last one seen.
    Unchanged(HomeworkStatus),
    /// Status transitioned and a notification was attempted.
    Changed {
        from: Option<HomeworkStatus>,
        to: HomeworkStatus,
    },
}

/// Poll loop for a single tracked homework.
///
/// Owns the cursor and the last seen status; nothing else reads or writes them.
pub struct StatusPoller<S, N> {
    source: S,
    notifier: N,
    retry_interval: Duration,
    cursor: i64,
    last_seen: Option<HomeworkStatus>,
}

impl<S: StatusSource, N: Notifier> StatusPoller<S, N> {
    pub fn new(source: S, notifier: N, retry_interval: Duration) -> Self {
        Self {
            source,
            notifier,
            retry_interval,
            cursor: Utc::now().timestamp(),
            last_seen: None,
        }
    }

    /// Start from an explicit cursor instead of the current time.
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Seed the last seen status, suppressing a notification for it.
    pub fn with_last_seen(mut self, status: HomeworkStatus) -> Self {
        self.last_seen = Some(status);
        self
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn last_seen(&self) -> Option<&HomeworkStatus> {
        self.last_seen.as_ref()
    }

    /// Fetch and validate everything that changed since the cursor.
    pub async fn poll(&self) -> PollResult {
        PollResult::from_fetch(self.source.fetch(self.cursor).await)
    }

    /// Run one iteration without the trailing wait.
    ///
    /// Transport and upstream failures are handled here (logged and announced).
    /// HTTP status and shape failures are returned for the outer handler.
    pub async fn tick(&mut self) -> Result<Tick, PollError> {
        match self.poll().await {
            PollResult::TransportError(reason) => {
                tracing::error!(
                    cursor = self.cursor,
                    error = %reason,
                    "Status API unreachable"
                );
                self.announce_unreachable(&reason).await;
                Ok(Tick::Unreachable)
            }
            PollResult::UpstreamError(message) => {
                tracing::error!(
                    cursor = self.cursor,
                    error = %message,
                    "Status API reported an error"
                );
                self.announce_unreachable(&message).await;
                Ok(Tick::Unreachable)
            }
            PollResult::ProtocolError(code) => {
                tracing::error!(
                    cursor = self.cursor,
                    status = code,
                    "Status API returned non-success status"
                );
                Err(PollError::Status(code))
            }
            PollResult::ShapeError(e) => {
                tracing::error!(
                    cursor = self.cursor,
                    error = %e,
                    "Status API response has unexpected shape"
                );
                Err(PollError::Shape(e))
            }
            PollResult::Success {
                records,
                current_date,
            } => {
                if let Some(next) = current_date {
                    self.cursor = next;
                }
                self.compare(records).await
            }
        }
    }

    /// Poll forever, waiting `retry_interval` after every iteration.
    pub async fn run(&mut self) {
        tracing::info!(
            cursor = self.cursor,
            retry_interval_secs = self.retry_interval.as_secs(),
            "Status poller started"
        );

        loop {
            match self.tick().await {
                Ok(tick) => tracing::debug!(?tick, "Poll iteration complete"),
                Err(e) => tracing::error!(
                    error = %e,
                    cursor = self.cursor,
                    "Poll iteration failed, retrying after interval"
                ),
            }

            tokio::time::sleep(self.retry_interval).await;
        }
    }

    async fn compare(&mut self, records: Vec<Value>) -> Result<Tick, PollError> {
        // Upstream orders newest first; older entries are never parsed
        let Some(newest) = records.first() else {
            tracing::debug!(cursor = self.cursor, "No homework updates since cursor");
            return Ok(Tick::NoRecords);
        };

        let latest = validator::parse_record(0, newest).inspect_err(|e| {
            tracing::error!(
                cursor = self.cursor,
                error = %e,
                "Newest homework record is malformed"
            );
        })?;

        if self.last_seen.as_ref() == Some(&latest.status) {
            tracing::debug!(
                homework = %latest.name,
                status = %latest.status,
                "Homework status unchanged"
            );
            return Ok(Tick::Unchanged(latest.status));
        }

        let previous = self.last_seen.replace(latest.status.clone());
        tracing::info!(
            homework = %latest.name,
            from = previous.as_ref().map(HomeworkStatus::as_str).unwrap_or("none"),
            to = %latest.status,
            "Homework status changed"
        );
        notify(&self.notifier, &formatter::format(&latest)).await;

        Ok(Tick::Changed {
            from: previous,
            to: latest.status,
        })
    }

    async fn announce_unreachable(&self, reason: &str) {
        let message = format!("{}: {}", UNREACHABLE_MESSAGE, reason);
        notify(&self.notifier, &message).await;
    }
}
