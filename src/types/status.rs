//! The job lifecycle status enum.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a background job.
///
/// A job normally moves `Waiting` -> `Running` -> `Failed`/`Complete`,
/// but the tracker is a recorder, not a validator: callers are trusted to
/// report a status that reflects reality, and out-of-order transitions
/// are never rejected. Terminal statuses (`Failed`, `Complete`) put the
/// job's record family on the retention clock
/// ([`TERMINAL_EXPIRE_SECS`](crate::constants::TERMINAL_EXPIRE_SECS)).
///
/// # Serialization
///
/// Serializes as its integer code (`1`..`4`) to match the record wire
/// format shared with other components of the framework.
///
/// # Examples
///
/// ```
/// use jobtrack::JobStatus;
///
/// assert_eq!(JobStatus::Waiting.code(), 1);
/// assert!(!JobStatus::Running.is_terminal());
/// assert!(JobStatus::Failed.is_terminal());
/// assert_eq!(serde_json::to_string(&JobStatus::Complete).unwrap(), "4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum JobStatus {
    /// Job has been enqueued and is waiting for a worker.
    Waiting = 1,
    /// Job is actively being processed by a worker.
    Running = 2,
    /// Job failed (terminal).
    Failed = 3,
    /// Job completed successfully (terminal).
    Complete = 4,
}

impl JobStatus {
    /// Returns the integer code used on the wire.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns `true` if this status is terminal (`Failed` or `Complete`).
    ///
    /// Terminal statuses trigger the retention window on the job's record
    /// family.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Complete)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Running => write!(f, "running"),
            Self::Failed => write!(f, "failed"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

impl From<JobStatus> for u8 {
    fn from(status: JobStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for JobStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Waiting),
            2 => Ok(Self::Running),
            3 => Ok(Self::Failed),
            4 => Ok(Self::Complete),
            other => Err(format!("unknown job status code: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_wire_format() {
        assert_eq!(JobStatus::Waiting.code(), 1);
        assert_eq!(JobStatus::Running.code(), 2);
        assert_eq!(JobStatus::Failed.code(), 3);
        assert_eq!(JobStatus::Complete.code(), 4);
    }

    #[test]
    fn terminal_statuses() {
        assert!(!JobStatus::Waiting.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Complete.is_terminal());
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&JobStatus::Waiting).unwrap(), "1");
        assert_eq!(serde_json::to_string(&JobStatus::Complete).unwrap(), "4");
    }

    #[test]
    fn deserializes_from_integer() {
        let status: JobStatus = serde_json::from_str("2").unwrap();
        assert_eq!(status, JobStatus::Running);
    }

    #[test]
    fn deserialize_rejects_unknown_code() {
        let result = serde_json::from_str::<JobStatus>("9");
        assert!(result.is_err());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(JobStatus::Waiting.to_string(), "waiting");
        assert_eq!(JobStatus::Running.to_string(), "running");
        assert_eq!(JobStatus::Failed.to_string(), "failed");
        assert_eq!(JobStatus::Complete.to_string(), "complete");
    }

    #[test]
    fn try_from_round_trips_all_codes() {
        for status in [
            JobStatus::Waiting,
            JobStatus::Running,
            JobStatus::Failed,
            JobStatus::Complete,
        ] {
            assert_eq!(JobStatus::try_from(status.code()).unwrap(), status);
        }
    }
}
