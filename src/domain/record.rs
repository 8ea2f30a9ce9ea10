//! Status record -- the persisted unit of state for one job.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::JobStatus;

/// The persisted unit of state for one tracked job.
///
/// Stored as a single JSON value under the job's status key. The creation
/// packet carries `started` and no `data`; every later packet carries
/// `data` and no `started` -- both fields are omitted from the wire when
/// absent.
///
/// Timestamps are epoch seconds. The auxiliary per-transition timestamps
/// (`timequeued`, `timestarted`, `timecompleted`) are not part of this
/// record; they live under sibling keys as plain integers.
///
/// # Examples
///
/// ```
/// use jobtrack::{JobStatus, StatusRecord};
///
/// let record = StatusRecord::initial(1_700_000_000);
/// assert_eq!(record.status, JobStatus::Waiting);
/// assert_eq!(record.started, Some(1_700_000_000));
///
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json["status"], 1);
/// assert!(json.get("data").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Current lifecycle status, serialized as its integer code.
    pub status: JobStatus,

    /// Epoch-seconds timestamp of the last write.
    pub updated: i64,

    /// Epoch-seconds timestamp of creation. Set only in the creation
    /// packet; omitted from every subsequent write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<i64>,

    /// Caller-supplied payload. Present on all updates after creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl StatusRecord {
    /// Builds the creation packet: status `Waiting`, `started` and
    /// `updated` both set to `now`.
    pub fn initial(now: i64) -> Self {
        Self {
            status: JobStatus::Waiting,
            updated: now,
            started: Some(now),
            data: None,
        }
    }

    /// Builds an update packet for the given status and payload.
    pub fn next(status: JobStatus, now: i64, data: Value) -> Self {
        Self {
            status,
            updated: now,
            started: None,
            data: Some(data),
        }
    }
}
