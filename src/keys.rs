//! The store key namespace for job status records.
//!
//! Every key for a given job identifier is built deterministically from
//! that identifier plus a fixed suffix, so any two components holding the
//! same identifier agree on where state lives without coordination. This
//! module is the single source of truth for that namespace.
//!
//! | Key | Holds |
//! |-----|-------|
//! | `job:{id}:status` | The JSON [`StatusRecord`](crate::StatusRecord) |
//! | `job:{id}:status:timequeued` | Epoch seconds of creation |
//! | `job:{id}:status:timestarted` | Epoch seconds of the `Running` transition |
//! | `job:{id}:status:timecompleted` | Epoch seconds of the terminal transition |
//! | `job:{id}:status:errorcode` | Written by the external error reporter |

use std::fmt;

/// Suffix of an auxiliary side key in a job's record family.
///
/// Side keys hold a single timestamp or error code associated with one
/// lifecycle transition. The `errorcode` key is written by an external
/// error-reporting collaborator; the tracker only expires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideKey {
    /// Set by `create`: when the job was enqueued.
    TimeQueued,
    /// Set on the `Running` transition: when a worker picked the job up.
    TimeStarted,
    /// Set on a terminal transition: when the job finished or failed.
    TimeCompleted,
    /// Set by the external error reporter on failure.
    ErrorCode,
}

impl SideKey {
    /// All side keys in a job's record family, in write order.
    pub const ALL: [SideKey; 4] = [
        SideKey::TimeQueued,
        SideKey::TimeStarted,
        SideKey::TimeCompleted,
        SideKey::ErrorCode,
    ];

    /// The fixed key suffix for this side record.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::TimeQueued => "timequeued",
            Self::TimeStarted => "timestarted",
            Self::TimeCompleted => "timecompleted",
            Self::ErrorCode => "errorcode",
        }
    }
}

impl fmt::Display for SideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Key of the main status record for a job.
///
/// # Examples
///
/// ```
/// assert_eq!(jobtrack::keys::status_key("42"), "job:42:status");
/// ```
pub fn status_key(job_id: &str) -> String {
    format!("job:{job_id}:status")
}

/// Key of a side record for a job.
///
/// # Examples
///
/// ```
/// use jobtrack::keys::{side_key, SideKey};
///
/// assert_eq!(
///     side_key("42", SideKey::TimeQueued),
///     "job:42:status:timequeued"
/// );
/// ```
pub fn side_key(job_id: &str, side: SideKey) -> String {
    format!("job:{job_id}:status:{}", side.suffix())
}
