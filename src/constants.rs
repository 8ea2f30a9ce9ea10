//! Constants shared across the tracker.

/// Retention window, in seconds, applied to a job's record family once the
/// job reaches a terminal status (28 days).
///
/// Set on the main status record and on every side key, including the
/// `errorcode` key written by the external error reporter.
pub const TERMINAL_EXPIRE_SECS: u64 = 2_419_200;
