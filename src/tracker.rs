//! The job status tracker.

use chrono::Utc;
use serde_json::Value;

use crate::constants::TERMINAL_EXPIRE_SECS;
use crate::domain::StatusRecord;
use crate::error::StatusError;
use crate::keys::{side_key, status_key, SideKey};
use crate::store::KeyValueStore;
use crate::types::JobStatus;

/// Memoized result of the "does a record exist for this job" probe.
///
/// Transitions only out of `Unknown`; once either terminal value is
/// observed it holds for the tracker's lifetime. Callers rely on this to
/// avoid repeated store round-trips for untracked jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tracking {
    Unknown,
    Tracked,
    NotTracked,
}

/// Records and reports the lifecycle state of one background job.
///
/// A tracker is a lightweight per-job handle over a shared
/// [`KeyValueStore`]: it owns no state beyond the job identifier and the
/// memoized tracking flag. All durable state lives in the store under
/// keys derived from the identifier (see [`keys`](crate::keys)).
///
/// Tracking is opt-in: a record exists only if [`create`](Self::create)
/// was called for the job. Every mutation and accessor first consults
/// [`is_tracking`](Self::is_tracking); for jobs that never opted in,
/// accessors settle into a cheap no-op after a single existence probe.
///
/// The tracker records transitions, it does not validate them: callers
/// are trusted to report a status that reflects reality, and concurrent
/// updates from different processes race at last-write-wins granularity
/// in the store.
///
/// # Examples
///
/// ```
/// use jobtrack::store::memory::InMemoryStore;
/// use jobtrack::{JobStatus, StatusTracker};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), jobtrack::StatusError> {
/// let store = InMemoryStore::new();
/// let mut tracker = StatusTracker::new(store.clone(), "job-42");
///
/// tracker.create().await?;
/// assert_eq!(tracker.get().await?, Some(JobStatus::Waiting));
///
/// tracker.update(JobStatus::Complete, json!({"rows": 10})).await?;
/// let record = tracker.get_full().await?.unwrap();
/// assert_eq!(record.status, JobStatus::Complete);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StatusTracker<S> {
    store: S,
    id: String,
    tracking: Tracking,
}

impl<S: KeyValueStore> StatusTracker<S> {
    /// Creates a tracker handle for the given job identifier.
    ///
    /// Performs no I/O; the store is first consulted by the operation
    /// that needs it.
    pub fn new(store: S, id: impl Into<String>) -> Self {
        Self {
            store,
            id: id.into(),
            tracking: Tracking::Unknown,
        }
    }

    /// The job identifier this tracker refers back to.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Opts the job into tracking: writes the initial record with status
    /// [`JobStatus::Waiting`] and `started` = `updated` = now, plus the
    /// `timequeued` side record.
    ///
    /// # Errors
    ///
    /// Propagates store failures ([`StatusError::Store`]) and write-path
    /// encoding failures ([`StatusError::Encode`]).
    pub async fn create(&self) -> Result<(), StatusError> {
        let now = Utc::now().timestamp();
        let packet = serde_json::to_string(&StatusRecord::initial(now))?;
        self.store.set(&status_key(&self.id), &packet).await?;
        self.store
            .set(&side_key(&self.id, SideKey::TimeQueued), &now.to_string())
            .await?;
        Ok(())
    }

    /// Returns whether a status record currently exists for this job.
    ///
    /// The check is memoized per tracker instance, in both directions:
    /// the first call issues one existence probe and commits the
    /// observation; every later call answers from cache with zero store
    /// I/O. A job observed absent stays "not tracked" for this instance
    /// even if a record appears later, and a job observed present stays
    /// "tracked" even if the record is deleted out-of-band. Recreate the
    /// tracker to observe afresh.
    ///
    /// # Errors
    ///
    /// Propagates store failures from the initial probe. A failed probe
    /// leaves the cache untouched, so the next call probes again.
    pub async fn is_tracking(&mut self) -> Result<bool, StatusError> {
        match self.tracking {
            Tracking::Tracked => Ok(true),
            Tracking::NotTracked => Ok(false),
            Tracking::Unknown => {
                let present = self.store.exists(&status_key(&self.id)).await?;
                self.tracking = if present {
                    Tracking::Tracked
                } else {
                    Tracking::NotTracked
                };
                Ok(present)
            }
        }
    }

    /// Records a new status for the job, with a caller-supplied payload.
    ///
    /// If the job is not tracked, this silently does nothing -- zero
    /// store writes. Otherwise the main record is overwritten with
    /// `{status, updated: now, data}`, and:
    ///
    /// - [`JobStatus::Running`] also writes the `timestarted` side record;
    /// - terminal statuses also write the `timecompleted` side record and
    ///   schedule the main record plus all four side keys (including the
    ///   externally written `errorcode`) for deletion after
    ///   [`TERMINAL_EXPIRE_SECS`].
    ///
    /// Out-of-order or repeated statuses are recorded as given; repeating
    /// a status simply advances `updated`.
    ///
    /// # Errors
    ///
    /// Propagates store failures and write-path encoding failures; no
    /// write error is swallowed.
    pub async fn update(&mut self, status: JobStatus, data: Value) -> Result<(), StatusError> {
        if !self.is_tracking().await? {
            return Ok(());
        }

        let now = Utc::now().timestamp();
        let packet = serde_json::to_string(&StatusRecord::next(status, now, data))?;
        self.store.set(&status_key(&self.id), &packet).await?;

        if status == JobStatus::Running {
            self.store
                .set(&side_key(&self.id, SideKey::TimeStarted), &now.to_string())
                .await?;
        }

        if status.is_terminal() {
            self.store
                .set(
                    &side_key(&self.id, SideKey::TimeCompleted),
                    &now.to_string(),
                )
                .await?;
            self.store
                .expire(&status_key(&self.id), TERMINAL_EXPIRE_SECS)
                .await?;
            for side in SideKey::ALL {
                self.store
                    .expire(&side_key(&self.id, side), TERMINAL_EXPIRE_SECS)
                    .await?;
            }
        }

        Ok(())
    }

    /// Returns the job's current status, or `None` if the job is not
    /// tracked.
    ///
    /// Absence is a normal outcome, not a fault: an untracked job, a
    /// missing record, and an undecodable record all yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates store failures only.
    pub async fn get(&mut self) -> Result<Option<JobStatus>, StatusError> {
        Ok(self.fetch().await?.map(|record| record.status))
    }

    /// Returns the job's complete status record, or `None` under the same
    /// conditions as [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Propagates store failures only.
    pub async fn get_full(&mut self) -> Result<Option<StatusRecord>, StatusError> {
        self.fetch().await
    }

    /// Stops tracking the job: unconditionally deletes the main record
    /// key, regardless of tracking state.
    ///
    /// Side keys are left in place -- a stopped job's timing audit trail
    /// remains until the store's own expiry reclaims it. The tracking
    /// cache is not invalidated: a `Tracked` observation on this instance
    /// stands, and reads fall through to the absent-record sentinel.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn stop(&self) -> Result<(), StatusError> {
        self.store.del(&status_key(&self.id)).await?;
        Ok(())
    }

    async fn fetch(&mut self) -> Result<Option<StatusRecord>, StatusError> {
        if !self.is_tracking().await? {
            return Ok(None);
        }
        let raw = self.store.get(&status_key(&self.id)).await?;
        // A record that is present but undecodable reads as absent.
        Ok(raw.and_then(|payload| serde_json::from_str(&payload).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn tracking_commits_to_not_tracked_on_first_miss() {
        let store = InMemoryStore::new();
        let mut tracker = StatusTracker::new(store.clone(), "ghost");

        assert!(!tracker.is_tracking().await.unwrap());

        // A record appearing later is not observed by this instance.
        StatusTracker::new(store.clone(), "ghost")
            .create()
            .await
            .unwrap();
        assert!(!tracker.is_tracking().await.unwrap());
        assert_eq!(tracker.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn tracking_commits_to_tracked_on_first_hit() {
        let store = InMemoryStore::new();
        let mut tracker = StatusTracker::new(store.clone(), "job");
        tracker.create().await.unwrap();

        assert!(tracker.is_tracking().await.unwrap());

        // Out-of-band deletion is not observed by this instance.
        store.del(&status_key("job")).await.unwrap();
        assert!(tracker.is_tracking().await.unwrap());
    }

    #[tokio::test]
    async fn fresh_instance_observes_afresh() {
        let store = InMemoryStore::new();
        let mut first = StatusTracker::new(store.clone(), "job");
        assert!(!first.is_tracking().await.unwrap());

        first.create().await.unwrap();

        let mut second = StatusTracker::new(store.clone(), "job");
        assert!(second.is_tracking().await.unwrap());
    }

    #[tokio::test]
    async fn undecodable_record_reads_as_absent() {
        let store = InMemoryStore::new();
        let mut tracker = StatusTracker::new(store.clone(), "job");
        tracker.create().await.unwrap();

        store.set(&status_key("job"), "{garbage").await.unwrap();

        assert_eq!(tracker.get().await.unwrap(), None);
        assert_eq!(tracker.get_full().await.unwrap(), None);
        // The tracking cache is unaffected by the decode failure.
        assert!(tracker.is_tracking().await.unwrap());
    }

    #[tokio::test]
    async fn update_records_out_of_order_transitions() {
        let store = InMemoryStore::new();
        let mut tracker = StatusTracker::new(store, "job");
        tracker.create().await.unwrap();

        // The tracker is a recorder, not a validator.
        tracker
            .update(JobStatus::Complete, json!(null))
            .await
            .unwrap();
        tracker
            .update(JobStatus::Running, json!(null))
            .await
            .unwrap();
        assert_eq!(tracker.get().await.unwrap(), Some(JobStatus::Running));
    }
}
