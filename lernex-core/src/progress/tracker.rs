use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use lernex_model::{LessonID, UserID};

use crate::error::{CoreError, Result};
use crate::playback::PlaybackEvent;
use crate::store::ProgressRepository;

use super::state::{LessonStatus, UserProgress};

/// Per-viewer progress tracking with asynchronous persistence.
///
/// Position ticks update the in-memory state synchronously and dispatch a
/// detached best-effort write; a failed write is simply superseded by the
/// next tick's write. The completion flag is the one write that matters,
/// so it is awaited and retried once before the failure is reported.
///
/// Dropping the tracker (navigating away) stops tick emission but never
/// cancels writes already dispatched.
pub struct ProgressTracker {
    user_id: UserID,
    store: Arc<dyn ProgressRepository>,
    progress: UserProgress,
    writes: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("user_id", &self.user_id)
            .field("pending_writes", &self.writes.len())
            .finish_non_exhaustive()
    }
}

impl ProgressTracker {
    pub fn new(user_id: UserID, store: Arc<dyn ProgressRepository>) -> Self {
        Self {
            user_id,
            store,
            progress: UserProgress::new(),
            writes: Vec::new(),
        }
    }

    /// Build a tracker hydrated from the durable store, so lessons resume
    /// where the viewer left off.
    pub async fn load(user_id: UserID, store: Arc<dyn ProgressRepository>) -> Result<Self> {
        let records = store.user_progress(user_id).await?;
        Ok(Self {
            user_id,
            store,
            progress: UserProgress::from_records(records),
            writes: Vec::new(),
        })
    }

    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    /// Explicit play on a not-yet-started lesson; memory only, the durable
    /// record appears with the first tick.
    pub fn begin(&mut self, lesson_id: LessonID) -> LessonStatus {
        let position = self.progress.resume_position(lesson_id).unwrap_or(0.0);
        self.progress.update_position(lesson_id, position)
    }

    /// Record a playback position tick.
    ///
    /// The durable write is fire-and-forget: it must never block or
    /// interrupt playback. On failure the position is retried implicitly,
    /// because the next tick writes the newer position anyway.
    pub fn record_tick(&mut self, lesson_id: LessonID, position_secs: f64) -> LessonStatus {
        let status = self.progress.update_position(lesson_id, position_secs);

        self.writes.retain(|handle| !handle.is_finished());
        let store = Arc::clone(&self.store);
        let user_id = self.user_id;
        self.writes.push(tokio::spawn(async move {
            if let Err(err) = store.upsert_position(user_id, lesson_id, position_secs).await {
                warn!(%user_id, %lesson_id, %err, "position write failed, superseded by next tick");
            }
        }));

        status
    }

    /// Transition a lesson to `Completed`.
    ///
    /// Covers both the adapter's completion signal and the explicit
    /// mark-complete action (the only completion path for embedded
    /// providers). The durable write is retried once; after the retry the
    /// failure is reported, but the in-memory completion stands (monotone)
    /// and a later attempt may persist it.
    pub async fn mark_completed(&mut self, lesson_id: LessonID) -> Result<LessonStatus> {
        let position = self.progress.resume_position(lesson_id).unwrap_or(0.0);
        if !self.progress.mark_completed(lesson_id) {
            debug!(%lesson_id, "completion already recorded");
            return Ok(self.progress.status(lesson_id));
        }

        let mut attempt = self
            .store
            .mark_completed(self.user_id, lesson_id, position)
            .await;
        if let Err(err) = &attempt {
            warn!(user_id = %self.user_id, %lesson_id, %err, "completion write failed, retrying");
            attempt = self
                .store
                .mark_completed(self.user_id, lesson_id, position)
                .await;
        }
        if let Err(err) = attempt {
            error!(user_id = %self.user_id, %lesson_id, %err, "completion write failed after retry");
            return Err(CoreError::PersistenceTransient(err.to_string()));
        }

        Ok(self.progress.status(lesson_id))
    }

    /// Route one adapter event.
    pub async fn apply(&mut self, lesson_id: LessonID, event: PlaybackEvent) -> Result<LessonStatus> {
        match event {
            PlaybackEvent::Progress { position_secs } => {
                Ok(self.record_tick(lesson_id, position_secs))
            }
            PlaybackEvent::Completed => self.mark_completed(lesson_id).await,
        }
    }

    /// Await all dispatched position writes. Teardown and tests; playback
    /// paths never call this.
    pub async fn settle(&mut self) {
        for handle in self.writes.drain(..) {
            let _ = handle.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ports::MockProgressRepository;
    use crate::store::{MemoryStore, StoreError};
    use mockall::Sequence;

    #[tokio::test]
    async fn ticks_reach_the_store() {
        let store = MemoryStore::new();
        let user = UserID::new();
        let lesson = LessonID::new();
        let mut tracker = ProgressTracker::new(user, Arc::new(store.clone()));

        let status = tracker.record_tick(lesson, 42.0);
        assert_eq!(
            status,
            LessonStatus::InProgress {
                position_secs: 42.0
            }
        );

        tracker.settle().await;
        let record = store.lesson_progress(user, lesson).await.unwrap().unwrap();
        assert_eq!(record.position_secs, 42.0);
        assert!(!record.completed);
    }

    #[tokio::test]
    async fn completion_write_is_retried_once() {
        let user = UserID::new();
        let lesson = LessonID::new();

        let mut mock = MockProgressRepository::new();
        let mut seq = Sequence::new();
        mock.expect_mark_completed()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(StoreError::Unavailable("connection reset".into())));
        mock.expect_mark_completed()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let mut tracker = ProgressTracker::new(user, Arc::new(mock));
        let status = tracker.mark_completed(lesson).await.unwrap();
        assert!(status.is_completed());
    }

    #[tokio::test]
    async fn completion_failure_after_retry_keeps_memory_state() {
        let user = UserID::new();
        let lesson = LessonID::new();

        let mut mock = MockProgressRepository::new();
        mock.expect_mark_completed()
            .times(2)
            .returning(|_, _, _| Err(StoreError::Unavailable("down".into())));

        let mut tracker = ProgressTracker::new(user, Arc::new(mock));
        let err = tracker.mark_completed(lesson).await.unwrap_err();
        assert!(matches!(err, CoreError::PersistenceTransient(_)));
        // In-memory completion is monotone even when the write failed.
        assert!(tracker.progress().is_completed(lesson));
    }

    #[tokio::test]
    async fn repeated_completion_writes_once() {
        let user = UserID::new();
        let lesson = LessonID::new();

        let mut mock = MockProgressRepository::new();
        mock.expect_mark_completed()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut tracker = ProgressTracker::new(user, Arc::new(mock));
        tracker.mark_completed(lesson).await.unwrap();
        tracker.mark_completed(lesson).await.unwrap();
    }

    #[tokio::test]
    async fn dropping_the_tracker_does_not_cancel_dispatched_writes() {
        let store = MemoryStore::new();
        let user = UserID::new();
        let lesson = LessonID::new();

        let mut tracker = ProgressTracker::new(user, Arc::new(store.clone()));
        tracker.record_tick(lesson, 17.0);
        drop(tracker);

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let record = store.lesson_progress(user, lesson).await.unwrap();
        assert!(record.is_some());
    }

    #[tokio::test]
    async fn position_still_updates_after_completion() {
        let store = MemoryStore::new();
        let user = UserID::new();
        let lesson = LessonID::new();
        let mut tracker = ProgressTracker::new(user, Arc::new(store.clone()));

        tracker.record_tick(lesson, 100.0);
        tracker.mark_completed(lesson).await.unwrap();
        tracker.record_tick(lesson, 5.0);
        tracker.settle().await;

        let record = store.lesson_progress(user, lesson).await.unwrap().unwrap();
        assert!(record.completed, "position write must not clear completion");
        assert_eq!(record.position_secs, 5.0);
        assert!(tracker.progress().is_completed(lesson));
    }
}
