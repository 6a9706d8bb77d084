use std::collections::HashMap;

use lernex_model::{LessonID, LessonProgressRecord};

/// Per-lesson playback status as seen by the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LessonStatus {
    NotStarted,
    InProgress { position_secs: f64 },
    Completed { position_secs: f64 },
}

impl LessonStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, LessonStatus::Completed { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LessonEntry {
    position_secs: f64,
    completed: bool,
    updated_at: i64,
}

/// A viewer's in-memory progress across lessons.
///
/// Completion is monotone: once a lesson is completed no position tick
/// moves it back, though the position keeps updating for resume. The
/// durable copy lives in the store; this map is the authoritative
/// in-session view.
#[derive(Debug, Clone, Default)]
pub struct UserProgress {
    entries: HashMap<LessonID, LessonEntry>,
}

impl UserProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from durable records, for resume across sessions.
    pub fn from_records(records: impl IntoIterator<Item = LessonProgressRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|r| {
                (
                    r.lesson_id,
                    LessonEntry {
                        position_secs: r.position_secs,
                        completed: r.completed,
                        updated_at: r.updated_at.timestamp(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn status(&self, lesson_id: LessonID) -> LessonStatus {
        match self.entries.get(&lesson_id) {
            None => LessonStatus::NotStarted,
            Some(entry) if entry.completed => LessonStatus::Completed {
                position_secs: entry.position_secs,
            },
            Some(entry) => LessonStatus::InProgress {
                position_secs: entry.position_secs,
            },
        }
    }

    pub fn is_completed(&self, lesson_id: LessonID) -> bool {
        self.entries
            .get(&lesson_id)
            .is_some_and(|entry| entry.completed)
    }

    /// Position to resume from, if the lesson was ever started.
    pub fn resume_position(&self, lesson_id: LessonID) -> Option<f64> {
        self.entries.get(&lesson_id).map(|entry| entry.position_secs)
    }

    pub fn completed_lessons(&self) -> impl Iterator<Item = LessonID> + '_ {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.completed)
            .map(|(id, _)| *id)
    }

    /// Record a position tick. First tick moves the lesson out of
    /// `NotStarted`; a completed lesson only has its resume position
    /// refreshed.
    pub fn update_position(&mut self, lesson_id: LessonID, position_secs: f64) -> LessonStatus {
        let now = chrono::Utc::now().timestamp();
        let entry = self.entries.entry(lesson_id).or_insert(LessonEntry {
            position_secs: 0.0,
            completed: false,
            updated_at: now,
        });
        entry.position_secs = position_secs.max(0.0);
        entry.updated_at = now;
        self.status(lesson_id)
    }

    /// Flip the completion flag. Returns `true` only on the transition,
    /// so callers persist the durable completion write exactly once.
    pub fn mark_completed(&mut self, lesson_id: LessonID) -> bool {
        let now = chrono::Utc::now().timestamp();
        let entry = self.entries.entry(lesson_id).or_insert(LessonEntry {
            position_secs: 0.0,
            completed: false,
            updated_at: now,
        });
        if entry.completed {
            return false;
        }
        entry.completed = true;
        entry.updated_at = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_starts_the_lesson() {
        let lesson = LessonID::new();
        let mut progress = UserProgress::new();
        assert_eq!(progress.status(lesson), LessonStatus::NotStarted);

        let status = progress.update_position(lesson, 12.5);
        assert_eq!(
            status,
            LessonStatus::InProgress {
                position_secs: 12.5
            }
        );
    }

    #[test]
    fn completion_is_monotone_under_later_ticks() {
        let lesson = LessonID::new();
        let mut progress = UserProgress::new();
        progress.update_position(lesson, 50.0);
        assert!(progress.mark_completed(lesson));

        // Position still updates for resume, state never reverts.
        let status = progress.update_position(lesson, 10.0);
        assert_eq!(
            status,
            LessonStatus::Completed {
                position_secs: 10.0
            }
        );
        assert!(progress.is_completed(lesson));

        // Second completion is not a transition.
        assert!(!progress.mark_completed(lesson));
    }

    #[test]
    fn manual_completion_works_without_any_tick() {
        let lesson = LessonID::new();
        let mut progress = UserProgress::new();
        assert!(progress.mark_completed(lesson));
        assert!(progress.status(lesson).is_completed());
    }
}
