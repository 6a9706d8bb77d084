use chrono::{DateTime, Utc};

use crate::ids::{LessonID, UserID};

/// Durable per-(viewer, lesson) playback record.
///
/// Created on the first progress tick, updated on every subsequent tick and
/// on completion. Position keeps updating after completion so a rewatch
/// resumes where the viewer left off.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LessonProgressRecord {
    pub user_id: UserID,
    pub lesson_id: LessonID,
    /// Last known playback position in seconds.
    pub position_secs: f64,
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl LessonProgressRecord {
    pub fn started(user_id: UserID, lesson_id: LessonID, position_secs: f64) -> Self {
        Self {
            user_id,
            lesson_id,
            position_secs,
            completed: false,
            updated_at: Utc::now(),
        }
    }
}

/// Position update sent on every playback tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdatePositionRequest {
    pub lesson_id: LessonID,
    pub position_secs: f64,
}
