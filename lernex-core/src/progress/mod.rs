//! Lesson progress tracking and course-level aggregation.
//!
//! [`UserProgress`] is the in-memory state machine (`NotStarted` →
//! `InProgress` → `Completed`, completion terminal), [`ProgressTracker`]
//! adds durable persistence on top of it, and [`course_percentage`]
//! derives the course view from the completion set.

pub mod aggregate;
pub mod state;
pub mod tracker;

pub use aggregate::course_percentage;
pub use state::{LessonStatus, UserProgress};
pub use tracker::ProgressTracker;
