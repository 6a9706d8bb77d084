//! # Lernex Core
//!
//! Core library for the Lernex course platform: lesson playback over
//! heterogeneous video backends, per-viewer progress tracking, enrollment
//! based access control, course-level progress aggregation, and
//! certificate eligibility/issuance.
//!
//! ## Overview
//!
//! - **Playback**: one player surface over embedded iframe providers and
//!   directly controlled media, with an explicit capability gap for the
//!   opaque embeds
//! - **Progress Tracking**: monotone `NotStarted → InProgress → Completed`
//!   state per (viewer, lesson), persisted best-effort during playback
//! - **Access Control**: enrollment-or-free-preview gating, re-evaluated
//!   whenever enrollment state changes
//! - **Navigation**: (module, lesson) total ordering and next-lesson
//!   computation
//! - **Certificates**: paid-enrollment vs. issued-certificate diffing and
//!   administrative issuance
//! - **Store Abstraction**: trait-based repository ports with in-memory
//!   and Postgres adapters
//!
//! ## Feature Flags
//!
//! - `database`: enables the Postgres/SQLx store adapter
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lernex_core::playback::LessonPlayer;
//! use lernex_core::progress::{ProgressTracker, course_percentage};
//! use lernex_core::store::MemoryStore;
//! use lernex_model::{Course, CourseModule, Lesson, UserID, VideoProvider, VideoSource};
//!
//! # async fn run() -> lernex_core::Result<()> {
//! let course = Course::new("Rust from zero").with_modules(vec![
//!     CourseModule::new("Basics", 1).with_lessons(vec![
//!         Lesson::new("Intro", 1).with_free_preview().with_video(VideoSource::new(
//!             VideoProvider::DirectMedia,
//!             "media/intro.mp4",
//!         )),
//!     ]),
//! ]);
//!
//! let lesson = &course.modules[0].lessons[0];
//! let mut player = LessonPlayer::open(lesson, false)?;
//! let mut tracker = ProgressTracker::new(UserID::new(), Arc::new(MemoryStore::new()));
//!
//! player.on_ready(600.0);
//! player.start();
//! for event in player.time_update(599.0) {
//!     tracker.apply(lesson.id, event).await?;
//! }
//! assert_eq!(course_percentage(&course, tracker.progress()), 100);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Lesson access policy (enrollment / free preview)
pub mod access;

/// Certificate eligibility scanning and issuance
pub mod certificates;

/// Layered runtime configuration
pub mod config;

/// Enrollment insertion with duplicate detection
pub mod enrollment;

/// Error types and error handling utilities
pub mod error;

/// Lesson ordering and next-lesson navigation
pub mod navigation;

/// Unified playback over embedded and direct video sources
pub mod playback;

/// Curated re-exports
pub mod prelude;

/// Progress state machine, tracker, and course aggregation
pub mod progress;

/// Current-user session handle and auth-change stream
pub mod session;

/// Repository ports and store adapters
pub mod store;

pub use error::{CoreError, Result};
