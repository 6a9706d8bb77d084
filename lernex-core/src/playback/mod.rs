//! Unified playback surface over heterogeneous video backends.
//!
//! Three provider kinds back a lesson video: two opaque embedded iframe
//! providers and one directly controlled media element. [`LessonPlayer`]
//! presents one control surface over all of them and emits
//! [`PlaybackEvent`]s for the progress tracker. The embedded providers
//! cannot report position or completion; that asymmetry is carried in
//! [`PlaybackCapabilities`] rather than papered over.

pub mod player;
pub mod source;

pub use player::{COMPLETION_WINDOW_SECS, LessonPlayer, PlaybackEvent};
pub use source::{PlaybackCapabilities, ResolvedSource, is_playable};
