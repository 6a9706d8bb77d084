use tracing::debug;

use lernex_model::{Lesson, LessonID};

use crate::access::can_access;
use crate::error::{CoreError, Result};

use super::source::{PlaybackCapabilities, ResolvedSource};

/// A direct-media lesson counts as finished once remaining time drops
/// below this window. Fixed regardless of total duration, which makes it
/// coarse on very short lessons; kept that way deliberately.
pub const COMPLETION_WINDOW_SECS: f64 = 2.0;

/// Outbound playback signal, consumed by the progress tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    Progress { position_secs: f64 },
    Completed,
}

/// Unified player over one lesson's video source.
///
/// Owns the component-local playback state (position, volume, fullscreen)
/// for its lifetime. Embedded sources accept `start`/`pause` only; every
/// other control is a no-op on them, and they never produce events.
#[derive(Debug)]
pub struct LessonPlayer {
    lesson_id: LessonID,
    source: ResolvedSource,
    position_secs: f64,
    duration_secs: Option<f64>,
    volume: f64,
    muted: bool,
    fullscreen: bool,
    playing: bool,
    /// Resume target, applied at the first ready state before playback is
    /// user-visible.
    pending_resume: Option<f64>,
    completion_emitted: bool,
}

impl LessonPlayer {
    /// Open a lesson for playback.
    ///
    /// Access is checked before the source is even resolved; a viewer who
    /// is neither enrolled nor looking at a free preview never initializes
    /// a backend.
    pub fn open(lesson: &Lesson, is_enrolled: bool) -> Result<Self> {
        if !can_access(lesson, is_enrolled) {
            return Err(CoreError::AccessDenied);
        }
        let video = lesson.video.as_ref().ok_or_else(|| {
            CoreError::UnresolvableSource(format!("lesson {} has no video", lesson.id))
        })?;
        let source = ResolvedSource::resolve(video)?;
        debug!(lesson = %lesson.id, provider = ?source.capabilities(), "opened lesson player");
        Ok(Self {
            lesson_id: lesson.id,
            source,
            position_secs: 0.0,
            duration_secs: None,
            volume: 1.0,
            muted: false,
            fullscreen: false,
            playing: false,
            pending_resume: None,
            completion_emitted: false,
        })
    }

    /// Resume position for a viewer coming back to the lesson.
    pub fn with_initial_position(mut self, position_secs: f64) -> Self {
        self.pending_resume = Some(position_secs.max(0.0));
        self
    }

    pub fn lesson_id(&self) -> LessonID {
        self.lesson_id
    }

    pub fn capabilities(&self) -> PlaybackCapabilities {
        self.source.capabilities()
    }

    pub fn source(&self) -> &ResolvedSource {
        &self.source
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_secs
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f64 {
        if self.muted { 0.0 } else { self.volume }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Begin playback. For embeds this means the iframe is shown; there is
    /// nothing else to control.
    pub fn start(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// First ready state of the media element: duration becomes known and
    /// any pending resume position is applied before the viewer sees
    /// playback. Returns the effective start position.
    pub fn on_ready(&mut self, duration_secs: f64) -> f64 {
        self.duration_secs = Some(duration_secs.max(0.0));
        if let Some(resume) = self.pending_resume.take() {
            self.position_secs = clamp_position(resume, self.duration_secs);
        }
        self.position_secs
    }

    /// Seek to a position, clamped to `[0, duration]`. Out-of-range input
    /// is clamped, never rejected. No-op on embeds.
    pub fn seek(&mut self, position_secs: f64) -> f64 {
        if !self.capabilities().seekable {
            return self.position_secs;
        }
        self.position_secs = clamp_position(position_secs, self.duration_secs);
        self.position_secs
    }

    /// Volume in `[0, 1]`; out-of-range input is clamped.
    pub fn set_volume(&mut self, level: f64) {
        self.volume = level.clamp(0.0, 1.0);
    }

    pub fn mute(&mut self) {
        self.muted = true;
    }

    pub fn unmute(&mut self) {
        self.muted = false;
    }

    pub fn request_fullscreen(&mut self) {
        self.fullscreen = true;
    }

    pub fn exit_fullscreen(&mut self) {
        self.fullscreen = false;
    }

    /// Native time-update tick from the media element.
    ///
    /// Only direct sources produce ticks; a tick against an embed is
    /// ignored. Emits a progress event on every tick and a single
    /// completion event once remaining time falls below
    /// [`COMPLETION_WINDOW_SECS`].
    pub fn time_update(&mut self, position_secs: f64) -> Vec<PlaybackEvent> {
        if !self.capabilities().reports_progress {
            return Vec::new();
        }

        self.position_secs = clamp_position(position_secs, self.duration_secs);
        self.playing = true;
        let mut events = vec![PlaybackEvent::Progress {
            position_secs: self.position_secs,
        }];

        if !self.completion_emitted
            && let Some(duration) = self.duration_secs
            && duration > 0.0
            && duration - self.position_secs < COMPLETION_WINDOW_SECS
        {
            self.completion_emitted = true;
            events.push(PlaybackEvent::Completed);
        }

        events
    }
}

fn clamp_position(position_secs: f64, duration_secs: Option<f64>) -> f64 {
    let floor = position_secs.max(0.0);
    match duration_secs {
        Some(duration) => floor.min(duration),
        None => floor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lernex_model::{VideoProvider, VideoSource};

    fn direct_lesson() -> Lesson {
        Lesson::new("Setup", 1)
            .with_video(VideoSource::new(VideoProvider::DirectMedia, "media/setup.mp4"))
    }

    fn embed_lesson() -> Lesson {
        Lesson::new("Welcome", 1)
            .with_free_preview()
            .with_video(VideoSource::new(
                VideoProvider::EmbeddedA,
                "https://embed.example/v/welcome",
            ))
    }

    #[test]
    fn denied_access_never_initializes_a_backend() {
        let lesson = direct_lesson();
        assert!(matches!(
            LessonPlayer::open(&lesson, false),
            Err(CoreError::AccessDenied)
        ));
    }

    #[test]
    fn free_preview_opens_without_enrollment() {
        let lesson = embed_lesson();
        let player = LessonPlayer::open(&lesson, false).unwrap();
        assert_eq!(player.capabilities(), PlaybackCapabilities::EMBED);
    }

    #[test]
    fn completion_fires_once_inside_end_window() {
        let lesson = direct_lesson();
        let mut player = LessonPlayer::open(&lesson, true).unwrap();
        player.on_ready(600.0);
        player.start();

        let events = player.time_update(595.0);
        assert_eq!(
            events,
            vec![PlaybackEvent::Progress {
                position_secs: 595.0
            }]
        );

        let events = player.time_update(598.5);
        assert!(events.contains(&PlaybackEvent::Completed));

        // Terminal: a later tick never re-emits completion.
        let events = player.time_update(599.0);
        assert_eq!(
            events,
            vec![PlaybackEvent::Progress {
                position_secs: 599.0
            }]
        );
    }

    #[test]
    fn seek_clamps_to_duration() {
        let lesson = direct_lesson();
        let mut player = LessonPlayer::open(&lesson, true).unwrap();
        player.on_ready(120.0);
        assert_eq!(player.seek(500.0), 120.0);
        assert_eq!(player.seek(-3.0), 0.0);
    }

    #[test]
    fn resume_applied_at_first_ready() {
        let lesson = direct_lesson();
        let mut player = LessonPlayer::open(&lesson, true)
            .unwrap()
            .with_initial_position(90.0);
        assert_eq!(player.position_secs(), 0.0);
        assert_eq!(player.on_ready(600.0), 90.0);
    }

    #[test]
    fn embeds_ignore_ticks_and_seeks() {
        let lesson = embed_lesson();
        let mut player = LessonPlayer::open(&lesson, false).unwrap();
        player.start();
        assert!(player.time_update(30.0).is_empty());
        assert_eq!(player.seek(30.0), 0.0);
    }

    #[test]
    fn volume_and_mute_are_clamped_local_state() {
        let lesson = direct_lesson();
        let mut player = LessonPlayer::open(&lesson, true).unwrap();
        player.set_volume(2.5);
        assert_eq!(player.volume(), 1.0);
        player.mute();
        assert_eq!(player.volume(), 0.0);
        player.unmute();
        assert_eq!(player.volume(), 1.0);
    }
}
