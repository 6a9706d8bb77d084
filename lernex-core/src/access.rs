//! Lesson access policy.
//!
//! Pure decisions only; enrollment state can flip mid-session (a payment
//! confirmation arriving), so callers re-evaluate on every render instead
//! of caching the answer.

use lernex_model::Lesson;

use crate::playback::is_playable;

/// A viewer may play a lesson iff they are enrolled or the lesson is a
/// free preview.
pub fn can_access(lesson: &Lesson, is_enrolled: bool) -> bool {
    is_enrolled || lesson.free_preview
}

/// Combined per-lesson view for the sidebar: access rights and playability
/// are independent axes. An unresolvable source stays non-playable no
/// matter the access rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonAvailability {
    pub accessible: bool,
    pub playable: bool,
}

pub fn availability(lesson: &Lesson, is_enrolled: bool) -> LessonAvailability {
    LessonAvailability {
        accessible: can_access(lesson, is_enrolled),
        playable: is_playable(lesson),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lernex_model::{VideoProvider, VideoSource};

    #[test]
    fn access_iff_enrolled_or_free_preview() {
        for enrolled in [false, true] {
            for free_preview in [false, true] {
                let mut lesson = Lesson::new("Any", 1);
                lesson.free_preview = free_preview;
                assert_eq!(
                    can_access(&lesson, enrolled),
                    enrolled || free_preview,
                    "enrolled={enrolled} free_preview={free_preview}"
                );
            }
        }
    }

    #[test]
    fn broken_source_is_unplayable_even_for_enrolled_viewers() {
        let lesson = Lesson::new("Broken", 1)
            .with_video(VideoSource::new(VideoProvider::EmbeddedB, "???"));
        let view = availability(&lesson, true);
        assert!(view.accessible);
        assert!(!view.playable);
    }
}
