use url::Url;

use lernex_model::{Lesson, VideoProvider, VideoSource};

use crate::error::{CoreError, Result};

/// What a resolved playback backend can do.
///
/// Embedded iframes are opaque: no position reporting, no seeking. Their
/// lessons complete only through the explicit mark-complete path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackCapabilities {
    pub reports_progress: bool,
    pub seekable: bool,
}

impl PlaybackCapabilities {
    pub const EMBED: Self = Self {
        reports_progress: false,
        seekable: false,
    };

    pub const DIRECT: Self = Self {
        reports_progress: true,
        seekable: true,
    };
}

/// A validated playback source.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedSource {
    /// Opaque third-party embed, shown in an iframe.
    Embed { provider: VideoProvider, url: Url },
    /// Host-controlled media element.
    Direct { locator: String },
}

impl ResolvedSource {
    /// Validate a lesson's video source.
    ///
    /// Embeds need a well-formed http(s) URL; a direct source needs a
    /// non-empty locator. Anything else is a permanently non-playable
    /// lesson, reported as [`CoreError::UnresolvableSource`].
    pub fn resolve(source: &VideoSource) -> Result<Self> {
        match source.provider {
            VideoProvider::EmbeddedA | VideoProvider::EmbeddedB => {
                let url = Url::parse(source.locator.trim()).map_err(|e| {
                    CoreError::UnresolvableSource(format!(
                        "{} embed locator {:?}: {e}",
                        source.provider, source.locator
                    ))
                })?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(CoreError::UnresolvableSource(format!(
                        "{} embed locator {:?}: unsupported scheme",
                        source.provider, source.locator
                    )));
                }
                Ok(ResolvedSource::Embed {
                    provider: source.provider,
                    url,
                })
            }
            VideoProvider::DirectMedia => {
                let locator = source.locator.trim();
                if locator.is_empty() {
                    return Err(CoreError::UnresolvableSource(
                        "direct-media source with empty locator".to_string(),
                    ));
                }
                Ok(ResolvedSource::Direct {
                    locator: locator.to_string(),
                })
            }
        }
    }

    pub fn capabilities(&self) -> PlaybackCapabilities {
        match self {
            ResolvedSource::Embed { .. } => PlaybackCapabilities::EMBED,
            ResolvedSource::Direct { .. } => PlaybackCapabilities::DIRECT,
        }
    }
}

/// Whether the lesson can play at all, independent of access rights.
///
/// False for lessons without video and for unresolvable locators.
pub fn is_playable(lesson: &Lesson) -> bool {
    lesson
        .video
        .as_ref()
        .is_some_and(|v| ResolvedSource::resolve(v).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_requires_http_url() {
        let good = VideoSource::new(VideoProvider::EmbeddedA, "https://embed.example/v/42");
        assert!(ResolvedSource::resolve(&good).is_ok());

        let bad = VideoSource::new(VideoProvider::EmbeddedB, "not a url");
        assert!(matches!(
            ResolvedSource::resolve(&bad),
            Err(CoreError::UnresolvableSource(_))
        ));

        let scheme = VideoSource::new(VideoProvider::EmbeddedA, "ftp://embed.example/v/42");
        assert!(ResolvedSource::resolve(&scheme).is_err());
    }

    #[test]
    fn direct_rejects_empty_locator() {
        let empty = VideoSource::new(VideoProvider::DirectMedia, "   ");
        assert!(ResolvedSource::resolve(&empty).is_err());

        let ok = VideoSource::new(VideoProvider::DirectMedia, "media/lesson-1.mp4");
        let resolved = ResolvedSource::resolve(&ok).unwrap();
        assert_eq!(resolved.capabilities(), PlaybackCapabilities::DIRECT);
    }

    #[test]
    fn lesson_without_video_is_not_playable() {
        let lesson = Lesson::new("Intro", 1);
        assert!(!is_playable(&lesson));

        let playable = Lesson::new("Intro", 1).with_video(VideoSource::new(
            VideoProvider::DirectMedia,
            "media/intro.mp4",
        ));
        assert!(is_playable(&playable));
    }
}
