use crate::ids::{CourseID, LessonID, ModuleID};

/// Which backend plays a lesson's video.
///
/// The two embedded providers are opaque iframes: the platform can show
/// them but cannot observe playback position. Only `direct-media` sources
/// are played through a host-controlled media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VideoProvider {
    EmbeddedA,
    EmbeddedB,
    DirectMedia,
}

impl VideoProvider {
    /// Embedded iframes never report position or completion.
    pub fn reports_progress(&self) -> bool {
        matches!(self, VideoProvider::DirectMedia)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoProvider::EmbeddedA => "embedded-a",
            VideoProvider::EmbeddedB => "embedded-b",
            VideoProvider::DirectMedia => "direct-media",
        }
    }
}

impl std::fmt::Display for VideoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider tag plus source locator (URL or provider-side ID).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoSource {
    pub provider: VideoProvider,
    pub locator: String,
}

impl VideoSource {
    pub fn new(provider: VideoProvider, locator: impl Into<String>) -> Self {
        Self {
            provider,
            locator: locator.into(),
        }
    }
}

/// A single lesson inside a module.
///
/// `position` orders lessons within their module; values may contain gaps
/// but are unique per module. Ties never occur beyond index order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lesson {
    pub id: LessonID,
    pub title: String,
    pub content: Option<String>,
    /// Advertised length in minutes, if known.
    pub duration_minutes: Option<u32>,
    /// Accessible without enrollment.
    pub free_preview: bool,
    pub position: i32,
    pub video: Option<VideoSource>,
}

impl Lesson {
    pub fn new(title: impl Into<String>, position: i32) -> Self {
        Self {
            id: LessonID::new(),
            title: title.into(),
            content: None,
            duration_minutes: None,
            free_preview: false,
            position,
            video: None,
        }
    }

    pub fn with_video(mut self, video: VideoSource) -> Self {
        self.video = Some(video);
        self
    }

    pub fn with_free_preview(mut self) -> Self {
        self.free_preview = true;
        self
    }
}

/// Ordered group of lessons inside a course. Immutable during playback.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseModule {
    pub id: ModuleID,
    pub title: String,
    pub position: i32,
    pub lessons: Vec<Lesson>,
}

impl CourseModule {
    pub fn new(title: impl Into<String>, position: i32) -> Self {
        Self {
            id: ModuleID::new(),
            title: title.into(),
            position,
            lessons: Vec::new(),
        }
    }

    pub fn with_lessons(mut self, lessons: Vec<Lesson>) -> Self {
        self.lessons = lessons;
        self
    }
}

/// A course with its ordered modules.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    pub id: CourseID,
    pub title: String,
    pub modules: Vec<CourseModule>,
}

impl Course {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: CourseID::new(),
            title: title.into(),
            modules: Vec::new(),
        }
    }

    pub fn with_modules(mut self, modules: Vec<CourseModule>) -> Self {
        self.modules = modules;
        self
    }

    /// Total lesson count across all modules.
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }

    pub fn lesson(&self, id: LessonID) -> Option<&Lesson> {
        self.modules
            .iter()
            .flat_map(|m| m.lessons.iter())
            .find(|l| l.id == id)
    }
}
