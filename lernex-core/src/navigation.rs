//! Lesson ordering and next-lesson navigation.
//!
//! Lessons are totally ordered by (module position, lesson position);
//! position keys may contain gaps, and equal keys fall back to index
//! order (stable sort).

use lernex_model::{Course, CourseModule, Lesson, LessonID};

use crate::access::can_access;

/// All lessons of a course in playback order.
pub fn ordered_lessons(course: &Course) -> Vec<&Lesson> {
    let mut modules: Vec<&CourseModule> = course.modules.iter().collect();
    modules.sort_by_key(|m| m.position);

    let mut ordered = Vec::with_capacity(course.lesson_count());
    for module in modules {
        let mut lessons: Vec<&Lesson> = module.lessons.iter().collect();
        lessons.sort_by_key(|l| l.position);
        ordered.extend(lessons);
    }
    ordered
}

/// The lesson immediately after `current`, or `None` on the last lesson of
/// the last module (or when `current` is not part of the course).
pub fn next_lesson(course: &Course, current: LessonID) -> Option<&Lesson> {
    let ordered = ordered_lessons(course);
    let index = ordered.iter().position(|l| l.id == current)?;
    ordered.get(index + 1).copied()
}

/// Must be consulted before a "next lesson" action is offered.
pub fn has_next_lesson(course: &Course, current: LessonID) -> bool {
    next_lesson(course, current).is_some()
}

/// Sidebar selection: picking a lesson the viewer cannot access is a
/// no-op, not an error.
pub fn select_lesson(
    course: &Course,
    lesson_id: LessonID,
    is_enrolled: bool,
) -> Option<&Lesson> {
    let lesson = course.lesson(lesson_id)?;
    if !can_access(lesson, is_enrolled) {
        return None;
    }
    Some(lesson)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lernex_model::CourseModule;

    fn course() -> Course {
        // Position keys intentionally gapped; module two listed first.
        let basics = CourseModule::new("Basics", 10).with_lessons(vec![
            Lesson::new("Intro", 5).with_free_preview(),
            Lesson::new("Tooling", 20),
        ]);
        let advanced = CourseModule::new("Advanced", 30)
            .with_lessons(vec![Lesson::new("Async", 1), Lesson::new("Capstone", 2)]);
        Course::new("Rust from zero").with_modules(vec![advanced, basics])
    }

    #[test]
    fn order_follows_module_then_lesson_position() {
        let course = course();
        let titles: Vec<&str> = ordered_lessons(&course)
            .iter()
            .map(|l| l.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Intro", "Tooling", "Async", "Capstone"]);
    }

    #[test]
    fn next_lesson_crosses_module_boundary() {
        let course = course();
        let ordered = ordered_lessons(&course);
        let tooling = ordered[1].id;
        assert_eq!(next_lesson(&course, tooling).unwrap().title, "Async");
    }

    #[test]
    fn last_lesson_has_no_next() {
        let course = course();
        let last = ordered_lessons(&course).last().unwrap().id;
        assert!(next_lesson(&course, last).is_none());
        assert!(!has_next_lesson(&course, last));
    }

    #[test]
    fn selecting_inaccessible_lesson_is_a_no_op() {
        let course = course();
        let ordered = ordered_lessons(&course);
        let preview = ordered[0].id;
        let gated = ordered[1].id;

        assert!(select_lesson(&course, preview, false).is_some());
        assert!(select_lesson(&course, gated, false).is_none());
        assert!(select_lesson(&course, gated, true).is_some());
    }
}
