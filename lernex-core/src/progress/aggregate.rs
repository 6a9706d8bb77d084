use std::collections::HashSet;

use lernex_model::{Course, LessonID};

use super::state::UserProgress;

/// Course completion percentage for display.
///
/// Distinct completed lessons over total lessons, rounded; a course with
/// zero lessons is 0 %, never a division by zero. Derived on demand from
/// the completion set so it cannot drift from it.
pub fn course_percentage(course: &Course, progress: &UserProgress) -> u8 {
    let course_lessons: HashSet<LessonID> = course
        .modules
        .iter()
        .flat_map(|m| m.lessons.iter())
        .map(|l| l.id)
        .collect();
    if course_lessons.is_empty() {
        return 0;
    }

    let completed = progress
        .completed_lessons()
        .filter(|id| course_lessons.contains(id))
        .count();
    ((100.0 * completed as f64) / course_lessons.len() as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use lernex_model::{CourseModule, Lesson};

    fn course_with_lessons(count: usize) -> Course {
        let lessons = (0..count)
            .map(|i| Lesson::new(format!("Lesson {i}"), i as i32))
            .collect();
        Course::new("Course").with_modules(vec![
            CourseModule::new("Only module", 1).with_lessons(lessons),
        ])
    }

    #[test]
    fn empty_course_is_zero_percent() {
        let course = course_with_lessons(0);
        assert_eq!(course_percentage(&course, &UserProgress::new()), 0);
    }

    #[test]
    fn one_of_four_is_twenty_five_percent() {
        let course = course_with_lessons(4);
        let mut progress = UserProgress::new();
        progress.mark_completed(course.modules[0].lessons[0].id);
        assert_eq!(course_percentage(&course, &progress), 25);
    }

    #[test]
    fn hundred_percent_iff_every_lesson_completed() {
        let course = course_with_lessons(3);
        let mut progress = UserProgress::new();
        for lesson in &course.modules[0].lessons {
            assert_ne!(course_percentage(&course, &progress), 100);
            progress.mark_completed(lesson.id);
        }
        assert_eq!(course_percentage(&course, &progress), 100);
    }

    #[test]
    fn foreign_completions_do_not_count() {
        let course = course_with_lessons(2);
        let mut progress = UserProgress::new();
        progress.mark_completed(LessonID::new());
        assert_eq!(course_percentage(&course, &progress), 0);
    }

    #[test]
    fn rounding_is_to_nearest() {
        let course = course_with_lessons(3);
        let mut progress = UserProgress::new();
        progress.mark_completed(course.modules[0].lessons[0].id);
        // 1/3 -> 33, 2/3 -> 67
        assert_eq!(course_percentage(&course, &progress), 33);
        progress.mark_completed(course.modules[0].lessons[1].id);
        assert_eq!(course_percentage(&course, &progress), 67);
    }
}
