//! Cross-record invariants of a directory.

use std::collections::{BTreeMap, HashSet};

use crate::core::directory::Directory;
use crate::core::ident::Key;

/// Check invariants that span courses and students:
/// - `enrollment <= capacity` for every course
/// - a course's enrollment equals the number of students registered for it
/// - no course lists itself as a prerequisite
/// - registered credits never exceed a student's `max_credits`
/// - no student is registered twice for the same course
/// - every registration points at an existing course with matching credits
///
/// Returns a list of stable error messages (empty on success), in code/id order.
pub fn validate_invariants(directory: &Directory) -> Vec<String> {
    let mut errors = Vec::new();
    let mut registered: BTreeMap<&Key, u32> = BTreeMap::new();

    for student in directory.students() {
        let id = student.id();
        let mut seen = HashSet::new();
        for reg in student.registrations() {
            if !seen.insert(reg.course()) {
                errors.push(format!("{id}: registered twice for {}", reg.course()));
            }
            *registered.entry(reg.course()).or_default() += 1;

            match directory.find_course(reg.course().as_str()) {
                Some(course) if course.credits() != reg.credits() => errors.push(format!(
                    "{id}: registration for {} carries {} credits but course has {}",
                    reg.course(),
                    reg.credits(),
                    course.credits()
                )),
                Some(_) => {}
                None => errors.push(format!(
                    "{id}: registered for unknown course {}",
                    reg.course()
                )),
            }
        }

        if student.total_credits() > student.max_credits() {
            errors.push(format!(
                "{id}: total credits {} exceeds max_credits {}",
                student.total_credits(),
                student.max_credits()
            ));
        }
    }

    for course in directory.courses() {
        let code = course.code();
        if course.enrollment() > course.capacity() {
            errors.push(format!(
                "{code}: enrollment {} exceeds capacity {}",
                course.enrollment(),
                course.capacity()
            ));
        }

        let counted = registered.get(code.key()).copied().unwrap_or(0);
        if counted != course.enrollment() {
            errors.push(format!(
                "{code}: enrollment {} but {} students registered",
                course.enrollment(),
                counted
            ));
        }

        if course.prerequisites().contains_key(code.key()) {
            errors.push(format!("{code}: lists itself as a prerequisite"));
        }
    }

    errors
}
