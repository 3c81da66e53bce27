//! Test-only helpers for constructing courses, students and directories.

use crate::core::course::{Course, CourseSpec, DEFAULT_CAPACITY};
use crate::core::directory::Directory;
use crate::core::error::IdentField;
use crate::core::ident::{Ident, spelled_keys};
use crate::core::student::{Student, StudentSpec};

fn ident(field: IdentField, raw: &str) -> Ident {
    Ident::parse(field, raw).expect("valid test identity")
}

/// Create a course with default capacity through the normal validation path.
pub fn course(code: &str, credits: u32, prerequisites: &[&str]) -> Course {
    let spec = CourseSpec::new(code, &format!("{} title", code), credits)
        .capacity(DEFAULT_CAPACITY)
        .prerequisites(prerequisites.iter().copied());
    Course::from_spec(ident(IdentField::CourseCode, code), spec).expect("valid test course")
}

/// Create a course with an arbitrary capacity, skipping the 10-100 range check.
///
/// Lets tests fill a course with one or two students.
pub fn seat_limited_course(
    code: &str,
    credits: u32,
    capacity: u32,
    prerequisites: &[&str],
) -> Course {
    Course::from_parts(
        ident(IdentField::CourseCode, code),
        format!("{} title", code),
        credits,
        capacity,
        spelled_keys(prerequisites),
    )
}

/// Create a student with the given credit limit and completed courses.
pub fn student(id: &str, max_credits: u32, completed: &[&str]) -> Student {
    let spec = StudentSpec::new(id, &format!("{} name", id), "Undeclared")
        .max_credits(max_credits)
        .completed(completed.iter().copied());
    Student::from_spec(ident(IdentField::StudentId, id), spec).expect("valid test student")
}

/// Insert a prebuilt course (e.g. from [`seat_limited_course`]) into a directory.
pub fn insert_course(directory: &mut Directory, course: Course) {
    directory.insert_course(course);
}

/// Directory for the capacity-one CS101 scenario:
///
/// - `MATH100` (3 credits, capacity 30)
/// - `CS101` (3 credits, capacity 1, requires `MATH100`)
/// - `S001` and `S003` have completed `MATH100`; `S002` has not.
pub fn cs101_scenario() -> Directory {
    let mut dir = Directory::new();
    dir.add_course(CourseSpec::new("MATH100", "Basic Mathematics", 3).capacity(30))
        .expect("math100");
    insert_course(&mut dir, seat_limited_course("CS101", 3, 1, &["MATH100"]));
    let students: [(&str, &[&str]); 3] = [
        ("S001", &["MATH100"]),
        ("S002", &[]),
        ("S003", &["math100"]),
    ];
    for (id, completed) in students {
        let spec = StudentSpec::new(id, &format!("{} name", id), "Undeclared")
            .completed(completed.iter().copied());
        dir.add_student(spec).expect("student");
    }
    dir
}
