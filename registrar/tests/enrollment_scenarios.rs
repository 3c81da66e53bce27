//! End-to-end registration scenarios over the public directory API.

use registrar::core::course::CourseSpec;
use registrar::core::directory::Directory;
use registrar::core::error::{ErrorKind, Rejection, RegistrarError, ValidationError};
use registrar::core::invariants::validate_invariants;
use registrar::core::student::StudentSpec;
use registrar::test_support::cs101_scenario;

fn rejection(err: &RegistrarError) -> &Rejection {
    err.rejection().expect("business-rule rejection")
}

/// CS101 has one seat and requires MATH100.
///
/// 1. S001 (completed MATH100) registers: total credits 3, enrollment 1/1.
/// 2. S002 (no MATH100) is refused for prerequisites, not capacity.
/// 3. S003 (completed "math100") is refused because the course is full.
#[test]
fn capacity_one_course_fills_then_refuses() {
    let mut dir = cs101_scenario();

    let receipt = dir.register("S001", "CS101").expect("S001 registers");
    assert_eq!(receipt.total_credits, 3);
    assert_eq!(dir.find_student("S001").map(|s| s.total_credits()), Some(3));
    assert_eq!(dir.find_course("CS101").map(|c| c.enrollment()), Some(1));

    let err = dir.register("S002", "CS101").expect_err("S002 lacks MATH100");
    assert!(matches!(
        rejection(&err),
        Rejection::PrerequisitesNotMet { .. }
    ));
    assert!(err.to_string().starts_with("prerequisites not met"));

    let err = dir.register("S003", "CS101").expect_err("S003 finds it full");
    assert!(matches!(rejection(&err), Rejection::CourseFull { .. }));
    assert!(err.to_string().starts_with("course is full"));

    assert!(validate_invariants(&dir).is_empty());
}

#[test]
fn prerequisite_match_ignores_case() {
    let mut dir = Directory::new();
    dir.add_course(CourseSpec::new("MATH100", "Math", 3)).expect("math");
    dir.add_course(CourseSpec::new("CS101", "Intro", 3).prerequisites(["MATH100"]))
        .expect("cs101");
    dir.add_student(StudentSpec::new("S001", "Alice", "CS").completed(["math100"]))
        .expect("alice");
    dir.add_student(StudentSpec::new("S002", "Bob", "CS")).expect("bob");

    dir.register("S001", "CS101").expect("lowercase prerequisite accepted");
    let err = dir.register("S002", "CS101").expect_err("bob lacks MATH100");
    assert_eq!(
        rejection(&err),
        &Rejection::PrerequisitesNotMet {
            missing: vec!["MATH100".to_string()]
        }
    );
}

#[test]
fn registering_twice_is_refused_both_times() {
    let mut dir = Directory::new();
    dir.add_course(CourseSpec::new("MATH100", "Math", 3)).expect("math");
    dir.add_student(StudentSpec::new("S001", "Alice", "CS")).expect("alice");
    dir.register("S001", "MATH100").expect("first");

    for attempt in ["MATH100", "math100"] {
        let err = dir.register("S001", attempt).expect_err("duplicate");
        assert!(err.to_string().starts_with("already registered"));
    }
    assert_eq!(dir.find_course("MATH100").map(|c| c.enrollment()), Some(1));
}

#[test]
fn credit_limit_caps_registrations() {
    let mut dir = Directory::new();
    for code in ["BIO100", "CHEM100", "PHYS100"] {
        dir.add_course(CourseSpec::new(code, code, 4)).expect("course");
    }
    dir.add_student(StudentSpec::new("S001", "Alice", "Bio").max_credits(8))
        .expect("alice");

    dir.register("S001", "BIO100").expect("4/8");
    dir.register("S001", "CHEM100").expect("8/8");
    let err = dir.register("S001", "PHYS100").expect_err("12/8");
    assert_eq!(
        rejection(&err),
        &Rejection::CreditLimitExceeded {
            current: 8,
            max: 8,
            adding: 4
        }
    );

    dir.drop_course("S001", "bio100").expect("drop");
    let receipt = dir.register("S001", "PHYS100").expect("room again");
    assert_eq!(receipt.total_credits, 8);
}

#[test]
fn credits_boundary_on_add_course() {
    let mut dir = Directory::new();
    let err = dir
        .add_course(CourseSpec::new("CS999", "Too Heavy", 5))
        .expect_err("credits 5");
    assert_eq!(err, RegistrarError::Validation(ValidationError::Credits(5)));
    dir.add_course(CourseSpec::new("CS999", "Heavy", 4))
        .expect("credits 4");
}

#[test]
fn empty_directory_summary_has_zero_average() {
    let summary = Directory::new().summary();
    assert_eq!(summary.avg_enrollment, 0.0);
    assert_eq!(summary.total_courses, 0);
}

#[test]
fn unknown_records_are_not_found() {
    let mut dir = cs101_scenario();
    for err in [
        dir.register("S999", "CS101").expect_err("student"),
        dir.register("S001", "CS999").expect_err("course"),
        dir.drop_course("S999", "CS101").expect_err("drop student"),
        dir.student_schedule("S999").expect_err("schedule"),
    ] {
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
