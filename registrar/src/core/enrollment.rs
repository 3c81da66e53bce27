//! Enrollment coordinator.
//!
//! The only code allowed to change a student's registrations or a course's
//! enrollment count. Each operation checks every rule before it mutates anything,
//! then updates both records together, so a student never holds a registration the
//! course does not count (or the reverse).

use tracing::debug;

use crate::core::course::Course;
use crate::core::error::Rejection;
use crate::core::ident::Key;
use crate::core::student::{Registration, Student};
use crate::core::types::{DropReceipt, RegisterReceipt};

/// Check whether `student` may register for `course` without changing either.
///
/// Rules are applied in a fixed order and the first failure wins:
/// already registered, credit limit, prerequisites, capacity.
pub fn check_registration(student: &Student, course: &Course) -> Result<(), Rejection> {
    if student.is_registered_for_key(course.code().key()) {
        return Err(Rejection::AlreadyRegistered {
            course: course.code().to_string(),
        });
    }

    let current = student.total_credits();
    if current + course.credits() > student.max_credits() {
        return Err(Rejection::CreditLimitExceeded {
            current,
            max: student.max_credits(),
            adding: course.credits(),
        });
    }

    if !course.has_prerequisites(student.completed()) {
        let missing = course
            .missing_prerequisites(student.completed())
            .into_iter()
            .map(Key::to_string)
            .collect();
        return Err(Rejection::PrerequisitesNotMet { missing });
    }

    if course.is_full() {
        return Err(Rejection::CourseFull {
            enrollment: course.enrollment(),
            capacity: course.capacity(),
        });
    }

    Ok(())
}

/// Register `student` for `course`.
pub fn register(student: &mut Student, course: &mut Course) -> Result<RegisterReceipt, Rejection> {
    if let Err(rejection) = check_registration(student, course) {
        debug!(student = %student.id(), code = %course.code(), %rejection, "registration rejected");
        return Err(rejection);
    }

    // Seat first; it is the only fallible step.
    let enrollment = course.increment_enrollment()?;
    student.push_registration(Registration::new(
        course.code().key().clone(),
        course.credits(),
    ));

    let receipt = RegisterReceipt {
        student_id: student.id().to_string(),
        course_code: course.code().to_string(),
        total_credits: student.total_credits(),
        max_credits: student.max_credits(),
        enrollment,
    };
    debug!(
        student = %student.id(),
        code = %course.code(),
        enrollment,
        total_credits = receipt.total_credits,
        "registered"
    );
    Ok(receipt)
}

/// Drop `student` from `course`. The seat count is clamped at zero.
pub fn drop_course(student: &mut Student, course: &mut Course) -> Result<DropReceipt, Rejection> {
    if student.remove_registration(course.code().key()).is_none() {
        debug!(student = %student.id(), code = %course.code(), "drop rejected: not registered");
        return Err(Rejection::NotRegistered {
            course: course.code().to_string(),
        });
    }
    let enrollment = course.decrement_enrollment();

    debug!(student = %student.id(), code = %course.code(), enrollment, "dropped");
    Ok(DropReceipt {
        student_id: student.id().to_string(),
        course_code: course.code().to_string(),
        total_credits: student.total_credits(),
        enrollment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{course, seat_limited_course, student};

    #[test]
    fn register_updates_student_and_course_together() {
        let mut alice = student("S001", 18, &["MATH100"]);
        let mut cs101 = course("CS101", 3, &["MATH100"]);

        let receipt = register(&mut alice, &mut cs101).expect("register");
        assert_eq!(receipt.total_credits, 3);
        assert_eq!(receipt.enrollment, 1);
        assert_eq!(cs101.enrollment(), 1);
        assert!(alice.is_registered_for("CS101"));
    }

    #[test]
    fn already_registered_wins_over_other_failures() {
        let mut alice = student("S001", 3, &[]);
        let mut lab = seat_limited_course("LAB100", 3, 1, &[]);
        register(&mut alice, &mut lab).expect("first");

        // Credit limit and capacity would both fail too.
        let err = register(&mut alice, &mut lab).expect_err("second");
        assert!(matches!(err, Rejection::AlreadyRegistered { .. }));
        assert_eq!(lab.enrollment(), 1);
        assert_eq!(alice.registrations().len(), 1);
    }

    #[test]
    fn credit_limit_checked_before_prerequisites_and_capacity() {
        let mut bob = student("S002", 2, &[]);
        let mut full = seat_limited_course("CS301", 3, 1, &["CS201"]);
        let mut carol = student("S003", 18, &["CS201"]);
        register(&mut carol, &mut full).expect("fill");

        let err = register(&mut bob, &mut full).expect_err("credit limit");
        assert_eq!(
            err,
            Rejection::CreditLimitExceeded {
                current: 0,
                max: 2,
                adding: 3
            }
        );
    }

    #[test]
    fn prerequisites_checked_before_capacity() {
        let mut first = student("S001", 18, &["MATH100"]);
        let mut second = student("S002", 18, &[]);
        let mut cs101 = seat_limited_course("CS101", 3, 1, &["MATH100"]);
        register(&mut first, &mut cs101).expect("fill");

        let err = register(&mut second, &mut cs101).expect_err("prereq");
        assert_eq!(
            err,
            Rejection::PrerequisitesNotMet {
                missing: vec!["MATH100".to_string()]
            }
        );
    }

    #[test]
    fn full_course_rejects_without_mutation() {
        let mut first = student("S001", 18, &[]);
        let mut second = student("S002", 18, &[]);
        let mut lab = seat_limited_course("LAB100", 1, 1, &[]);
        register(&mut first, &mut lab).expect("fill");

        let err = register(&mut second, &mut lab).expect_err("full");
        assert!(err.to_string().starts_with("course is full"));
        assert!(second.registrations().is_empty());
        assert_eq!(lab.enrollment(), 1);
    }

    #[test]
    fn register_then_drop_restores_state() {
        let mut alice = student("S001", 18, &[]);
        let mut math = course("MATH100", 3, &[]);
        let before_student = alice.clone();
        let before_course = math.clone();

        register(&mut alice, &mut math).expect("register");
        let receipt = drop_course(&mut alice, &mut math).expect("drop");
        assert_eq!(receipt.enrollment, 0);
        assert_eq!(receipt.total_credits, 0);
        assert_eq!(alice, before_student);
        assert_eq!(math, before_course);
    }

    #[test]
    fn drop_without_registration_is_rejected() {
        let mut alice = student("S001", 18, &[]);
        let mut math = course("MATH100", 3, &[]);
        let err = drop_course(&mut alice, &mut math).expect_err("not registered");
        assert_eq!(
            err,
            Rejection::NotRegistered {
                course: "MATH100".to_string()
            }
        );
        assert_eq!(math.enrollment(), 0);
    }
}
