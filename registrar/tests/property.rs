//! Property tests: invariants hold after arbitrary register/drop sequences.

use proptest::prelude::*;

use registrar::core::course::CourseSpec;
use registrar::core::directory::Directory;
use registrar::core::invariants::validate_invariants;
use registrar::core::student::StudentSpec;

const COURSES: [(&str, u32, &[&str]); 5] = [
    ("MATH100", 3, &[]),
    ("MATH200", 4, &["MATH100"]),
    ("CS101", 3, &["MATH100"]),
    ("CS201", 4, &["CS101"]),
    ("ART100", 1, &[]),
];
const STUDENTS: usize = 14;

#[derive(Debug, Clone)]
enum Op {
    Register(usize, usize),
    Drop(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..STUDENTS, 0..COURSES.len()).prop_map(|(s, c)| Op::Register(s, c)),
        (0..STUDENTS, 0..COURSES.len()).prop_map(|(s, c)| Op::Drop(s, c)),
    ]
}

fn student_id(index: usize) -> String {
    format!("S{index:03}")
}

/// Ten-seat courses and students with varied limits and histories.
fn directory() -> Directory {
    let mut dir = Directory::new();
    for (code, credits, prereqs) in COURSES {
        dir.add_course(
            CourseSpec::new(code, code, credits)
                .capacity(10)
                .prerequisites(prereqs.iter().copied()),
        )
        .expect("course");
    }
    for index in 0..STUDENTS {
        let completed: &[&str] = match index % 3 {
            0 => &[],
            1 => &["math100"],
            _ => &["MATH100", "cs101"],
        };
        let spec = StudentSpec::new(&student_id(index), "Student", "Undeclared")
            .max_credits(4 + (index as u32 % 4) * 3)
            .completed(completed.iter().copied());
        dir.add_student(spec).expect("student");
    }
    dir
}

proptest! {
    #[test]
    fn invariants_hold_after_any_sequence(ops in proptest::collection::vec(op(), 0..200)) {
        let mut dir = directory();
        for op in ops {
            match op {
                Op::Register(s, c) => { let _ = dir.register(&student_id(s), COURSES[c].0); }
                Op::Drop(s, c) => { let _ = dir.drop_course(&student_id(s), COURSES[c].0); }
            }
            let errors = validate_invariants(&dir);
            prop_assert!(errors.is_empty(), "violations: {:?}", errors);
        }
        for course in dir.courses() {
            prop_assert!(course.enrollment() <= course.capacity());
        }
        for student in dir.students() {
            prop_assert!(student.total_credits() <= student.max_credits());
        }
    }

    #[test]
    fn register_then_drop_restores_state(
        ops in proptest::collection::vec(op(), 0..60),
        s in 0..STUDENTS,
        c in 0..COURSES.len(),
    ) {
        let mut dir = directory();
        for op in ops {
            if let Op::Register(s, c) = op {
                let _ = dir.register(&student_id(s), COURSES[c].0);
            }
        }
        let id = student_id(s);
        let code = COURSES[c].0;
        let courses_before = dir.list_courses();
        let schedule_before = dir.student_schedule(&id).expect("schedule");

        if dir.register(&id, code).is_ok() {
            dir.drop_course(&id, code).expect("drop after register");
            prop_assert_eq!(dir.list_courses(), courses_before);
            prop_assert_eq!(dir.student_schedule(&id).expect("schedule"), schedule_before);
        }
    }
}
