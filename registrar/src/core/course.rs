//! Course records and their capacity/prerequisite rules.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::error::{Rejection, ValidationError};
use crate::core::ident::{Ident, Key, spelled_keys};

pub const MIN_CREDITS: u32 = 1;
pub const MAX_CREDITS: u32 = 4;
pub const MIN_CAPACITY: u32 = 10;
pub const MAX_CAPACITY: u32 = 100;
pub const DEFAULT_CAPACITY: u32 = 50;

/// Caller-supplied fields for a new course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSpec {
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub capacity: u32,
    pub prerequisites: Vec<String>,
}

impl CourseSpec {
    pub fn new(code: &str, name: &str, credits: u32) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            credits,
            capacity: DEFAULT_CAPACITY,
            prerequisites: Vec::new(),
        }
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn prerequisites<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = codes.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    code: Ident,
    name: String,
    credits: u32,
    capacity: u32,
    enrollment: u32,
    /// Keyed for matching; the value is the spelling given at creation.
    prerequisites: BTreeMap<Key, String>,
}

impl Course {
    /// Check the numeric ranges and the self-prerequisite rule.
    ///
    /// Identity format and uniqueness are checked by the directory before this runs.
    pub(crate) fn from_spec(code: Ident, spec: CourseSpec) -> Result<Self, ValidationError> {
        if !(MIN_CREDITS..=MAX_CREDITS).contains(&spec.credits) {
            return Err(ValidationError::Credits(spec.credits));
        }
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&spec.capacity) {
            return Err(ValidationError::Capacity(spec.capacity));
        }
        let prerequisites = spelled_keys(&spec.prerequisites);
        if prerequisites.contains_key(code.key()) {
            return Err(ValidationError::SelfPrerequisite(code.as_str().to_string()));
        }
        Ok(Self::from_parts(
            code,
            spec.name.trim().to_string(),
            spec.credits,
            spec.capacity,
            prerequisites,
        ))
    }

    pub(crate) fn from_parts(
        code: Ident,
        name: String,
        credits: u32,
        capacity: u32,
        prerequisites: BTreeMap<Key, String>,
    ) -> Self {
        Self {
            code,
            name,
            credits,
            capacity,
            enrollment: 0,
            prerequisites,
        }
    }

    pub fn code(&self) -> &Ident {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn enrollment(&self) -> u32 {
        self.enrollment
    }

    pub fn prerequisites(&self) -> &BTreeMap<Key, String> {
        &self.prerequisites
    }

    /// Prerequisite codes as spelled at creation, in code order.
    pub fn prerequisite_codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.prerequisites.values().map(String::as_str)
    }

    pub fn is_full(&self) -> bool {
        self.enrollment >= self.capacity
    }

    /// True when every prerequisite appears in `completed`. Vacuously true when
    /// the course has none.
    pub fn has_prerequisites(&self, completed: &BTreeSet<Key>) -> bool {
        self.prerequisites.keys().all(|key| completed.contains(key))
    }

    /// Prerequisites absent from `completed`, in code order.
    pub fn missing_prerequisites<'a>(&'a self, completed: &'a BTreeSet<Key>) -> Vec<&'a Key> {
        self.prerequisites
            .keys()
            .filter(|key| !completed.contains(*key))
            .collect()
    }

    /// Take one seat. Returns the new enrollment.
    pub(crate) fn increment_enrollment(&mut self) -> Result<u32, Rejection> {
        if self.is_full() {
            return Err(Rejection::CourseFull {
                enrollment: self.enrollment,
                capacity: self.capacity,
            });
        }
        self.enrollment += 1;
        Ok(self.enrollment)
    }

    /// Release one seat, clamped at zero. Returns the new enrollment.
    pub(crate) fn decrement_enrollment(&mut self) -> u32 {
        self.enrollment = self.enrollment.saturating_sub(1);
        self.enrollment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::IdentField;
    use crate::core::ident::key_set;

    fn code(raw: &str) -> Ident {
        Ident::parse(IdentField::CourseCode, raw).expect("code")
    }

    #[test]
    fn credits_range_is_one_to_four() {
        let err = Course::from_spec(code("CS101"), CourseSpec::new("CS101", "Intro", 5))
            .expect_err("credits 5");
        assert_eq!(err, ValidationError::Credits(5));
        assert!(Course::from_spec(code("CS101"), CourseSpec::new("CS101", "Intro", 0)).is_err());
        let course = Course::from_spec(code("CS101"), CourseSpec::new("CS101", "Intro", 4))
            .expect("credits 4");
        assert_eq!(course.credits(), 4);
        assert_eq!(course.enrollment(), 0);
    }

    #[test]
    fn capacity_range_is_ten_to_hundred() {
        for capacity in [9, 101] {
            let spec = CourseSpec::new("CS101", "Intro", 3).capacity(capacity);
            let err = Course::from_spec(code("CS101"), spec).expect_err("capacity");
            assert_eq!(err, ValidationError::Capacity(capacity));
        }
        for capacity in [10, 100] {
            let spec = CourseSpec::new("CS101", "Intro", 3).capacity(capacity);
            assert!(Course::from_spec(code("CS101"), spec).is_ok());
        }
    }

    #[test]
    fn own_code_is_not_a_valid_prerequisite() {
        let spec = CourseSpec::new("CS101", "Intro", 3).prerequisites(["MATH100", "cs101"]);
        let err = Course::from_spec(code("CS101"), spec).expect_err("self prereq");
        assert_eq!(err, ValidationError::SelfPrerequisite("CS101".to_string()));
    }

    #[test]
    fn prerequisites_match_case_insensitively() {
        let spec = CourseSpec::new("CS201", "Data Structures", 3).prerequisites(["CS101", "MATH100"]);
        let course = Course::from_spec(code("CS201"), spec).expect("course");

        assert!(course.has_prerequisites(&key_set(["math100", "cs101", "HIST100"])));
        let partial = key_set(["cs101"]);
        assert!(!course.has_prerequisites(&partial));
        let missing: Vec<&str> = course
            .missing_prerequisites(&partial)
            .into_iter()
            .map(Key::as_str)
            .collect();
        assert_eq!(missing, vec!["MATH100"]);
    }

    #[test]
    fn prerequisites_keep_their_spelling() {
        let spec =
            CourseSpec::new("CS301", "Compilers", 4).prerequisites(["cs201", "Math100", "CS201"]);
        let course = Course::from_spec(code("CS301"), spec).expect("course");
        let codes: Vec<&str> = course.prerequisite_codes().collect();
        assert_eq!(codes, vec!["cs201", "Math100"]);
        assert!(course.has_prerequisites(&key_set(["CS201", "MATH100"])));
    }

    #[test]
    fn no_prerequisites_is_vacuously_satisfied() {
        let course =
            Course::from_spec(code("MATH100"), CourseSpec::new("MATH100", "Math", 3)).expect("course");
        assert!(course.has_prerequisites(&BTreeSet::new()));
    }

    #[test]
    fn enrollment_is_bounded_by_capacity_and_zero() {
        let mut course = Course::from_parts(code("LAB100"), "Lab".to_string(), 1, 2, BTreeMap::new());
        assert_eq!(course.increment_enrollment(), Ok(1));
        assert_eq!(course.increment_enrollment(), Ok(2));
        assert!(course.is_full());
        assert_eq!(
            course.increment_enrollment(),
            Err(Rejection::CourseFull {
                enrollment: 2,
                capacity: 2
            })
        );

        assert_eq!(course.decrement_enrollment(), 1);
        assert_eq!(course.decrement_enrollment(), 0);
        assert_eq!(course.decrement_enrollment(), 0);
    }
}
