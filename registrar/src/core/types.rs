//! Read-only views returned by directory queries.
//!
//! These types are plain data with stable field names; the CLI prints them as
//! tables or serializes them as JSON.

use serde::Serialize;

use crate::core::course::Course;
use crate::core::ident::Key;
use crate::core::student::Student;

/// One row of `list_courses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseListing {
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub enrollment: u32,
    pub capacity: u32,
    pub prerequisites: Vec<String>,
}

impl From<&Course> for CourseListing {
    fn from(course: &Course) -> Self {
        Self {
            code: course.code().to_string(),
            name: course.name().to_string(),
            credits: course.credits(),
            enrollment: course.enrollment(),
            capacity: course.capacity(),
            prerequisites: course.prerequisite_codes().map(str::to_string).collect(),
        }
    }
}

/// One registered course on a student's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub code: String,
    pub name: String,
    pub credits: u32,
}

/// A student's current registrations, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub student_id: String,
    pub name: String,
    pub entries: Vec<ScheduleEntry>,
    pub total_credits: u32,
    pub max_credits: u32,
}

/// One row of the student listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentListing {
    pub id: String,
    pub name: String,
    pub major: String,
    pub total_credits: u32,
    pub max_credits: u32,
    pub completed: Vec<String>,
}

impl From<&Student> for StudentListing {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id().to_string(),
            name: student.name().to_string(),
            major: student.major().to_string(),
            total_credits: student.total_credits(),
            max_credits: student.max_credits(),
            completed: student.completed().iter().map(Key::to_string).collect(),
        }
    }
}

/// Aggregate counts across the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_students: usize,
    pub total_courses: usize,
    /// Mean current enrollment per course; `0.0` when there are no courses.
    pub avg_enrollment: f64,
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterReceipt {
    pub student_id: String,
    pub course_code: String,
    pub total_credits: u32,
    pub max_credits: u32,
    pub enrollment: u32,
}

/// Result of a successful drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropReceipt {
    pub student_id: String,
    pub course_code: String,
    pub total_credits: u32,
    pub enrollment: u32,
}
