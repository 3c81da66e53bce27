//! The directory: aggregate root over the course and student registries.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::course::{Course, CourseSpec};
use crate::core::enrollment;
use crate::core::error::{
    EntityKind, IdentField, Rejection, RegistrarError, Result, ValidationError,
};
use crate::core::ident::{Ident, Key};
use crate::core::student::{Student, StudentSpec};
use crate::core::types::{
    CourseListing, DropReceipt, RegisterReceipt, Schedule, ScheduleEntry, StudentListing, Summary,
};

/// All courses and students, keyed case-insensitively.
///
/// Courses iterate in code order, students in id order.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    courses: BTreeMap<Key, Course>,
    students: BTreeMap<Key, Student>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a course with zero enrollment.
    ///
    /// Checks, in order: code format, uniqueness, credits, capacity, and that the
    /// course is not its own prerequisite. The directory is unchanged on failure.
    pub fn add_course(&mut self, spec: CourseSpec) -> Result<&Course> {
        let code = Ident::parse(IdentField::CourseCode, &spec.code)?;
        if self.courses.contains_key(code.key()) {
            return Err(ValidationError::DuplicateCourse(code.to_string()).into());
        }
        let course = Course::from_spec(code, spec)?;
        Ok(self.insert_course(course))
    }

    /// Add a student with no registrations.
    pub fn add_student(&mut self, spec: StudentSpec) -> Result<&Student> {
        let id = Ident::parse(IdentField::StudentId, &spec.id)?;
        if self.students.contains_key(id.key()) {
            return Err(ValidationError::DuplicateStudent(id.to_string()).into());
        }
        let student = Student::from_spec(id, spec)?;
        debug!(student = %student.id(), max_credits = student.max_credits(), "student added");
        let key = student.id().key().clone();
        Ok(self.students.entry(key).or_insert(student))
    }

    /// Store a built course under its key. Range checks happen in
    /// `Course::from_spec`, not here.
    pub(crate) fn insert_course(&mut self, course: Course) -> &Course {
        debug!(code = %course.code(), capacity = course.capacity(), "course added");
        let key = course.code().key().clone();
        self.courses.entry(key).or_insert(course)
    }

    #[cfg(test)]
    pub(crate) fn student_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.students.get_mut(&Key::normalize(id))
    }

    pub fn find_course(&self, code: &str) -> Option<&Course> {
        self.courses.get(&Key::normalize(code))
    }

    pub fn find_student(&self, id: &str) -> Option<&Student> {
        self.students.get(&Key::normalize(id))
    }

    /// Register a student for a course through the enrollment coordinator.
    pub fn register(&mut self, student_id: &str, course_code: &str) -> Result<RegisterReceipt> {
        let student = self
            .students
            .get_mut(&Key::normalize(student_id))
            .ok_or_else(|| RegistrarError::not_found(EntityKind::Student, student_id))?;
        let course = self
            .courses
            .get_mut(&Key::normalize(course_code))
            .ok_or_else(|| RegistrarError::not_found(EntityKind::Course, course_code))?;
        Ok(enrollment::register(student, course)?)
    }

    /// Drop a student's registration for a course.
    ///
    /// Only the student's registrations are consulted: a code that is not on the
    /// schedule is `not registered`, whether or not the course exists.
    pub fn drop_course(&mut self, student_id: &str, course_code: &str) -> Result<DropReceipt> {
        let student = self
            .students
            .get_mut(&Key::normalize(student_id))
            .ok_or_else(|| RegistrarError::not_found(EntityKind::Student, student_id))?;
        let key = Key::normalize(course_code);
        let Some(course) = self
            .courses
            .get_mut(&key)
            .filter(|_| student.is_registered_for_key(&key))
        else {
            return Err(Rejection::NotRegistered {
                course: course_code.trim().to_string(),
            }
            .into());
        };
        Ok(enrollment::drop_course(student, course)?)
    }

    /// Courses ordered by code. Each call starts a fresh iteration.
    pub fn courses(&self) -> impl Iterator<Item = &Course> + '_ {
        self.courses.values()
    }

    /// Students ordered by id.
    pub fn students(&self) -> impl Iterator<Item = &Student> + '_ {
        self.students.values()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn list_courses(&self) -> Vec<CourseListing> {
        self.courses().map(CourseListing::from).collect()
    }

    pub fn list_students(&self) -> Vec<StudentListing> {
        self.students().map(StudentListing::from).collect()
    }

    pub fn student_schedule(&self, student_id: &str) -> Result<Schedule> {
        let student = self
            .find_student(student_id)
            .ok_or_else(|| RegistrarError::not_found(EntityKind::Student, student_id))?;
        let entries = student
            .registrations()
            .iter()
            .map(|reg| {
                let (code, name) = match self.courses.get(reg.course()) {
                    Some(course) => (course.code().to_string(), course.name().to_string()),
                    None => (reg.course().to_string(), String::new()),
                };
                ScheduleEntry {
                    code,
                    name,
                    credits: reg.credits(),
                }
            })
            .collect();
        Ok(Schedule {
            student_id: student.id().to_string(),
            name: student.name().to_string(),
            entries,
            total_credits: student.total_credits(),
            max_credits: student.max_credits(),
        })
    }

    pub fn summary(&self) -> Summary {
        let total_courses = self.courses.len();
        let avg_enrollment = if total_courses == 0 {
            0.0
        } else {
            let seats: u64 = self.courses().map(|c| u64::from(c.enrollment())).sum();
            seats as f64 / total_courses as f64
        };
        Summary {
            total_students: self.students.len(),
            total_courses,
            avg_enrollment,
        }
    }
}
