//! A directory handle that can be shared between threads.
//!
//! Every operation holds one lock over the whole [`Directory`] for its full
//! duration. Register and drop touch a student and a course together, so they
//! must never interleave with another mutation of either record.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::course::CourseSpec;
use crate::core::directory::Directory;
use crate::core::error::Result;
use crate::core::student::StudentSpec;
use crate::core::types::{
    CourseListing, DropReceipt, RegisterReceipt, Schedule, StudentListing, Summary,
};

/// Cloneable, lock-guarded [`Directory`].
#[derive(Debug, Clone, Default)]
pub struct SharedDirectory {
    inner: Arc<Mutex<Directory>>,
}

impl SharedDirectory {
    pub fn new(directory: Directory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(directory)),
        }
    }

    pub fn add_course(&self, spec: CourseSpec) -> Result<CourseListing> {
        let mut dir = self.inner.lock();
        dir.add_course(spec).map(CourseListing::from)
    }

    pub fn add_student(&self, spec: StudentSpec) -> Result<StudentListing> {
        let mut dir = self.inner.lock();
        dir.add_student(spec).map(StudentListing::from)
    }

    pub fn register(&self, student_id: &str, course_code: &str) -> Result<RegisterReceipt> {
        self.inner.lock().register(student_id, course_code)
    }

    pub fn drop_course(&self, student_id: &str, course_code: &str) -> Result<DropReceipt> {
        self.inner.lock().drop_course(student_id, course_code)
    }

    pub fn list_courses(&self) -> Vec<CourseListing> {
        self.inner.lock().list_courses()
    }

    pub fn student_schedule(&self, student_id: &str) -> Result<Schedule> {
        self.inner.lock().student_schedule(student_id)
    }

    pub fn summary(&self) -> Summary {
        self.inner.lock().summary()
    }

    /// Run `f` with shared access while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&Directory) -> R) -> R {
        f(&*self.inner.lock())
    }

    /// Run `f` with exclusive access while holding the lock.
    ///
    /// Use for compound operations that must not interleave with other callers.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Directory) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}
