//! Student records: completed history, credit limit and current registrations.

use std::collections::BTreeSet;

use crate::core::error::ValidationError;
use crate::core::ident::{Ident, Key, key_set};

pub const MIN_CREDIT_LIMIT: u32 = 1;
pub const MAX_CREDIT_LIMIT: u32 = 24;
pub const DEFAULT_MAX_CREDITS: u32 = 18;

/// Caller-supplied fields for a new student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSpec {
    pub id: String,
    pub name: String,
    pub major: String,
    pub max_credits: u32,
    pub completed: Vec<String>,
}

impl StudentSpec {
    pub fn new(id: &str, name: &str, major: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            major: major.to_string(),
            max_credits: DEFAULT_MAX_CREDITS,
            completed: Vec::new(),
        }
    }

    pub fn max_credits(mut self, max_credits: u32) -> Self {
        self.max_credits = max_credits;
        self
    }

    pub fn completed<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completed = codes.into_iter().map(Into::into).collect();
        self
    }
}

/// One registered course as seen from the student side.
///
/// Credits are copied at registration time; a course's credits never change
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    course: Key,
    credits: u32,
}

impl Registration {
    pub(crate) fn new(course: Key, credits: u32) -> Self {
        Self { course, credits }
    }

    pub fn course(&self) -> &Key {
        &self.course
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: Ident,
    name: String,
    major: String,
    max_credits: u32,
    completed: BTreeSet<Key>,
    registrations: Vec<Registration>,
}

impl Student {
    pub(crate) fn from_spec(id: Ident, spec: StudentSpec) -> Result<Self, ValidationError> {
        if !(MIN_CREDIT_LIMIT..=MAX_CREDIT_LIMIT).contains(&spec.max_credits) {
            return Err(ValidationError::MaxCredits(spec.max_credits));
        }
        Ok(Self {
            id,
            name: spec.name.trim().to_string(),
            major: spec.major.trim().to_string(),
            max_credits: spec.max_credits,
            completed: key_set(&spec.completed),
            registrations: Vec::new(),
        })
    }

    pub fn id(&self) -> &Ident {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    pub fn max_credits(&self) -> u32 {
        self.max_credits
    }

    pub fn completed(&self) -> &BTreeSet<Key> {
        &self.completed
    }

    /// Registrations in the order they were made.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn total_credits(&self) -> u32 {
        self.registrations.iter().map(Registration::credits).sum()
    }

    pub fn is_registered_for(&self, code: &str) -> bool {
        self.is_registered_for_key(&Key::normalize(code))
    }

    pub(crate) fn is_registered_for_key(&self, key: &Key) -> bool {
        self.registrations.iter().any(|reg| reg.course == *key)
    }

    pub(crate) fn push_registration(&mut self, registration: Registration) {
        self.registrations.push(registration);
    }

    pub(crate) fn remove_registration(&mut self, key: &Key) -> Option<Registration> {
        let index = self.registrations.iter().position(|reg| reg.course == *key)?;
        Some(self.registrations.remove(index))
    }
}
