//! Error taxonomy for the registration core.
//!
//! Two classes of failure exist:
//!
//! - [`ValidationError`]: a record could not be created. Nothing was mutated.
//! - [`Rejection`]: a register/drop request was refused by a business rule.
//!
//! Both, plus lookups that found nothing, are folded into [`RegistrarError`] so
//! every [`crate::core::directory::Directory`] operation returns the same result type.

use std::fmt;

use thiserror::Error;

/// Which identity a validation message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentField {
    CourseCode,
    StudentId,
}

impl fmt::Display for IdentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentField::CourseCode => f.write_str("course code"),
            IdentField::StudentId => f.write_str("student id"),
        }
    }
}

/// Malformed course code or student id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("{field} cannot be empty")]
    Empty { field: IdentField },

    #[error("{field} must be 3-10 alphanumeric characters (got {len} characters)")]
    Length { field: IdentField, len: usize },

    #[error("{field} must be 3-10 alphanumeric characters (found {found:?})")]
    NotAlphanumeric { field: IdentField, found: char },
}

/// A record was rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("course code {0} already exists")]
    DuplicateCourse(String),

    #[error("student id {0} already exists")]
    DuplicateStudent(String),

    #[error("credits must be between 1 and 4 (got {0})")]
    Credits(u32),

    #[error("capacity must be between 10 and 100 (got {0})")]
    Capacity(u32),

    #[error("max credits must be between 1 and 24 (got {0})")]
    MaxCredits(u32),

    #[error("prerequisites cannot include the course itself ({0})")]
    SelfPrerequisite(String),
}

/// A register or drop request refused by a business rule.
///
/// Display strings start with the stable reason phrase so callers and tests can
/// match on the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("already registered for {course}")]
    AlreadyRegistered { course: String },

    #[error("credit limit exceeded: current {current}/{max}, course adds {adding}")]
    CreditLimitExceeded { current: u32, max: u32, adding: u32 },

    #[error("prerequisites not met: missing {}", .missing.join(", "))]
    PrerequisitesNotMet { missing: Vec<String> },

    #[error("course is full ({enrollment}/{capacity})")]
    CourseFull { enrollment: u32, capacity: u32 },

    #[error("not registered for {course}")]
    NotRegistered { course: String },
}

/// Kind of record a lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Course,
    Student,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Course => f.write_str("course"),
            EntityKind::Student => f.write_str("student"),
        }
    }
}

/// Stable tag for a [`RegistrarError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Rejected,
    NotFound,
}

/// Uniform failure returned by every directory operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrarError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("{entity} not found: {key}")]
    NotFound { entity: EntityKind, key: String },
}

impl RegistrarError {
    pub fn not_found(entity: EntityKind, key: &str) -> Self {
        RegistrarError::NotFound {
            entity,
            key: key.trim().to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistrarError::Validation(_) => ErrorKind::Validation,
            RegistrarError::Rejected(_) => ErrorKind::Rejected,
            RegistrarError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// The business-rule rejection, if that is what this error is.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            RegistrarError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

impl From<IdentityError> for RegistrarError {
    fn from(err: IdentityError) -> Self {
        RegistrarError::Validation(ValidationError::Identity(err))
    }
}

pub type Result<T> = std::result::Result<T, RegistrarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages_lead_with_reason() {
        let full = Rejection::CourseFull {
            enrollment: 1,
            capacity: 1,
        };
        assert!(full.to_string().starts_with("course is full"));

        let missing = Rejection::PrerequisitesNotMet {
            missing: vec!["MATH100".to_string(), "PHYS101".to_string()],
        };
        assert_eq!(
            missing.to_string(),
            "prerequisites not met: missing MATH100, PHYS101"
        );
    }

    #[test]
    fn kind_tags_each_variant() {
        let err: RegistrarError = ValidationError::Credits(5).into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.rejection().is_none());

        let err: RegistrarError = Rejection::NotRegistered {
            course: "CS101".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Rejected);

        let err = RegistrarError::not_found(EntityKind::Student, " S999 ");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "student not found: S999");
    }
}
