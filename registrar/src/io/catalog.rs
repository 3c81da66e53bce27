//! Seed catalog (`catalog.toml`): courses, students and registrations to preload.
//!
//! ```toml
//! [[course]]
//! code = "MATH100"
//! name = "Basic Mathematics"
//! credits = 3
//! capacity = 30
//!
//! [[student]]
//! id = "S001"
//! name = "Alice Johnson"
//! major = "Computer Science"
//! completed = ["MATH100"]
//!
//! [[registration]]
//! student = "S001"
//! course = "MATH100"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::course::CourseSpec;
use crate::core::directory::Directory;
use crate::core::student::StudentSpec;
use crate::io::config::RegistrarConfig;
use crate::io::write_atomic;

pub const CATALOG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Catalog {
    #[serde(rename = "course", skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<CourseEntry>,
    #[serde(rename = "student", skip_serializing_if = "Vec::is_empty")]
    pub students: Vec<StudentEntry>,
    #[serde(rename = "registration", skip_serializing_if = "Vec::is_empty")]
    pub registrations: Vec<RegistrationEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CourseEntry {
    pub code: String,
    pub name: String,
    pub credits: u32,
    /// Falls back to `default_capacity` from the config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StudentEntry {
    pub id: String,
    pub name: String,
    pub major: String,
    /// Falls back to `default_max_credits` from the config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_credits: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completed: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RegistrationEntry {
    pub student: String,
    pub course: String,
}

/// Counts of records applied from a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub courses: usize,
    pub students: usize,
    pub registrations: usize,
}

impl Catalog {
    /// The records the console used to preload for demos.
    pub fn sample() -> Self {
        Self {
            courses: vec![
                CourseEntry {
                    code: "MATH100".to_string(),
                    name: "Basic Mathematics".to_string(),
                    credits: 3,
                    capacity: Some(30),
                    prerequisites: Vec::new(),
                },
                CourseEntry {
                    code: "CS101".to_string(),
                    name: "Introduction to Programming".to_string(),
                    credits: 3,
                    capacity: Some(30),
                    prerequisites: vec!["MATH100".to_string()],
                },
            ],
            students: vec![StudentEntry {
                id: "S001".to_string(),
                name: "Alice Johnson".to_string(),
                major: "Computer Science".to_string(),
                max_credits: Some(18),
                completed: vec!["MATH100".to_string()],
            }],
            registrations: Vec::new(),
        }
    }

    /// Apply courses, then students, then registrations to `directory`.
    ///
    /// Stops at the first entry that fails; the error names that entry.
    pub fn apply(&self, directory: &mut Directory, cfg: &RegistrarConfig) -> Result<CatalogStats> {
        for (index, entry) in self.courses.iter().enumerate() {
            let spec = CourseSpec {
                code: entry.code.clone(),
                name: entry.name.clone(),
                credits: entry.credits,
                capacity: entry.capacity.unwrap_or(cfg.default_capacity),
                prerequisites: entry.prerequisites.clone(),
            };
            directory
                .add_course(spec)
                .with_context(|| format!("course[{index}] {}", entry.code))?;
        }

        for (index, entry) in self.students.iter().enumerate() {
            let spec = StudentSpec {
                id: entry.id.clone(),
                name: entry.name.clone(),
                major: entry.major.clone(),
                max_credits: entry.max_credits.unwrap_or(cfg.default_max_credits),
                completed: entry.completed.clone(),
            };
            directory
                .add_student(spec)
                .with_context(|| format!("student[{index}] {}", entry.id))?;
        }

        for (index, entry) in self.registrations.iter().enumerate() {
            directory
                .register(&entry.student, &entry.course)
                .with_context(|| {
                    format!("registration[{index}] {} -> {}", entry.student, entry.course)
                })?;
        }

        let stats = CatalogStats {
            courses: self.courses.len(),
            students: self.students.len(),
            registrations: self.registrations.len(),
        };
        info!(
            courses = stats.courses,
            students = stats.students,
            registrations = stats.registrations,
            "catalog applied"
        );
        Ok(stats)
    }

    /// Build a fresh directory from this catalog.
    pub fn build(&self, cfg: &RegistrarConfig) -> Result<Directory> {
        let mut directory = Directory::new();
        self.apply(&mut directory, cfg)?;
        Ok(directory)
    }
}

pub fn parse_catalog(contents: &str) -> Result<Catalog> {
    toml::from_str(contents).context("parse catalog toml")
}

/// Load a catalog from a TOML file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    debug!(path = %path.display(), "loading catalog");
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_catalog(&contents).with_context(|| format!("load {}", path.display()))
}

/// Atomically write a catalog to disk (temp file + rename).
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let mut buf = toml::to_string_pretty(catalog).context("serialize catalog toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RegistrarError;

    #[test]
    fn sample_builds_demo_directory() {
        let dir = Catalog::sample()
            .build(&RegistrarConfig::default())
            .expect("build");
        assert_eq!(dir.course_count(), 2);
        assert_eq!(dir.student_count(), 1);
        assert_eq!(
            dir.find_course("CS101").map(|c| c.prerequisites().len()),
            Some(1)
        );
    }

    #[test]
    fn omitted_fields_use_config_defaults() {
        let catalog = parse_catalog(
            r#"
[[course]]
code = "HIST100"
name = "World History"
credits = 2

[[student]]
id = "S010"
name = "Bo"
major = "History"

[[registration]]
student = "s010"
course = "hist100"
"#,
        )
        .expect("parse");
        let cfg = RegistrarConfig {
            default_capacity: 25,
            default_max_credits: 12,
            ..RegistrarConfig::default()
        };
        let dir = catalog.build(&cfg).expect("build");
        let course = dir.find_course("HIST100").expect("course");
        assert_eq!(course.capacity(), 25);
        assert_eq!(course.enrollment(), 1);
        let student = dir.find_student("S010").expect("student");
        assert_eq!(student.max_credits(), 12);
        assert_eq!(student.total_credits(), 2);
    }

    #[test]
    fn failing_entry_is_named_in_error() {
        let catalog = parse_catalog(
            r#"
[[course]]
code = "CS101"
name = "Intro"
credits = 5
"#,
        )
        .expect("parse");
        let err = catalog
            .build(&RegistrarConfig::default())
            .expect_err("credits");
        let message = format!("{err:#}");
        assert!(message.contains("course[0] CS101"));
        assert!(message.contains("credits must be between 1 and 4"));
        assert!(err.downcast_ref::<RegistrarError>().is_some());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = parse_catalog("[[course]]\ncode = \"CS101\"\nname = \"x\"\ncredits = 3\nseats = 4\n")
            .expect_err("unknown field");
        assert!(format!("{err:#}").contains("seats"));
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CATALOG_FILE);
        write_catalog(&path, &Catalog::sample()).expect("write");
        assert_eq!(load_catalog(&path).expect("load"), Catalog::sample());
    }
}
