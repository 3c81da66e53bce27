//! Text command surface over a [`Directory`].
//!
//! One line is one command. Lines are split like a shell would (quotes group
//! words, so `add-student S002 "Bo Li" Physics` works) and parsed with clap.

use clap::error::ErrorKind as ClapErrorKind;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::core::course::CourseSpec;
use crate::core::directory::Directory;
use crate::core::error::RegistrarError;
use crate::core::invariants::validate_invariants;
use crate::core::student::StudentSpec;
use crate::core::types::{CourseListing, Schedule, StudentListing, Summary};
use crate::io::config::RegistrarConfig;

#[derive(Debug, Parser)]
#[command(name = "registrar", no_binary_name = true, disable_version_flag = true)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a course to the catalog.
    AddCourse {
        /// Course code, 3-10 alphanumeric characters.
        code: String,
        name: String,
        /// Credits, 1-4.
        #[arg(long)]
        credits: u32,
        /// Seats, 10-100. Defaults to `default_capacity` from the config.
        #[arg(long)]
        capacity: Option<u32>,
        /// Comma-separated prerequisite course codes.
        #[arg(long = "prereq", value_delimiter = ',')]
        prerequisites: Vec<String>,
    },
    /// Add a student.
    AddStudent {
        /// Student id, 3-10 alphanumeric characters.
        id: String,
        name: String,
        major: String,
        /// Credit limit, 1-24. Defaults to `default_max_credits` from the config.
        #[arg(long)]
        max_credits: Option<u32>,
        /// Comma-separated codes of completed courses.
        #[arg(long, value_delimiter = ',')]
        completed: Vec<String>,
    },
    /// Register a student for a course.
    Register { student: String, course: String },
    /// Drop a student from a course.
    Drop { student: String, course: String },
    /// List all courses ordered by code.
    Courses {
        #[arg(long)]
        json: bool,
    },
    /// Show a student's registered courses.
    Schedule {
        student: String,
        #[arg(long)]
        json: bool,
    },
    /// List all students ordered by id.
    Students {
        #[arg(long)]
        json: bool,
    },
    /// Show student/course counts and average enrollment.
    Summary {
        #[arg(long)]
        json: bool,
    },
    /// Verify enrollment counts agree with student registrations.
    Check,
    /// Leave the shell.
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("cannot split command: {0}")]
    Tokenize(String),

    #[error("{0}")]
    Usage(String),

    /// `help` or `--help` was requested; carries the rendered help text.
    #[error("{0}")]
    Help(String),
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let words = shell_words::split(trimmed).map_err(|err| ParseError::Tokenize(err.to_string()))?;
    match CommandLine::try_parse_from(words) {
        Ok(parsed) => Ok(Some(parsed.command)),
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Err(ParseError::Help(err.to_string()))
            }
            _ => {
                let rendered = err.to_string();
                let message = rendered.trim_start_matches("error: ").trim_end();
                Err(ParseError::Usage(message.to_string()))
            }
        },
    }
}

/// What a command produced, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Message(String),
    Courses { listing: Vec<CourseListing>, json: bool },
    Schedule { schedule: Schedule, json: bool },
    Students { listing: Vec<StudentListing>, json: bool },
    Summary { summary: Summary, json: bool },
    Check(Vec<String>),
    Exit,
}

/// Run a command against the directory.
///
/// Business-rule failures come back as `Err`; the directory is unchanged in that case.
pub fn execute(
    directory: &mut Directory,
    cfg: &RegistrarConfig,
    command: Command,
) -> Result<Reply, RegistrarError> {
    debug!(?command, "executing command");
    let reply = match command {
        Command::AddCourse {
            code,
            name,
            credits,
            capacity,
            prerequisites,
        } => {
            let spec = CourseSpec {
                code,
                name,
                credits,
                capacity: capacity.unwrap_or(cfg.default_capacity),
                prerequisites,
            };
            let course = directory.add_course(spec)?;
            Reply::Message(format!("course {} added", course.code()))
        }
        Command::AddStudent {
            id,
            name,
            major,
            max_credits,
            completed,
        } => {
            let spec = StudentSpec {
                id,
                name,
                major,
                max_credits: max_credits.unwrap_or(cfg.default_max_credits),
                completed,
            };
            let student = directory.add_student(spec)?;
            Reply::Message(format!("student {} added", student.id()))
        }
        Command::Register { student, course } => {
            let receipt = directory.register(&student, &course)?;
            Reply::Message(format!(
                "registered {} for {} (total credits {}/{})",
                receipt.student_id, receipt.course_code, receipt.total_credits, receipt.max_credits
            ))
        }
        Command::Drop { student, course } => {
            let receipt = directory.drop_course(&student, &course)?;
            Reply::Message(format!(
                "dropped {} from {} (total credits {})",
                receipt.student_id, receipt.course_code, receipt.total_credits
            ))
        }
        Command::Courses { json } => Reply::Courses {
            listing: directory.list_courses(),
            json,
        },
        Command::Schedule { student, json } => Reply::Schedule {
            schedule: directory.student_schedule(&student)?,
            json,
        },
        Command::Students { json } => Reply::Students {
            listing: directory.list_students(),
            json,
        },
        Command::Summary { json } => Reply::Summary {
            summary: directory.summary(),
            json,
        },
        Command::Check => Reply::Check(validate_invariants(directory)),
        Command::Exit => Reply::Exit,
    };
    Ok(reply)
}
