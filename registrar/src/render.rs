//! Fixed-width text rendering for command replies.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::command::Reply;
use crate::core::types::{CourseListing, Schedule, StudentListing, Summary};

const COURSE_RULE: usize = 91;
const SCHEDULE_RULE: usize = 55;
const SUMMARY_RULE: usize = 40;

/// Render a reply as it should appear on stdout (no trailing newline).
pub fn reply(reply: &Reply) -> Result<String> {
    match reply {
        Reply::Message(message) => Ok(message.clone()),
        Reply::Courses { listing, json } if *json => to_json(listing),
        Reply::Courses { listing, .. } => Ok(courses(listing)),
        Reply::Schedule { schedule, json } if *json => to_json(schedule),
        Reply::Schedule { schedule, .. } => Ok(self::schedule(schedule)),
        Reply::Students { listing, json } if *json => to_json(listing),
        Reply::Students { listing, .. } => Ok(students(listing)),
        Reply::Summary { summary, json } if *json => to_json(summary),
        Reply::Summary { summary, .. } => Ok(self::summary(summary)),
        Reply::Check(violations) => Ok(check(violations)),
        Reply::Exit => Ok(String::new()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize reply json")
}

pub fn courses(listing: &[CourseListing]) -> String {
    let mut out = String::from("Available Courses\n");
    let rule = "-".repeat(COURSE_RULE);
    if listing.is_empty() {
        out.push_str(&rule);
        out.push_str("\nNo courses available.");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<10}{:<35}{:>4}{:>10}{:>10} {:<20}",
        "Code", "Name", "Cr", "Enroll", "Capacity", "Prerequisites"
    );
    out.push_str(&rule);
    for course in listing {
        let prereqs = if course.prerequisites.is_empty() {
            "-".to_string()
        } else {
            course.prerequisites.join(",")
        };
        let _ = write!(
            out,
            "\n{:<10}{:<35}{:>4}{:>10}{:>10} {}",
            course.code,
            truncate(&course.name, 35),
            course.credits,
            course.enrollment,
            course.capacity,
            truncate(&prereqs, 20)
        );
    }
    out.trim_end().to_string()
}

pub fn schedule(schedule: &Schedule) -> String {
    let mut out = format!("Schedule for {} (ID: {})\n", schedule.name, schedule.student_id);
    let rule = "-".repeat(SCHEDULE_RULE);
    out.push_str(&rule);
    if schedule.entries.is_empty() {
        out.push_str("\nNo registered courses.");
        return out;
    }
    let _ = write!(out, "\n{:<10}{:<30}{:>8}\n{rule}", "Code", "Name", "Credits");
    for entry in &schedule.entries {
        let _ = write!(
            out,
            "\n{:<10}{:<30}{:>8}",
            entry.code,
            truncate(&entry.name, 30),
            entry.credits
        );
    }
    let _ = write!(
        out,
        "\n{rule}\nTotal Credits: {}/{}",
        schedule.total_credits, schedule.max_credits
    );
    out
}

pub fn students(listing: &[StudentListing]) -> String {
    if listing.is_empty() {
        return "No students registered.".to_string();
    }
    let mut out = format!("{:<10}{:<25}{:<20}{:>8}", "ID", "Name", "Major", "Credits");
    for student in listing {
        let _ = write!(
            out,
            "\n{:<10}{:<25}{:<20}{:>8}",
            student.id,
            truncate(&student.name, 25),
            truncate(&student.major, 20),
            format!("{}/{}", student.total_credits, student.max_credits)
        );
    }
    out
}

pub fn summary(summary: &Summary) -> String {
    format!(
        "University System Summary\n{}\nTotal Students: {}\nTotal Courses : {}\nAvg Enrollment per Course: {:.2}",
        "-".repeat(SUMMARY_RULE),
        summary.total_students,
        summary.total_courses,
        summary.avg_enrollment
    )
}

pub fn check(violations: &[String]) -> String {
    if violations.is_empty() {
        return "ok".to_string();
    }
    violations
        .iter()
        .map(|violation| format!("violation: {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cut `s` to `len` characters, ending in `...` when shortened.
fn truncate(s: &str, len: usize) -> String {
    if s.chars().count() <= len {
        return s.to_string();
    }
    let kept: String = s.chars().take(len.saturating_sub(3)).collect();
    format!("{kept}...")
}
