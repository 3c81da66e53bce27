//! Line-oriented command loop.
//!
//! Reads commands from any `BufRead`, executes them against a [`Directory`] and
//! writes replies to any `Write`. Used for the interactive shell and for scripts.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::command::{ParseError, Reply, execute, parse_line};
use crate::core::directory::Directory;
use crate::io::config::RegistrarConfig;
use crate::render;

#[derive(Debug, Clone, Default)]
pub struct ShellOptions {
    /// Stop at the first failed command.
    pub strict: bool,
    /// Printed before each line is read (interactive use).
    pub prompt: Option<String>,
}

/// Tally of a shell session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellReport {
    /// Commands that ran, accepted or not.
    pub executed: usize,
    /// Commands that failed to parse or were rejected.
    pub failed: usize,
    /// True when `strict` cut the session short.
    pub stopped_early: bool,
}

enum LineOutcome {
    Skipped,
    Accepted,
    Failed,
    Exit,
}

/// Run every command from `input` until EOF, `exit`, or (in strict mode) the
/// first failure.
pub fn run_shell<R: BufRead, W: Write>(
    directory: &mut Directory,
    cfg: &RegistrarConfig,
    input: R,
    mut out: W,
    options: &ShellOptions,
) -> Result<ShellReport> {
    let mut report = ShellReport::default();
    let mut lines = input.lines();
    let mut line_no = 0usize;

    loop {
        if let Some(prompt) = &options.prompt {
            write!(out, "{prompt}").context("write prompt")?;
            out.flush().context("flush prompt")?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read command line")?;
        line_no += 1;

        match run_line(directory, cfg, &line, line_no, &mut out)? {
            LineOutcome::Skipped => {}
            LineOutcome::Accepted => report.executed += 1,
            LineOutcome::Failed => {
                report.executed += 1;
                report.failed += 1;
                if options.strict {
                    warn!(line = line_no, "strict mode: stopping at first failure");
                    report.stopped_early = true;
                    break;
                }
            }
            LineOutcome::Exit => break,
        }
    }

    out.flush().context("flush output")?;
    debug!(
        executed = report.executed,
        failed = report.failed,
        "shell finished"
    );
    Ok(report)
}

fn run_line<W: Write>(
    directory: &mut Directory,
    cfg: &RegistrarConfig,
    line: &str,
    line_no: usize,
    out: &mut W,
) -> Result<LineOutcome> {
    let command = match parse_line(line) {
        Ok(None) => return Ok(LineOutcome::Skipped),
        Ok(Some(command)) => command,
        Err(ParseError::Help(text)) => {
            writeln!(out, "{}", text.trim_end()).context("write help")?;
            return Ok(LineOutcome::Skipped);
        }
        Err(err) => {
            writeln!(out, "error: line {line_no}: {err}").context("write error")?;
            return Ok(LineOutcome::Failed);
        }
    };

    match execute(directory, cfg, command) {
        Ok(Reply::Exit) => Ok(LineOutcome::Exit),
        Ok(reply) => {
            writeln!(out, "{}", render::reply(&reply)?).context("write reply")?;
            Ok(LineOutcome::Accepted)
        }
        Err(err) => {
            debug!(line = line_no, kind = ?err.kind(), %err, "command failed");
            writeln!(out, "error: {err}").context("write error")?;
            Ok(LineOutcome::Failed)
        }
    }
}
