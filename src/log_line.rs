//! Line-level parsing of result file contents.
//!
//! A result file interleaves `#` comment lines with comma-delimited kernel lines. The kernel writes
//! one `#C` comment carrying the compute time of the whole run, e.g.
//! `#Compute time                                 :  120.5`, and one data line per kernel
//! invocation, e.g. `update_velocity,3,12.345678,45.678901`
//! (`name,iteration,elapsed,energy`). Older logs omit the iteration (`name,elapsed,energy`) and
//! static logs may carry only `name,energy`.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static RUNTIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"time\s*:\s*(\d+(?:\.\d+)?)").expect("runtime pattern is valid by construction")
});

static ENERGY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[\s,])(\d+(?:\.\d+)?)\s*$").expect("energy pattern is valid by construction")
});

static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(?:\.\d+)?$").expect("decimal pattern is valid by construction")
});

/// Which data line layout the caller requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    /// Only the trailing energy is required; the elapsed time is kept when present.
    Static,
    /// Both the elapsed time and the trailing energy are required.
    Dynamic,
}

/// One kernel measurement parsed from a data line.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelSample {
    pub kernel_name: String,
    /// Iteration index, when the line carries one.
    pub iteration: Option<u64>,
    pub elapsed_ms: Option<f64>,
    pub energy_joules: f64,
}

/// Classification of one result file line.
#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    Blank,
    /// A comment other than the runtime marker.
    Comment,
    /// The `#C` comment, carrying the run's total compute time.
    RuntimeMarker(f64),
    Sample(KernelSample),
}

fn decimal(field: &str) -> Option<f64> {
    let field = field.trim();
    if DECIMAL_RE.is_match(field) {
        field.parse().ok()
    } else {
        None
    }
}

/// Parses the total runtime out of a `#C` comment line.
pub fn parse_runtime_marker(line: &str) -> Option<f64> {
    RUNTIME_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parses the trailing energy reading of a data line.
pub fn parse_energy(line: &str) -> Option<f64> {
    ENERGY_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Kernel name: the text before the first comma or, without commas, the first token.
pub fn parse_kernel_name(line: &str) -> Option<&str> {
    let name = match line.split_once(',') {
        Some((name, _)) => name.trim(),
        None => line.split_whitespace().next()?,
    };
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Elapsed time and iteration index of a comma-delimited data line.
///
/// The elapsed time is the field right before the trailing energy, which is the second field of
/// `name,elapsed,energy` and the third of `name,iteration,elapsed,energy`.
fn parse_elapsed_and_iteration(line: &str) -> (Option<f64>, Option<u64>) {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 3 {
        return (None, None);
    }
    let elapsed = decimal(fields[fields.len() - 2]);
    let iteration = if fields.len() >= 4 {
        fields[1].trim().parse().ok()
    } else {
        None
    };
    (elapsed, iteration)
}

/// Parses line number `line_no` (1-based) of a result file.
///
/// # Errors
/// [`Error::UnparsableLine`] if a `#C` line carries no `time : <value>`, or a data line lacks its
/// kernel name, its trailing energy or, for [`LineFormat::Dynamic`], its elapsed time.
pub fn parse_line(line: &str, line_no: usize, format: LineFormat) -> Result<LogLine> {
    let line = line.trim_end();
    let unparsable = || Error::UnparsableLine {
        line_no,
        line: line.to_owned(),
    };

    if line.trim().is_empty() {
        return Ok(LogLine::Blank);
    }

    if line.starts_with('#') {
        if !line.starts_with("#C") {
            return Ok(LogLine::Comment);
        }
        return parse_runtime_marker(line)
            .map(LogLine::RuntimeMarker)
            .ok_or_else(unparsable);
    }

    let kernel_name = parse_kernel_name(line).ok_or_else(unparsable)?;
    let energy_joules = parse_energy(line).ok_or_else(unparsable)?;
    let (elapsed_ms, iteration) = parse_elapsed_and_iteration(line);
    if format == LineFormat::Dynamic && elapsed_ms.is_none() {
        return Err(unparsable());
    }

    log::trace!("line {line_no}: kernel {kernel_name}, elapsed {elapsed_ms:?}, energy {energy_joules}");

    Ok(LogLine::Sample(KernelSample {
        kernel_name: kernel_name.to_owned(),
        iteration,
        elapsed_ms,
        energy_joules,
    }))
}
