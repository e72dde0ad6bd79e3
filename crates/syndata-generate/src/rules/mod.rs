//! Domain business rules: correction for freshly generated records and
//! read-only validation for uploaded rows.
//!
//! All domains share the aggregate tolerance (0.01 absolute) and the
//! temporal repair policy (end date advanced to exactly one year after the
//! start date). Correction errors are hard failures; validation converts
//! every malformed input into a per-row message string and never fails.

mod ccs;
mod ghg;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};

use crate::errors::GenerationError;
use crate::record::Record;
use crate::value::{round2, GeneratedValue};

/// Absolute tolerance for aggregate consistency checks.
pub const TOTAL_TOLERANCE: f64 = 0.01;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// ESG reporting domains with business rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Ghg,
    Ccs,
}

impl Domain {
    /// Correct a freshly generated record in place. Invoked once per
    /// record before it joins the dataset.
    pub fn apply_rules(&self, record: &mut Record) -> Result<(), GenerationError> {
        match self {
            Domain::Ghg => ghg::apply_rules(record),
            Domain::Ccs => ccs::apply_rules(record),
        }
    }

    /// Validate an externally supplied row. Returns zero or more
    /// human-readable error strings; never raises for malformed input.
    pub fn validate_row(&self, row: &HashMap<String, String>) -> Vec<String> {
        match self {
            Domain::Ghg => ghg::validate_row(row),
            Domain::Ccs => ccs::validate_row(row),
        }
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "ghg" => Ok(Domain::Ghg),
            "ccs" => Ok(Domain::Ccs),
            other => Err(format!("unknown domain '{other}'")),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Ghg => write!(f, "ghg"),
            Domain::Ccs => write!(f, "ccs"),
        }
    }
}

// --- correction helpers (generated records, hard errors) ---

fn record_date(record: &Record, field: &str) -> Result<NaiveDate, GenerationError> {
    let value = record
        .get(field)
        .ok_or_else(|| rule_error(field, "field missing from record"))?;
    value
        .as_date()
        .ok_or_else(|| rule_error(field, "value is not a date"))
}

fn record_f64(record: &Record, field: &str) -> Result<f64, GenerationError> {
    let value = record
        .get(field)
        .ok_or_else(|| rule_error(field, "field missing from record"))?;
    value
        .as_f64()
        .ok_or_else(|| rule_error(field, "value is not numeric"))
}

fn rule_error(field: &str, cause: &str) -> GenerationError {
    GenerationError::RuleApplication {
        field: field.to_string(),
        cause: cause.to_string(),
    }
}

/// Enforce `end > start`; on violation the end date becomes exactly one
/// year after the start date. The start date is never moved.
fn correct_period(
    record: &mut Record,
    start_field: &str,
    end_field: &str,
) -> Result<(), GenerationError> {
    let start = record_date(record, start_field)?;
    let end = record_date(record, end_field)?;
    if end <= start {
        let repaired = start
            .checked_add_months(Months::new(12))
            .ok_or_else(|| rule_error(end_field, "repaired date out of range"))?;
        record.insert(end_field.to_string(), GeneratedValue::Date(repaired));
    }
    Ok(())
}

/// Enforce `total == sum(parts)` within [`TOTAL_TOLERANCE`]; a missing or
/// drifted total is recomputed and rounded to two decimal places.
fn correct_total(
    record: &mut Record,
    total_field: &str,
    parts: &[&str],
) -> Result<(), GenerationError> {
    let mut expected = 0.0;
    for part in parts {
        expected += record_f64(record, part)?;
    }
    let current = record.get(total_field).and_then(GeneratedValue::as_f64);
    let drifted = match current {
        Some(value) => (value - expected).abs() > TOTAL_TOLERANCE,
        None => true,
    };
    if drifted {
        record.insert(
            total_field.to_string(),
            GeneratedValue::Float(round2(expected)),
        );
    }
    Ok(())
}

// --- validation helpers (uploaded rows, errors as data) ---

fn row_date(row: &HashMap<String, String>, field: &str) -> Result<NaiveDate, String> {
    let raw = row
        .get(field)
        .ok_or_else(|| format!("missing field '{field}'"))?;
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|err| format!("invalid date '{raw}' in '{field}': {err}"))
}

fn row_f64(row: &HashMap<String, String>, field: &str) -> Result<f64, String> {
    let raw = row
        .get(field)
        .ok_or_else(|| format!("missing field '{field}'"))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid number '{raw}' in '{field}': {err}"))
}

fn check_period(
    row: &HashMap<String, String>,
    start_field: &str,
    end_field: &str,
    violation: &str,
    errors: &mut Vec<String>,
) {
    let mut parse_errors = Vec::new();
    let start = row_date(row, start_field).map_err(|err| parse_errors.push(err)).ok();
    let end = row_date(row, end_field).map_err(|err| parse_errors.push(err)).ok();
    for err in parse_errors {
        errors.push(format!("Date parsing error: {err}"));
    }
    if let (Some(start), Some(end)) = (start, end)
        && end <= start
    {
        errors.push(violation.to_string());
    }
}

fn check_total(
    row: &HashMap<String, String>,
    total_field: &str,
    parts: &[&str],
    violation: &str,
    parse_label: &str,
    errors: &mut Vec<String>,
) {
    let mut expected = 0.0;
    let mut total = None;
    let mut parsed = true;
    for field in parts.iter().chain(std::iter::once(&total_field)) {
        match row_f64(row, field) {
            Ok(value) if *field == total_field => total = Some(value),
            Ok(value) => expected += value,
            Err(err) => {
                errors.push(format!("{parse_label}: {err}"));
                parsed = false;
            }
        }
    }
    if !parsed {
        return;
    }
    let Some(total) = total else {
        return;
    };
    if (expected - total).abs() > TOTAL_TOLERANCE {
        errors.push(violation.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_round_trips_through_strings() {
        assert_eq!("ghg".parse::<Domain>().ok(), Some(Domain::Ghg));
        assert_eq!("CCS".parse::<Domain>().ok(), Some(Domain::Ccs));
        assert!("uhs".parse::<Domain>().is_err());
        assert_eq!(Domain::Ghg.to_string(), "ghg");
    }
}
