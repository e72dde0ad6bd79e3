//! Greenhouse-gas emissions rules.
//!
//! Fields: `reporting_period_start`/`reporting_period_end` for the
//! temporal rule, `total_emissions_tonnes` = `scope_1_emissions_tonnes` +
//! `scope_2_emissions_tonnes` for the aggregate rule.

use std::collections::HashMap;

use crate::errors::GenerationError;
use crate::record::Record;

use super::{check_period, check_total, correct_period, correct_total};

const PERIOD_START: &str = "reporting_period_start";
const PERIOD_END: &str = "reporting_period_end";
const SCOPE_1: &str = "scope_1_emissions_tonnes";
const SCOPE_2: &str = "scope_2_emissions_tonnes";
const TOTAL: &str = "total_emissions_tonnes";

const PERIOD_VIOLATION: &str = "reporting_period_end must be after reporting_period_start";
const TOTAL_VIOLATION: &str = "Total emissions mismatch (scope_1 + scope_2 != total)";

pub(super) fn apply_rules(record: &mut Record) -> Result<(), GenerationError> {
    correct_period(record, PERIOD_START, PERIOD_END)?;
    correct_total(record, TOTAL, &[SCOPE_1, SCOPE_2])?;
    Ok(())
}

pub(super) fn validate_row(row: &HashMap<String, String>) -> Vec<String> {
    let mut errors = Vec::new();
    check_period(row, PERIOD_START, PERIOD_END, PERIOD_VIOLATION, &mut errors);
    check_total(
        row,
        TOTAL,
        &[SCOPE_1, SCOPE_2],
        TOTAL_VIOLATION,
        "Emission parsing error",
        &mut errors,
    );
    errors
}
