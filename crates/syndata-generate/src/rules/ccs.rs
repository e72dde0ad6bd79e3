//! Carbon capture & storage rules.
//!
//! Fields: `injection_start_date`/`injection_end_date` for the temporal
//! rule; the mass balance `co2_captured_tonnes` = `co2_injected_tonnes` +
//! `co2_vented_tonnes` + `co2_leaked_tonnes` for the aggregate rule.

use std::collections::HashMap;

use crate::errors::GenerationError;
use crate::record::Record;

use super::{check_period, check_total, correct_period, correct_total};

const INJECTION_START: &str = "injection_start_date";
const INJECTION_END: &str = "injection_end_date";
const INJECTED: &str = "co2_injected_tonnes";
const VENTED: &str = "co2_vented_tonnes";
const LEAKED: &str = "co2_leaked_tonnes";
const CAPTURED: &str = "co2_captured_tonnes";

const PERIOD_VIOLATION: &str = "injection_end_date must be after injection_start_date";
const BALANCE_VIOLATION: &str =
    "CO2 mass balance mismatch (injected + vented + leaked != captured)";

pub(super) fn apply_rules(record: &mut Record) -> Result<(), GenerationError> {
    correct_period(record, INJECTION_START, INJECTION_END)?;
    correct_total(record, CAPTURED, &[INJECTED, VENTED, LEAKED])?;
    Ok(())
}

pub(super) fn validate_row(row: &HashMap<String, String>) -> Vec<String> {
    let mut errors = Vec::new();
    check_period(row, INJECTION_START, INJECTION_END, PERIOD_VIOLATION, &mut errors);
    check_total(
        row,
        CAPTURED,
        &[INJECTED, VENTED, LEAKED],
        BALANCE_VIOLATION,
        "CO2 quantity parsing error",
        &mut errors,
    );
    errors
}
