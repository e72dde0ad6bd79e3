use std::collections::HashMap;

use chrono::NaiveDate;
use syndata_generate::{Domain, GeneratedValue, GenerationError, Record};

fn date(value: &str) -> GeneratedValue {
    GeneratedValue::Date(NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("test date"))
}

fn ghg_record(start: &str, end: &str, scope_1: f64, scope_2: f64, total: f64) -> Record {
    let mut record = Record::new();
    record.insert("reporting_period_start".to_string(), date(start));
    record.insert("reporting_period_end".to_string(), date(end));
    record.insert(
        "scope_1_emissions_tonnes".to_string(),
        GeneratedValue::Float(scope_1),
    );
    record.insert(
        "scope_2_emissions_tonnes".to_string(),
        GeneratedValue::Float(scope_2),
    );
    record.insert(
        "total_emissions_tonnes".to_string(),
        GeneratedValue::Float(total),
    );
    record
}

fn ccs_record(start: &str, end: &str, injected: f64, vented: f64, leaked: f64, captured: f64) -> Record {
    let mut record = Record::new();
    record.insert("injection_start_date".to_string(), date(start));
    record.insert("injection_end_date".to_string(), date(end));
    record.insert("co2_injected_tonnes".to_string(), GeneratedValue::Float(injected));
    record.insert("co2_vented_tonnes".to_string(), GeneratedValue::Float(vented));
    record.insert("co2_leaked_tonnes".to_string(), GeneratedValue::Float(leaked));
    record.insert("co2_captured_tonnes".to_string(), GeneratedValue::Float(captured));
    record
}

fn row_from(record: &Record) -> HashMap<String, String> {
    record
        .iter()
        .map(|(name, value)| (name.clone(), value.render()))
        .collect()
}

#[test]
fn reversed_period_is_repaired_one_year_forward() {
    let mut record = ghg_record("2020-06-01", "2020-01-01", 10.0, 20.0, 30.0);
    Domain::Ghg.apply_rules(&mut record).expect("apply rules");
    assert_eq!(
        record.get("reporting_period_end"),
        Some(&date("2021-06-01")),
        "end must move to exactly start + 1 year"
    );
    assert_eq!(
        record.get("reporting_period_start"),
        Some(&date("2020-06-01")),
        "start must never move"
    );
}

#[test]
fn equal_dates_count_as_a_violation() {
    let mut record = ghg_record("2020-06-01", "2020-06-01", 10.0, 20.0, 30.0);
    Domain::Ghg.apply_rules(&mut record).expect("apply rules");
    assert_eq!(record.get("reporting_period_end"), Some(&date("2021-06-01")));
}

#[test]
fn drifted_total_is_recomputed() {
    let mut record = ghg_record("2020-01-01", "2020-06-01", 12.5, 7.25, 0.0);
    Domain::Ghg.apply_rules(&mut record).expect("apply rules");
    assert_eq!(
        record.get("total_emissions_tonnes"),
        Some(&GeneratedValue::Float(19.75))
    );
}

#[test]
fn total_within_tolerance_is_left_alone() {
    let mut record = ghg_record("2020-01-01", "2020-06-01", 10.0, 20.0, 30.005);
    Domain::Ghg.apply_rules(&mut record).expect("apply rules");
    assert_eq!(
        record.get("total_emissions_tonnes"),
        Some(&GeneratedValue::Float(30.005))
    );
}

#[test]
fn missing_total_is_filled_in() {
    let mut record = ghg_record("2020-01-01", "2020-06-01", 1.0, 2.0, 0.0);
    record.remove("total_emissions_tonnes");
    Domain::Ghg.apply_rules(&mut record).expect("apply rules");
    assert_eq!(
        record.get("total_emissions_tonnes"),
        Some(&GeneratedValue::Float(3.0))
    );
}

#[test]
fn correction_is_idempotent() {
    let mut record = ghg_record("2020-06-01", "2020-01-01", 12.34, 56.78, 0.0);
    Domain::Ghg.apply_rules(&mut record).expect("first pass");
    let corrected = record.clone();
    Domain::Ghg.apply_rules(&mut record).expect("second pass");
    assert_eq!(record, corrected);
}

#[test]
fn corrected_record_validates_cleanly() {
    let mut record = ghg_record("2020-06-01", "2020-01-01", 12.34, 56.78, 1.0);
    Domain::Ghg.apply_rules(&mut record).expect("apply rules");
    let errors = Domain::Ghg.validate_row(&row_from(&record));
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn correction_fails_hard_on_missing_inputs() {
    let mut record = ghg_record("2020-01-01", "2020-06-01", 1.0, 2.0, 3.0);
    record.remove("scope_1_emissions_tonnes");
    let err = Domain::Ghg.apply_rules(&mut record).expect_err("must fail");
    match err {
        GenerationError::RuleApplication { field, .. } => {
            assert_eq!(field, "scope_1_emissions_tonnes");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn correction_fails_hard_on_non_numeric_inputs() {
    let mut record = ghg_record("2020-01-01", "2020-06-01", 1.0, 2.0, 3.0);
    record.insert(
        "scope_2_emissions_tonnes".to_string(),
        GeneratedValue::Text("n/a".to_string()),
    );
    let err = Domain::Ghg.apply_rules(&mut record).expect_err("must fail");
    assert!(matches!(err, GenerationError::RuleApplication { .. }));
}

#[test]
fn validation_reports_period_violation_without_repair() {
    let record = ghg_record("2020-06-01", "2020-01-01", 10.0, 20.0, 30.0);
    let row = row_from(&record);
    let errors = Domain::Ghg.validate_row(&row);
    assert!(errors
        .iter()
        .any(|msg| msg.contains("reporting_period_end must be after")));
    // read-only contract
    assert_eq!(row.get("reporting_period_end").map(String::as_str), Some("2020-01-01"));
}

#[test]
fn validation_reports_total_mismatch() {
    let record = ghg_record("2020-01-01", "2020-06-01", 10.0, 20.0, 35.0);
    let errors = Domain::Ghg.validate_row(&row_from(&record));
    assert!(errors.iter().any(|msg| msg.contains("Total emissions mismatch")));
}

#[test]
fn validation_converts_missing_fields_into_messages() {
    let mut row = row_from(&ghg_record("2020-01-01", "2020-06-01", 10.0, 20.0, 30.0));
    row.remove("reporting_period_end");
    row.remove("scope_1_emissions_tonnes");
    let errors = Domain::Ghg.validate_row(&row);
    assert!(errors.iter().any(|msg| msg.starts_with("Date parsing error")));
    assert!(errors.iter().any(|msg| msg.starts_with("Emission parsing error")));
}

#[test]
fn unparsable_constituent_suppresses_the_mismatch_verdict() {
    // With scope_1 unreadable the expected sum is unknowable, so only the
    // parse error may be reported, never a mismatch on the partial sum.
    let mut row = row_from(&ghg_record("2020-01-01", "2020-06-01", 10.0, 20.0, 30.0));
    row.insert("scope_1_emissions_tonnes".to_string(), "ten".to_string());
    let errors = Domain::Ghg.validate_row(&row);
    assert!(errors.iter().any(|msg| msg.starts_with("Emission parsing error")));
    assert!(!errors.iter().any(|msg| msg.contains("Total emissions mismatch")));
}

#[test]
fn unparsable_total_yields_a_parse_error_only() {
    let mut row = row_from(&ghg_record("2020-01-01", "2020-06-01", 10.0, 20.0, 30.0));
    row.insert("total_emissions_tonnes".to_string(), "n/a".to_string());
    let errors = Domain::Ghg.validate_row(&row);
    assert_eq!(errors.len(), 1, "errors: {errors:?}");
    assert!(errors[0].starts_with("Emission parsing error"));
}

#[test]
fn validation_never_panics_on_garbage() {
    let mut row = HashMap::new();
    row.insert("reporting_period_start".to_string(), "not-a-date".to_string());
    row.insert("total_emissions_tonnes".to_string(), "NaN?".to_string());
    let errors = Domain::Ghg.validate_row(&row);
    assert!(!errors.is_empty());
}

#[test]
fn ccs_mass_balance_is_corrected() {
    let mut record = ccs_record("2023-02-01", "2023-05-01", 9000.0, 120.5, 30.25, 0.0);
    Domain::Ccs.apply_rules(&mut record).expect("apply rules");
    assert_eq!(
        record.get("co2_captured_tonnes"),
        Some(&GeneratedValue::Float(9150.75))
    );
}

#[test]
fn ccs_period_repair_matches_the_shared_policy() {
    let mut record = ccs_record("2023-03-10", "2023-01-01", 9000.0, 0.0, 0.0, 9000.0);
    Domain::Ccs.apply_rules(&mut record).expect("apply rules");
    assert_eq!(record.get("injection_end_date"), Some(&date("2024-03-10")));
}

#[test]
fn ccs_corrected_record_validates_cleanly() {
    let mut record = ccs_record("2023-03-10", "2023-01-01", 9000.55, 10.1, 5.05, 0.0);
    Domain::Ccs.apply_rules(&mut record).expect("apply rules");
    let errors = Domain::Ccs.validate_row(&row_from(&record));
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn ccs_validation_reports_balance_mismatch() {
    let record = ccs_record("2023-01-01", "2023-06-01", 9000.0, 100.0, 50.0, 8000.0);
    let errors = Domain::Ccs.validate_row(&row_from(&record));
    assert!(errors.iter().any(|msg| msg.contains("CO2 mass balance mismatch")));
}
