use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::errors::GenerationError;
use crate::rules::Domain;

/// Validation findings for one uploaded row. `line` is the 1-based line
/// number in the file, accounting for the header row (first data row = 2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssues {
    pub line: u64,
    pub errors: Vec<String>,
}

impl RowIssues {
    /// Findings joined the way the report surface displays them.
    pub fn joined(&self) -> String {
        self.errors.join("; ")
    }
}

/// Validate an uploaded CSV dataset against a domain's rules.
///
/// Only an unreadable file is a hard error. Every per-row problem,
/// including structurally malformed CSV lines, is reported as that row's
/// findings; the whole file is always scanned.
pub fn validate_csv(path: &Path, domain: Domain) -> Result<Vec<RowIssues>, GenerationError> {
    let file = File::open(path)?;
    validate_reader(file, domain)
}

/// Validate CSV content from any reader. See [`validate_csv`].
pub fn validate_reader<R: Read>(
    reader: R,
    domain: Domain,
) -> Result<Vec<RowIssues>, GenerationError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect();

    let mut issues = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let line = index as u64 + 2;
        let errors = match result {
            Ok(record) => {
                let row: HashMap<String, String> = headers
                    .iter()
                    .zip(record.iter())
                    .map(|(header, value)| (header.clone(), value.to_string()))
                    .collect();
                domain.validate_row(&row)
            }
            Err(err) => vec![format!("CSV parsing error: {err}")],
        };
        if !errors.is_empty() {
            issues.push(RowIssues { line, errors });
        }
    }

    info!(
        domain = %domain,
        rows_with_issues = issues.len(),
        "upload validation finished"
    );

    Ok(issues)
}
