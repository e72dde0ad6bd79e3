use thiserror::Error;

/// Errors emitted by the generation engine. Generation-path errors abort
/// the whole batch; upload validation reports findings as data instead.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Value synthesis failed for a field.
    #[error("failed to generate field '{field}': {reason}")]
    FieldGeneration { field: String, reason: String },
    /// Domain correction could not proceed on a freshly generated record.
    #[error("rule application failed for field '{field}': {cause}")]
    RuleApplication { field: String, cause: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
