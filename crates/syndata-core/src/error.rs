use thiserror::Error;

/// Errors raised while loading or normalizing a schema document.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema source could not be read.
    #[error("failed to read schema source: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not parseable as YAML.
    #[error("failed to parse schema document: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// The document does not match either supported shape.
    #[error("invalid schema document: {0}")]
    InvalidDocument(String),
    /// A field declares a type outside the supported set.
    #[error("field '{field}' declares unsupported type '{declared}'")]
    UnsupportedFieldType { field: String, declared: String },
    /// A field declares a generator outside the supported set.
    #[error("field '{field}' declares unknown generator '{declared}'")]
    UnknownGenerator { field: String, declared: String },
    /// A field spec is internally inconsistent.
    #[error("invalid spec for field '{field}': {reason}")]
    InvalidFieldSpec { field: String, reason: String },
    /// A calculated formula references a field that is not in the schema.
    #[error("calculated field '{field}' references unknown field '{operand}'")]
    UnknownCalculatedOperand { field: String, operand: String },
    /// The same field name appears more than once.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
}

/// Convenience alias for results returned by SynData-ESG crates.
pub type Result<T> = std::result::Result<T, Error>;
