//! Schema-driven synthetic dataset engine for SynData-ESG.
//!
//! This crate consumes a normalized schema to produce deterministic ESG
//! datasets (CSV) with domain business rules applied, and validates
//! externally supplied datasets against the same rules.

pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod record;
pub mod rules;
pub mod synth;
pub mod validate;
pub mod value;

pub use engine::{Dataset, GenerationEngine};
pub use errors::GenerationError;
pub use model::GenerateOptions;
pub use record::{compose_record, Record};
pub use rules::Domain;
pub use validate::{validate_csv, validate_reader, RowIssues};
pub use value::GeneratedValue;
