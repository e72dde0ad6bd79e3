//! Core contracts for SynData-ESG.
//!
//! This crate defines the canonical field schema types and the loader that
//! normalizes declarative YAML schema documents into them.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{Error, Result};
pub use loader::{load_schema, parse_schema};
pub use schema::{
    DateRange, Field, FieldSpec, FieldType, GeneratorKind, Schema, SumFormula,
    DEFAULT_NUMERIC_MAX, DEFAULT_NUMERIC_MIN,
};
