use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default lower bound for numeric fields without an explicit `min`.
pub const DEFAULT_NUMERIC_MIN: f64 = 0.0;
/// Default upper bound for numeric fields without an explicit `max`.
pub const DEFAULT_NUMERIC_MAX: f64 = 100.0;

/// Supported field types, closed at schema-load time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Float,
    Int,
    Date,
    Bool,
}

impl FromStr for FieldType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "string" => Ok(FieldType::String),
            "float" => Ok(FieldType::Float),
            "int" => Ok(FieldType::Int),
            "date" => Ok(FieldType::Date),
            "bool" => Ok(FieldType::Bool),
            _ => Err(()),
        }
    }
}

/// Named synthesis strategies for string fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Random UUID, optionally truncated via [`FieldSpec::length`].
    Uuid,
    /// Plausible company name.
    CompanyName,
}

impl GeneratorKind {
    /// Parse a generator id as written in schema documents. The
    /// `faker.company` spelling is kept for existing presets.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "uuid" => Some(GeneratorKind::Uuid),
            "company" | "company_name" | "faker.company" => Some(GeneratorKind::CompanyName),
            _ => None,
        }
    }
}

/// Inclusive-start date window for date synthesis. The end bound is
/// reachable when the day delta lands on it; a zero-delta range always
/// yields the start date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn delta_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Compiled `calculated: "a + b"` formula. Only the sum of exactly two
/// operands is supported; anything else is left uncompiled and the
/// placeholder value survives composition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SumFormula {
    pub left: String,
    pub right: String,
}

/// Specification for one column of a synthetic dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field_type: FieldType,
    pub generator: Option<GeneratorKind>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Finite candidate set for categorical strings.
    pub values: Option<Vec<String>>,
    pub range: Option<DateRange>,
    /// Compiled sum formula, when the field is calculated and the formula
    /// has the supported two-operand shape.
    pub calculated: Option<SumFormula>,
    /// Raw formula text as written in the document. Present whenever the
    /// field is calculated, even when the formula did not compile.
    pub calculated_raw: Option<String>,
    /// Truncation length for shortened UUID identifiers.
    pub length: Option<usize>,
}

impl FieldSpec {
    pub fn is_calculated(&self) -> bool {
        self.calculated_raw.is_some()
    }
}

/// A named field within a schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub spec: FieldSpec,
}

/// Ordered field schema for one dataset. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.spec)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
