use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_yaml::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::schema::{
    DateRange, Field, FieldSpec, FieldType, GeneratorKind, Schema, SumFormula,
    DEFAULT_NUMERIC_MAX, DEFAULT_NUMERIC_MIN,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_DATE_RANGE: (&str, &str) = ("2018-01-01", "2022-01-01");

/// Load and normalize a YAML schema document from disk.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let contents = fs::read_to_string(path)?;
    parse_schema(&contents)
}

/// Parse a schema document from text.
///
/// Two document shapes are accepted:
/// - a flat mapping of field name to spec properties;
/// - a `fields:` list of descriptors, each carrying a `name` property.
///
/// Both normalize to the same ordered [`Schema`]. Unknown field types and
/// generators, inverted bounds, empty candidate sets, and calculated
/// formulas referencing missing fields are all rejected here rather than
/// deferred to synthesis time.
pub fn parse_schema(contents: &str) -> Result<Schema> {
    let document: Value = serde_yaml::from_str(contents)?;
    let Some(mapping) = document.as_mapping() else {
        return Err(Error::InvalidDocument(
            "top-level document must be a mapping".to_string(),
        ));
    };

    let fields = if let Some(list) = mapping.get("fields").and_then(Value::as_sequence) {
        parse_field_list(list)?
    } else {
        parse_flat_mapping(mapping)?
    };

    let mut seen = BTreeSet::new();
    for field in &fields {
        if !seen.insert(field.name.clone()) {
            return Err(Error::DuplicateField(field.name.clone()));
        }
    }

    let schema = Schema { fields };
    validate_calculated_operands(&schema)?;
    Ok(schema)
}

/// Raw spec properties as written in the document, before normalization.
#[derive(Debug, Deserialize)]
struct RawFieldSpec {
    #[serde(rename = "type")]
    field_type: Option<String>,
    generator: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    values: Option<Vec<String>>,
    range: Option<Vec<String>>,
    calculated: Option<String>,
    length: Option<usize>,
}

fn parse_flat_mapping(mapping: &serde_yaml::Mapping) -> Result<Vec<Field>> {
    let mut fields = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let name = key.as_str().ok_or_else(|| {
            Error::InvalidDocument("field names must be strings".to_string())
        })?;
        let raw: RawFieldSpec = serde_yaml::from_value(value.clone())?;
        fields.push(Field {
            name: name.to_string(),
            spec: normalize_spec(name, raw)?,
        });
    }
    Ok(fields)
}

fn parse_field_list(list: &[Value]) -> Result<Vec<Field>> {
    let mut fields = Vec::with_capacity(list.len());
    for entry in list {
        let Some(descriptor) = entry.as_mapping() else {
            return Err(Error::InvalidDocument(
                "entries under 'fields' must be mappings".to_string(),
            ));
        };
        let name = descriptor
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::InvalidDocument(
                    "entries under 'fields' must carry a string 'name'".to_string(),
                )
            })?;
        let mut properties = descriptor.clone();
        properties.remove("name");
        let raw: RawFieldSpec = serde_yaml::from_value(Value::Mapping(properties))?;
        fields.push(Field {
            name: name.to_string(),
            spec: normalize_spec(name, raw)?,
        });
    }
    Ok(fields)
}

fn normalize_spec(name: &str, raw: RawFieldSpec) -> Result<FieldSpec> {
    // Calculated fields are never synthesized, so their type may be
    // omitted; the resolved sum is numeric.
    let field_type = match (&raw.field_type, &raw.calculated) {
        (None, Some(_)) => FieldType::Float,
        (declared, _) => {
            let declared = declared.clone().unwrap_or_default();
            declared
                .parse::<FieldType>()
                .map_err(|_| Error::UnsupportedFieldType {
                    field: name.to_string(),
                    declared,
                })?
        }
    };

    let generator = match raw.generator.as_deref() {
        None => None,
        Some(id) => Some(GeneratorKind::parse(id).ok_or_else(|| Error::UnknownGenerator {
            field: name.to_string(),
            declared: id.to_string(),
        })?),
    };

    // Bounds are checked after defaulting: a lone `min: 200` with the
    // max defaulting to 100 is an empty range.
    if matches!(field_type, FieldType::Float | FieldType::Int) {
        let min = raw.min.unwrap_or(DEFAULT_NUMERIC_MIN);
        let max = raw.max.unwrap_or(DEFAULT_NUMERIC_MAX);
        if min > max {
            return Err(Error::InvalidFieldSpec {
                field: name.to_string(),
                reason: format!("effective min {min} exceeds effective max {max}"),
            });
        }
    }

    if field_type == FieldType::Int {
        for (label, bound) in [("min", raw.min), ("max", raw.max)] {
            let Some(value) = bound else { continue };
            if value.fract() != 0.0 {
                return Err(Error::InvalidFieldSpec {
                    field: name.to_string(),
                    reason: format!("{label} {value} must be an integer for int fields"),
                });
            }
            if value < i64::MIN as f64 || value > i64::MAX as f64 {
                return Err(Error::InvalidFieldSpec {
                    field: name.to_string(),
                    reason: format!("{label} {value} is out of integer range"),
                });
            }
        }
    }

    if let Some(values) = &raw.values
        && values.is_empty()
    {
        return Err(Error::InvalidFieldSpec {
            field: name.to_string(),
            reason: "values list must not be empty".to_string(),
        });
    }

    if let Some(length) = raw.length
        && length == 0
    {
        return Err(Error::InvalidFieldSpec {
            field: name.to_string(),
            reason: "length must be positive".to_string(),
        });
    }

    let range = match raw.range {
        Some(bounds) => Some(parse_date_range(name, &bounds)?),
        None if field_type == FieldType::Date => Some(default_date_range(name)?),
        None => None,
    };

    let (calculated, calculated_raw) = match raw.calculated {
        Some(formula) => {
            let compiled = compile_sum_formula(&formula);
            if compiled.is_none() {
                warn!(
                    field = name,
                    formula = %formula,
                    "calculated formula not compiled; only 'a + b' is supported"
                );
            }
            (compiled, Some(formula))
        }
        None => (None, None),
    };

    Ok(FieldSpec {
        field_type,
        generator,
        min: raw.min,
        max: raw.max,
        values: raw.values,
        range,
        calculated,
        calculated_raw,
        length: raw.length,
    })
}

fn parse_date_range(name: &str, bounds: &[String]) -> Result<DateRange> {
    let [start, end] = bounds else {
        return Err(Error::InvalidFieldSpec {
            field: name.to_string(),
            reason: format!("range must hold exactly two dates, got {}", bounds.len()),
        });
    };
    let start = parse_date(name, start)?;
    let end = parse_date(name, end)?;
    if end < start {
        return Err(Error::InvalidFieldSpec {
            field: name.to_string(),
            reason: format!("range end {end} precedes start {start}"),
        });
    }
    Ok(DateRange { start, end })
}

fn default_date_range(name: &str) -> Result<DateRange> {
    Ok(DateRange {
        start: parse_date(name, DEFAULT_DATE_RANGE.0)?,
        end: parse_date(name, DEFAULT_DATE_RANGE.1)?,
    })
}

fn parse_date(name: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|err| Error::InvalidFieldSpec {
        field: name.to_string(),
        reason: format!("invalid date '{raw}': {err}"),
    })
}

fn compile_sum_formula(formula: &str) -> Option<SumFormula> {
    let mut parts = formula.split('+');
    let left = parts.next()?.trim();
    let right = parts.next()?.trim();
    if parts.next().is_some() || left.is_empty() || right.is_empty() {
        return None;
    }
    Some(SumFormula {
        left: left.to_string(),
        right: right.to_string(),
    })
}

fn validate_calculated_operands(schema: &Schema) -> Result<()> {
    for field in &schema.fields {
        if let Some(sum) = &field.spec.calculated {
            for operand in [&sum.left, &sum.right] {
                if !schema.contains(operand) {
                    return Err(Error::UnknownCalculatedOperand {
                        field: field.name.clone(),
                        operand: operand.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
