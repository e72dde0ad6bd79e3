use std::collections::HashMap;

use rand::Rng;

use syndata_core::{FieldType, Schema};

use crate::errors::GenerationError;
use crate::synth::synthesize;
use crate::value::{round2, GeneratedValue};

/// One fully populated row, keyed by field name.
pub type Record = HashMap<String, GeneratedValue>;

/// Compose one record for the schema: synthesize every non-calculated
/// field in schema order, then resolve compiled sum formulas.
///
/// Synthesis order is part of the reproducibility contract; reordering
/// fields changes subsequent values even with the same seed.
pub fn compose_record(schema: &Schema, rng: &mut impl Rng) -> Result<Record, GenerationError> {
    let mut record = Record::with_capacity(schema.len());

    for field in &schema.fields {
        let value = if field.spec.is_calculated() {
            placeholder(field.spec.field_type)
        } else {
            synthesize(&field.name, &field.spec, rng)?
        };
        record.insert(field.name.clone(), value);
    }

    resolve_calculated(schema, &mut record);
    Ok(record)
}

/// Neutral placeholder assigned to calculated fields before resolution.
fn placeholder(field_type: FieldType) -> GeneratedValue {
    match field_type {
        FieldType::Float => GeneratedValue::Float(0.0),
        _ => GeneratedValue::Int(0),
    }
}

/// Overwrite placeholders with operand sums. Formulas that did not compile
/// or whose operands are non-numeric leave the placeholder untouched; that
/// silent skip is a documented limitation, not an error.
fn resolve_calculated(schema: &Schema, record: &mut Record) {
    for field in &schema.fields {
        let Some(sum) = &field.spec.calculated else {
            continue;
        };
        let left = record.get(sum.left.as_str()).and_then(GeneratedValue::as_f64);
        let right = record.get(sum.right.as_str()).and_then(GeneratedValue::as_f64);
        if let (Some(left), Some(right)) = (left, right) {
            record.insert(
                field.name.clone(),
                GeneratedValue::Float(round2(left + right)),
            );
        }
    }
}
