use chrono::Duration;
use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Word;
use rand::Rng;
use rand::seq::IndexedRandom;

use syndata_core::{
    FieldSpec, FieldType, GeneratorKind, DEFAULT_NUMERIC_MAX, DEFAULT_NUMERIC_MIN,
};

use crate::errors::GenerationError;
use crate::value::{round2, GeneratedValue};

/// Synthesize one value for a non-calculated field. Deterministic for a
/// given RNG state; the caller owns the seeded stream.
pub fn synthesize(
    name: &str,
    spec: &FieldSpec,
    rng: &mut impl Rng,
) -> Result<GeneratedValue, GenerationError> {
    match spec.field_type {
        FieldType::String => synthesize_string(name, spec, rng),
        FieldType::Float => {
            let (min, max) = numeric_bounds(name, spec)?;
            Ok(GeneratedValue::Float(round2(rng.random_range(min..=max))))
        }
        FieldType::Int => {
            let (min, max) = numeric_bounds(name, spec)?;
            // The loader only admits integral bounds; fractional bounds on
            // a hand-built spec narrow inward rather than widen.
            let lo = min.ceil() as i64;
            let hi = max.floor() as i64;
            if lo > hi {
                return Err(GenerationError::FieldGeneration {
                    field: name.to_string(),
                    reason: format!("no integers between min {min} and max {max}"),
                });
            }
            Ok(GeneratedValue::Int(rng.random_range(lo..=hi)))
        }
        FieldType::Date => {
            let range = spec.range.ok_or_else(|| GenerationError::FieldGeneration {
                field: name.to_string(),
                reason: "date field has no range".to_string(),
            })?;
            // Zero-delta ranges always yield the start date.
            let offset = rng.random_range(0..=range.delta_days());
            Ok(GeneratedValue::Date(range.start + Duration::days(offset)))
        }
        FieldType::Bool => Ok(GeneratedValue::Bool(rng.random_bool(0.5))),
    }
}

/// Effective numeric bounds after defaulting. The loader rejects empty
/// ranges, but a hand-built spec must still surface an error here rather
/// than let the sampler panic.
fn numeric_bounds(name: &str, spec: &FieldSpec) -> Result<(f64, f64), GenerationError> {
    let min = spec.min.unwrap_or(DEFAULT_NUMERIC_MIN);
    let max = spec.max.unwrap_or(DEFAULT_NUMERIC_MAX);
    if min > max {
        return Err(GenerationError::FieldGeneration {
            field: name.to_string(),
            reason: format!("min {min} exceeds max {max}"),
        });
    }
    Ok((min, max))
}

fn synthesize_string(
    name: &str,
    spec: &FieldSpec,
    rng: &mut impl Rng,
) -> Result<GeneratedValue, GenerationError> {
    match spec.generator {
        Some(GeneratorKind::Uuid) => Ok(GeneratedValue::Uuid(random_uuid(rng, spec.length))),
        Some(GeneratorKind::CompanyName) => {
            Ok(GeneratedValue::Text(CompanyName().fake_with_rng::<String, _>(rng)))
        }
        None => match &spec.values {
            Some(values) => {
                let value =
                    values
                        .choose(rng)
                        .ok_or_else(|| GenerationError::FieldGeneration {
                            field: name.to_string(),
                            reason: "values list is empty".to_string(),
                        })?;
                Ok(GeneratedValue::Text(value.clone()))
            }
            None => Ok(GeneratedValue::Text(Word().fake_with_rng::<String, _>(rng))),
        },
    }
}

/// UUID built from RNG bytes so identifiers stay on the seeded stream.
fn random_uuid(rng: &mut impl Rng, length: Option<usize>) -> String {
    let bytes: [u8; 16] = rng.random();
    let mut value = uuid::Builder::from_random_bytes(bytes).into_uuid().to_string();
    if let Some(length) = length {
        value.truncate(length);
    }
    value
}
