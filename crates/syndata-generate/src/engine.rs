use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use syndata_core::Schema;

use crate::errors::GenerationError;
use crate::model::GenerateOptions;
use crate::record::{compose_record, Record};
use crate::rules::Domain;

/// An ordered batch of records conforming to one schema.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Column names in schema order.
    pub fields: Vec<String>,
    /// Records in generation order.
    pub rows: Vec<Record>,
}

/// Entry point for generating datasets from a schema.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Generate the whole batch, applying the domain correction to each
    /// record as it is composed. The RNG is seeded once at batch start;
    /// on any error the in-progress batch is discarded.
    pub fn run(
        &self,
        schema: &Schema,
        domain: Option<Domain>,
    ) -> Result<Dataset, GenerationError> {
        let start = Instant::now();
        let mut rng = ChaCha8Rng::seed_from_u64(self.options.seed);

        let domain_label = domain.map_or_else(|| "none".to_string(), |d| d.to_string());
        info!(
            records = self.options.records,
            seed = self.options.seed,
            domain = %domain_label,
            "generation started"
        );

        let mut rows = Vec::with_capacity(self.options.records as usize);
        for index in 0..self.options.records {
            let mut record = compose_record(schema, &mut rng).map_err(|err| {
                info!(record = index, error = %err, "generation aborted");
                err
            })?;
            if let Some(domain) = domain {
                domain.apply_rules(&mut record)?;
            }
            rows.push(record);
        }

        info!(
            records = rows.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "generation completed"
        );

        Ok(Dataset {
            fields: schema.field_names().map(str::to_string).collect(),
            rows,
        })
    }
}
