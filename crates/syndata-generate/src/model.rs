use serde::{Deserialize, Serialize};

/// Options for one generation batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Number of records to generate.
    pub records: u64,
    /// Seed for the batch-wide random stream. A given
    /// `(schema, records, seed)` triple is fully reproducible.
    pub seed: u64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            records: 100,
            seed: 42,
        }
    }
}
