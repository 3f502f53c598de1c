use serde::{Deserialize, Serialize};

/// Parameters for one generation round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Series name copied into every ticket of the batch.
    pub series: String,
    /// Prefix used in the human-readable code.
    pub prefix: String,
    /// First folio of the batch; subsequent tickets count up from here.
    pub start_folio: u32,
    /// Number of tickets to synthesize.
    pub count: u32,
    /// Price fixed at creation for the whole batch.
    pub price: f64,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            series: "SERIE-A".to_string(),
            prefix: "A".to_string(),
            start_folio: 1,
            count: 10,
            price: 100.0,
        }
    }
}

/// Derived read-only catalog metrics, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogMetrics {
    pub total: usize,
    pub sold: usize,
    pub available: usize,
}
