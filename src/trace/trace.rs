use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::conflict::resolver::ResolutionReport;

/// One page-object builder operation, written as a JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub operation: String,
    pub page_object: String,

    pub elements: usize,
    pub conflict_buckets: usize,
    pub renamed: usize,

    pub fingerprint: Option<String>,
}

impl GenerationEvent {
    pub fn now(step: u64, operation: &str, page_object: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step,
            operation: operation.to_string(),
            page_object: page_object.to_string(),
            elements: 0,
            conflict_buckets: 0,
            renamed: 0,
            fingerprint: None,
        }
    }

    pub fn with_elements(mut self, elements: usize) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_resolution(mut self, report: &ResolutionReport) -> Self {
        self.conflict_buckets = report.conflict_buckets;
        self.renamed = report.renamed;
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: impl ToString) -> Self {
        self.fingerprint = Some(fingerprint.to_string());
        self
    }
}
