//! Simulator: replays a trace through a cache model.

use tracing::info;

use crate::cache::CacheModel;
use crate::common::error::{CacheError, TraceError};
use crate::sim::trace::TraceRecord;

/// Owns a model for the duration of one run.
#[derive(Debug)]
pub struct Simulator {
    model: CacheModel,
    records: u64,
}

impl Simulator {
    /// Creates a simulator around a freshly built model.
    pub const fn new(model: CacheModel) -> Self {
        Self { model, records: 0 }
    }

    /// Replays every record of `trace` in order, then flushes the cache.
    ///
    /// # Returns
    ///
    /// Number of records replayed by this call.
    ///
    /// # Errors
    ///
    /// [`CacheError::Trace`] on the first unreadable record; records before it
    /// have already been applied and the cache is not flushed.
    pub fn run<I>(&mut self, trace: I) -> Result<u64, CacheError>
    where
        I: IntoIterator<Item = Result<TraceRecord, TraceError>>,
    {
        let mut replayed = 0;
        for record in trace {
            let record = record?;
            let _ = self.model.access(record.addr, record.kind)?;
            replayed += 1;
        }
        self.records += replayed;
        let flushed = self.model.flush();
        info!(records = replayed, flushed, "trace replayed");
        Ok(replayed)
    }

    /// Total records replayed.
    pub const fn records(&self) -> u64 {
        self.records
    }

    /// Cache model.
    pub const fn model(&self) -> &CacheModel {
        &self.model
    }

    /// Consumes the simulator, returning the model with its final statistics.
    pub fn into_model(self) -> CacheModel {
        self.model
    }
}
