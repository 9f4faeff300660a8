use crate::error::Result;
use crate::models::Observation;

/// Destination for accepted tracking points
///
/// The pipeline inserts observations in file-enumeration order, then
/// within-file encounter order; implementations must not assume any other
/// ordering. Implementations that buffer should flush in [`finish`].
pub trait PointSink {
    fn insert(&mut self, observation: &Observation) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that collects observations in memory
///
/// Used by the validate-only path and by tests; also the staging buffer the
/// CLI drains into the Parquet or CSV writer after a run.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub observations: Vec<Observation>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl PointSink for MemorySink {
    fn insert(&mut self, observation: &Observation) -> Result<()> {
        self.observations.push(observation.clone());
        Ok(())
    }
}
