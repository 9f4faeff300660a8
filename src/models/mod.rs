pub mod fix;
pub mod observation;
pub mod report;

pub use fix::FixCandidate;
pub use observation::Observation;
pub use report::{FileStatistics, IngestReport};
