pub mod pipeline;
pub mod quality_filter;

pub use pipeline::IngestPipeline;
pub use quality_filter::LocationClassFilter;
