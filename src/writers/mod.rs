pub mod csv_writer;
pub mod parquet_writer;
pub mod sink;

pub use csv_writer::CsvWriter;
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};
pub use sink::{MemorySink, PointSink};
