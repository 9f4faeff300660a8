pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{normalize_coordinate, parse_latitude, parse_longitude, validate_position};
pub use filename::{generate_default_csv_filename, generate_default_parquet_filename};
pub use progress::ProgressReporter;
