pub mod argos_reader;
pub mod directory;

pub use argos_reader::{ArgosReader, FixIterator};
pub use directory::list_data_files;
