use crate::error::Result;
use crate::models::Observation;
use std::fs::File;
use std::path::Path;

/// Writes accepted tracking points to a CSV file
///
/// Column layout mirrors the Parquet dataset so either output feeds the same
/// downstream GIS import.
pub struct CsvWriter {
    include_source: bool,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self {
            include_source: true,
        }
    }

    /// Include or drop the source-file provenance column
    pub fn with_source_column(mut self, include_source: bool) -> Self {
        self.include_source = include_source;
        self
    }

    pub fn write_observations(&self, observations: &[Observation], path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        if self.include_source {
            writer.write_record([
                "source_file",
                "tag_id",
                "location_class",
                "timestamp",
                "latitude",
                "longitude",
            ])?;
        } else {
            writer.write_record([
                "tag_id",
                "location_class",
                "timestamp",
                "latitude",
                "longitude",
            ])?;
        }

        for observation in observations {
            let tag_id = observation.tag_id.to_string();
            let latitude = observation.latitude.to_string();
            let longitude = observation.longitude.to_string();

            if self.include_source {
                writer.write_record([
                    observation.source_file.as_deref().unwrap_or(""),
                    tag_id.as_str(),
                    observation.location_class.as_str(),
                    observation.timestamp.as_str(),
                    latitude.as_str(),
                    longitude.as_str(),
                ])?;
            } else {
                writer.write_record([
                    tag_id.as_str(),
                    observation.location_class.as_str(),
                    observation.timestamp.as_str(),
                    latitude.as_str(),
                    longitude.as_str(),
                ])?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
