use crate::error::Result;
use crate::models::Observation;
use crate::utils::constants::DEFAULT_ROW_GROUP_SIZE;
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Writes accepted tracking points to a Parquet point dataset
///
/// Geometry is carried as signed decimal-degree `latitude`/`longitude`
/// columns in a geographic (EPSG:4326-equivalent) reference, regardless of
/// what downstream GIS tooling reprojects to.
pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
    include_source: bool,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            include_source: true,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            "snappy" => Compression::SNAPPY,
            "gzip" => Compression::GZIP(GzipLevel::default()),
            "lz4" => Compression::LZ4,
            "zstd" => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            "none" => Compression::UNCOMPRESSED,
            _ => {
                return Err(crate::error::ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Include or drop the source-file provenance column
    pub fn with_source_column(mut self, include_source: bool) -> Self {
        self.include_source = include_source;
        self
    }

    /// Write observations to a Parquet file
    pub fn write_observations(&self, observations: &[Observation], path: &Path) -> Result<()> {
        if observations.is_empty() {
            return Ok(());
        }

        let schema = self.create_schema();
        let batch = self.observations_to_batch(observations, schema.clone())?;

        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        Ok(())
    }

    /// Write observations in batches for memory efficiency
    pub fn write_observations_batched(
        &self,
        observations: &[Observation],
        path: &Path,
        batch_size: usize,
    ) -> Result<()> {
        if observations.is_empty() {
            return Ok(());
        }

        let schema = self.create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        for chunk in observations.chunks(batch_size) {
            let batch = self.observations_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;
        Ok(())
    }

    /// Create Arrow schema for the point dataset
    fn create_schema(&self) -> Arc<Schema> {
        let mut fields = Vec::new();

        if self.include_source {
            fields.push(Field::new("source_file", DataType::Utf8, true));
        }

        fields.extend([
            Field::new("tag_id", DataType::Int64, false),
            Field::new("location_class", DataType::Utf8, false),
            Field::new("timestamp", DataType::Utf8, false),
            Field::new("latitude", DataType::Float64, false),
            Field::new("longitude", DataType::Float64, false),
        ]);

        Arc::new(Schema::new(fields))
    }

    /// Convert observations to an Arrow RecordBatch
    fn observations_to_batch(
        &self,
        observations: &[Observation],
        schema: Arc<Schema>,
    ) -> Result<RecordBatch> {
        let tag_ids: Vec<i64> = observations.iter().map(|o| o.tag_id).collect();
        let location_classes: Vec<String> =
            observations.iter().map(|o| o.location_class.clone()).collect();
        let timestamps: Vec<String> = observations.iter().map(|o| o.timestamp.clone()).collect();
        let latitudes: Vec<f64> = observations.iter().map(|o| o.latitude).collect();
        let longitudes: Vec<f64> = observations.iter().map(|o| o.longitude).collect();

        let mut columns: Vec<ArrayRef> = Vec::new();

        if self.include_source {
            let source_files: Vec<Option<String>> =
                observations.iter().map(|o| o.source_file.clone()).collect();
            columns.push(Arc::new(StringArray::from(source_files)));
        }

        columns.push(Arc::new(Int64Array::from(tag_ids)));
        columns.push(Arc::new(StringArray::from(location_classes)));
        columns.push(Arc::new(StringArray::from(timestamps)));
        columns.push(Arc::new(Float64Array::from(latitudes)));
        columns.push(Arc::new(Float64Array::from(longitudes)));

        let batch = RecordBatch::try_new(schema, columns)?;

        Ok(batch)
    }

    /// Read sample observations back from a Parquet point dataset
    pub fn read_sample_observations(&self, path: &Path, limit: usize) -> Result<Vec<Observation>> {
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

        let file = File::open(path)?;
        let parquet_reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(limit.min(8192))
            .build()?;

        let mut observations = Vec::new();
        let mut total_read = 0;

        for batch_result in parquet_reader {
            let batch = batch_result?;

            // Provenance column is optional; detect it from the column count
            let has_source = batch.num_columns() == 6;
            let base = if has_source { 1 } else { 0 };

            let column_error = |name: &str| {
                crate::error::ProcessingError::Config(format!("Invalid {} column type", name))
            };

            let source_files = if has_source {
                Some(
                    batch
                        .column(0)
                        .as_any()
                        .downcast_ref::<StringArray>()
                        .ok_or_else(|| column_error("source_file"))?,
                )
            } else {
                None
            };
            let tag_ids = batch
                .column(base)
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or_else(|| column_error("tag_id"))?;
            let location_classes = batch
                .column(base + 1)
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| column_error("location_class"))?;
            let timestamps = batch
                .column(base + 2)
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| column_error("timestamp"))?;
            let latitudes = batch
                .column(base + 3)
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| column_error("latitude"))?;
            let longitudes = batch
                .column(base + 4)
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| column_error("longitude"))?;

            let batch_rows_to_read = batch.num_rows().min(limit - total_read);

            for i in 0..batch_rows_to_read {
                let source_file = source_files.and_then(|arr| {
                    if arr.is_null(i) {
                        None
                    } else {
                        Some(arr.value(i).to_string())
                    }
                });

                observations.push(Observation {
                    source_file,
                    tag_id: tag_ids.value(i),
                    location_class: location_classes.value(i).to_string(),
                    timestamp: timestamps.value(i).to_string(),
                    lat_raw: String::new(),
                    lon_raw: String::new(),
                    latitude: latitudes.value(i),
                    longitude: longitudes.value(i),
                });

                total_read += 1;
                if total_read >= limit {
                    break;
                }
            }

            if total_read >= limit {
                break;
            }
        }

        Ok(observations)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let file_metadata = metadata.file_metadata();
        let row_groups = metadata.num_row_groups();
        let total_rows = file_metadata.num_rows();
        let file_size = std::fs::metadata(path)?.len();

        let mut row_group_sizes = Vec::new();
        for i in 0..row_groups {
            let rg_metadata = metadata.row_group(i);
            row_group_sizes.push(rg_metadata.num_rows());
        }

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} MB\n\
            - Compression: {:?}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1_048_576.0, // Convert to MB
            self.compression,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn observation() -> Observation {
        Observation {
            source_file: Some("1997dg.txt".to_string()),
            tag_id: 7627,
            location_class: "2".to_string(),
            timestamp: "12/03/99 08:15:00".to_string(),
            lat_raw: "34.500N".to_string(),
            lon_raw: "120.250W".to_string(),
            latitude: 34.5,
            longitude: -120.25,
        }
    }

    #[test]
    fn test_write_empty_observations() {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new().unwrap();

        assert!(writer.write_observations(&[], temp_file.path()).is_ok());
    }

    #[test]
    fn test_write_and_read_back() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new().unwrap();

        writer.write_observations(&[observation()], temp_file.path())?;

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 1);

        let read_back = writer.read_sample_observations(temp_file.path(), 10)?;
        assert_eq!(read_back.len(), 1);
        assert_eq!(read_back[0].tag_id, 7627);
        assert_eq!(read_back[0].source_file.as_deref(), Some("1997dg.txt"));
        assert!((read_back[0].longitude - -120.25).abs() < 0.000001);

        Ok(())
    }

    #[test]
    fn test_source_column_omitted() -> Result<()> {
        let writer = ParquetWriter::new().with_source_column(false);
        let temp_file = NamedTempFile::new().unwrap();

        writer.write_observations(&[observation()], temp_file.path())?;

        let read_back = writer.read_sample_observations(temp_file.path(), 10)?;
        assert_eq!(read_back.len(), 1);
        assert_eq!(read_back[0].source_file, None);
        assert_eq!(read_back[0].location_class, "2");

        Ok(())
    }

    #[test]
    fn test_different_compressions() -> Result<()> {
        let compressions = ["snappy", "gzip", "lz4", "zstd", "none"];

        for compression in &compressions {
            let writer = ParquetWriter::new().with_compression(compression)?;
            let temp_file = NamedTempFile::new().unwrap();

            let result = writer.write_observations(&[observation()], temp_file.path());
            assert!(result.is_ok(), "Failed with compression: {}", compression);
        }

        assert!(ParquetWriter::new().with_compression("brotli9").is_err());

        Ok(())
    }
}
