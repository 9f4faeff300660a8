use crate::error::{ProcessingError, Result};
use crate::models::{FileStatistics, FixCandidate, IngestReport, Observation};
use crate::processors::LocationClassFilter;
use crate::readers::{list_data_files, ArgosReader};
use crate::utils::constants::README_FILE;
use crate::utils::coordinates::{parse_latitude, parse_longitude, validate_position};
use crate::utils::progress::ProgressReporter;
use crate::writers::PointSink;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Sequential ingest of ARGOS tracking files into a point sink
///
/// Files are processed one at a time in enumeration order; each file is
/// streamed forward once and closed before the next is opened. A failing
/// record costs exactly that record: the filter and conversion tallies are
/// kept per file and rolled into the returned report. File-level I/O errors
/// are not recovered and abort the run.
pub struct IngestPipeline {
    reader: ArgosReader,
    filter: Option<LocationClassFilter>,
    tag_provenance: bool,
}

impl IngestPipeline {
    pub fn new() -> Self {
        Self {
            reader: ArgosReader::new(),
            filter: None,
            tag_provenance: true,
        }
    }

    pub fn with_reader(mut self, reader: ArgosReader) -> Self {
        self.reader = reader;
        self
    }

    /// Restrict output to the given location classes; `None` disables
    /// filtering so every class is accepted
    pub fn with_filter(mut self, filter: Option<LocationClassFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Record the originating file name on each observation
    pub fn with_provenance(mut self, tag_provenance: bool) -> Self {
        self.tag_provenance = tag_provenance;
        self
    }

    /// Process every data file in a folder
    pub fn run(
        &self,
        input_dir: &Path,
        sink: &mut dyn PointSink,
        progress: Option<&ProgressReporter>,
    ) -> Result<IngestReport> {
        let files = list_data_files(input_dir)?;
        self.run_files(&files, sink, progress)
    }

    /// Process an explicit list of files in the given order
    pub fn run_files(
        &self,
        files: &[PathBuf],
        sink: &mut dyn PointSink,
        progress: Option<&ProgressReporter>,
    ) -> Result<IngestReport> {
        let mut report = IngestReport::new();

        for path in files {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("<unnamed>")
                .to_string();

            // Documentation shipped with the download, not data
            if file_name == README_FILE {
                debug!("Skipping {}", file_name);
                report.record_skipped_file();
                continue;
            }

            if let Some(p) = progress {
                p.start_file(&file_name);
            }
            info!("Working on file {}", file_name);

            let stats = self.process_file(path, &file_name, sink)?;
            report.record_file(&file_name, stats);
        }

        sink.finish()?;

        if report.filtered_count > 0 {
            warn!("{} records not meeting LC class", report.filtered_count);
        }
        if report.error_count > 0 {
            warn!(
                "{} records had no usable location data",
                report.error_count
            );
        }

        Ok(report)
    }

    fn process_file(
        &self,
        path: &Path,
        file_name: &str,
        sink: &mut dyn PointSink,
    ) -> Result<FileStatistics> {
        let mut stats = FileStatistics::default();
        let source_file = self.tag_provenance.then(|| file_name.to_string());

        for candidate in self.reader.scan(path)? {
            stats.candidates += 1;

            let fix = match candidate {
                Ok(fix) => fix,
                Err(e) if e.is_record_error() => {
                    warn!("Dropping malformed record in {}: {}", file_name, e);
                    stats.errors += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            // Filtering happens before any coordinate parsing, so bad
            // coordinates on a rejected record are never counted as errors
            if let Some(filter) = &self.filter {
                if !filter.accepts(&fix.location_class) {
                    stats.filtered += 1;
                    continue;
                }
            }

            match self.convert(fix, source_file.clone()) {
                Ok(observation) => {
                    sink.insert(&observation)?;
                    stats.inserted += 1;
                }
                Err((tag_id, e)) if e.is_record_error() => {
                    warn!("Error adding record {} to the output: {}", tag_id, e);
                    stats.errors += 1;
                }
                Err((_, e)) => return Err(e),
            }
        }

        Ok(stats)
    }

    /// Convert a fix candidate into an accepted observation
    ///
    /// Both coordinates must convert and fall within signed-degree bounds or
    /// no observation is produced; errors carry the tag id for logging.
    fn convert(
        &self,
        fix: FixCandidate,
        source_file: Option<String>,
    ) -> std::result::Result<Observation, (String, ProcessingError)> {
        let with_tag = |e: ProcessingError| (fix.tag_id.clone(), e);

        let latitude = parse_latitude(&fix.lat_raw).map_err(with_tag)?;
        let longitude = parse_longitude(&fix.lon_raw).map_err(with_tag)?;
        validate_position(latitude, longitude).map_err(with_tag)?;

        let tag_id = fix.tag_id.parse::<i64>().map_err(|_| {
            with_tag(ProcessingError::InvalidFormat(format!(
                "Invalid tag id: '{}'",
                fix.tag_id
            )))
        })?;

        Ok(Observation {
            source_file,
            tag_id,
            location_class: fix.location_class.clone(),
            timestamp: fix.timestamp(),
            lat_raw: fix.lat_raw,
            lon_raw: fix.lon_raw,
            latitude,
            longitude,
        })
    }
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writers::MemorySink;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    fn record(tag: &str, lc: &str, lat: &str, lon: &str) -> String {
        format!(
            "{}  Date : 12.03.99 08:15:00  LC : {}  IQ : 66\n       Lat1 : {}  Lon1 : {}  Lat2 : 0.000N  Lon2 : 0.000E\n",
            tag, lc, lat, lon
        )
    }

    #[test]
    fn test_round_trip_well_formed_record() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "1999dg.txt", &record("1234", "2", "34.50N", "120.25W"));

        let mut sink = MemorySink::new();
        let pipeline = IngestPipeline::new()
            .with_filter(Some(LocationClassFilter::from_delimited("2;3")));
        let report = pipeline.run(dir.path(), &mut sink, None).unwrap();

        assert_eq!(report.records_inserted, 1);
        assert_eq!(report.filtered_count, 0);
        assert_eq!(report.error_count, 0);

        let obs = &sink.observations[0];
        assert_eq!(obs.tag_id, 1234);
        assert!((obs.latitude - 34.50).abs() < 0.000001);
        assert!((obs.longitude - -120.25).abs() < 0.000001);
        assert_eq!(obs.timestamp, "12/03/99 08:15:00");
        assert_eq!(obs.source_file.as_deref(), Some("1999dg.txt"));
    }

    #[test]
    fn test_filtered_class_skips_coordinate_parsing() {
        let dir = TempDir::new().unwrap();
        // Coordinates are garbage, but the record is filtered out first so
        // no conversion error may be counted
        write_file(&dir, "data.txt", &record("1234", "1", "junkN", "junkW"));

        let mut sink = MemorySink::new();
        let pipeline = IngestPipeline::new()
            .with_filter(Some(LocationClassFilter::from_delimited("2;3")));
        let report = pipeline.run(dir.path(), &mut sink, None).unwrap();

        assert_eq!(report.records_inserted, 0);
        assert_eq!(report.filtered_count, 1);
        assert_eq!(report.error_count, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_malformed_coordinate_isolated() {
        let dir = TempDir::new().unwrap();
        let content = format!(
            "{}{}",
            record("1111", "2", "abcN", "120.25W"),
            record("2222", "2", "10.00S", "45.00E")
        );
        write_file(&dir, "data.txt", &content);

        let mut sink = MemorySink::new();
        let pipeline = IngestPipeline::new()
            .with_filter(Some(LocationClassFilter::from_delimited("2")));
        let report = pipeline.run(dir.path(), &mut sink, None).unwrap();

        assert_eq!(report.error_count, 1);
        assert_eq!(report.records_inserted, 1);
        assert_eq!(sink.observations[0].tag_id, 2222);
        assert!((sink.observations[0].latitude - -10.0).abs() < 0.000001);
        assert!((sink.observations[0].longitude - 45.0).abs() < 0.000001);
    }

    #[test]
    fn test_out_of_range_coordinate_counted_as_error() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "data.txt", &record("1234", "2", "95.00N", "10.00E"));

        let mut sink = MemorySink::new();
        let pipeline = IngestPipeline::new();
        let report = pipeline.run(dir.path(), &mut sink, None).unwrap();

        assert_eq!(report.error_count, 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_truncated_file_counts_one_error() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "data.txt",
            "1234  Date : 12.03.99 08:15:00  LC : 2  IQ : 66\n",
        );

        let mut sink = MemorySink::new();
        let report = IngestPipeline::new().run(dir.path(), &mut sink, None).unwrap();

        assert_eq!(report.error_count, 1);
        assert_eq!(report.records_inserted, 0);
    }

    #[test]
    fn test_no_filter_accepts_every_class() {
        let dir = TempDir::new().unwrap();
        let content = format!(
            "{}{}",
            record("1111", "Z", "10.00N", "20.00E"),
            record("2222", "B", "11.00N", "21.00E")
        );
        write_file(&dir, "data.txt", &content);

        let mut sink = MemorySink::new();
        let report = IngestPipeline::new().run(dir.path(), &mut sink, None).unwrap();

        assert_eq!(report.records_inserted, 2);
        assert_eq!(report.filtered_count, 0);
    }

    #[test]
    fn test_empty_allow_list_rejects_everything() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "data.txt", &record("1111", "3", "10.00N", "20.00E"));

        let mut sink = MemorySink::new();
        let pipeline =
            IngestPipeline::new().with_filter(Some(LocationClassFilter::from_delimited("")));
        let report = pipeline.run(dir.path(), &mut sink, None).unwrap();

        assert_eq!(report.records_inserted, 0);
        assert_eq!(report.filtered_count, 1);
    }

    #[test]
    fn test_readme_skipped_and_counted() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "README.txt", "Data dictionary, not data\n");
        write_file(&dir, "data.txt", &record("1111", "2", "10.00N", "20.00E"));

        let files = vec![dir.path().join("README.txt"), dir.path().join("data.txt")];

        let mut sink = MemorySink::new();
        let report = IngestPipeline::new()
            .run_files(&files, &mut sink, None)
            .unwrap();

        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.files_processed, 1);
        assert_eq!(report.records_inserted, 1);
    }

    #[test]
    fn test_provenance_disabled() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "data.txt", &record("1111", "2", "10.00N", "20.00E"));

        let mut sink = MemorySink::new();
        let pipeline = IngestPipeline::new().with_provenance(false);
        pipeline.run(dir.path(), &mut sink, None).unwrap();

        assert_eq!(sink.observations[0].source_file, None);
    }

    #[test]
    fn test_unparseable_tag_id_is_record_error() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "data.txt", &record("PTT-A", "2", "10.00N", "20.00E"));

        let mut sink = MemorySink::new();
        let report = IngestPipeline::new().run(dir.path(), &mut sink, None).unwrap();

        assert_eq!(report.error_count, 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_files_processed_in_name_order() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "b.txt", &record("2222", "2", "11.00N", "21.00E"));
        write_file(&dir, "a.txt", &record("1111", "2", "10.00N", "20.00E"));

        let mut sink = MemorySink::new();
        IngestPipeline::new().run(dir.path(), &mut sink, None).unwrap();

        assert_eq!(sink.observations[0].source_file.as_deref(), Some("a.txt"));
        assert_eq!(sink.observations[1].source_file.as_deref(), Some("b.txt"));
    }

    #[test]
    fn test_two_runs_are_identical() {
        let dir = TempDir::new().unwrap();
        let content = format!(
            "{}{}{}",
            record("1111", "2", "10.00N", "20.00E"),
            record("2222", "1", "11.00N", "21.00E"),
            record("3333", "2", "badN", "22.00E")
        );
        write_file(&dir, "data.txt", &content);

        let pipeline = IngestPipeline::new()
            .with_filter(Some(LocationClassFilter::from_delimited("2;3")));

        let mut first = MemorySink::new();
        let first_report = pipeline.run(dir.path(), &mut first, None).unwrap();
        let mut second = MemorySink::new();
        let second_report = pipeline.run(dir.path(), &mut second, None).unwrap();

        assert_eq!(first.observations, second.observations);
        assert_eq!(first_report.records_inserted, second_report.records_inserted);
        assert_eq!(first_report.filtered_count, second_report.filtered_count);
        assert_eq!(first_report.error_count, second_report.error_count);
    }
}
