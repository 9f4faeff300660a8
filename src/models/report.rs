use serde::Serialize;
use std::collections::BTreeMap;

/// Per-file parse tallies
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileStatistics {
    pub candidates: usize,
    pub inserted: usize,
    pub filtered: usize,
    pub errors: usize,
}

/// Aggregate outcome of one pipeline run
///
/// Counters are threaded through the pipeline explicitly and returned to the
/// caller; nothing accumulates in ambient state between runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub records_inserted: usize,
    pub filtered_count: usize,
    pub error_count: usize,
    pub file_statistics: BTreeMap<String, FileStatistics>,
}

impl IngestReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file(&mut self, name: &str, stats: FileStatistics) {
        self.files_processed += 1;
        self.records_inserted += stats.inserted;
        self.filtered_count += stats.filtered;
        self.error_count += stats.errors;
        self.file_statistics.insert(name.to_string(), stats);
    }

    pub fn record_skipped_file(&mut self) {
        self.files_skipped += 1;
    }

    /// Human-readable run summary for the console
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Ingest Report".to_string(),
            "=============".to_string(),
            format!("Files processed:  {}", self.files_processed),
            format!("Files skipped:    {}", self.files_skipped),
            format!("Points inserted:  {}", self.records_inserted),
        ];

        if self.filtered_count > 0 {
            lines.push(format!(
                "⚠️  {} records not meeting LC class",
                self.filtered_count
            ));
        } else {
            lines.push("No records omitted because of LC value".to_string());
        }

        if self.error_count > 0 {
            lines.push(format!(
                "⚠️  {} records had no usable location data",
                self.error_count
            ));
        }

        for (file, stats) in &self.file_statistics {
            lines.push(format!(
                "  {}: {} candidates, {} inserted, {} filtered, {} errors",
                file, stats.candidates, stats.inserted, stats.filtered, stats.errors
            ));
        }

        lines.join("\n")
    }
}
