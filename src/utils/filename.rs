use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default Parquet filename with format: argos-points-{YYMMDD}.parquet
pub fn generate_default_parquet_filename() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("argos-points-{:02}{:02}{:02}.parquet", year, month, day);
    PathBuf::from("output").join(filename)
}

/// Generate default CSV filename with format: argos-points-{YYMMDD}.csv
pub fn generate_default_csv_filename() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("argos-points-{:02}{:02}{:02}.csv", year, month, day);
    PathBuf::from("output").join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_parquet_filename() {
        let filename = generate_default_parquet_filename();
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.contains("argos-points-"));
        assert!(filename_str.ends_with(".parquet"));
        assert!(filename_str.starts_with("output/"));

        let parts: Vec<&str> = filename_str.split('/').collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], "output");
    }

    #[test]
    fn test_generate_default_csv_filename() {
        let filename = generate_default_csv_filename();
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.contains("argos-points-"));
        assert!(filename_str.ends_with(".csv"));
        assert!(filename_str.starts_with("output/"));
    }
}
