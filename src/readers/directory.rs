use crate::error::{ProcessingError, Result};
use crate::utils::constants::README_FILE;
use std::fs;
use std::path::{Path, PathBuf};

/// Enumerate the ARGOS data files in a folder
///
/// ARGOS downloads ship a `README.txt` alongside the data; it is
/// documentation, not data, and is excluded here. Results are sorted by file
/// name so repeated runs insert points in the same order.
pub fn list_data_files(dir_path: &Path) -> Result<Vec<PathBuf>> {
    if !dir_path.is_dir() {
        return Err(ProcessingError::InvalidFormat(format!(
            "Path is not a directory: {}",
            dir_path.display()
        )));
    }

    let mut files = Vec::new();

    for entry in fs::read_dir(dir_path)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if path.file_name().and_then(|n| n.to_str()) == Some(README_FILE) {
            continue;
        }

        files.push(path);
    }

    files.sort();

    Ok(files)
}
