use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::processors::{IngestPipeline, LocationClassFilter};
use crate::readers::{list_data_files, ArgosReader};
use crate::utils::filename::{generate_default_csv_filename, generate_default_parquet_filename};
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvWriter, MemorySink, ParquetWriter};
use std::path::PathBuf;
use tracing::Level;

fn init_logging(verbose: bool, log_file: Option<&PathBuf>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_max_level(level).init();
        }
    }

    Ok(())
}

fn build_filter(lc: Option<&str>) -> Option<LocationClassFilter> {
    let filter = lc.map(LocationClassFilter::from_delimited);

    if let Some(f) = &filter {
        if f.is_empty() {
            println!("Warning: empty location-class list rejects every record");
        }
    }

    filter
}

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_ref())?;

    match cli.command {
        Commands::Process {
            input_dir,
            output_file,
            format,
            lc,
            no_provenance,
            compression,
            validate_only,
            report_file,
            batch_size,
            mmap,
        } => {
            println!("Processing ARGOS tracking data...");
            println!("Input directory: {}", input_dir.display());

            let files = list_data_files(&input_dir)?;
            if files.is_empty() {
                println!("No data files found");
                return Ok(());
            }

            let pipeline = IngestPipeline::new()
                .with_reader(ArgosReader::with_mmap(mmap))
                .with_filter(build_filter(lc.as_deref()))
                .with_provenance(!no_provenance);

            let progress = ProgressReporter::for_files(files.len() as u64, false);
            let mut sink = MemorySink::new();
            let report = pipeline.run_files(&files, &mut sink, Some(&progress))?;
            progress.finish_with_message(&format!("Parsed {} points", sink.len()));

            println!("\n{}", report.summary());

            if let Some(path) = &report_file {
                let file = std::fs::File::create(path)?;
                serde_json::to_writer_pretty(file, &report)?;
                println!("Run report written to {}", path.display());
            }

            if validate_only {
                println!("Validation complete - no output file written");
                return Ok(());
            }

            if sink.is_empty() {
                println!("No points to write");
                return Ok(());
            }

            let output_file = output_file.unwrap_or_else(|| match format.as_str() {
                "csv" => generate_default_csv_filename(),
                _ => generate_default_parquet_filename(),
            });

            // Create output directory if it doesn't exist
            if let Some(parent) = output_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            println!(
                "Writing {} points to {}...",
                sink.len(),
                output_file.display()
            );

            match format.as_str() {
                "parquet" => {
                    let writer = ParquetWriter::new()
                        .with_compression(&compression)?
                        .with_source_column(!no_provenance);
                    writer.write_observations_batched(
                        &sink.observations,
                        &output_file,
                        batch_size,
                    )?;

                    let file_info = writer.get_file_info(&output_file)?;
                    println!("\n{}", file_info.summary());
                }
                "csv" => {
                    let writer = CsvWriter::new().with_source_column(!no_provenance);
                    writer.write_observations(&sink.observations, &output_file)?;
                }
                other => {
                    return Err(ProcessingError::Config(format!(
                        "Unsupported output format: {}",
                        other
                    )))
                }
            }

            println!("Processing complete!");
        }

        Commands::Validate { input_dir, lc, mmap } => {
            println!("Validating ARGOS tracking data...");
            println!("Input directory: {}", input_dir.display());

            let files = list_data_files(&input_dir)?;

            let pipeline = IngestPipeline::new()
                .with_reader(ArgosReader::with_mmap(mmap))
                .with_filter(build_filter(lc.as_deref()));

            let progress = ProgressReporter::for_files(files.len() as u64, false);
            let mut sink = MemorySink::new();
            let report = pipeline.run_files(&files, &mut sink, Some(&progress))?;
            progress.finish_with_message("Validation complete");

            println!("\n{}", report.summary());

            if report.error_count == 0 {
                println!("✅ All records parsed cleanly");
            } else {
                println!("⚠️  Found {} records with unusable data", report.error_count);
            }
        }

        Commands::Info { file, sample } => {
            println!("Analyzing point dataset: {}", file.display());

            let writer = ParquetWriter::new();
            let file_info = writer.get_file_info(&file)?;
            println!("\n{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Points (showing {} records):", sample);
                match writer.read_sample_observations(&file, sample) {
                    Ok(observations) => {
                        for (i, obs) in observations.iter().enumerate() {
                            println!(
                                "{}. tag {} at ({:.4}, {:.4}) on {} (LC {}{})",
                                i + 1,
                                obs.tag_id,
                                obs.latitude,
                                obs.longitude,
                                obs.timestamp,
                                obs.location_class,
                                obs.source_file
                                    .as_deref()
                                    .map(|f| format!(", from {}", f))
                                    .unwrap_or_default()
                            );
                        }
                    }
                    Err(e) => println!("Error reading sample data: {}", e),
                }
            }
        }
    }

    Ok(())
}
