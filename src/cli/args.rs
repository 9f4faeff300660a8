use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "argos-processor")]
#[command(about = "ARGOS satellite tracking data processor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a folder of ARGOS tracking files into a point dataset
    Process {
        #[arg(short, long, help = "Input folder containing ARGOS tracking files")]
        input_dir: PathBuf,

        #[arg(
            short,
            long,
            help = "Output file path [default: output/argos-points-{YYMMDD}.parquet]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, default_value = "parquet", help = "Output format: parquet or csv")]
        format: String,

        #[arg(
            long,
            help = "Semicolon-delimited location classes to keep, e.g. '1;2;3'. \
                    Omit to keep every class. An empty list keeps nothing."
        )]
        lc: Option<String>,

        #[arg(long, default_value = "false", help = "Omit the source-file column")]
        no_provenance: bool,

        #[arg(short, long, default_value = "snappy")]
        compression: String,

        #[arg(long, default_value = "false")]
        validate_only: bool,

        #[arg(long, help = "Write the JSON run report to this path")]
        report_file: Option<PathBuf>,

        #[arg(long, default_value = "1000")]
        batch_size: usize,

        #[arg(long, default_value = "false", help = "Use memory-mapped file reads")]
        mmap: bool,
    },

    /// Parse a folder and report tallies without writing any output
    Validate {
        #[arg(short, long, help = "Input folder containing ARGOS tracking files")]
        input_dir: PathBuf,

        #[arg(
            long,
            help = "Semicolon-delimited location classes to keep, e.g. '1;2;3'"
        )]
        lc: Option<String>,

        #[arg(long, default_value = "false", help = "Use memory-mapped file reads")]
        mmap: bool,
    },

    /// Display information about a Parquet point dataset
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "10")]
        sample: usize,
    },
}
