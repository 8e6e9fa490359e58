use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lcsqa-processor")]
#[command(about = "LCSQA air-quality export processor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download daily exports for a date range, process each file, then
    /// drop the raw downloads
    Fetch {
        #[arg(short, long, help = "First day of the range (YYYY-MM-DD)")]
        begin: NaiveDate,

        #[arg(short, long, help = "Last day of the range [default: begin]")]
        end: Option<NaiveDate>,

        #[arg(
            short,
            long,
            default_value = "data",
            help = "Directory holding exports and registry files"
        )]
        data_dir: PathBuf,

        #[arg(
            long,
            help = "Airports spreadsheet, used when the registry still needs enrichment"
        )]
        airports_file: Option<PathBuf>,

        #[arg(long, default_value = "false", help = "Keep raw exports after processing")]
        keep_raw: bool,
    },

    /// Process a single export file into its sibling report
    Process {
        #[arg(short, long, help = "Input export file (semicolon-delimited)")]
        input: PathBuf,

        #[arg(short, long, help = "Station coordinates file")]
        registry: PathBuf,

        #[arg(long, default_value = "false", help = "Memory-map the input file")]
        mmap: bool,
    },

    /// Enrich the station registry with nearby airports and counties
    Enrich {
        #[arg(short, long, help = "Airports spreadsheet (xlsx)")]
        airports: PathBuf,

        #[arg(short, long, help = "Station coordinates file to enrich")]
        registry: PathBuf,

        #[arg(
            short,
            long,
            help = "Enriched registry output [default: stations_coords_processed.csv next to the registry]"
        )]
        output: Option<PathBuf>,
    },

    /// Display information about a processed report
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "10")]
        sample: usize,
    },
}
