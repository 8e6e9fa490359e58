use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::analyzers::ReportAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::enrichment::{AirportEnricher, CountyEnricher};
use crate::error::Result;
use crate::fetch::{remove_raw_exports, ExportDownloader};
use crate::processors::ExportProcessor;
use crate::readers::MeasurementReader;
use crate::utils::constants::{AIRPORTS_CSV_FILE, ENRICHED_REGISTRY_FILE, REGISTRY_FILE};
use crate::utils::filename::processed_sibling;
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Fetch {
            begin,
            end,
            data_dir,
            airports_file,
            keep_raw,
        } => {
            let registry_path = data_dir.join(REGISTRY_FILE);
            let enriched_path = data_dir.join(ENRICHED_REGISTRY_FILE);

            if !enriched_path.exists() {
                match airports_file {
                    Some(airports) => {
                        println!("Enriching station registry...");
                        run_enrichment(&airports, &registry_path, &enriched_path).await?;
                    }
                    None => warn!(
                        "{} not found and no airports spreadsheet given; using the bare registry",
                        enriched_path.display()
                    ),
                }
            }

            let registry_for_run = if enriched_path.exists() {
                enriched_path
            } else {
                registry_path
            };

            let spinner = ProgressReporter::new_spinner(
                &format!("Fetching exports into {}...", data_dir.display()),
                false,
            );
            let downloader = ExportDownloader::new();
            let files = downloader.fetch_range(begin, end, &data_dir).await?;
            spinner.finish_with_message(&format!("Fetched {} export(s)", files.len()));

            let processor = ExportProcessor::new(&registry_for_run)?;
            let progress =
                ProgressReporter::new(files.len() as u64, "Processing exports...", false);
            for file in &files {
                progress.set_message(&format!("Processing {}", file.display()));
                processor.process(file)?;
                progress.increment(1);
            }
            progress.finish_with_message(&format!("Processed {} export(s)", files.len()));

            if !keep_raw {
                let removed = remove_raw_exports(&data_dir)?;
                println!("Removed {} raw export(s)", removed);
            }
        }

        Commands::Process {
            input,
            registry,
            mmap,
        } => {
            println!("Processing {}...", input.display());

            let processor = ExportProcessor::new(&registry)?
                .with_reader(MeasurementReader::with_mmap(mmap));
            processor.process(&input)?;

            println!("Report written to {}", processed_sibling(&input).display());
        }

        Commands::Enrich {
            airports,
            registry,
            output,
        } => {
            let output =
                output.unwrap_or_else(|| registry.with_file_name(ENRICHED_REGISTRY_FILE));

            println!("Enriching {}...", registry.display());
            run_enrichment(&airports, &registry, &output).await?;
            println!("Enriched registry written to {}", output.display());
        }

        Commands::Info { file, sample } => {
            println!("Analyzing report: {}\n", file.display());

            let analyzer = ReportAnalyzer::new();
            let stats = analyzer.analyze(&file)?;
            println!("{}", stats.detailed_summary());

            if sample > 0 {
                println!("\nSample rows (showing up to {}):", sample);
                for (i, row) in analyzer.read_sample(&file, sample)?.iter().enumerate() {
                    println!(
                        "{}. {} ({}) {}: mean={:.3}, max={:.3} {}, note={}",
                        i + 1,
                        row.name,
                        row.id,
                        row.pollutant,
                        row.mean,
                        row.max,
                        row.unit,
                        row.note
                    );
                }
            }
        }
    }

    Ok(())
}

/// Airport tagging then county resolution; together they turn the bare
/// coordinates file into the processed registry.
async fn run_enrichment(airports_xlsx: &Path, registry: &Path, output: &Path) -> Result<()> {
    let airports_csv = registry.with_file_name(AIRPORTS_CSV_FILE);
    AirportEnricher::new().enrich(airports_xlsx, &airports_csv, registry)?;
    CountyEnricher::new().enrich(registry, output).await?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
