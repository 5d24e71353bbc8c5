//! Functionality related to the `bamstats stat` command itself.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use num_format::Locale;
use num_format::ToFormattedString;
use tracing::debug;
use tracing::info;

use crate::stats::registry::StatsRegistry;
use crate::utils::formats::bam::open_and_parse;
use crate::utils::formats::bam::ParsedBAMFile;
use crate::utils::read_groups::validate_read_group_info;
use crate::utils::records::NumberOfRecords;
use crate::utils::records::RecordCounter;

//========================//
// Command line arguments //
//========================//

/// Clap arguments for the `bamstats stat` subcommand.
#[derive(Args)]
pub struct StatArgs {
    /// Source BAM file.
    #[arg(value_name = "BAM")]
    src: PathBuf,

    /// Number of records to process.
    #[arg(short = 'n', long, value_name = "USIZE")]
    num_records: Option<usize>,

    /// Directory to write the structured report to. If omitted, only the
    /// textual report is printed to stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    output_directory: Option<PathBuf>,

    /// Output prefix for the structured report. Defaults to the name of the
    /// source file.
    #[arg(short = 'p', long, value_name = "STRING")]
    output_prefix: Option<String>,
}

//==============//
// Main program //
//==============//

/// Runs the main program for the `stat` subcommand.
pub fn stat(args: StatArgs) -> anyhow::Result<()> {
    info!("Starting stat command...");

    let src = args.src;
    debug!("  [*] Source: {}", src.display());

    // Default is the name of the file.
    let output_prefix = match args.output_prefix {
        Some(prefix) => prefix,
        None => src
            .file_name()
            .and_then(|name| name.to_str())
            .map(String::from)
            .with_context(|| "deriving an output prefix from the src file name")?,
    };
    debug!("  [*] Output prefix: {}", output_prefix);

    let num_records = NumberOfRecords::from(args.num_records);

    //================================================//
    // Process every record, accumulating as we go    //
    //================================================//

    let ParsedBAMFile {
        mut reader, header, ..
    } = open_and_parse(&src)?;

    let mut registry = StatsRegistry::default();
    let mut counter = RecordCounter::default();

    info!("Collecting per-read-group statistics.");
    for result in reader.records(&header) {
        let record = result?;
        registry.process(&record);

        counter.inc();
        if counter.time_to_break(&num_records) {
            break;
        }
    }

    info!(
        "Processed {} records.",
        counter.get().to_formatted_string(&Locale::en)
    );

    //===========================================================//
    // Reconcile observed read groups against the header's @RGs  //
    //===========================================================//

    validate_read_group_info(registry.read_group_names(), &header);

    //=========//
    // Reports //
    //=========//

    print!("{}", registry);

    if let Some(directory) = args.output_directory {
        write_results(&registry, output_prefix, &directory)?;
    }

    Ok(())
}

/// Writes the structured report for the registry to a file within the
/// specified directory.
fn write_results(
    registry: &StatsRegistry,
    output_prefix: String,
    directory: &Path,
) -> anyhow::Result<()> {
    if !directory.exists() {
        std::fs::create_dir_all(directory)
            .with_context(|| "creating the output directory")?;
    }

    let filename = output_prefix + ".stats.json";
    let mut filepath = PathBuf::from(directory);
    filepath.push(filename);

    let mut file = File::create(&filepath)
        .with_context(|| format!("creating {}", filepath.display()))?;
    let output = serde_json::to_string_pretty(registry)?;
    file.write_all(output.as_bytes())?;

    info!("Wrote structured report to {}", filepath.display());

    Ok(())
}
