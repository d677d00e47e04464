mod blocks;
mod changes;
mod error;
mod export;
mod lines;
mod manager;
mod names;
mod pipeline;
mod pricing;
mod scanner;
mod schedule;
mod segment;
mod sink;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use crate::schedule::ScheduleRecord;
use crate::sink::{JsonlSink, RecordSink};

#[derive(Parser)]
#[command(
    name = "schedule_extract",
    about = "Wedding shoot schedule extractor for messenger chat exports"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse one exported chat log into schedule records + change reports
    Parse {
        /// Path to the exported .txt chat log
        file: PathBuf,
        /// Speaker whose messages carry the schedules
        #[arg(short, long)]
        speaker: Option<String>,
        /// Auto-select the date-heaviest speaker even when --speaker is given
        #[arg(long)]
        auto: bool,
        /// Write the records as CSV (UTF-8 with BOM) to this path
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Append validated records as JSON lines to this path
        #[arg(long)]
        sink: Option<PathBuf>,
    },
    /// Parse every .txt export under a directory and combine the records
    Batch {
        /// Directory holding exported chat logs
        dir: PathBuf,
        /// Speaker whose messages carry the schedules
        #[arg(short, long)]
        speaker: Option<String>,
        /// Write the combined records as CSV (UTF-8 with BOM) to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Compute the shoot price for a brand/album/venue triple
    Price {
        brand: String,
        album: String,
        venue: String,
    },
    /// Parse a single manager notice message (from a file, or stdin)
    Notice {
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse {
            file,
            speaker,
            auto,
            csv,
            sink,
        } => run_parse(&file, speaker.as_deref(), auto, csv.as_deref(), sink.as_deref()),
        Command::Batch { dir, speaker, csv } => run_batch(&dir, speaker.as_deref(), csv.as_deref()),
        Command::Price { brand, album, venue } => run_price(&brand, &album, &venue),
        Command::Notice { file } => run_notice(file.as_deref()),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  INPUT HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn read_input(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {e}", path.display());
        process::exit(1);
    })
}

fn print_json<T: serde::Serialize>(data: &T) {
    let json = serde_json::to_string_pretty(data).expect("JSON serialization failed");
    println!("{json}");
}

// ═══════════════════════════════════════════════════════════════════════
//  PARSE MODE: one chat export → records + change reports
// ═══════════════════════════════════════════════════════════════════════

fn run_parse(
    file: &Path,
    speaker: Option<&str>,
    auto: bool,
    csv: Option<&Path>,
    sink: Option<&Path>,
) {
    let raw = read_input(file);

    let outcome = match pipeline::parse_chat(&raw, speaker, auto) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    eprintln!(
        "Speakers: {} (target: {})",
        outcome.statistics.total_speakers, outcome.statistics.target_speaker
    );
    eprintln!(
        "{} candidate blocks → {} schedules, {} change reports",
        outcome.statistics.schedule_blocks,
        outcome.statistics.final_schedules,
        outcome.statistics.changes
    );
    for change in &outcome.changes {
        eprintln!(
            "  CHANGE {} {} {} ({} versions)",
            change.date, change.venue, change.couple_names, change.count
        );
    }

    if let Some(path) = csv {
        write_csv_or_exit(path, &outcome.records);
    }
    if let Some(path) = sink {
        submit_records(path, &outcome.records);
    }

    print_json(&outcome);
}

fn write_csv_or_exit(path: &Path, records: &[ScheduleRecord]) {
    if let Err(e) = export::write_csv(path, records) {
        eprintln!("Cannot write {}: {e}", path.display());
        process::exit(1);
    }
    eprintln!("  {} ({} records)", path.display(), records.len());
}

/// Push records through the JSONL sink; validation failures are reported
/// per record and never abort the batch.
fn submit_records(path: &Path, records: &[ScheduleRecord]) {
    let file = match std::fs::File::create(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Cannot create {}: {e}", path.display());
            process::exit(1);
        }
    };

    let mut sink = JsonlSink::new(file);
    let mut accepted = 0usize;
    for record in records {
        match sink.submit(record) {
            Ok(()) => accepted += 1,
            Err(e) => eprintln!("  skipped {} {}: {e}", record.date, record.venue),
        }
    }
    eprintln!(
        "  {} ({accepted} accepted, {} skipped)",
        path.display(),
        records.len() - accepted
    );
}

// ═══════════════════════════════════════════════════════════════════════
//  BATCH MODE: directory of exports → combined records
// ═══════════════════════════════════════════════════════════════════════

fn run_batch(dir: &Path, speaker: Option<&str>, csv: Option<&Path>) {
    let exports = scanner::find_chat_exports(dir);
    if exports.is_empty() {
        eprintln!("No .txt chat exports under {}", dir.display());
        process::exit(1);
    }
    eprintln!("Found {} chat exports", exports.len());

    let mut combined: Vec<ScheduleRecord> = Vec::new();
    for path in &exports {
        let raw = read_input(path);
        match pipeline::parse_chat(&raw, speaker, false) {
            Ok(outcome) => {
                eprintln!(
                    "  {}: {} schedules, {} changes",
                    path.display(),
                    outcome.statistics.final_schedules,
                    outcome.statistics.changes
                );
                combined.extend(outcome.records);
            }
            Err(e) => eprintln!("  {}: {e}", path.display()),
        }
    }

    eprintln!("Total: {} schedules", combined.len());

    if let Some(path) = csv {
        write_csv_or_exit(path, &combined);
    }
    print_json(&combined);
}

// ═══════════════════════════════════════════════════════════════════════
//  PRICE MODE: satellite pricing lookup
// ═══════════════════════════════════════════════════════════════════════

fn run_price(brand: &str, album: &str, venue: &str) {
    match pricing::calculate_price(brand, album, venue) {
        Ok(price) => {
            eprintln!("{brand} {album} @{venue}");
            println!("{price}");
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!(
                "  known brands: {}",
                pricing::PRICING_RULES
                    .iter()
                    .map(|r| r.brand)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            process::exit(1);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  NOTICE MODE: single manager message → structured shoot metadata
// ═══════════════════════════════════════════════════════════════════════

fn run_notice(file: Option<&Path>) {
    let message = match file {
        Some(path) => read_input(path),
        None => std::io::read_to_string(std::io::stdin()).unwrap_or_else(|e| {
            eprintln!("Cannot read stdin: {e}");
            process::exit(1);
        }),
    };

    let notice = manager::parse_manager_notice(&message);
    print_json(&notice);
}
