use std::borrow::Cow;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use catalog_normalizer::document::{self, RawRecord};
use catalog_normalizer::group::group_component;
use catalog_normalizer::normalize::flatten::flatten;
use catalog_normalizer::settings::Settings;
use catalog_normalizer::summary::{new_run_id, RunSummary};
use catalog_normalizer::{CanonicalRecord, Normalizer};

#[derive(Parser)]
#[command(name = "catalog_normalizer", about = "Normalize connector/cable catalog records for search")]
struct Cli {
    /// Settings file (default: ./catalog.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean, resolve and assemble every record into the canonical shape
    Normalize {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Max records to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Lift nested mappings to the top level before assembly
        #[arg(long)]
        flatten: bool,
    },
    /// Write the sectioned identifiers/levels/preference/specs view
    Group {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a few normalized records
    Sample {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short = 'n', long, default_value = "3")]
        count: usize,
    },
    /// Print the effective alias table
    Aliases,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;

    let result = match cli.command {
        Commands::Normalize {
            input,
            output,
            limit,
            flatten,
        } => {
            if let Some(p) = input {
                settings.input = p;
            }
            if let Some(p) = output {
                settings.output = p;
            }
            settings.flatten |= flatten;

            let normalizer = settings.normalizer()?;
            let mut records = document::load_records(&settings.input)
                .with_context(|| format!("reading {}", settings.input.display()))?;
            if let Some(n) = limit {
                records.truncate(n);
            }
            if records.is_empty() {
                println!("No records in {}.", settings.input.display());
                return Ok(());
            }

            println!("Normalizing {} records...", records.len());
            let (out, summary) = normalize_records(&normalizer, &records, settings.chunk_size.max(1));
            document::save_json(&settings.output, &out)?;
            summary.log();
            summary.print();
            println!("Wrote {}", settings.output.display());
            Ok(())
        }
        Commands::Group { input, output } => {
            let input = input.unwrap_or_else(|| settings.input.clone());
            let output = output.unwrap_or_else(|| settings.grouped_output.clone());
            let sentinels = settings.alias_table()?.sentinels().clone();
            let records = document::load_records(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let grouped: Vec<_> = records
                .iter()
                .map(|r| group_component(&flatten(&sentinels.clean_record(r))))
                .collect();
            document::save_json(&output, &grouped)?;
            info!(records = grouped.len(), "grouped catalog");
            println!("Grouped {} records into {}", grouped.len(), output.display());
            Ok(())
        }
        Commands::Sample { input, count } => {
            let input = input.unwrap_or_else(|| settings.input.clone());
            let normalizer = settings.normalizer()?;
            let records = document::load_records(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            for (i, raw) in records.iter().take(count).enumerate() {
                print_sample(i + 1, &normalizer.normalize(raw))?;
            }
            Ok(())
        }
        Commands::Aliases => {
            let table = settings.alias_table()?;
            for (attr, keys) in table.entries() {
                let shown: Vec<String> = keys.iter().map(|k| format!("{:?}", k)).collect();
                println!("{:<24} {}", attr.to_string(), shown.join(", "));
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", elapsed_label(elapsed));
    }

    result
}

fn normalize_records(
    normalizer: &Normalizer,
    records: &[RawRecord],
    chunk_size: usize,
) -> (Vec<CanonicalRecord>, RunSummary) {
    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut summary = RunSummary::new(new_run_id());
    let mut out = Vec::with_capacity(records.len());
    for chunk in records.chunks(chunk_size) {
        let batch = normalizer.normalize_all(chunk);
        for rec in &batch {
            summary.record(normalizer, rec);
        }
        out.extend(batch);
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();
    (out, summary)
}

fn print_sample(n: usize, rec: &CanonicalRecord) -> anyhow::Result<()> {
    println!("--- #{} {} ---", n, clip(&rec.fields.title, 60));
    println!("{}", serde_json::to_string_pretty(&rec.fields)?);
    println!("{}", serde_json::to_string_pretty(&rec.filters)?);
    println!("text: {}\n", clip(&rec.text, 200));
    Ok(())
}

/// Cuts `s` to at most `max` characters, marking the cut with an ellipsis.
fn clip(s: &str, max: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max) {
        Some((at, _)) => Cow::Owned(format!("{}…", &s[..at])),
        None => Cow::Borrowed(s),
    }
}

/// `4.2s`, `3m05s` or `1h02m05s`.
fn elapsed_label(d: Duration) -> String {
    let secs = d.as_secs();
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    match (h, m) {
        (0, 0) => format!("{:.1}s", d.as_secs_f64()),
        (0, _) => format!("{}m{:02}s", m, s),
        _ => format!("{}h{:02}m{:02}s", h, m, s),
    }
}
