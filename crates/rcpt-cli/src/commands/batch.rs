//! Batch processing command for multiple transcript files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use rcpt_core::{ReceiptExtractor, ReceiptParser, ReceiptRecord, TransactionType};

use super::extract::{format_record, OutputFormat};
use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<ReceiptRecord>,
    error: Option<String>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = config.parser();
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match process_single_file(&path, &parser) {
            Ok(record) => results.push(ProcessResult {
                path,
                record: Some(record),
                error: None,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        record: None,
                        error: Some(error_msg),
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        let Some(record) = &result.record else {
            continue;
        };
        let content = format_record(record, args.format)?;

        match &args.output_dir {
            Some(output_dir) => {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("receipt");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => println!("{}", content),
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(path: &Path, parser: &ReceiptParser) -> anyhow::Result<ReceiptRecord> {
    let text = fs::read_to_string(path)?;
    Ok(parser.extract(&text)?)
}

/// Sum of parsed amounts per transaction type.
fn totals(results: &[ProcessResult]) -> (Decimal, Decimal) {
    let mut expense = Decimal::ZERO;
    let mut income = Decimal::ZERO;

    for record in results.iter().filter_map(|r| r.record.as_ref()) {
        let Some(amount) = record.amount_value() else {
            continue;
        };
        match record.transaction_type {
            TransactionType::Expense => expense += amount,
            TransactionType::Income => income += amount,
        }
    }

    (expense, income)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(path)?;

    wtr.write_record(["filename", "status", "date", "title", "mobile", "amount", "type", "error"])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(record) = &result.record {
            wtr.write_record([
                filename,
                "success",
                record.date.as_str(),
                record.title.as_str(),
                record.mobile.as_deref().unwrap_or(""),
                record.amount.as_str(),
                record.transaction_type.as_str(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    let (expense, income) = totals(results);
    wtr.write_record(["total_expense", expense.to_string().as_str()])?;
    wtr.write_record(["total_income", income.to_string().as_str()])?;
    wtr.write_record([
        "generated_at",
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string().as_str(),
    ])?;

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn result(text: &str) -> ProcessResult {
        ProcessResult {
            path: PathBuf::from("r.txt"),
            record: ReceiptParser::new().extract(text).ok(),
            error: None,
        }
    }

    #[test]
    fn test_totals_split_by_type() {
        let results = vec![
            result("Shop\nTotal $10.50"),
            result("Shop\nTotal 4.25"),
            result("Bank\nRefund 3.00"),
            result("Shop\nno numbers here"),
        ];

        let (expense, income) = totals(&results);
        assert_eq!(expense, Decimal::from_str("14.75").unwrap());
        assert_eq!(income, Decimal::from_str("3.00").unwrap());
    }
}
