//! Scan command - OCR a receipt image and extract a record.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use rcpt_core::ReceiptScanner;

use super::extract::{format_record, OutputFormat};
use super::load_config;
use crate::ocr_space::OcrSpaceProvider;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Receipt image (JPEG, PNG, ...)
    #[arg(required = true)]
    input: PathBuf,

    /// OCR.space API key (default: RCPT_OCR_API_KEY or config)
    #[arg(long)]
    api_key: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Do not store the record
    #[arg(long)]
    no_save: bool,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning image: {}", args.input.display());
    let image = fs::read(&args.input)?;

    let provider = OcrSpaceProvider::from_config(&config.ocr, args.api_key.clone())?;
    let mut scanner = ReceiptScanner::new(provider).with_parser(config.parser());
    if !args.no_save {
        scanner = scanner.with_store(config.store());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Running OCR...");

    let result = scanner.scan(&image).await;
    pb.finish_and_clear();

    let record = result?;

    if !args.no_save {
        eprintln!(
            "{} Record saved to {}",
            style("✓").green(),
            config.store().path().display()
        );
    }

    println!("{}", format_record(&record, args.format)?);

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
