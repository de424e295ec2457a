//! Extract command - turn OCR text into a receipt record.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use rcpt_core::receipt::rules::{DateExtractor, FieldExtractor, MobileExtractor};
use rcpt_core::{ReceiptParser, ReceiptRecord, RecordStore};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text file with the OCR transcript (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also store the record at the configured output location
    #[arg(long)]
    save: bool,

    /// Show warnings and every candidate the rules considered
    #[arg(long)]
    explain: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// XML output
    Xml,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xml => "xml",
            Self::Text => "txt",
        }
    }
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = match &args.input {
        Some(path) if path.as_os_str() != "-" => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            info!("Reading transcript from {}", path.display());
            fs::read_to_string(path)?
        }
        _ => {
            debug!("Reading transcript from stdin");
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let parser = config.parser();
    let result = parser.parse(&text)?;

    for warning in &result.warnings {
        info!("{}", warning);
    }

    if args.explain {
        explain(&parser, &result.record, &result.warnings);
    }

    if args.save {
        let path = config.store().save(&result.record)?;
        eprintln!(
            "{} Record saved to {}",
            style("✓").green(),
            path.display()
        );
    }

    let output = format_record(&result.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn explain(parser: &ReceiptParser, record: &ReceiptRecord, warnings: &[String]) {
    let text = &record.description;

    eprintln!("{}", style("Candidates:").bold());

    let dates: Vec<String> = DateExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.source)
        .collect();
    eprintln!("  dates:   {:?}", dates);

    let amounts: Vec<String> = parser
        .amount_extractor()
        .extract_all(text)
        .into_iter()
        .map(|m| m.source)
        .collect();
    eprintln!("  amounts: {:?}", amounts);

    if let Some(labeled) = parser.amount_extractor().extract_labeled(text) {
        eprintln!("  total line match: {:?}", labeled.source);
    }

    let phones: Vec<String> = MobileExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.source)
        .collect();
    eprintln!("  phones:  {:?}", phones);

    match parser.classifier().matched_keyword(text) {
        Some(keyword) => eprintln!("  credit keyword: {:?}", keyword),
        None => eprintln!("  credit keyword: none"),
    }

    for warning in warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }
}

pub fn format_record(record: &ReceiptRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(std::slice::from_ref(record)),
        OutputFormat::Xml => Ok(quick_xml::se::to_string(record)?),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

pub fn format_csv(records: &[ReceiptRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "title", "mobile", "amount", "type", "description"])?;

    for record in records {
        wtr.write_record([
            record.date.as_str(),
            record.title.as_str(),
            record.mobile.as_deref().unwrap_or(""),
            record.amount.as_str(),
            record.transaction_type.as_str(),
            record.description.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ReceiptRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Title:  {}\n", record.title));
    output.push_str(&format!("Date:   {}\n", or_dash(&record.date)));
    output.push_str(&format!("Amount: {}\n", or_dash(&record.amount)));
    if let Some(mobile) = &record.mobile {
        output.push_str(&format!("Mobile: {}\n", mobile));
    }
    output.push_str(&format!("Type:   {}\n", record.transaction_type));
    output.push('\n');
    output.push_str("Description:\n");
    for line in record.description.lines() {
        output.push_str(&format!("  {}\n", line));
    }

    output
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
