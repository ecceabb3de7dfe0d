//! Process command - convert a single invoice into a CSV/ZIP extract.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use invex_core::export::{header_csv, lines_csv};
use invex_core::models::invoice::Invoice;
use invex_core::service::Conversion;

use super::{convert_file, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or already-extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: derived ZIP name, or stdout for other formats)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "zip")]
    format: OutputFormat,

    /// Print extraction warnings
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// ZIP archive with header and line item CSVs
    Zip,
    /// JSON output
    Json,
    /// Both CSV tables
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("Extracting invoice data...");

    let conversion = convert_file(args.input.clone(), config).await;
    pb.finish_and_clear();
    let conversion = conversion?;

    match args.format {
        OutputFormat::Zip => {
            let output_path = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&conversion.archive.filename));
            fs::write(&output_path, &conversion.archive.bytes)?;
            println!(
                "{} Extract written to {}",
                style("✓").green(),
                output_path.display()
            );
        }
        format => {
            let output = format_conversion(&conversion, format)?;
            if let Some(output_path) = &args.output {
                fs::write(output_path, &output)?;
                println!(
                    "{} Output written to {}",
                    style("✓").green(),
                    output_path.display()
                );
            } else {
                println!("{}", output);
            }
        }
    }

    if args.show_warnings {
        for warning in &conversion.extraction.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render a conversion in one of the textual formats.
pub fn format_conversion(conversion: &Conversion, format: OutputFormat) -> anyhow::Result<String> {
    let invoice = &conversion.extraction.invoice;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(invoice)?),
        OutputFormat::Csv => Ok(format!(
            "{}\n\n{}",
            header_csv(&invoice.header)?,
            lines_csv(&invoice.line_items)?
        )),
        OutputFormat::Text => Ok(format_invoice_text(invoice)),
        OutputFormat::Zip => anyhow::bail!("ZIP output is binary"),
    }
}

fn format_invoice_text(invoice: &Invoice) -> String {
    let header = &invoice.header;
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    let mut output = String::new();
    output.push_str(&format!("Invoice:  {}\n", field(&header.invoice)));
    output.push_str(&format!("Date:     {}\n", field(&header.date)));
    output.push_str(&format!("Customer: {}\n", field(&header.customer)));
    output.push_str(&format!("Rep:      {}\n", field(&header.rep)));
    output.push_str(&format!("Zip:      {}\n", field(&header.zip)));
    output.push('\n');

    output.push_str(&format!("Line items ({}):\n", invoice.line_items.len()));
    for item in &invoice.line_items {
        let number = |d: Option<rust_decimal::Decimal>| {
            d.map(|d| d.normalize().to_string()).unwrap_or_default()
        };
        output.push_str(&format!(
            "  {:<12} {:<40} {:>8} {:>10} {:>10}\n",
            item.activity,
            item.description,
            number(item.qty),
            number(item.rate),
            number(item.amount)
        ));
    }

    if !invoice.metadata.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in &invoice.metadata.warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}
