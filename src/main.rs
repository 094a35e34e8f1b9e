use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use product_export::{
    export, normalize, ExportOptions, Language, MatchMode, Quoting, RecordsInput, ScrapeRequest,
    ScrapedRecord, Tag, TagSet, DEFAULT_FILENAME,
};

#[derive(Parser)]
#[command(name = "product-export")]
#[command(about = "Export scraped product records to CSV")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the selected columns of a scrape response as CSV
    Export {
        /// Scrape response JSON, or a bare array of records
        #[arg(short, long)]
        input: String,
        /// Extra tags to include (name is always included)
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<Tag>,
        /// Match tags against whole words of column names
        #[arg(long)]
        strict: bool,
        /// Escape embedded quotes in cells
        #[arg(long)]
        rfc4180: bool,
        /// Output file, or "-" for stdout
        #[arg(short, long, default_value = DEFAULT_FILENAME)]
        output: String,
    },
    /// List every column found in a scrape response
    Columns {
        #[arg(short, long)]
        input: String,
    },
    /// Print the JSON request body for the scraping service
    Request {
        /// Comma-separated product links
        #[arg(short, long)]
        urls: String,
        /// Target languages
        #[arg(short, long)]
        language: Vec<Language>,
    },
}

fn load_records(path: &str) -> Result<Vec<ScrapedRecord>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let input: RecordsInput = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse records JSON: {}", path))?;
    Ok(input.into_records())
}

/// Name offered for the saved file. Stdout (`-`) keeps the default name.
fn delivery_filename(output: &str) -> String {
    if output == "-" {
        return DEFAULT_FILENAME.to_string();
    }
    Path::new(output)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

fn run_export(
    input: &str,
    tags: Vec<Tag>,
    strict: bool,
    rfc4180: bool,
    output: &str,
) -> Result<()> {
    let records = load_records(input)?;
    let tags: TagSet = tags.into_iter().collect();

    let options = ExportOptions {
        match_mode: if strict { MatchMode::Word } else { MatchMode::Substring },
        quoting: if rfc4180 { Quoting::Rfc4180 } else { Quoting::Simple },
        filename: delivery_filename(output),
    };

    let file = export(&records, tags.labels(), &options).context("Export failed")?;

    if output == "-" {
        io::stdout().write_all(file.as_bytes())?;
        return Ok(());
    }

    fs::write(output, file.as_bytes()).with_context(|| format!("Failed to write {}", output))?;
    eprintln!(
        "Wrote {} records to {} ({})",
        records.len(),
        output,
        file.mime
    );
    Ok(())
}

fn run_columns(input: &str) -> Result<()> {
    let records = load_records(input)?;
    let table = normalize(&records).context("Failed to normalize records")?;
    for column in &table.columns {
        println!("{}", column);
    }
    Ok(())
}

fn run_request(urls: &str, languages: &[Language]) -> Result<()> {
    let request = ScrapeRequest::new(urls, languages);
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            tags,
            strict,
            rfc4180,
            output,
        } => run_export(&input, tags, strict, rfc4180, &output),
        Commands::Columns { input } => run_columns(&input),
        Commands::Request { urls, language } => run_request(&urls, &language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_filename() {
        assert_eq!(delivery_filename("-"), "products.csv");
        assert_eq!(delivery_filename("out/widgets.csv"), "widgets.csv");
        assert_eq!(delivery_filename("products.csv"), "products.csv");
        assert_eq!(delivery_filename(".."), "products.csv");
    }
}
