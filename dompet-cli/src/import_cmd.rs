use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use dompet_ingest::{ingest, ingest_at, Ingested};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Read a bank export from `file` (or stdin) and print the parsed transactions.
pub fn run_import(
    bank: &str,
    file: Option<&Path>,
    format: OutputFormat,
    today: Option<NaiveDate>,
) -> Result<()> {
    let raw = read_input(file)?;
    let out = match today {
        Some(d) => ingest_at(&raw, bank, d),
        None => ingest(&raw, bank),
    };

    let source = file
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());
    let data_lines = raw.lines().skip(1).filter(|l| !l.trim().is_empty()).count();
    info!(
        bank,
        source = %source,
        lines = data_lines,
        records = out.records.len(),
        "parsed bank export"
    );

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&out).context("serialize import")?;
            println!("{json}");
        }
        OutputFormat::Table => print_table(&out, &source),
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    let bytes = match file {
        Some(path) => {
            fs::read(path).with_context(|| format!("unable to open file {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("read stdin")?;
            buf
        }
    };
    // Bank exports are not always UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn print_table(out: &Ingested, source: &str) {
    println!("Parsed {} transactions from {}\n", out.records.len(), source);

    for r in &out.records {
        let sign = if r.kind.is_income() { '+' } else { '-' };
        println!(
            "{} | {}{:.2} | {:<12} | {}",
            r.date, sign, r.amount, r.category, r.description
        );
    }

    println!(
        "\nTotal: {} | income: {:.2} | expense: {:.2}",
        out.summary.total, out.summary.income, out.summary.expense
    );
}
