//! CSV encoding of normalized rows
//!
//! The header line is the selected columns joined by `,`. Every data cell is
//! wrapped in double quotes, with missing cells written as `""`. Every line,
//! header included, ends in `\n`.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::types::Row;

/// Cell quoting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quoting {
    /// Wrap cells in quotes without escaping anything inside them.
    ///
    /// A value containing `"` or a newline produces a broken file.
    #[default]
    Simple,
    /// Data cells always quoted with embedded quotes doubled; header cells
    /// quoted only when they need it.
    Rfc4180,
}

/// Value of `column` in `row` as written to a cell. Missing is empty.
fn cell_text(row: &Row, column: &str) -> String {
    row.get(column)
        .map(|value| value.render().into_owned())
        .unwrap_or_default()
}

fn encode_simple(rows: &[Row], columns: &[String]) -> String {
    let mut out = columns.join(",");
    out.push('\n');

    for row in rows {
        let line = columns
            .iter()
            .map(|column| format!("\"{}\"", cell_text(row, column)))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn encode_rfc4180(rows: &[Row], columns: &[String]) -> Result<String> {
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(columns)?;

    let mut data = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        data.write_record(columns.iter().map(|column| cell_text(row, column)))?;
    }

    let mut bytes = header
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    bytes.extend(
        data.into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?,
    );

    Ok(String::from_utf8(bytes)?)
}

/// Encode `rows` restricted to `columns`, in `columns` order.
///
/// Output depends only on the inputs, so the same pair always yields the
/// same string. An empty `columns` gives an empty header line followed by
/// one empty line per row.
pub fn encode(rows: &[Row], columns: &[String], quoting: Quoting) -> Result<String> {
    let out = match quoting {
        Quoting::Rfc4180 if !columns.is_empty() => encode_rfc4180(rows, columns)?,
        _ => encode_simple(rows, columns),
    };
    debug!(
        rows = rows.len(),
        columns = columns.len(),
        ?quoting,
        bytes = out.len(),
        "encoded csv"
    );
    Ok(out)
}
