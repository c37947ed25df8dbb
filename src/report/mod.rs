//! Report sinks: the CSV summary file and the console table
use crate::aggregator::ParameterSummary;
use crate::error::{BotParamsError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Console table headers, in column order
pub const CONSOLE_HEADERS: [&str; 3] = ["Parameter", "Request Count", "Sample URL"];

/// Write the summary table as CSV to any writer
pub fn write_csv_to<W: Write>(rows: &[ParameterSummary], writer: W) -> Result<()> {
    let csv_err = |e| BotParamsError::Csv {
        source: e,
        context: "Failed to write summary row".to_string(),
    };

    let mut writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        // serialize() emits the header with the first row only
        writer
            .write_record([
                "request_count",
                "parameter",
                "parameter_value_length",
                "url_average_length",
                "example_url",
            ])
            .map_err(csv_err)?;
    }
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| BotParamsError::Io {
        source: e,
        context: "Failed to flush summary".to_string(),
    })?;
    Ok(())
}

/// Write the summary table to `path`
///
/// Rows go to a sibling temporary file that is renamed over `path` once
/// complete, so a failed run never leaves a truncated summary behind.
pub fn write_csv(rows: &[ParameterSummary], path: &Path) -> Result<()> {
    let tmp_path = temporary_sibling(path);

    let file = std::fs::File::create(&tmp_path).map_err(|e| BotParamsError::Io {
        source: e,
        context: format!("Failed to create output file: {:?}", tmp_path),
    })?;

    if let Err(e) = write_csv_to(rows, std::io::BufWriter::new(file)) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }

    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        BotParamsError::Io {
            source: e,
            context: format!("Failed to move summary into place: {:?}", path),
        }
    })?;

    tracing::debug!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Render the first `limit` rows as a right-justified text table
pub fn console_table(rows: &[ParameterSummary], limit: usize) -> String {
    if rows.is_empty() {
        return "No query parameters found for the selected crawler.".to_string();
    }

    let cells: Vec<[String; 3]> = rows
        .iter()
        .take(limit)
        .map(|row| {
            [
                row.parameter.clone(),
                row.request_count.to_string(),
                row.example_url.clone(),
            ]
        })
        .collect();

    let mut widths = CONSOLE_HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &CONSOLE_HEADERS, &widths);
    for line in &cells {
        out.push('\n');
        push_row(&mut out, line, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S; 3], widths: &[usize; 3]) {
    let rendered: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:>width$}", cell.as_ref(), width = *width))
        .collect();
    out.push_str(&rendered.join(" "));
}
