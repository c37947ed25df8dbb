//! Crawler selection, interactive or from a command-line value
use crate::error::{BotParamsError, Result};
use crate::patterns::{CompiledCrawler, CrawlerCatalog};
use std::io::{BufRead, Write};

/// Message shown when a selection is rejected
pub const INVALID_SELECTION_MESSAGE: &str = "Please select one of the numbers above!";

/// Render the numbered crawler menu
pub fn render_menu(catalog: &CrawlerCatalog) -> String {
    let mut menu = String::from("Please select which bot do you want to analyze:\n");
    for (idx, crawler) in catalog.iter().enumerate() {
        menu.push_str(&format!("{}) {}\n", idx + 1, crawler.name));
    }
    menu
}

/// Parse a 1-based menu number into a zero-based catalog index
pub fn parse_choice(input: &str, len: usize) -> Result<usize> {
    let invalid = || BotParamsError::InvalidSelection {
        input: input.trim_end_matches(['\r', '\n']).to_string(),
    };

    let choice: i64 = input.trim().parse().map_err(|_| invalid())?;
    if choice < 1 || choice as u64 > len as u64 {
        return Err(invalid());
    }

    Ok(choice as usize - 1)
}

/// Show the menu on `output` and read one choice from `input`
///
/// A single bad answer (or end of input) is an error; there is no retry.
pub fn prompt<'a, R, W>(
    catalog: &'a CrawlerCatalog,
    mut input: R,
    mut output: W,
) -> Result<&'a CompiledCrawler>
where
    R: BufRead,
    W: Write,
{
    let io_err = |e| BotParamsError::Io {
        source: e,
        context: "Failed to prompt for crawler".to_string(),
    };

    write!(output, "{}Enter number: ", render_menu(catalog)).map_err(io_err)?;
    output.flush().map_err(io_err)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(io_err)?;

    let idx = parse_choice(&line, catalog.len())?;
    catalog.get(idx).ok_or(BotParamsError::InvalidSelection { input: line })
}

/// Resolve a `--crawler` value: a 1-based menu number or an exact name
pub fn from_argument<'a>(catalog: &'a CrawlerCatalog, value: &str) -> Result<&'a CompiledCrawler> {
    if let Some(crawler) = catalog.find(value) {
        return Ok(crawler);
    }

    let idx = parse_choice(value, catalog.len())?;
    catalog.get(idx).ok_or_else(|| BotParamsError::InvalidSelection {
        input: value.to_string(),
    })
}
