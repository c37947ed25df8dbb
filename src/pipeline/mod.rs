// Fused extraction + aggregation pass over one access log
use crate::aggregator::{Aggregator, ParameterSummary};
use crate::error::Result;
use crate::extractor::{ExtractStats, Extractor};
use crate::patterns::RequestMatcher;
use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

/// Result of analyzing one log
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Summary rows sorted by request count, descending
    pub rows: Vec<ParameterSummary>,
    pub stats: ExtractStats,
    pub elapsed_ms: u64,
}

/// Stream `reader` through the extractor straight into the aggregator
///
/// Matched URLs are folded as they are found, so memory grows with the
/// number of distinct parameters rather than the number of matching lines.
pub fn analyze<R: BufRead>(
    reader: R,
    matcher: RequestMatcher,
    progress_interval: u64,
) -> Result<Analysis> {
    let start = Instant::now();
    let extractor = Extractor::new(matcher, progress_interval);
    let mut aggregator = Aggregator::new();

    let stats = extractor.for_each_url(reader, |url| aggregator.add_url(url))?;
    let rows = aggregator.finish();

    Ok(Analysis {
        rows,
        stats,
        elapsed_ms: start.elapsed().as_millis() as u64,
    })
}

/// Analyze the access log at `path`
pub fn analyze_log(
    path: &Path,
    matcher: RequestMatcher,
    progress_interval: u64,
) -> Result<Analysis> {
    let reader = Extractor::open(path)?;
    analyze(reader, matcher, progress_interval)
}
