//! Streaming extraction of crawler request URLs from an access log
//!
//! The log is read line by line; each line is tested against a
//! [`RequestMatcher`] and the path+query token of every match is handed on in
//! log order, duplicates included.

use crate::error::{BotParamsError, Result};
use crate::patterns::RequestMatcher;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Default number of lines between progress reports
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

/// Counters from one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Lines read from the source
    pub lines_read: u64,
    /// Lines that yielded a URL
    pub urls_matched: u64,
}

/// Line-by-line URL extractor for one crawler
pub struct Extractor {
    matcher: RequestMatcher,
    progress_interval: u64,
}

impl Extractor {
    /// Create an extractor reporting progress every `progress_interval` lines
    pub fn new(matcher: RequestMatcher, progress_interval: u64) -> Self {
        Self {
            matcher,
            progress_interval: progress_interval.max(1),
        }
    }

    /// Open an access log for buffered reading
    pub fn open(path: &Path) -> Result<BufReader<File>> {
        let file = File::open(path).map_err(|e| BotParamsError::Io {
            source: e,
            context: format!("Failed to open access log: {:?}", path),
        })?;
        Ok(BufReader::new(file))
    }

    /// Stream matching URLs from `reader` into `on_url`
    ///
    /// `\n`, `\r\n` and a lone `\r` all end a line. Lines that do not match
    /// are skipped silently. Invalid UTF-8 is replaced rather than treated as
    /// fatal; read errors abort the pass.
    pub fn for_each_url<R, F>(&self, mut reader: R, mut on_url: F) -> Result<ExtractStats>
    where
        R: BufRead,
        F: FnMut(&str),
    {
        let mut stats = ExtractStats::default();
        let mut buf = Vec::new();

        tracing::info!("Processing access log:");

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| BotParamsError::Io {
                    source: e,
                    context: format!("Failed to read access log at line {}", stats.lines_read + 1),
                })?;
            if read == 0 {
                break;
            }

            for raw in trim_line_ending(&buf).split(|&b| b == b'\r') {
                if stats.lines_read % self.progress_interval == 0 {
                    tracing::info!("{} rows processed", stats.lines_read);
                }
                stats.lines_read += 1;

                let line = String::from_utf8_lossy(raw);
                if let Some(url) = self.matcher.match_line(&line) {
                    stats.urls_matched += 1;
                    on_url(url);
                }
            }
        }

        tracing::debug!(
            "Extraction finished: {} lines read, {} URLs matched",
            stats.lines_read,
            stats.urls_matched
        );

        Ok(stats)
    }

    /// Collect every matching URL from `reader`
    pub fn extract<R: BufRead>(&self, reader: R) -> Result<Vec<String>> {
        let mut urls = Vec::new();
        self.for_each_url(reader, |url| urls.push(url.to_string()))?;
        Ok(urls)
    }

    /// Collect every matching URL from the log at `path`
    pub fn extract_file(&self, path: &Path) -> Result<Vec<String>> {
        self.extract(Self::open(path)?)
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn googlebot() -> Extractor {
        Extractor::new(
            RequestMatcher::new("Googlebot/").unwrap(),
            DEFAULT_PROGRESS_INTERVAL,
        )
    }

    #[test]
    fn test_extract_preserves_order_and_duplicates() {
        let log = "\
1.1.1.1 - - [x] \"GET /p?x=1 HTTP/1.1\" 200 - \"-\" \"Googlebot/2.1\"
1.1.1.1 - - [x] \"GET /search HTTP/1.1\" 200 - \"-\" \"Googlebot/2.1\"
1.1.1.1 - - [x] \"GET /q?y=2 HTTP/1.1\" 200 - \"-\" \"bingbot/2.0\"
1.1.1.1 - - [x] \"GET /r?z=3 HTTP/1.1\" 200 - \"-\" \"Googlebot/2.1\"
1.1.1.1 - - [x] \"GET /p?x=1 HTTP/1.1\" 200 - \"-\" \"Googlebot/2.1\"
";
        let urls = googlebot().extract(Cursor::new(log)).unwrap();
        assert_eq!(urls, vec!["/p?x=1", "/r?z=3", "/p?x=1"]);
    }

    #[test]
    fn test_stats_count_lines_and_matches() {
        let log = "GET /a?b=1 HTTP/1.1 Googlebot/2.1\r\nnoise\nGET /c?d=1 HTTP/1.0 Googlebot/2.1";
        let mut seen = Vec::new();
        let stats = googlebot()
            .for_each_url(Cursor::new(log), |url| seen.push(url.to_string()))
            .unwrap();
        assert_eq!(
            stats,
            ExtractStats {
                lines_read: 3,
                urls_matched: 2
            }
        );
        assert_eq!(seen, vec!["/a?b=1", "/c?d=1"]);
    }

    #[test]
    fn test_bare_carriage_returns_split_lines() {
        let log = "GET /a?b=1 HTTP/1.1 Googlebot/2.1\rGET /c?d=2 HTTP/1.1 Googlebot/2.1\r";
        let mut seen = Vec::new();
        let stats = googlebot()
            .for_each_url(Cursor::new(log), |url| seen.push(url.to_string()))
            .unwrap();
        assert_eq!(seen, vec!["/a?b=1", "/c?d=2"]);
        assert_eq!(stats.lines_read, 2);
    }

    #[test]
    fn test_mixed_line_endings() {
        let log = "noise\r\rGET /a?b=1 HTTP/1.1 Googlebot/2.1\r\nGET /c?d=2 HTTP/1.1 Googlebot/2.1\n";
        let mut seen = Vec::new();
        let stats = googlebot()
            .for_each_url(Cursor::new(log), |url| seen.push(url.to_string()))
            .unwrap();
        // "noise", "", request, request
        assert_eq!(stats.lines_read, 4);
        assert_eq!(seen, vec!["/a?b=1", "/c?d=2"]);
    }

    #[test]
    fn test_invalid_utf8_line_is_not_fatal() {
        let mut log = b"\xff\xfe garbage\n".to_vec();
        log.extend_from_slice(b"GET /a?b=1 HTTP/1.1 Googlebot/2.1\n");
        let urls = googlebot().extract(Cursor::new(log)).unwrap();
        assert_eq!(urls, vec!["/a?b=1"]);
    }

    #[test]
    fn test_empty_source() {
        let urls = googlebot().extract(Cursor::new("")).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = googlebot()
            .extract_file(Path::new("/nonexistent/botparams/access.log"))
            .unwrap_err();
        assert!(matches!(err, BotParamsError::Io { .. }));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn test_read_error_aborts() {
        let err = googlebot()
            .extract(BufReader::new(FailingReader))
            .unwrap_err();
        assert!(matches!(err, BotParamsError::Io { .. }));
    }
}
