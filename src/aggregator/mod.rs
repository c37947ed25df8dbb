// Parameter aggregation
//
// Folds extracted request URLs into one summary row per query parameter:
// request count, mean rendered value length, mean URL length, first example.

mod query;
mod render;

pub use query::{parse_query, query_component};
pub use render::{render_value_list, value_list_length};

use ahash::{HashMap, HashMapExt};
use serde::Serialize;

/// Summary statistics for one query parameter
///
/// Field order matches the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSummary {
    /// Number of URLs carrying the parameter
    pub request_count: u64,
    /// Parameter name as decoded from the query string
    pub parameter: String,
    /// Mean length of the rendered value list
    pub parameter_value_length: f64,
    /// Mean length of the URLs carrying the parameter
    pub url_average_length: f64,
    /// URL of the first occurrence
    pub example_url: String,
}

/// Running statistics for one parameter
#[derive(Debug, Clone)]
struct ParameterStats {
    parameter: String,
    count: u64,
    value_length_sum: u64,
    url_length_sum: u64,
    example_url: String,
}

impl ParameterStats {
    fn new(parameter: String, example_url: &str) -> Self {
        Self {
            parameter,
            count: 0,
            value_length_sum: 0,
            url_length_sum: 0,
            example_url: example_url.to_string(),
        }
    }

    fn record(&mut self, value_length: usize, url_length: usize) {
        self.count += 1;
        self.value_length_sum += value_length as u64;
        self.url_length_sum += url_length as u64;
    }

    fn summarize(self) -> ParameterSummary {
        let count = self.count as f64;
        ParameterSummary {
            request_count: self.count,
            parameter: self.parameter,
            parameter_value_length: self.value_length_sum as f64 / count,
            url_average_length: self.url_length_sum as f64 / count,
            example_url: self.example_url,
        }
    }
}

/// Incremental parameter aggregator
///
/// Rows are kept in first-appearance order; `finish` sorts them by request
/// count with a stable sort, so equal counts keep that order.
#[derive(Debug, Default)]
pub struct Aggregator {
    /// Parameter name -> position in `rows`
    index: HashMap<String, usize>,
    rows: Vec<ParameterStats>,
    urls_seen: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            rows: Vec::new(),
            urls_seen: 0,
        }
    }

    /// Fold one extracted URL into the running statistics
    ///
    /// Each distinct parameter in the URL counts once, however many times it
    /// repeats in the query string.
    pub fn add_url(&mut self, url: &str) {
        self.urls_seen += 1;

        let params = parse_query(query_component(url));
        if params.is_empty() {
            return;
        }

        let url_length = url.chars().count();
        for (name, values) in params {
            let value_length = value_list_length(&values);
            let idx = match self.index.get(&name) {
                Some(&idx) => idx,
                None => {
                    let idx = self.rows.len();
                    self.index.insert(name.clone(), idx);
                    self.rows.push(ParameterStats::new(name, url));
                    idx
                }
            };
            self.rows[idx].record(value_length, url_length);
        }
    }

    /// Number of URLs folded so far
    pub fn urls_seen(&self) -> u64 {
        self.urls_seen
    }

    /// Number of distinct parameters seen so far
    pub fn parameter_count(&self) -> usize {
        self.rows.len()
    }

    /// Finish aggregation and return rows sorted by request count, descending
    pub fn finish(self) -> Vec<ParameterSummary> {
        let mut rows: Vec<ParameterSummary> =
            self.rows.into_iter().map(ParameterStats::summarize).collect();
        rows.sort_by(|a, b| b.request_count.cmp(&a.request_count));
        rows
    }
}

/// Aggregate a full sequence of extracted URLs
pub fn aggregate<I, S>(urls: I) -> Vec<ParameterSummary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = Aggregator::new();
    for url in urls {
        aggregator.add_url(url.as_ref());
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row<'a>(rows: &'a [ParameterSummary], name: &str) -> &'a ParameterSummary {
        rows.iter().find(|r| r.parameter == name).unwrap()
    }

    #[test]
    fn test_single_url() {
        let rows = aggregate(["/page?a=1&b=2"]);
        assert_eq!(rows.len(), 2);

        let a = row(&rows, "a");
        assert_eq!(a.request_count, 1);
        assert_eq!(a.parameter_value_length, 5.0);
        assert_eq!(a.url_average_length, 13.0);
        assert_eq!(a.example_url, "/page?a=1&b=2");
    }

    #[test]
    fn test_repeated_url_counts_each_time() {
        let rows = aggregate(["/p?x=1", "/p?x=1"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].request_count, 2);
        assert_eq!(rows[0].example_url, "/p?x=1");
    }

    #[test]
    fn test_repeated_key_is_one_occurrence() {
        let rows = aggregate(["/p?x=1&x=2"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].request_count, 1);
        assert_eq!(rows[0].parameter_value_length, 10.0);
    }

    #[test]
    fn test_means_over_occurrences() {
        let rows = aggregate(["/p?id=1", "/longer/path?id=12345"]);
        let id = row(&rows, "id");
        assert_eq!(id.request_count, 2);
        // ['1'] = 5, ['12345'] = 9
        assert_eq!(id.parameter_value_length, 7.0);
        // 7 and 21 characters
        assert_eq!(id.url_average_length, 14.0);
        assert_eq!(id.example_url, "/p?id=1");
    }

    #[test]
    fn test_example_is_first_occurrence() {
        let rows = aggregate(["/a?q=1", "/b?q=2&r=1", "/c?r=2"]);
        assert_eq!(row(&rows, "q").example_url, "/a?q=1");
        assert_eq!(row(&rows, "r").example_url, "/b?q=2&r=1");
    }

    #[test]
    fn test_sorted_by_count_with_first_appearance_ties() {
        let rows = aggregate(["/p?b=1&a=1", "/p?c=1", "/p?c=2", "/p?a=2"]);
        let order: Vec<&str> = rows.iter().map(|r| r.parameter.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "b"]);

        let rows = aggregate(["/p?z=1", "/p?y=1", "/p?x=1"]);
        let order: Vec<&str> = rows.iter().map(|r| r.parameter.as_str()).collect();
        assert_eq!(order, vec!["z", "y", "x"]);
    }

    #[test]
    fn test_urls_without_parameters_contribute_nothing() {
        let mut aggregator = Aggregator::new();
        aggregator.add_url("/p?");
        aggregator.add_url("/p?flag");
        aggregator.add_url("/p?empty=");
        assert_eq!(aggregator.urls_seen(), 3);
        assert_eq!(aggregator.parameter_count(), 0);
        assert!(aggregator.finish().is_empty());
    }

    #[test]
    fn test_empty_input() {
        let urls: Vec<String> = Vec::new();
        assert!(aggregate(urls).is_empty());
    }

    #[test]
    fn test_encoded_tag_sequence_value_length() {
        let rows = aggregate([
            "/p?flag=%F0%9F%8F%B4%F3%A0%81%A7%F3%A0%81%A2%F3%A0%81%A5%F3%A0%81%AE%F3%A0%81%A7%F3%A0%81%BF",
        ]);
        assert_eq!(rows[0].parameter, "flag");
        assert_eq!(rows[0].parameter_value_length, 65.0);
    }

    #[test]
    fn test_url_length_counts_characters() {
        let rows = aggregate(["/é?k=v"]);
        assert_eq!(rows[0].url_average_length, 6.0);
    }
}
