// Query-string splitting and decoding
use url::form_urlencoded;

/// Query component of a request target: text after the first `?`,
/// with any `#fragment` removed first
pub fn query_component(url: &str) -> &str {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    without_fragment
        .split_once('?')
        .map_or("", |(_, query)| query)
}

/// Decode a query string into parameter names and their value lists
///
/// Keys keep first-appearance order and repeated keys collect all their
/// values. Pairs without `=` or with an empty value are dropped, as are
/// empty `&&` segments.
pub fn parse_query(query: &str) -> Vec<(String, Vec<String>)> {
    let mut params: Vec<(String, Vec<String>)> = Vec::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }

        match params.iter_mut().find(|(name, _)| *name == key) {
            Some((_, values)) => values.push(value.into_owned()),
            None => params.push((key.into_owned(), vec![value.into_owned()])),
        }
    }

    params
}
