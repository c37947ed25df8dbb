//! Crawler catalog and request-line matching
//!
//! This module provides:
//! - The ordered catalog of known crawlers (name + user-agent regex)
//! - Pre-compiled crawler patterns, validated once at startup
//! - The request-line matcher that embeds one crawler pattern into the
//!   `GET <path>?<query> HTTP ... <crawler>` line shape

use crate::error::{BotParamsError, Result};
use ahash::{HashMap, HashMapExt};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Crawler pattern configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlerConfig {
    pub name: String,
    pub pattern: String,
}

impl CrawlerConfig {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// Built-in crawler catalog, in menu order
pub fn default_crawlers() -> Vec<CrawlerConfig> {
    vec![
        CrawlerConfig::new("Googlebot regular", "Googlebot/"),
        CrawlerConfig::new("All Googlebot requests (including images,...)", "Googlebot"),
        CrawlerConfig::new("Googlebot-Images", "Googlebot-Images"),
        CrawlerConfig::new("Googlebot-News", "Googlebot-News"),
        CrawlerConfig::new("Bingbot", "bingbot/"),
        CrawlerConfig::new("Yahoo", "Slurp"),
        CrawlerConfig::new("Yandex", "YandexBot"),
        CrawlerConfig::new("Baidu", "Baiduspider"),
    ]
}

/// Compiled crawler pattern
#[derive(Debug, Clone)]
pub struct CompiledCrawler {
    pub name: String,
    pub pattern: String,
    /// Request-line matcher built from `pattern`
    pub matcher: RequestMatcher,
}

/// Ordered, immutable catalog of compiled crawler patterns
#[derive(Debug, Clone)]
pub struct CrawlerCatalog {
    crawlers: Vec<CompiledCrawler>,
    by_name: HashMap<String, usize>,
}

impl CrawlerCatalog {
    /// Build the catalog from configuration entries, failing on the first
    /// pattern that does not compile or name that repeats
    pub fn from_configs(configs: &[CrawlerConfig]) -> Result<Self> {
        let mut crawlers = Vec::with_capacity(configs.len());
        let mut by_name = HashMap::with_capacity(configs.len());

        for (idx, cfg) in configs.iter().enumerate() {
            let matcher =
                RequestMatcher::compile(&cfg.pattern).map_err(|e| BotParamsError::InvalidPattern {
                    name: cfg.name.clone(),
                    source: e,
                })?;

            if by_name.insert(cfg.name.clone(), idx).is_some() {
                return Err(BotParamsError::Config(format!(
                    "Duplicate crawler name '{}'",
                    cfg.name
                )));
            }

            crawlers.push(CompiledCrawler {
                name: cfg.name.clone(),
                pattern: cfg.pattern.clone(),
                matcher,
            });
        }

        Ok(Self { crawlers, by_name })
    }

    /// Catalog with the built-in crawlers
    pub fn builtin() -> Result<Self> {
        Self::from_configs(&default_crawlers())
    }

    pub fn len(&self) -> usize {
        self.crawlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crawlers.is_empty()
    }

    /// Crawler at a zero-based position
    pub fn get(&self, index: usize) -> Option<&CompiledCrawler> {
        self.crawlers.get(index)
    }

    /// Crawler by exact name
    pub fn find(&self, name: &str) -> Option<&CompiledCrawler> {
        self.by_name.get(name).map(|&idx| &self.crawlers[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledCrawler> {
        self.crawlers.iter()
    }
}

/// Matches access-log request lines issued by one crawler
///
/// The crawler pattern is embedded after the `HTTP` token, so a line only
/// matches when the crawler text trails the request (where the user-agent
/// field sits in combined log layouts).
#[derive(Debug, Clone)]
pub struct RequestMatcher {
    regex: Regex,
}

impl RequestMatcher {
    /// Build a matcher for a raw crawler pattern
    pub fn new(crawler_pattern: &str) -> Result<Self> {
        Self::compile(crawler_pattern).map_err(|e| BotParamsError::InvalidPattern {
            name: crawler_pattern.to_string(),
            source: e,
        })
    }

    fn compile(crawler_pattern: &str) -> std::result::Result<Self, regex::Error> {
        // Leading greedy `.*` picks the rightmost GET that still leaves room
        // for the rest of the shape; the crawler goes in its own group so an
        // alternation cannot swallow the path capture.
        let line_pattern = format!(r".*GET\s(.*\?.*)\sHTTP.*(?:{})", crawler_pattern);
        Ok(Self {
            regex: Regex::new(&line_pattern)?,
        })
    }

    /// Extract the path+query token from a matching line
    pub fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}
