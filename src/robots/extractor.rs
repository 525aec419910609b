//! Directive extraction from free-form robots.txt text
//!
//! Extraction is a two-stage match. A coarse scan finds candidate substrings
//! of the form `<Trigger>:<spaces or tabs><token>` on a single line, then each candidate is
//! re-parsed to pull out `<keyword>: <value>` pairs. Only the values are kept.

use once_cell::sync::Lazy;
use regex::Regex;

/// Coarse filter: the three path-bearing keywords followed by a token on the same line
static PATH_TRIGGERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Allow|Disallow|Sitemap):[ \t]*\S+").unwrap());

/// Coarse filter widened to every keyword the re-parse understands
static ALL_TRIGGERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Allow|Disallow|User-?agent|Sitemap|Crawl-delay):[ \t]*\S+").unwrap()
});

/// Precise re-parse of one candidate
static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(allow|disallow|user-?agent|sitemap|crawl-delay):[ \t]*(.*)").unwrap()
});

/// Which keywords are allowed to open a candidate in the coarse scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionScope {
    /// Only `Allow:`, `Disallow:` and `Sitemap:` open a candidate, so
    /// `User-agent` and `Crawl-delay` values are never collected.
    #[default]
    PathTriggers,

    /// All five keywords open a candidate
    AllKeywords,
}

/// Extracts directive values from robots.txt content
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveExtractor {
    scope: ExtractionScope,
}

impl DirectiveExtractor {
    /// Creates an extractor with the given coarse-scan scope
    pub fn new(scope: ExtractionScope) -> Self {
        Self { scope }
    }

    /// Returns the coarse-scan scope of this extractor
    pub fn scope(&self) -> ExtractionScope {
        self.scope
    }

    /// Extracts every directive value from `text`
    ///
    /// Values are returned in order of appearance and duplicates are kept.
    /// Keyword matching is case-insensitive. Text without directives yields
    /// an empty vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use robofinder::robots::DirectiveExtractor;
    ///
    /// let extractor = DirectiveExtractor::default();
    /// let values = extractor.extract("User-agent: *\nDisallow: /admin\nallow: /public");
    /// assert_eq!(values, vec!["/admin", "/public"]);
    /// ```
    pub fn extract(&self, text: &str) -> Vec<String> {
        let coarse: &Regex = match self.scope {
            ExtractionScope::PathTriggers => &PATH_TRIGGERS,
            ExtractionScope::AllKeywords => &ALL_TRIGGERS,
        };

        coarse
            .find_iter(text)
            .flat_map(|candidate| DIRECTIVE.captures_iter(candidate.as_str()))
            .filter_map(|caps| caps.get(2))
            .map(|value| value.as_str().trim().to_string())
            .collect()
    }
}

/// Extracts directive values using the default path-trigger scope
pub fn extract(text: &str) -> Vec<String> {
    DirectiveExtractor::default().extract(text)
}
