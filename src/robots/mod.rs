//! Robots.txt handling module
//!
//! This module extracts crawl directives (allow/disallow paths, wildcard
//! patterns and sitemap URLs) from robots.txt snapshots.

mod extractor;

pub use extractor::{extract, DirectiveExtractor, ExtractionScope};
