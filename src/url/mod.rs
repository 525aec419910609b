//! URL handling module for Robofinder
//!
//! This module provides the absolute-URL predicate and the path normalizer
//! that joins extracted paths onto the target site.

mod normalize;

pub use normalize::{is_absolute_url, normalize_path};
