//! Shared utilities for the scour sanitizer.
//!
//! Currently this is only the deduplicated warning channel used by the HTML
//! parser to surface parse errors on stderr without spamming repeated inputs.

pub mod warning;
