//! Tests for the deduplicated warning channel.

use scour_common::warning::{clear_warnings, warn_once};

// One test function on purpose: the dedup set is process-global, and
// parallel test threads sharing it would race on clear_warnings.
#[test]
fn test_warn_once_deduplicates_per_message() {
    clear_warnings();

    // First occurrence prints, repeats do not
    assert!(warn_once("HTML tokenizer", "unexpected end of input inside a tag"));
    assert!(!warn_once("HTML tokenizer", "unexpected end of input inside a tag"));

    // A different message or a different component is its own key
    assert!(warn_once("HTML tokenizer", "duplicate attribute 'a'"));
    assert!(warn_once("HTML parser", "unexpected end of input inside a tag"));

    // Clearing forgets everything
    clear_warnings();
    assert!(warn_once("HTML tokenizer", "unexpected end of input inside a tag"));
}
