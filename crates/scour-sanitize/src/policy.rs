//! The per-tag attribute policy.
//!
//! Only hyperlinks and images carry attributes that matter to downstream
//! rendering; every other whitelisted tag (`b`, `i`, `p`, `div`, ...) is
//! attribute-free after cleansing. That single rule closes the usual
//! injection vectors — inline `style`, `class`, event handlers — without
//! ever having to parse an attribute value.
//!
//! Cleansing and strict validation use different keep-sets for anchors:
//! `title` survives a clean but is flagged by the validator. The asymmetry
//! is deliberate and load-bearing for callers that clean on write and
//! validate on ingest; do not unify the two tables.

/// Attributes the cleanser keeps on `<a>`.
const ANCHOR_CLEANSE_KEEP: [&str; 3] = ["href", "target", "title"];

/// Attributes the strict validator accepts on `<a>` (narrower: no `title`).
const ANCHOR_VALIDATE_KEEP: [&str; 2] = ["href", "target"];

/// Attributes the cleanser keeps on `<img>`.
///
/// `width`/`height` are included because feeds routinely deliver
/// zero-by-zero tracking pixels; keeping the dimensions lets downstream
/// rendering collapse them instead of guessing.
const IMAGE_CLEANSE_KEEP: [&str; 3] = ["src", "width", "height"];

/// Decide whether the cleanser keeps an attribute.
///
/// `tag` is the element's tag name (already lower-cased at parse time);
/// `attr` is the attribute name in source case, folded here for comparison.
#[must_use]
pub fn keep_when_cleansing(tag: &str, attr: &str) -> bool {
    let attr = attr.to_ascii_lowercase();
    match tag {
        "a" => ANCHOR_CLEANSE_KEEP.contains(&attr.as_str()),
        "img" => IMAGE_CLEANSE_KEEP.contains(&attr.as_str()),
        _ => false,
    }
}

/// Decide whether the strict validator accepts an attribute.
///
/// Under strict validation only anchors may carry attributes at all; even
/// `<img src>` is a violation here, though the cleanser would keep it.
#[must_use]
pub fn keep_when_validating(tag: &str, attr: &str) -> bool {
    let attr = attr.to_ascii_lowercase();
    match tag {
        "a" => ANCHOR_VALIDATE_KEEP.contains(&attr.as_str()),
        _ => false,
    }
}
