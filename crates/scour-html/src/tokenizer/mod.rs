//! Fragment HTML tokenizer.
//!
//! Implements the subset of
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! that sanitized fragments need: tags, attributes and comments. Character
//! references are deliberately not decoded (text passes through raw), and
//! there are no DOCTYPE, RCDATA, RAWTEXT or script states — a `<script>`
//! body tokenizes as ordinary markup, which is what lets the cleanser keep
//! its text content while unwrapping the tags.

/// Tokenizer state machine implementation.
pub mod core;
/// Token types produced by the tokenizer.
pub mod token;

pub use core::Tokenizer;
pub use token::Token;
