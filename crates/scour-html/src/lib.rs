//! Fragment HTML parser and serializer for the scour sanitizer.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** — the fragment subset of
//!   [WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
//!   tags, attributes and comments, with raw (undecoded) text
//! - **Tree builder** — a strict stack-of-open-elements construction with no
//!   repair; structural problems become [`ParseError`]s
//! - **Serializer** — markup back out of the tree, byte-exact for untouched
//!   subtrees
//!
//! # Deliberately absent
//!
//! - Character reference decoding (`&nbsp;` passes through raw)
//! - DOCTYPE, CDATA, RCDATA/RAWTEXT and script data states
//! - Tag auto-closing and any other parse repair — malformed input is
//!   reported, not fixed, because the sanitizer on top fails closed

/// Parse error types shared by the tokenizer and tree builder.
pub mod error;
/// Tree construction from the token stream.
pub mod parser;
/// Tree-to-markup serialization.
pub mod serializer;
/// Input-to-token tokenization.
pub mod tokenizer;

pub use error::{ParseError, ParseErrorKind};
pub use parser::TreeBuilder;
pub use serializer::{inner_html, serialize};
pub use tokenizer::{Token, Tokenizer};

use scour_dom::DomTree;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements."
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// The result of parsing one fragment: the tree plus every structural parse
/// error, in discovery order. An empty error list is the well-formedness
/// signal the sanitizer keys off.
#[derive(Debug)]
pub struct ParsedFragment {
    /// The constructed tree, rooted at the synthetic Document node.
    pub tree: DomTree,
    /// Structural parse errors from both tokenization and tree construction.
    pub errors: Vec<ParseError>,
}

/// Parse an HTML fragment.
///
/// This is the main entry point: tokenize, build the tree, and combine the
/// error lists (tokenizer errors first, then tree construction errors).
#[must_use]
pub fn parse(html: &str) -> ParsedFragment {
    let mut tokenizer = Tokenizer::new(html);
    tokenizer.run();
    let (tokens, mut errors) = tokenizer.into_parts();

    let builder = TreeBuilder::new(tokens);
    let (tree, tree_errors) = builder.run();
    errors.extend(tree_errors);

    ParsedFragment { tree, errors }
}
