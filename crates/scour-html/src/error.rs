//! Parse error reporting.
//!
//! The tokenizer and tree builder both record structural problems here
//! instead of attempting repair. Downstream, any recorded error makes the
//! cleanser fail closed (empty output) and the validator report the reasons
//! verbatim.

use thiserror::Error;

/// The reason a fragment failed to parse cleanly.
///
/// Naming loosely follows the error names in
/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors),
/// restricted to the situations the fragment grammar can actually produce.
/// The `Display` strings are user-facing; the validator embeds them in its
/// violation messages unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A start tag was still open when the input ended.
    ///
    /// Reported once per parse, naming the outermost unclosed tag, however
    /// many elements were left open inside it.
    #[error("tag <{tag}> was not closed")]
    TagNeverClosed {
        /// Lower-cased name of the outermost unclosed tag.
        tag: String,
    },

    /// An end tag appeared with no matching open start tag.
    #[error("end tag </{tag}> has no matching start tag")]
    StrayEndTag {
        /// Lower-cased name of the stray end tag.
        tag: String,
    },

    /// An end tag matched an open element that was not the innermost one.
    ///
    /// The original parser this replaces repaired such misnesting by
    /// auto-closing; here it is an error, because a guessed repair of
    /// untrusted markup is exactly what fail-closed sanitization exists to
    /// avoid.
    #[error("end tag </{tag}> closes over still-open <{open}>")]
    MisnestedEndTag {
        /// Name of the end tag that arrived.
        tag: String,
        /// Name of the innermost element that was still open.
        open: String,
    },

    /// `<` was followed by something that cannot begin a tag name.
    #[error("invalid first character of tag name")]
    InvalidFirstCharacterOfTagName,

    /// The input ended in the middle of a tag.
    #[error("unexpected end of input inside a tag")]
    EofInTag,

    /// The input ended in the middle of a comment.
    #[error("unexpected end of input inside a comment")]
    EofInComment,

    /// `<!` was not followed by `--` (this grammar has no DOCTYPE or CDATA).
    #[error("incorrectly opened comment")]
    IncorrectlyOpenedComment,

    /// `<!-->` or `<!--->`.
    #[error("abrupt closing of empty comment")]
    AbruptClosingOfEmptyComment,

    /// The same attribute name appeared twice on one tag.
    #[error("duplicate attribute '{name}'")]
    DuplicateAttribute {
        /// Lower-cased attribute name.
        name: String,
    },

    /// An attribute `=` had no value before the tag closed.
    #[error("missing attribute value")]
    MissingAttributeValue,

    /// Self-closing syntax (`/>`) on an element that is not void.
    #[error("self-closing syntax on non-void element <{tag}>")]
    NonVoidSelfClosing {
        /// Lower-cased tag name.
        tag: String,
    },
}

/// A single structural parse error.
///
/// The parse step returns these as an ordered list; order follows discovery
/// order in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(transparent)]
pub struct ParseError {
    /// What went wrong.
    pub reason: ParseErrorKind,
}

impl ParseError {
    /// Wrap a reason.
    #[must_use]
    pub const fn new(reason: ParseErrorKind) -> Self {
        Self { reason }
    }
}
