use core::fmt;

use scour_dom::{Attribute, QuoteStyle};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer emits tokens of these types to the tree construction stage.
/// Relative to the full standard there are no DOCTYPE tokens; a fragment has
/// no document prologue, and `<!doctype>` is reported as an incorrectly
/// opened comment instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes, each of which has a name and a value."
    StartTag {
        /// The tag name as written in the source. Consumers fold case when
        /// comparing; the source spelling is kept for serialization.
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes", in source order with source-cased names.
        attributes: Vec<Attribute>,
    },

    /// End tag token. Attributes on end tags are ignored by the tree builder,
    /// so only the name is kept.
    EndTag {
        /// The tag name as written in the source.
        name: String,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// Raw comment data, `<!--` and `-->` excluded.
        data: String,
    },

    /// A single character of text, emitted raw (no entity decoding).
    Character {
        /// "data"
        data: char,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// "When a start or end tag token is created, its self-closing flag must
    /// be unset ... and its attributes list must be empty."
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// Create a new end tag token.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
        }
    }

    /// Create a new comment token with empty data.
    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment {
            data: String::new(),
        }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// Append a character to the current tag token's tag name. Like attribute
    /// names, tag names keep their source case so untouched markup serializes
    /// back as written; comparisons fold case at the point of use.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-tag token, indicating a tokenizer bug.
    pub fn append_to_tag_name(&mut self, c: char) {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => {
                name.push(c);
            }
            _ => panic!("append_to_tag_name called on non-tag token"),
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    ///
    /// "Set the self-closing flag of the current tag token."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-start-tag token, indicating a tokenizer bug.
    pub fn set_self_closing(&mut self) {
        match self {
            Self::StartTag { self_closing, .. } => {
                *self_closing = true;
            }
            // A solidus in an end tag is discarded along with everything else
            // between the end tag's name and `>`.
            Self::EndTag { .. } => {}
            _ => panic!("set_self_closing called on non-tag token"),
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// "Append the current input character to the comment token's data."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-comment token, indicating a tokenizer bug.
    pub fn append_to_comment(&mut self, c: char) {
        match self {
            Self::Comment { data } => {
                data.push(c);
            }
            _ => panic!("append_to_comment called on non-comment token"),
        }
    }

    /// Append a string slice to the comment token's data.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-comment token, indicating a tokenizer bug.
    pub fn append_str_to_comment(&mut self, s: &str) {
        match self {
            Self::Comment { data } => {
                data.push_str(s);
            }
            _ => panic!("append_str_to_comment called on non-comment token"),
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    ///
    /// "Start a new attribute in the current tag token." The new attribute
    /// has no value until `=` is seen, so a bare attribute serializes back
    /// without one.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-start-tag token, indicating a tokenizer bug.
    pub fn start_new_attribute(&mut self) {
        match self {
            Self::StartTag { attributes, .. } => {
                attributes.push(Attribute::new(String::new(), None));
            }
            // End tags carry no attribute list; anything the tokenizer finds
            // there is parsed and discarded.
            Self::EndTag { .. } => {}
            _ => panic!("start_new_attribute called on non-tag token"),
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// Append a character to the current attribute's name. Unlike tag names,
    /// attribute names keep their source case; comparison folds case at the
    /// point of use and serialization reproduces the original spelling.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-start-tag token, indicating a tokenizer bug.
    pub fn append_to_current_attribute_name(&mut self, c: char) {
        match self {
            Self::StartTag { attributes, .. } => {
                if let Some(attr) = attributes.last_mut() {
                    attr.name.push(c);
                }
            }
            Self::EndTag { .. } => {}
            _ => panic!("append_to_current_attribute_name called on non-tag token"),
        }
    }

    /// Mark the current attribute as having a value (an `=` was seen).
    ///
    /// # Panics
    ///
    /// Panics if called on a non-start-tag token, indicating a tokenizer bug.
    pub fn begin_current_attribute_value(&mut self) {
        match self {
            Self::StartTag { attributes, .. } => {
                if let Some(attr) = attributes.last_mut() {
                    attr.value = Some(String::new());
                }
            }
            Self::EndTag { .. } => {}
            _ => panic!("begin_current_attribute_value called on non-tag token"),
        }
    }

    /// Record how the current attribute's value is delimited so the
    /// serializer can replay the same quote style.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-start-tag token, indicating a tokenizer bug.
    pub fn set_current_attribute_quote(&mut self, quote: QuoteStyle) {
        match self {
            Self::StartTag { attributes, .. } => {
                if let Some(attr) = attributes.last_mut() {
                    attr.quote = quote;
                }
            }
            Self::EndTag { .. } => {}
            _ => panic!("set_current_attribute_quote called on non-tag token"),
        }
    }

    /// [§ 13.2.5.36 Attribute value states](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    ///
    /// "Append the current input character to the current attribute's value."
    ///
    /// # Panics
    ///
    /// Panics if called on a non-start-tag token, indicating a tokenizer bug.
    pub fn append_to_current_attribute_value(&mut self, c: char) {
        match self {
            Self::StartTag { attributes, .. } => {
                if let Some(attr) = attributes.last_mut() {
                    attr.value.get_or_insert_with(String::new).push(c);
                }
            }
            Self::EndTag { .. } => {}
            _ => panic!("append_to_current_attribute_value called on non-tag token"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    match &attr.value {
                        Some(value) => write!(f, " {}=\"{value}\"", attr.name)?,
                        None => write!(f, " {}", attr.name)?,
                    }
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data } => match data {
                '\n' => write!(f, "Character(\\n)"),
                '\t' => write!(f, "Character(\\t)"),
                ' ' => write!(f, "Character(SPACE)"),
                c => write!(f, "Character({c})"),
            },
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
