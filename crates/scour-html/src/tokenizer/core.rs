use std::collections::HashSet;

use scour_common::warning::warn_once;
use scour_dom::QuoteStyle;
use strum_macros::Display;

use super::token::Token;
use crate::error::{ParseError, ParseErrorKind};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine, restricted to the states the fragment
/// grammar uses. Each state corresponds to a section in § 13.2.5.
#[derive(Debug, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to
/// tokenize HTML."
///
/// This struct maintains the state machine for tokenizing fragment input
/// into tokens. Structural problems are recorded as [`ParseError`]s rather
/// than repaired; the caller decides what an error means (for the sanitizer:
/// fail closed).
pub struct Tokenizer {
    state: TokenizerState,
    input: Vec<char>,
    /// Index of the next character to consume.
    current_pos: usize,
    current_input_character: Option<char>,
    current_token: Option<Token>,
    token_stream: Vec<Token>,
    errors: Vec<ParseError>,
    // When true, the next iteration of the main loop will not consume a new
    // character. "Reconsume in the X state" sets this flag.
    reconsume: bool,
    at_eof: bool,
}

impl Tokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// "The tokenizer state machine consists of the states defined in the
    /// following subsections. The initial state is the data state."
    #[must_use]
    pub fn new(input: &str) -> Self {
        Tokenizer {
            state: TokenizerState::Data,
            input: input.chars().collect(),
            current_pos: 0,
            current_input_character: None,
            current_token: None,
            token_stream: Vec::new(),
            errors: Vec::new(),
            reconsume: false,
            at_eof: false,
        }
    }

    /// Run the state machine to completion.
    pub fn run(&mut self) {
        while !self.at_eof {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume_next_input_character();
            }

            match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::TagOpen => self.handle_tag_open_state(),
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
                TokenizerState::TagName => self.handle_tag_name_state(),
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
                TokenizerState::AttributeName => self.handle_attribute_name_state(),
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
                TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_quoted_state('"');
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_quoted_state('\'');
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state();
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state();
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
                TokenizerState::BogusComment => self.handle_bogus_comment_state(),
                TokenizerState::MarkupDeclarationOpen => {
                    self.handle_markup_declaration_open_state();
                }
                TokenizerState::CommentStart => self.handle_comment_start_state(),
                TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
                TokenizerState::Comment => self.handle_comment_state(),
                TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
                TokenizerState::CommentEnd => self.handle_comment_end_state(),
            }
        }
    }

    /// Consume the tokenizer and return the token stream and the parse
    /// errors recorded along the way.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Token>, Vec<ParseError>) {
        (self.token_stream, self.errors)
    }

    // ===== state handlers =====

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    ///
    /// Unlike the full standard, `&` is plain text here: character
    /// references are never decoded, so `&nbsp;` survives verbatim through
    /// parse and re-serialization.
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => {
                self.switch_to(TokenizerState::TagOpen);
            }
            // "EOF - Emit an end-of-file token."
            None => {
                self.emit_eof_token();
            }
            // "Anything else - Emit the current input character as a
            // character token."
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup declaration
            // open state."
            Some('!') => {
                self.switch_to(TokenizerState::MarkupDeclarationOpen);
            }
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => {
                self.switch_to(TokenizerState::EndTagOpen);
            }
            // "ASCII alpha - Create a new start tag token... Reconsume in the
            // tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_start_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a
            // U+003C LESS-THAN SIGN character token and an end-of-file token."
            None => {
                self.parse_error(ParseErrorKind::EofInTag);
                self.emit_character_token('<');
                self.emit_eof_token();
            }
            // "Anything else - This is an invalid-first-character-of-tag-name
            // parse error. Emit a U+003C LESS-THAN SIGN character token.
            // Reconsume in the data state."
            Some(_) => {
                self.parse_error(ParseErrorKind::InvalidFirstCharacterOfTagName);
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            // "ASCII alpha - Create a new end tag token... Reconsume in the
            // tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-end-tag-name
            // parse error. Switch to the data state."
            Some('>') => {
                self.parse_error(ParseErrorKind::InvalidFirstCharacterOfTagName);
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - This is an eof-before-tag-name parse error."
            None => {
                self.parse_error(ParseErrorKind::EofInTag);
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.emit_eof_token();
            }
            // "Anything else - This is an invalid-first-character-of-tag-name
            // parse error. Create a comment token... Reconsume in the bogus
            // comment state."
            Some(_) => {
                self.parse_error(ParseErrorKind::InvalidFirstCharacterOfTagName);
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            // "tab, LF, FF, space - Switch to the before attribute name state."
            Some(c) if c.is_ascii_whitespace() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag state."
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current tag token."
            Some('>') => {
                self.emit_current_tag_token();
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - This is an eof-in-tag parse error. Emit an end-of-file
            // token." The partial tag token is discarded.
            None => {
                self.parse_error(ParseErrorKind::EofInTag);
                self.current_token = None;
                self.emit_eof_token();
            }
            // "Anything else - Append the current input character to the
            // current tag token's tag name." Source case is kept; comparison
            // folds case later.
            Some(c) => {
                self.current_token_mut().append_to_tag_name(c);
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "tab, LF, FF, space - Ignore the character."
            Some(c) if c.is_ascii_whitespace() => {}
            // "U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF -
            // Reconsume in the after attribute name state."
            Some('/' | '>') | None => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            // "Anything else - Start a new attribute in the current tag
            // token... Reconsume in the attribute name state."
            Some(_) => {
                self.current_token_mut().start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "tab, LF, FF, space, U+002F SOLIDUS (/), U+003E GREATER-THAN
            // SIGN (>), EOF - Reconsume in the after attribute name state."
            Some('/' | '>') | None => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some(c) if c.is_ascii_whitespace() => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value
            // state."
            Some('=') => {
                self.current_token_mut().begin_current_attribute_value();
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            // "Anything else - Append the current input character to the
            // current attribute's name." Source case is kept; comparison
            // folds case later.
            Some(c) => {
                self.current_token_mut().append_to_current_attribute_name(c);
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "tab, LF, FF, space - Ignore the character."
            Some(c) if c.is_ascii_whitespace() => {}
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag state."
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value
            // state."
            Some('=') => {
                self.current_token_mut().begin_current_attribute_value();
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current tag token."
            Some('>') => {
                self.emit_current_tag_token();
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - This is an eof-in-tag parse error."
            None => {
                self.parse_error(ParseErrorKind::EofInTag);
                self.current_token = None;
                self.emit_eof_token();
            }
            // "Anything else - Start a new attribute... Reconsume in the
            // attribute name state."
            Some(_) => {
                self.current_token_mut().start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            // "tab, LF, FF, space - Ignore the character."
            Some(c) if c.is_ascii_whitespace() => {}
            // "U+0022 QUOTATION MARK (\") - Switch to the attribute value
            // (double-quoted) state."
            Some('"') => {
                self.current_token_mut()
                    .set_current_attribute_quote(QuoteStyle::Double);
                self.switch_to(TokenizerState::AttributeValueDoubleQuoted);
            }
            // "U+0027 APOSTROPHE (') - Switch to the attribute value
            // (single-quoted) state."
            Some('\'') => {
                self.current_token_mut()
                    .set_current_attribute_quote(QuoteStyle::Single);
                self.switch_to(TokenizerState::AttributeValueSingleQuoted);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a
            // missing-attribute-value parse error. Switch to the data state.
            // Emit the current tag token."
            Some('>') => {
                self.parse_error(ParseErrorKind::MissingAttributeValue);
                self.emit_current_tag_token();
                self.switch_to(TokenizerState::Data);
            }
            // "Anything else - Reconsume in the attribute value (unquoted)
            // state."
            Some(_) | None => {
                self.current_token_mut()
                    .set_current_attribute_quote(QuoteStyle::Unquoted);
                self.reconsume_in(TokenizerState::AttributeValueUnquoted);
            }
        }
    }

    /// [§ 13.2.5.36](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// / [§ 13.2.5.37](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    ///
    /// The double- and single-quoted states differ only in the closing
    /// quote, so one handler takes it as a parameter. `&` is value text, not
    /// a character reference.
    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            // "EOF - This is an eof-in-tag parse error."
            None => {
                self.parse_error(ParseErrorKind::EofInTag);
                self.current_token = None;
                self.emit_eof_token();
            }
            // "Anything else - Append the current input character to the
            // current attribute's value."
            Some(c) => {
                self.current_token_mut().append_to_current_attribute_value(c);
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            // "tab, LF, FF, space - Switch to the before attribute name state."
            Some(c) if c.is_ascii_whitespace() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current tag token."
            Some('>') => {
                self.emit_current_tag_token();
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - This is an eof-in-tag parse error."
            None => {
                self.parse_error(ParseErrorKind::EofInTag);
                self.current_token = None;
                self.emit_eof_token();
            }
            // "Anything else - Append the current input character to the
            // current attribute's value."
            Some(c) => {
                self.current_token_mut().append_to_current_attribute_value(c);
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            // "tab, LF, FF, space - Switch to the before attribute name state."
            Some(c) if c.is_ascii_whitespace() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag state."
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current tag token."
            Some('>') => {
                self.emit_current_tag_token();
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - This is an eof-in-tag parse error."
            None => {
                self.parse_error(ParseErrorKind::EofInTag);
                self.current_token = None;
                self.emit_eof_token();
            }
            // "Anything else - This is a
            // missing-whitespace-between-attributes parse error. Reconsume in
            // the before attribute name state."
            Some(_) => {
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Set the self-closing flag of
            // the current tag token. Switch to the data state. Emit the
            // current tag token."
            Some('>') => {
                self.current_token_mut().set_self_closing();
                self.emit_current_tag_token();
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - This is an eof-in-tag parse error."
            None => {
                self.parse_error(ParseErrorKind::EofInTag);
                self.current_token = None;
                self.emit_eof_token();
            }
            // "Anything else - This is an unexpected-solidus-in-tag parse
            // error. Reconsume in the before attribute name state."
            Some(_) => {
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current comment token."
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - Emit the comment. Emit an end-of-file token."
            None => {
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Append the current input character to the
            // comment token's data."
            Some(c) => {
                self.current_token_mut().append_to_comment(c);
            }
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Only `<!--` opens a real comment. DOCTYPE and CDATA have no place in
    /// a fragment, so anything else is an incorrectly-opened-comment parse
    /// error consumed as a bogus comment.
    fn handle_markup_declaration_open_state(&mut self) {
        match self.current_input_character {
            // "Two U+002D HYPHEN-MINUS characters (--) - Consume those two
            // characters, create a comment token whose data is the empty
            // string, and switch to the comment start state."
            Some('-') if self.peek_next_input_character() == Some('-') => {
                self.current_input_character = self.consume_next_input_character();
                self.current_token = Some(Token::new_comment());
                self.switch_to(TokenizerState::CommentStart);
            }
            None => {
                self.parse_error(ParseErrorKind::IncorrectlyOpenedComment);
                self.current_token = Some(Token::new_comment());
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - This is an incorrectly-opened-comment parse
            // error. Create a comment token whose data is the empty string.
            // Switch to the bogus comment state."
            Some(_) => {
                self.parse_error(ParseErrorKind::IncorrectlyOpenedComment);
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment start dash
            // state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentStartDash);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an
            // abrupt-closing-of-empty-comment parse error. Switch to the data
            // state. Emit the current comment token."
            Some('>') => {
                self.parse_error(ParseErrorKind::AbruptClosingOfEmptyComment);
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            // "Anything else - Reconsume in the comment state."
            Some(_) | None => {
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment end state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an
            // abrupt-closing-of-empty-comment parse error."
            Some('>') => {
                self.parse_error(ParseErrorKind::AbruptClosingOfEmptyComment);
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - This is an eof-in-comment parse error."
            None => {
                self.parse_error(ParseErrorKind::EofInComment);
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Append a U+002D HYPHEN-MINUS character (-) to
            // the comment token's data. Reconsume in the comment state."
            Some(_) => {
                self.current_token_mut().append_to_comment('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment end dash
            // state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentEndDash);
            }
            // "EOF - This is an eof-in-comment parse error. Emit the current
            // comment token. Emit an end-of-file token."
            None => {
                self.parse_error(ParseErrorKind::EofInComment);
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Append the current input character to the
            // comment token's data."
            Some(c) => {
                self.current_token_mut().append_to_comment(c);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment end state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
            }
            // "EOF - This is an eof-in-comment parse error."
            None => {
                self.parse_error(ParseErrorKind::EofInComment);
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Append a U+002D HYPHEN-MINUS character (-) to
            // the comment token's data. Reconsume in the comment state."
            Some(_) => {
                self.current_token_mut().append_to_comment('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current comment token."
            Some('>') => {
                self.emit_current_token();
                self.switch_to(TokenizerState::Data);
            }
            // "U+002D HYPHEN-MINUS (-) - Append a U+002D HYPHEN-MINUS
            // character (-) to the comment token's data."
            Some('-') => {
                self.current_token_mut().append_to_comment('-');
            }
            // "EOF - This is an eof-in-comment parse error."
            None => {
                self.parse_error(ParseErrorKind::EofInComment);
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Append two U+002D HYPHEN-MINUS characters (--)
            // to the comment token's data. Reconsume in the comment state."
            Some(_) => {
                self.current_token_mut().append_str_to_comment("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    // ===== mechanics =====

    /// Consume and return the next input character.
    fn consume_next_input_character(&mut self) -> Option<char> {
        let c = self.input.get(self.current_pos).copied();
        if c.is_some() {
            self.current_pos += 1;
        }
        c
    }

    /// Look at the next input character without consuming it.
    fn peek_next_input_character(&self) -> Option<char> {
        self.input.get(self.current_pos).copied()
    }

    /// "Switch to the X state."
    fn switch_to(&mut self, state: TokenizerState) {
        self.state = state;
    }

    /// "Reconsume in the X state."
    fn reconsume_in(&mut self, state: TokenizerState) {
        self.reconsume = true;
        self.state = state;
    }

    /// Access the token under construction.
    ///
    /// # Panics
    ///
    /// Panics if there is none, which indicates a bug in the state machine.
    fn current_token_mut(&mut self) -> &mut Token {
        self.current_token
            .as_mut()
            .expect("no token under construction")
    }

    /// Emit a character token.
    fn emit_character_token(&mut self, c: char) {
        self.token_stream.push(Token::Character { data: c });
    }

    /// Emit an end-of-file token and stop the machine.
    fn emit_eof_token(&mut self) {
        self.token_stream.push(Token::EndOfFile);
        self.at_eof = true;
    }

    /// Emit whatever token is under construction (comment tokens).
    ///
    /// # Panics
    ///
    /// Panics if there is no token under construction.
    fn emit_current_token(&mut self) {
        let token = self
            .current_token
            .take()
            .expect("no token under construction");
        self.token_stream.push(token);
    }

    /// Emit the tag token under construction, dropping duplicate attributes.
    ///
    /// "If there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token." The comparison here is
    /// case-insensitive since attribute names keep their source case.
    ///
    /// # Panics
    ///
    /// Panics if there is no token under construction.
    fn emit_current_tag_token(&mut self) {
        let mut token = self
            .current_token
            .take()
            .expect("no token under construction");

        if let Token::StartTag { attributes, .. } = &mut token {
            let mut seen: HashSet<String> = HashSet::new();
            let mut duplicates = Vec::new();
            attributes.retain(|attr| {
                let folded = attr.name.to_ascii_lowercase();
                if seen.insert(folded.clone()) {
                    true
                } else {
                    duplicates.push(folded);
                    false
                }
            });
            for name in duplicates {
                self.parse_error(ParseErrorKind::DuplicateAttribute { name });
            }
        }

        self.token_stream.push(token);
    }

    /// Record a parse error and surface it on stderr through the
    /// deduplicated warning channel.
    fn parse_error(&mut self, reason: ParseErrorKind) {
        let _ = warn_once("HTML tokenizer", &reason.to_string());
        self.errors.push(ParseError::new(reason));
    }
}
