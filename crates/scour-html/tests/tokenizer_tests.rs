//! Integration tests for the fragment tokenizer.

use scour_dom::{Attribute, QuoteStyle};
use scour_html::error::{ParseError, ParseErrorKind};
use scour_html::tokenizer::{Token, Tokenizer};

/// Helper to tokenize a string and return the tokens and errors.
fn tokenize(input: &str) -> (Vec<Token>, Vec<ParseError>) {
    let mut tokenizer = Tokenizer::new(input);
    tokenizer.run();
    tokenizer.into_parts()
}

/// Helper to collect the character tokens back into a string.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Character { data } => Some(*data),
            _ => None,
        })
        .collect()
}

#[test]
fn test_plain_text() {
    let (tokens, errors) = tokenize("hello");
    assert!(errors.is_empty());
    assert_eq!(text_of(&tokens), "hello");
    assert!(tokens.last().is_some_and(Token::is_eof));
}

#[test]
fn test_entities_pass_through_raw() {
    let (tokens, errors) = tokenize("a&nbsp;b");
    assert!(errors.is_empty());
    assert_eq!(text_of(&tokens), "a&nbsp;b");
}

#[test]
fn test_tag_names_keep_source_case() {
    let (tokens, errors) = tokenize("<DIV></Div>");
    assert!(errors.is_empty());
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "DIV"));
    assert!(matches!(&tokens[1], Token::EndTag { name } if name == "Div"));
}

#[test]
fn test_attribute_names_keep_source_case() {
    let (tokens, errors) = tokenize(r#"<div CLASS="main">"#);
    assert!(errors.is_empty());

    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected start tag");
    };
    assert_eq!(
        attributes,
        &[Attribute::new("CLASS".to_string(), Some("main".to_string()))]
    );
}

#[test]
fn test_single_quoted_and_unquoted_values() {
    let (tokens, errors) = tokenize("<a href='x' target=blank>");
    assert!(errors.is_empty());

    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected start tag");
    };
    assert_eq!(attributes[0].value.as_deref(), Some("x"));
    assert_eq!(attributes[1].value.as_deref(), Some("blank"));
}

#[test]
fn test_quote_styles_are_recorded() {
    let (tokens, errors) = tokenize(r#"<a href='x' target=blank title="t">"#);
    assert!(errors.is_empty());

    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected start tag");
    };
    assert_eq!(attributes[0].quote, QuoteStyle::Single);
    assert_eq!(attributes[1].quote, QuoteStyle::Unquoted);
    assert_eq!(attributes[2].quote, QuoteStyle::Double);
}

#[test]
fn test_bare_attribute_has_no_value() {
    let (tokens, errors) = tokenize("<input disabled>");
    assert!(errors.is_empty());

    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected start tag");
    };
    assert_eq!(attributes, &[Attribute::new("disabled".to_string(), None)]);
}

#[test]
fn test_self_closing_flag() {
    let (tokens, errors) = tokenize("<br />");
    assert!(errors.is_empty());
    assert!(matches!(
        &tokens[0],
        Token::StartTag {
            name,
            self_closing: true,
            ..
        } if name == "br"
    ));
}

#[test]
fn test_comment_token() {
    let (tokens, errors) = tokenize("<!-- hi -->");
    assert!(errors.is_empty());
    assert!(matches!(&tokens[0], Token::Comment { data } if data == " hi "));
}

#[test]
fn test_comment_with_inner_dashes() {
    let (tokens, errors) = tokenize("<!-- a - b -->");
    assert!(errors.is_empty());
    assert!(matches!(&tokens[0], Token::Comment { data } if data == " a - b "));
}

#[test]
fn test_duplicate_attribute_is_dropped_with_error() {
    let (tokens, errors) = tokenize(r#"<p a="1" A="2">"#);

    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected start tag");
    };
    assert_eq!(
        attributes,
        &[Attribute::new("a".to_string(), Some("1".to_string()))]
    );
    assert_eq!(
        errors,
        [ParseError::new(ParseErrorKind::DuplicateAttribute {
            name: "a".to_string()
        })]
    );
}

#[test]
fn test_doctype_is_an_incorrectly_opened_comment() {
    let (tokens, errors) = tokenize("<!doctype html>");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == "doctype html"));
    assert_eq!(
        errors,
        [ParseError::new(ParseErrorKind::IncorrectlyOpenedComment)]
    );
}

#[test]
fn test_stray_less_than_becomes_text_with_error() {
    let (tokens, errors) = tokenize("a < b");
    assert_eq!(text_of(&tokens), "a < b");
    assert_eq!(
        errors,
        [ParseError::new(
            ParseErrorKind::InvalidFirstCharacterOfTagName
        )]
    );
}

#[test]
fn test_eof_inside_tag() {
    let (tokens, errors) = tokenize("<div");
    // The partial tag is discarded
    assert_eq!(tokens, [Token::EndOfFile]);
    assert_eq!(errors, [ParseError::new(ParseErrorKind::EofInTag)]);
}

#[test]
fn test_eof_inside_comment() {
    let (tokens, errors) = tokenize("<!-- never closed");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == " never closed"));
    assert_eq!(errors, [ParseError::new(ParseErrorKind::EofInComment)]);
}

#[test]
fn test_empty_input_is_just_eof() {
    let (tokens, errors) = tokenize("");
    assert_eq!(tokens, [Token::EndOfFile]);
    assert!(errors.is_empty());
}
