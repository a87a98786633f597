//! Integration tests for the validator.

use scour_sanitize::Validator;

/// The whitelist used by most tests: basic formatting, lists and links.
const BASIC_TAGS: [&str; 11] = [
    "a", "strong", "b", "em", "i", "br", "p", "ul", "ol", "li", "div",
];

fn validator() -> Validator {
    Validator::new(BASIC_TAGS)
}

#[test]
fn test_valid_html_passes() {
    let html = concat!(
        "Lorem<p>test</p><ul><li></li></ul><ol><li></li></ol><em></em>",
        "<br /><br>Lorem<div><b>test</b><i>test</i></div>",
        r#"<a href="http://www.bcjobs.ca" target="_blank">test</a>"#,
    );

    let (valid, errors) = validator().is_valid(html);

    assert!(valid);
    assert!(errors.is_empty());
}

#[test]
fn test_malformed_html_reports_one_parse_error() {
    let (valid, errors) = validator().is_valid("Lorem<p><ul>");

    assert!(!valid);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], "HTML parse error: 'tag <p> was not closed'");
}

#[test]
fn test_parse_errors_skip_the_tree_walk() {
    // The comment would be a violation of its own, but a parse failure means
    // the tree's shape is untrustworthy and only the parse errors report
    let (valid, errors) = validator().is_valid("<!-- c --><p>");

    assert!(!valid);
    assert_eq!(errors, ["HTML parse error: 'tag <p> was not closed'"]);
}

#[test]
fn test_disallowed_tag_reports_one_violation() {
    let (valid, errors) = validator().is_valid("Lorem<script>alert('foo');</script>");

    assert!(!valid);
    assert_eq!(errors, ["Tag 'script' not allowed."]);
}

#[test]
fn test_disallowed_tag_attributes_are_not_piled_on() {
    // The tag violation stands alone; its attributes are not also reported
    let (valid, errors) = validator().is_valid(r#"<span class="x" style="y">t</span>"#);

    assert!(!valid);
    assert_eq!(errors, ["Tag 'span' not allowed."]);
}

#[test]
fn test_disallowed_attribute_on_allowed_tag() {
    let (valid, errors) = validator().is_valid(r#"Lorem<p class="red">test</p>"#);

    assert!(!valid);
    assert_eq!(errors, ["Attribute 'class' not allowed on 'p' tag."]);
}

#[test]
fn test_anchor_title_is_stricter_than_cleansing() {
    // The cleanser keeps title on anchors; strict validation flags it
    let (valid, errors) = validator().is_valid(r#"<a href="x" title="y">t</a>"#);

    assert!(!valid);
    assert_eq!(errors, ["Attribute 'title' not allowed on 'a' tag."]);
}

#[test]
fn test_image_attributes_are_violations_under_strict_validation() {
    // Unlike cleansing, no attribute is valid on a non-anchor tag
    let (valid, errors) = Validator::new(["img"]).is_valid(r#"<img src="x">"#);

    assert!(!valid);
    assert_eq!(errors, ["Attribute 'src' not allowed on 'img' tag."]);
}

#[test]
fn test_comment_is_a_violation() {
    let (valid, errors) = validator().is_valid("a<!-- hidden -->b");

    assert!(!valid);
    assert_eq!(errors, ["HTML comment not allowed: ' hidden '"]);
}

#[test]
fn test_all_violations_are_collected() {
    let (valid, errors) = validator()
        .is_valid(r#"<p class="red">a</p><!-- c --><script>x = 1;</script><a title="t">l</a>"#);

    assert!(!valid);
    assert_eq!(
        errors,
        [
            "Attribute 'class' not allowed on 'p' tag.",
            "HTML comment not allowed: ' c '",
            "Tag 'script' not allowed.",
            "Attribute 'title' not allowed on 'a' tag.",
        ]
    );
}

#[test]
fn test_violation_messages_use_source_attribute_case() {
    let (valid, errors) = validator().is_valid(r#"<p CLASS="red">test</p>"#);

    assert!(!valid);
    assert_eq!(errors, ["Attribute 'CLASS' not allowed on 'p' tag."]);
}

#[test]
fn test_allowed_tag_set_is_case_insensitive() {
    let (valid, errors) = Validator::new(["P", "p"]).is_valid("<p>test</p>");

    assert!(valid);
    assert!(errors.is_empty());
}

#[test]
fn test_source_tag_case_is_folded_before_matching() {
    let (valid, errors) = validator().is_valid("<P>test</P>");

    assert!(valid);
    assert!(errors.is_empty());
}

#[test]
fn test_tag_violation_names_the_lowercased_tag() {
    let (valid, errors) = validator().is_valid("<SCRIPT>x();</SCRIPT>");

    assert!(!valid);
    assert_eq!(errors, ["Tag 'script' not allowed."]);
}

#[test]
fn test_empty_input_is_valid() {
    let (valid, errors) = validator().is_valid("");

    assert!(valid);
    assert!(errors.is_empty());
}
