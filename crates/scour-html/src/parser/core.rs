use scour_common::warning::warn_once;
use scour_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::error::{ParseError, ParseErrorKind};
use crate::is_void_element;
use crate::tokenizer::Token;

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Builds a [`DomTree`] from the token stream. This is the strict fragment
/// variant: there is no implied `<html>`/`<body>` scaffolding, no
/// auto-closing and no adoption agency algorithm. Tags must nest correctly;
/// anything else records a [`ParseError`] and the sanitizer fails closed on
/// the whole input.
pub struct TreeBuilder {
    /// DOM tree with parent/sibling pointers.
    /// `NodeId::ROOT` (index 0) is the Document node.
    tree: DomTree,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Stores `NodeId`s into the arena. The Document root is implicit; an
    /// empty stack means insertion happens under the root.
    stack_of_open_elements: Vec<NodeId>,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Character tokens accumulated since the last structural token,
    /// coalesced into a single Text node when flushed.
    pending_text: String,

    /// Parse errors encountered during tree construction.
    errors: Vec<ParseError>,
}

impl TreeBuilder {
    /// Create a new tree builder from a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        // DomTree::new() creates the Document node at NodeId::ROOT
        Self {
            tree: DomTree::new(),
            stack_of_open_elements: Vec::new(),
            tokens,
            pending_text: String::new(),
            errors: Vec::new(),
        }
    }

    /// Run tree construction to completion, returning the tree and every
    /// parse error recorded along the way.
    #[must_use]
    pub fn run(mut self) -> (DomTree, Vec<ParseError>) {
        let tokens = std::mem::take(&mut self.tokens);
        for token in tokens {
            match token {
                Token::Character { data } => self.pending_text.push(data),
                Token::StartTag {
                    name,
                    self_closing,
                    attributes,
                } => self.handle_start_tag(name, self_closing, attributes),
                Token::EndTag { name } => self.handle_end_tag(&name),
                Token::Comment { data } => self.handle_comment(data),
                Token::EndOfFile => self.handle_eof(),
            }
        }
        (self.tree, self.errors)
    }

    /// Insert an element for a start tag token and, unless the element
    /// cannot have content, push it onto the stack of open elements.
    fn handle_start_tag(
        &mut self,
        name: String,
        self_closing: bool,
        attributes: Vec<scour_dom::Attribute>,
    ) {
        self.flush_pending_text();

        let tag_name = name.to_ascii_lowercase();
        let is_void = is_void_element(&tag_name);

        if self_closing && !is_void {
            // Honoring the flag here (instead of ignoring it as the full
            // standard does) keeps `<em/>` from swallowing its siblings,
            // which is the lesser surprise for fragment input.
            self.parse_error(ParseErrorKind::NonVoidSelfClosing {
                tag: tag_name.clone(),
            });
        }

        let element = ElementData {
            tag_name,
            source_name: name,
            end_source_name: None,
            attrs: attributes,
            self_closing,
        };
        let id = self.tree.alloc(NodeType::Element(element));
        self.tree.append_child(self.insertion_point(), id);

        if !self_closing && !is_void {
            self.stack_of_open_elements.push(id);
        }
    }

    /// Match an end tag against the stack of open elements.
    ///
    /// Only the innermost open element may be closed. An end tag that
    /// matches nothing is stray; one that matches a non-top entry is
    /// misnested. Both are errors, never repairs.
    fn handle_end_tag(&mut self, name: &str) {
        self.flush_pending_text();

        let tag_name = name.to_ascii_lowercase();

        let top_matches = self
            .stack_of_open_elements
            .last()
            .and_then(|&id| self.tree.as_element(id))
            .is_some_and(|data| data.tag_name == tag_name);

        if top_matches {
            if let Some(id) = self.stack_of_open_elements.pop()
                && let Some(data) = self.tree.as_element_mut(id)
            {
                // Keep the end tag's spelling so `<DIV>x</div>` serializes
                // back exactly as written.
                data.end_source_name = Some(name.to_string());
            }
            return;
        }

        let open_anywhere = self.stack_of_open_elements.iter().any(|&id| {
            self.tree
                .as_element(id)
                .is_some_and(|d| d.tag_name == tag_name)
        });

        if open_anywhere {
            let innermost = self
                .stack_of_open_elements
                .last()
                .and_then(|&id| self.tree.as_element(id))
                .map_or_else(String::new, |d| d.tag_name.clone());
            self.parse_error(ParseErrorKind::MisnestedEndTag {
                tag: tag_name,
                open: innermost,
            });
        } else {
            self.parse_error(ParseErrorKind::StrayEndTag { tag: tag_name });
        }
    }

    /// Insert a comment node at the current insertion point.
    fn handle_comment(&mut self, data: String) {
        self.flush_pending_text();
        let id = self.tree.alloc(NodeType::Comment(data));
        self.tree.append_child(self.insertion_point(), id);
    }

    /// End of input: any still-open element is a parse error.
    ///
    /// Reported once, naming the outermost unclosed tag — `<p><ul>` is one
    /// failure to close the fragment, not two.
    fn handle_eof(&mut self) {
        self.flush_pending_text();

        if let Some(&outermost) = self.stack_of_open_elements.first() {
            let tag = self
                .tree
                .as_element(outermost)
                .map_or_else(String::new, |d| d.tag_name.clone());
            self.parse_error(ParseErrorKind::TagNeverClosed { tag });
        }
    }

    /// Coalesce accumulated character tokens into a Text node.
    fn flush_pending_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        let id = self.tree.alloc(NodeType::Text(text));
        self.tree.append_child(self.insertion_point(), id);
    }

    /// The node new content is appended under: the innermost open element,
    /// or the Document root when the stack is empty.
    fn insertion_point(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    /// Record a parse error and surface it on stderr.
    ///
    /// Logs via scour-common's warning system and stores the error for the
    /// caller.
    fn parse_error(&mut self, reason: ParseErrorKind) {
        let _ = warn_once("HTML parser", &reason.to_string());
        self.errors.push(ParseError::new(reason));
    }
}
