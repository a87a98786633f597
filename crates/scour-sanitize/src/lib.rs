//! Whitelist cleanser and strict validator for HTML fragments.
//!
//! Two sibling components share one data model and one traversal strategy:
//!
//! - [`Cleanser`] mutates a parsed tree in place — disallowed elements are
//!   unwrapped (their content survives), comments are dropped, attributes
//!   outside the per-tag [`policy`] are stripped — and re-serializes the
//!   result. Malformed input yields an empty string, never a guessed repair.
//! - [`Validator`] performs a read-only walk of the same tree shape and
//!   returns a verdict plus every violation as a human-readable message.
//!
//! Both are configured with a caller-supplied, case-insensitive set of
//! allowed tag names and are stateless across calls.
//!
//! ```
//! use scour_sanitize::{Cleanser, Validator};
//!
//! let cleanser = Cleanser::new(["div", "p"]);
//! assert_eq!(
//!     cleanser.clean("<div><span>Flexibility</span></div>"),
//!     "<div>Flexibility</div>",
//! );
//!
//! let validator = Validator::new(["p"]);
//! let (valid, errors) = validator.is_valid(r#"<p class="red">test</p>"#);
//! assert!(!valid);
//! assert_eq!(errors, ["Attribute 'class' not allowed on 'p' tag."]);
//! ```

/// Destructive whitelist enforcement.
pub mod cleanser;
/// The per-tag attribute keep/drop rule table.
pub mod policy;
/// Read-only whitelist checking.
pub mod validator;

pub use cleanser::Cleanser;
pub use validator::Validator;
