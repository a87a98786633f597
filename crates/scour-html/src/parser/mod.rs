//! Tree construction.
//!
//! Implements a fragment-scoped version of
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction):
//! a stack of open elements over the arena tree, with no insertion modes and
//! no repair. A fragment either nests correctly or the parse is reported as
//! failed.

/// Tree builder implementation.
pub mod core;

pub use core::TreeBuilder;
