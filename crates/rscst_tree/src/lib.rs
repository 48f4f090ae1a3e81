//! An arena-backed lossless concrete syntax tree.
//!
//! The tree is entirely lossless: whitespace, comments and punctuation are
//! all elements, so rendering a tree reproduces its source text byte for
//! byte. That makes it a foundation for refactoring tools, linters and
//! codemods which must preserve formatting they did not touch.
//!
//! The crate covers the tree construction/validation protocol and its
//! supporting structures:
//! - [`ElementArena`] owns every token and node of one tree and hands out
//!   stable [`ElementId`] handles; its `token`/`node` constructors are the
//!   surface a parser drives.
//! - [`ElementAssert`] is the child cursor grammar productions consume
//!   their element streams through; the shipped productions live in the
//!   [`grammar`] module.
//! - [`Traverse`] keeps a type-to-elements index over the current tree
//!   membership so type-keyed queries never walk the tree.
//! - [`EventBus`] dispatches [`EventKind::ElementsAdd`] and
//!   [`EventKind::ElementsRemove`] to observers, synchronously and in
//!   registration order.
//! - [`Program`] composes all of the above: it validates the top-level
//!   shape, owns the index and the bus, exposes the query surface, and is
//!   the mutation choke point the rest of a tool calls through. Its
//!   write-once [`PluginRegistry`] carries embedder extensions.
//!
//! Producing the initial element stream is a lexer/parser concern and out
//! of scope here, as is serializing trees anywhere but back to source text.

mod arena;
mod cursor;
mod error;
mod events;
mod plugins;
mod program;
mod traverse;

pub mod grammar;

pub use self::{
    arena::{Descendants, Element, ElementArena, ElementId, NodeData, TokenData},
    cursor::ElementAssert,
    error::CstError,
    events::{EventBus, EventKind, ListenerId},
    plugins::{Plugin, PluginRegistry},
    program::Program,
    traverse::Traverse,
};
pub use rscst_syntax::ElementType;
pub use text_size::TextSize;
