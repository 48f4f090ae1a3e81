//! Errors reported by tree construction, validation and the plugin facade.

use thiserror::Error;

/// An error produced while building or mutating a concrete syntax tree.
///
/// Validation failures are fatal to the construction attempt that raised
/// them; a failed construction never leaves a partially built tree or a
/// half-seeded index observable to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CstError {
    /// A child element did not match the category or token a grammar
    /// production expected at that position.
    #[error("expected {expected}, found {found}")]
    UnexpectedElement { expected: String, found: String },

    /// The child list ended while the production still expected elements.
    #[error("expected {expected}, found end of children")]
    UnexpectedEnd { expected: String },

    /// Elements were left over after a production consumed its full shape.
    #[error("unexpected trailing element: {found}")]
    UnexpectedTrailing { found: String },

    /// The program's plugin set was accepted a second time.
    #[error("plugins have already been accepted for this program")]
    PluginsAlreadyAccepted,
}
