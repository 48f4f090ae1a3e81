//! Child-shape declarations for the grammar productions the tree validates.
//!
//! Every composite production follows the same two-phase shape: declare the
//! expected child pattern, then consume it through the shared
//! [`ElementAssert`] cursor primitives. Adding a production to the grammar
//! means writing one more validation sequence here and registering it in
//! [`validator_for`]; the core mechanism never changes.
//!
//! The top-level program shape (hashbang, statements, end-of-file) is the
//! same mechanism specialized inside `Program` itself.

use crate::cursor::ElementAssert;
use crate::error::CstError;
use rscst_syntax::ElementType;

/// A child-shape check run when a node of the matching type is built.
pub type ChildrenValidator = fn(&mut ElementAssert<'_>) -> Result<(), CstError>;

/// Look up the validator declared for `ty`.
///
/// Types without a declared production validate vacuously; declaring one is
/// the extension point for constraining a new node type.
pub fn validator_for(ty: &ElementType) -> Option<ChildrenValidator> {
    match ty.as_str() {
        "SpreadProperty" => Some(spread_property),
        "SpreadElement" => Some(spread_element),
        "ExpressionStatement" => Some(expression_statement),
        "BlockStatement" => Some(block_statement),
        _ => None,
    }
}

/// `...` followed by one spread argument expression.
fn spread_property(children: &mut ElementAssert<'_>) -> Result<(), CstError> {
    children.pass_token_value("Punctuator", "...")?;
    children.skip_non_code();
    children.pass_expression()?;
    children.assert_end()
}

/// Same shape as a spread property, in array/call position.
fn spread_element(children: &mut ElementAssert<'_>) -> Result<(), CstError> {
    children.pass_token_value("Punctuator", "...")?;
    children.skip_non_code();
    children.pass_expression()?;
    children.assert_end()
}

/// One expression, optionally terminated by a semicolon.
fn expression_statement(children: &mut ElementAssert<'_>) -> Result<(), CstError> {
    children.pass_expression()?;
    children.skip_non_code();
    if children.is_token_value("Punctuator", ";") {
        children.pass_token_value("Punctuator", ";")?;
    }
    children.assert_end()
}

/// `{`, zero or more statements, `}`.
fn block_statement(children: &mut ElementAssert<'_>) -> Result<(), CstError> {
    children.pass_token_value("Punctuator", "{")?;
    children.skip_non_code();
    while children.is_statement() {
        children.pass_statement()?;
        children.skip_non_code();
    }
    children.pass_token_value("Punctuator", "}")?;
    children.assert_end()
}
