//! The child cursor grammar productions consume their element streams
//! through.
//!
//! A production validates its shape by interleaving lookahead predicates
//! (`is_*`) with consuming accessors (`pass_*`) and finishing with
//! [`assert_end`](ElementAssert::assert_end). Any mismatch between the
//! actual child list and the expected shape is a structural validation
//! failure naming the expected category and the element actually found,
//! never a recoverable condition.

use crate::arena::{Element, ElementArena, ElementId};
use crate::error::CstError;

/// A stateful cursor over a node's raw child list.
pub struct ElementAssert<'a> {
    arena: &'a ElementArena,
    children: &'a [ElementId],
    pos: usize,
}

impl<'a> ElementAssert<'a> {
    pub fn new(arena: &'a ElementArena, children: &'a [ElementId]) -> Self {
        ElementAssert {
            arena,
            children,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<ElementId> {
        self.children.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<ElementId> {
        let id = self.peek()?;
        self.pos += 1;
        Some(id)
    }

    /// Human-readable description of an element for error messages.
    fn describe(&self, id: ElementId) -> String {
        match self.arena.get(id) {
            Element::Token(token) => format!("`{}` token `{}`", token.ty(), token.text()),
            Element::Node(node) => format!("`{}` node", node.ty()),
        }
    }

    fn mismatch(&self, expected: &str) -> CstError {
        match self.peek() {
            Some(id) => CstError::UnexpectedElement {
                expected: expected.to_owned(),
                found: self.describe(id),
            },
            None => CstError::UnexpectedEnd {
                expected: expected.to_owned(),
            },
        }
    }

    /// Whether every child has been consumed.
    pub fn is_end(&self) -> bool {
        self.pos >= self.children.len()
    }

    /// Whether the next element is a token of type `ty`.
    pub fn is_token(&self, ty: &str) -> bool {
        match self.peek().map(|id| self.arena.get(id)) {
            Some(Element::Token(token)) => token.ty().as_str() == ty,
            _ => false,
        }
    }

    /// Whether the next element is a token of type `ty` with exactly the
    /// text `value`.
    pub fn is_token_value(&self, ty: &str, value: &str) -> bool {
        match self.peek().map(|id| self.arena.get(id)) {
            Some(Element::Token(token)) => token.ty().as_str() == ty && token.text() == value,
            _ => false,
        }
    }

    /// Whether the next element is a node in the `statement` category.
    pub fn is_statement(&self) -> bool {
        match self.peek().map(|id| self.arena.get(id)) {
            Some(Element::Node(node)) => node.ty().is_statement(),
            _ => false,
        }
    }

    /// Whether the next element is a node in the `expression` category.
    pub fn is_expression(&self) -> bool {
        match self.peek().map(|id| self.arena.get(id)) {
            Some(Element::Node(node)) => node.ty().is_expression(),
            _ => false,
        }
    }

    /// Consume a token of type `ty`.
    pub fn pass_token(&mut self, ty: &str) -> Result<ElementId, CstError> {
        if self.is_token(ty) {
            Ok(self.advance().unwrap())
        } else {
            Err(self.mismatch(&format!("`{}` token", ty)))
        }
    }

    /// Consume a token of type `ty` carrying exactly the text `value`.
    pub fn pass_token_value(&mut self, ty: &str, value: &str) -> Result<ElementId, CstError> {
        if self.is_token_value(ty, value) {
            Ok(self.advance().unwrap())
        } else {
            Err(self.mismatch(&format!("`{}` token `{}`", ty, value)))
        }
    }

    /// Consume one statement node.
    pub fn pass_statement(&mut self) -> Result<ElementId, CstError> {
        if self.is_statement() {
            Ok(self.advance().unwrap())
        } else {
            Err(self.mismatch("a statement"))
        }
    }

    /// Consume one expression node.
    pub fn pass_expression(&mut self) -> Result<ElementId, CstError> {
        if self.is_expression() {
            Ok(self.advance().unwrap())
        } else {
            Err(self.mismatch("an expression"))
        }
    }

    /// Discard a run of non-code tokens (whitespace and comments), zero or
    /// more.
    pub fn skip_non_code(&mut self) {
        while let Some(Element::Token(token)) = self.peek().map(|id| self.arena.get(id)) {
            if !token.ty().is_non_code() {
                break;
            }
            self.advance();
        }
    }

    /// Assert that no elements remain unconsumed.
    pub fn assert_end(&self) -> Result<(), CstError> {
        match self.peek() {
            Some(id) => Err(CstError::UnexpectedTrailing {
                found: self.describe(id),
            }),
            None => Ok(()),
        }
    }
}
