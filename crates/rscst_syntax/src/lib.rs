//! Element type tags and grammatical category tables used by the rscst
//! concrete syntax tree.
//!
//! Every element in the tree carries an [`ElementType`] tag such as
//! `ExpressionStatement` or `Punctuator`. The validation protocol never asks
//! "what exactly is this element", only "which grammatical category does it
//! belong to", so this crate also houses the category tables: which node
//! types count as statements, which count as expressions, and which token
//! types are non-code (whitespace and comments, skippable during
//! validation).

use once_cell::sync::Lazy;
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::iter::FromIterator;

/// The type tag of a token or node element, e.g. `Identifier`,
/// `ExpressionStatement`, or `Punctuator`.
///
/// Tags are cheap to clone and compare; the backing storage is a small
/// string which avoids allocation for every tag in the shipped grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementType(SmolStr);

impl ElementType {
    pub fn new(tag: &str) -> Self {
        ElementType(SmolStr::new(tag))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether a node of this type belongs to the `statement` grammar
    /// category.
    pub fn is_statement(&self) -> bool {
        STATEMENT_TYPES.contains(self.as_str())
    }

    /// Whether a node of this type belongs to the `expression` grammar
    /// category.
    pub fn is_expression(&self) -> bool {
        EXPRESSION_TYPES.contains(self.as_str())
    }

    /// Whether a token of this type carries no grammatical meaning and may
    /// be skipped by `skipNonCode`-style cursor steps.
    pub fn is_non_code(&self) -> bool {
        NON_CODE_TYPES.contains(self.as_str())
    }
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> ElementType {
        ElementType::new(tag)
    }
}

impl Borrow<str> for ElementType {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token types with no grammatical role: whitespace and comments.
pub static NON_CODE_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from_iter(vec!["Whitespace", "LineBreak", "CommentLine", "CommentBlock"])
});

/// Node types belonging to the `statement` grammar category.
pub static STATEMENT_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from_iter(vec![
        "BlockStatement",
        "BreakStatement",
        "ClassDeclaration",
        "ContinueStatement",
        "DebuggerStatement",
        "DoWhileStatement",
        "EmptyStatement",
        "ExpressionStatement",
        "ForInStatement",
        "ForOfStatement",
        "ForStatement",
        "FunctionDeclaration",
        "IfStatement",
        "LabeledStatement",
        "ReturnStatement",
        "SwitchStatement",
        "ThrowStatement",
        "TryStatement",
        "VariableDeclaration",
        "WhileStatement",
        "WithStatement",
    ])
});

/// Node types belonging to the `expression` grammar category.
pub static EXPRESSION_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from_iter(vec![
        "ArrayExpression",
        "ArrowFunctionExpression",
        "AssignmentExpression",
        "AwaitExpression",
        "BinaryExpression",
        "BooleanLiteral",
        "CallExpression",
        "ClassExpression",
        "ConditionalExpression",
        "FunctionExpression",
        "Identifier",
        "LogicalExpression",
        "MemberExpression",
        "NewExpression",
        "NullLiteral",
        "NumericLiteral",
        "ObjectExpression",
        "ParenthesizedExpression",
        "RegExpLiteral",
        "SequenceExpression",
        "StringLiteral",
        "TaggedTemplateExpression",
        "TemplateLiteral",
        "ThisExpression",
        "UnaryExpression",
        "UpdateExpression",
        "YieldExpression",
    ])
});
