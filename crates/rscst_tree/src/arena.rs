//! Arena-backed storage for tree elements.
//!
//! Every token and node of one tree lives in an [`ElementArena`]; the rest
//! of the system refers to elements through stable [`ElementId`] handles
//! instead of direct references. Handles stay valid for the life of the
//! arena: detaching a subtree never deallocates it, and a detached subtree
//! can be re-attached later.
//!
//! The arena's [`token`](ElementArena::token) and
//! [`node`](ElementArena::node) constructors are the builder surface a
//! parser drives while lowering its token stream into elements.

use crate::error::CstError;
use crate::grammar;
use rscst_syntax::ElementType;
use smol_str::SmolStr;
use text_size::TextSize;

/// A stable handle to an element stored in an [`ElementArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A leaf element: a type tag plus the raw source text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    ty: ElementType,
    text: SmolStr,
}

impl TokenData {
    pub fn ty(&self) -> &ElementType {
        &self.ty
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

/// A composite element: a type tag plus an ordered child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    ty: ElementType,
    children: Vec<ElementId>,
}

impl NodeData {
    pub fn ty(&self) -> &ElementType {
        &self.ty
    }

    /// The node's children in source order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// A borrowed view of a single element, either a leaf token or a composite
/// node.
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    Token(&'a TokenData),
    Node(&'a NodeData),
}

impl<'a> Element<'a> {
    pub fn ty(&self) -> &'a ElementType {
        match *self {
            Element::Token(token) => token.ty(),
            Element::Node(node) => node.ty(),
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Element::Token(_))
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Element::Node(_))
    }

    pub fn as_token(&self) -> Option<&'a TokenData> {
        match *self {
            Element::Token(token) => Some(token),
            Element::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&'a NodeData> {
        match *self {
            Element::Node(node) => Some(node),
            Element::Token(_) => None,
        }
    }
}

#[derive(Debug)]
enum ElementData {
    Token(TokenData),
    Node(NodeData),
}

/// Owns every element of one tree and hands out [`ElementId`] handles.
#[derive(Debug, Default)]
pub struct ElementArena {
    elements: Vec<ElementData>,
}

impl ElementArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a leaf token.
    pub fn token(&mut self, ty: impl Into<ElementType>, text: &str) -> ElementId {
        self.push(ElementData::Token(TokenData {
            ty: ty.into(),
            text: SmolStr::new(text),
        }))
    }

    /// Allocate a composite node.
    ///
    /// If the grammar declares a production for `ty`, the children are
    /// validated against it before the node becomes reachable; a shape
    /// mismatch fails the whole allocation. Types without a registered
    /// production are accepted as-is.
    pub fn node(
        &mut self,
        ty: impl Into<ElementType>,
        children: Vec<ElementId>,
    ) -> Result<ElementId, CstError> {
        let ty = ty.into();
        if let Some(validator) = grammar::validator_for(&ty) {
            let mut cursor = crate::cursor::ElementAssert::new(self, &children);
            validator(&mut cursor)?;
        }
        Ok(self.push(ElementData::Node(NodeData { ty, children })))
    }

    fn push(&mut self, data: ElementData) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(data);
        id
    }

    /// Borrow the element behind `id`.
    ///
    /// # Panics
    /// Panics if `id` was issued by a different arena.
    pub fn get(&self, id: ElementId) -> Element<'_> {
        match &self.elements[id.index()] {
            ElementData::Token(token) => Element::Token(token),
            ElementData::Node(node) => Element::Node(node),
        }
    }

    pub fn element_type(&self, id: ElementId) -> &ElementType {
        self.get(id).ty()
    }

    pub fn is_token(&self, id: ElementId) -> bool {
        self.get(id).is_token()
    }

    /// The element's children in source order; empty for tokens.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        match self.get(id) {
            Element::Node(node) => node.children(),
            Element::Token(_) => &[],
        }
    }

    /// Render the source text covered by `id`, concatenating every token
    /// below it in source order.
    pub fn text(&self, id: ElementId) -> String {
        let mut out = String::new();
        for element in self.descendants(id) {
            if let Element::Token(token) = self.get(element) {
                out.push_str(token.text());
            }
        }
        out
    }

    /// The length of the source text covered by `id`.
    pub fn text_len(&self, id: ElementId) -> TextSize {
        let mut len = TextSize::from(0);
        for element in self.descendants(id) {
            if let Element::Token(token) = self.get(element) {
                len += TextSize::of(token.text());
            }
        }
        len
    }

    /// Preorder traversal over `id` and every element below it.
    pub fn descendants(&self, id: ElementId) -> Descendants<'_> {
        Descendants {
            arena: self,
            stack: vec![id],
        }
    }

    /// Splice `child` into `parent`'s child list at `index`.
    ///
    /// This is the structural half of an insertion; pairing it with
    /// `Program::add_elements` keeps the index and observers in sync.
    ///
    /// # Panics
    /// Panics if `parent` is a token or `index` is past the end of the
    /// child list.
    pub fn insert_child(&mut self, parent: ElementId, index: usize, child: ElementId) {
        match &mut self.elements[parent.index()] {
            ElementData::Node(node) => node.children.insert(index, child),
            ElementData::Token(token) => {
                panic!("cannot insert a child into {} token", token.ty)
            }
        }
    }

    /// Remove and return the child at `index` from `parent`'s child list.
    ///
    /// The detached subtree stays allocated and can be re-attached.
    ///
    /// # Panics
    /// Panics if `parent` is a token or `index` is out of bounds.
    pub fn remove_child(&mut self, parent: ElementId, index: usize) -> ElementId {
        match &mut self.elements[parent.index()] {
            ElementData::Node(node) => node.children.remove(index),
            ElementData::Token(token) => {
                panic!("cannot remove a child from {} token", token.ty)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Iterator over an element and all of its descendants, preorder.
#[derive(Debug)]
pub struct Descendants<'a> {
    arena: &'a ElementArena,
    stack: Vec<ElementId>,
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let id = self.stack.pop()?;
        let children = self.arena.children(id);
        self.stack.extend(children.iter().rev().copied());
        Some(id)
    }
}
