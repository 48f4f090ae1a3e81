//! The type-indexed traversal cache.
//!
//! `Traverse` maintains, for one tree, a type-to-elements lookup so that
//! "every `Identifier` node in the program" is a bucket read instead of a
//! full tree walk. Nodes and tokens are kept in separate partitions: a node
//! and a token can never legally share a type tag, but token queries are far
//! more frequent and keeping the surfaces apart keeps both cheap.
//!
//! The index is a pure cache over the tree's current membership. It holds
//! no information a full walk could not re-derive, and rebuilding it from
//! scratch always yields the same buckets as incremental maintenance.

use crate::arena::{ElementArena, ElementId};
use rscst_syntax::ElementType;
use std::collections::HashMap;

/// Type-keyed index over the current element membership of one tree.
///
/// Buckets preserve insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Traverse {
    nodes: HashMap<ElementType, Vec<ElementId>>,
    tokens: HashMap<ElementType, Vec<ElementId>>,
}

impl Traverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `elements` and every element transitively reachable from them.
    ///
    /// Elements already present in their bucket are not duplicated.
    pub fn add_elements(&mut self, arena: &ElementArena, elements: &[ElementId]) {
        for &element in elements {
            for id in arena.descendants(element) {
                let ty = arena.element_type(id);
                let partition = if arena.is_token(id) {
                    &mut self.tokens
                } else {
                    &mut self.nodes
                };
                let bucket = partition.entry(ty.clone()).or_default();
                if !bucket.contains(&id) {
                    bucket.push(id);
                }
            }
        }
    }

    /// Remove `elements` and every element transitively reachable from them.
    ///
    /// Removing an element that was never indexed is a no-op.
    pub fn remove_elements(&mut self, arena: &ElementArena, elements: &[ElementId]) {
        for &element in elements {
            for id in arena.descendants(element) {
                let ty = arena.element_type(id);
                let partition = if arena.is_token(id) {
                    &mut self.tokens
                } else {
                    &mut self.nodes
                };
                let now_empty = match partition.get_mut(ty.as_str()) {
                    Some(bucket) => {
                        bucket.retain(|member| *member != id);
                        bucket.is_empty()
                    }
                    None => false,
                };
                if now_empty {
                    partition.remove(ty.as_str());
                }
            }
        }
    }

    /// Every indexed node of type `ty`, in insertion order.
    ///
    /// Returns a new vector; mutating it cannot corrupt the index.
    pub fn select_nodes_by_type(&self, ty: &str) -> Vec<ElementId> {
        self.nodes.get(ty).cloned().unwrap_or_default()
    }

    /// Every indexed token of type `ty`, in insertion order.
    ///
    /// Returns a new vector; mutating it cannot corrupt the index.
    pub fn select_tokens_by_type(&self, ty: &str) -> Vec<ElementId> {
        self.tokens.get(ty).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ElementArena;

    fn stmt(arena: &mut ElementArena, name: &str) -> ElementId {
        let token = arena.token("Identifier", name);
        let ident = arena.node("Identifier", vec![token]).unwrap();
        arena.node("ExpressionStatement", vec![ident]).unwrap()
    }

    #[test]
    fn indexing_recurses_into_descendants() {
        let mut arena = ElementArena::new();
        let statement = stmt(&mut arena, "x");

        let mut traverse = Traverse::new();
        traverse.add_elements(&arena, &[statement]);

        assert_eq!(traverse.select_nodes_by_type("ExpressionStatement").len(), 1);
        assert_eq!(traverse.select_nodes_by_type("Identifier").len(), 1);
        assert_eq!(traverse.select_tokens_by_type("Identifier").len(), 1);
    }

    #[test]
    fn adding_twice_does_not_duplicate() {
        let mut arena = ElementArena::new();
        let statement = stmt(&mut arena, "x");

        let mut traverse = Traverse::new();
        traverse.add_elements(&arena, &[statement]);
        traverse.add_elements(&arena, &[statement]);

        assert_eq!(traverse.select_nodes_by_type("ExpressionStatement").len(), 1);
        assert_eq!(traverse.select_tokens_by_type("Identifier").len(), 1);
    }

    #[test]
    fn removal_is_recursive_and_symmetric() {
        let mut arena = ElementArena::new();
        let statement = stmt(&mut arena, "x");

        let mut traverse = Traverse::new();
        traverse.add_elements(&arena, &[statement]);
        traverse.remove_elements(&arena, &[statement]);

        assert!(traverse.select_nodes_by_type("ExpressionStatement").is_empty());
        assert!(traverse.select_nodes_by_type("Identifier").is_empty());
        assert!(traverse.select_tokens_by_type("Identifier").is_empty());
        assert_eq!(traverse, Traverse::new());
    }

    #[test]
    fn removing_unindexed_elements_is_a_noop() {
        let mut arena = ElementArena::new();
        let indexed = stmt(&mut arena, "x");
        let never_indexed = stmt(&mut arena, "y");

        let mut traverse = Traverse::new();
        traverse.add_elements(&arena, &[indexed]);
        let before = traverse.clone();
        traverse.remove_elements(&arena, &[never_indexed]);
        assert_eq!(traverse, before);
    }

    #[test]
    fn lookup_miss_returns_empty() {
        let traverse = Traverse::new();
        assert!(traverse.select_nodes_by_type("IfStatement").is_empty());
        assert!(traverse.select_tokens_by_type("EOF").is_empty());
    }

    #[test]
    fn returned_buckets_are_defensive_copies() {
        let mut arena = ElementArena::new();
        let statement = stmt(&mut arena, "x");

        let mut traverse = Traverse::new();
        traverse.add_elements(&arena, &[statement]);

        let mut bucket = traverse.select_nodes_by_type("Identifier");
        bucket.clear();
        assert_eq!(traverse.select_nodes_by_type("Identifier").len(), 1);
    }

    #[test]
    fn buckets_preserve_insertion_order() {
        let mut arena = ElementArena::new();
        let first = stmt(&mut arena, "a");
        let second = stmt(&mut arena, "b");
        let third = stmt(&mut arena, "c");

        let mut traverse = Traverse::new();
        traverse.add_elements(&arena, &[first, second, third]);
        traverse.remove_elements(&arena, &[second]);
        traverse.add_elements(&arena, &[second]);

        let bucket = traverse.select_nodes_by_type("ExpressionStatement");
        assert_eq!(bucket, vec![first, third, second]);
    }
}
