//! The root aggregator composing the arena, the search index, the event bus
//! and the plugin facade.

use crate::arena::{ElementArena, ElementId};
use crate::cursor::ElementAssert;
use crate::error::CstError;
use crate::events::{EventBus, EventKind, ListenerId};
use crate::plugins::PluginRegistry;
use crate::traverse::Traverse;
use log::debug;
use once_cell::sync::OnceCell;
use text_size::TextSize;

/// The root of one concrete syntax tree.
///
/// A program is built once from the raw top-level child list a parser
/// produced. Construction validates the top-level shape (an optional
/// hashbang, any amount of interleaved non-code, a run of statements, and a
/// final end-of-file token) and seeds the search index with every element
/// of the tree. After construction, all index and observer maintenance
/// funnels through [`add_elements`](Program::add_elements) and
/// [`remove_elements`](Program::remove_elements).
#[derive(Debug)]
pub struct Program {
    arena: ElementArena,
    children: Vec<ElementId>,
    body: Vec<ElementId>,
    search_index: Traverse,
    events: EventBus,
    plugins: OnceCell<PluginRegistry>,
}

impl Program {
    /// Build a program from the raw top-level child list produced by a
    /// parser.
    ///
    /// The child list may begin with a hashbang token, then hold non-code
    /// elements and statements in any interleaving, and must end with an
    /// `EOF` token. Anything else fails construction with a structural
    /// validation error naming the expected category and the offending
    /// element; on failure nothing of the program, in particular no
    /// half-seeded index, remains observable.
    pub fn new(arena: ElementArena, children: Vec<ElementId>) -> Result<Self, CstError> {
        let body = accept_children(&arena, &children)?;

        let mut search_index = Traverse::new();
        search_index.add_elements(&arena, &children);

        Ok(Program {
            arena,
            children,
            body,
            search_index,
            events: EventBus::new(),
            plugins: OnceCell::new(),
        })
    }

    /// The arena owning every element of this tree.
    pub fn arena(&self) -> &ElementArena {
        &self.arena
    }

    /// Mutable arena access for structural edits and for allocating new
    /// elements to attach.
    ///
    /// The arena only changes structure; keeping the index and observers in
    /// sync stays the caller's job via
    /// [`add_elements`](Program::add_elements) /
    /// [`remove_elements`](Program::remove_elements), or the combined
    /// [`insert_child`](Program::insert_child) /
    /// [`remove_child`](Program::remove_child) helpers.
    pub fn arena_mut(&mut self) -> &mut ElementArena {
        &mut self.arena
    }

    /// The top-level statements, in source order.
    ///
    /// Derived during construction; excludes the hashbang, non-code
    /// elements and the end-of-file marker.
    pub fn body(&self) -> &[ElementId] {
        &self.body
    }

    /// The raw top-level child list, in source order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Render the program back to source text.
    pub fn source(&self) -> String {
        let mut out = String::new();
        for &child in &self.children {
            out.push_str(&self.arena.text(child));
        }
        out
    }

    /// The length of the rendered source text.
    pub fn text_len(&self) -> TextSize {
        let mut len = TextSize::from(0);
        for &child in &self.children {
            len += self.arena.text_len(child);
        }
        len
    }

    /// Every node of type `ty` currently in the tree, in index order.
    pub fn select_nodes_by_type(&self, ty: &str) -> Vec<ElementId> {
        self.search_index.select_nodes_by_type(ty)
    }

    /// Every token of type `ty` currently in the tree, in index order.
    pub fn select_tokens_by_type(&self, ty: &str) -> Vec<ElementId> {
        self.search_index.select_tokens_by_type(ty)
    }

    /// Make newly-attached elements indexable and observable.
    ///
    /// Indexes `elements` and their descendants, then dispatches
    /// [`EventKind::ElementsAdd`] carrying exactly `elements` to all current
    /// listeners in registration order. The structural attachment itself is
    /// the caller's responsibility; see
    /// [`insert_child`](Program::insert_child) for the combined operation.
    pub fn add_elements(&mut self, elements: &[ElementId]) {
        debug!("adding {} element(s) to the search index", elements.len());
        self.search_index.add_elements(&self.arena, elements);
        self.events.emit(EventKind::ElementsAdd, elements);
    }

    /// Drop detached elements from the index and announce the removal.
    ///
    /// Symmetric to [`add_elements`](Program::add_elements).
    pub fn remove_elements(&mut self, elements: &[ElementId]) {
        debug!(
            "removing {} element(s) from the search index",
            elements.len()
        );
        self.search_index.remove_elements(&self.arena, elements);
        self.events.emit(EventKind::ElementsRemove, elements);
    }

    /// Attach `child` under `parent` at `index`, then index and announce
    /// it.
    ///
    /// # Panics
    /// Panics if `parent` is a token or `index` is past the end of its
    /// child list.
    pub fn insert_child(&mut self, parent: ElementId, index: usize, child: ElementId) {
        self.arena.insert_child(parent, index, child);
        self.add_elements(&[child]);
    }

    /// Detach the child at `index` under `parent`, then drop it from the
    /// index and announce the removal. Returns the detached element.
    ///
    /// # Panics
    /// Panics if `parent` is a token or `index` is out of bounds.
    pub fn remove_child(&mut self, parent: ElementId, index: usize) -> ElementId {
        let child = self.arena.remove_child(parent, index);
        self.remove_elements(&[child]);
        child
    }

    /// Accept the program's plugin set.
    ///
    /// Callable at most once; a second call is rejected with
    /// [`CstError::PluginsAlreadyAccepted`] and leaves the first registry
    /// untouched.
    pub fn accept_plugins(&self, plugins: PluginRegistry) -> Result<(), CstError> {
        debug!("accepting {} plugin(s)", plugins.len());
        self.plugins
            .set(plugins)
            .map_err(|_| CstError::PluginsAlreadyAccepted)
    }

    /// The frozen plugin registry, or `None` before
    /// [`accept_plugins`](Program::accept_plugins) has been called.
    pub fn plugins(&self) -> Option<&PluginRegistry> {
        self.plugins.get()
    }

    /// Register `callback` for `kind`; returns the handle
    /// [`off`](Program::off) takes.
    pub fn on(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&[ElementId]) + 'static,
    ) -> ListenerId {
        self.events.on(kind, callback)
    }

    /// Remove the listener registered under `id`; unknown ids are a no-op.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) {
        self.events.off(kind, id);
    }
}

/// Validate the top-level child shape and derive the statement body.
fn accept_children(
    arena: &ElementArena,
    children: &[ElementId],
) -> Result<Vec<ElementId>, CstError> {
    let mut cursor = ElementAssert::new(arena, children);

    if cursor.is_token("Hashbang") {
        cursor.pass_token("Hashbang")?;
    }

    cursor.skip_non_code();

    let mut body = Vec::new();
    while cursor.is_statement() {
        body.push(cursor.pass_statement()?);
        cursor.skip_non_code();
    }

    cursor.pass_token("EOF")?;
    cursor.assert_end()?;

    Ok(body)
}
