/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Render-layer collaborators and the layer synchronizer.
//!
//! `LayerSync` is the only component allowed to mutate the render
//! layer's item set; it mirrors each structural change of the symbol
//! collection into exactly one layer mutation (or none, for reorders),
//! keeping the collection↔layer bijection intact.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::naming::resolve_unique_name;
use crate::symbols::{ChangeKind, SymbolChange, SymbolCollection, SymbolId};

/// Identity of one renderable item in the layer.
///
/// Generated per `Renderable`, never reused, so removal compares
/// identity rather than structure: two symbols with identical imagery
/// still carry distinct renderable ids.
pub type RenderableId = Uuid;

/// Handle to a symbol's visual representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable {
    pub id: RenderableId,
    /// Owning symbol.
    pub symbol: SymbolId,
    /// Image/appearance reference, copied from the symbol.
    pub source: String,
}

impl Renderable {
    pub fn new(symbol: SymbolId, source: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol,
            source,
        }
    }
}

/// The external render surface.
///
/// Only `LayerSync` may call these; no other component touches the
/// layer's item set directly.
pub trait RenderLayer {
    /// Add an item to the layer's item set (append semantics; no
    /// ordering guarantee beyond presence).
    fn add_renderable(&mut self, item: Renderable);

    /// Remove the item with the given identity. Returns `false` when
    /// no such item exists; implementations must not fail.
    fn remove_renderable(&mut self, id: RenderableId) -> bool;
}

/// The external selection tracker (globe controller).
pub trait SelectionSink {
    /// Drop any active selection of the given symbol. Idempotent;
    /// a no-op when the symbol is not selected.
    fn deselect(&mut self, symbol: SymbolId);
}

/// In-memory render layer, the reference `RenderLayer`.
#[derive(Debug, Default)]
pub struct MemoryLayer {
    items: Vec<Renderable>,
}

impl MemoryLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Renderable] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl RenderLayer for MemoryLayer {
    fn add_renderable(&mut self, item: Renderable) {
        self.items.push(item);
    }

    fn remove_renderable(&mut self, id: RenderableId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }
}

/// In-memory selection tracker, the reference `SelectionSink`.
#[derive(Debug, Default)]
pub struct SelectionState {
    selected: HashSet<SymbolId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, symbol: SymbolId) {
        self.selected.insert(symbol);
    }

    pub fn is_selected(&self, symbol: SymbolId) -> bool {
        self.selected.contains(&symbol)
    }
}

impl SelectionSink for SelectionState {
    fn deselect(&mut self, symbol: SymbolId) {
        self.selected.remove(&symbol);
    }
}

/// Mirrors collection changes onto the render layer.
///
/// Keeps a symbol-id → renderable-id side index so removal is O(1)
/// instead of a scan over the layer's item set.
pub struct LayerSync<L: RenderLayer, S: SelectionSink> {
    layer: L,
    selection: S,
    index: HashMap<SymbolId, RenderableId>,
    /// Symbols whose add records have been applied (name resolved).
    /// Collision scans run against this set only, so when several add
    /// records drain in one batch, emission order decides which
    /// symbol keeps the unsuffixed name.
    settled: HashSet<SymbolId>,
}

impl<L: RenderLayer, S: SelectionSink> LayerSync<L, S> {
    pub fn new(layer: L, selection: S) -> Self {
        Self {
            layer,
            selection,
            index: HashMap::new(),
            settled: HashSet::new(),
        }
    }

    /// Apply one change record.
    ///
    /// Reorder records (`moved` set) are transparent: no layer
    /// mutation, no renaming. An unmoved add resolves the symbol's
    /// name against the rest of the collection, writes it back, and
    /// mirrors the renderable unless the symbol is invalid. An
    /// unmoved remove unmirrors by identity and deselects.
    pub fn apply(&mut self, collection: &mut SymbolCollection, change: SymbolChange) {
        if change.moved {
            return;
        }
        match change.kind {
            ChangeKind::Added => self.apply_added(collection, change.symbol),
            ChangeKind::Removed => self.apply_removed(change.symbol),
        }
    }

    fn apply_added(&mut self, collection: &mut SymbolCollection, id: SymbolId) {
        let settled_names: Vec<String> = collection
            .iter()
            .filter(|s| s.id != id && self.settled.contains(&s.id))
            .map(|s| s.name.clone())
            .collect();
        let Some(symbol) = collection.find_mut(id) else {
            // Removed again before this record was drained.
            log::debug!("add record for symbol {id} no longer in collection");
            return;
        };
        symbol.name = resolve_unique_name(&symbol.name, &settled_names);
        // Invalid symbols still occupy their name, they just stay
        // out of the layer.
        self.settled.insert(id);
        if symbol.invalid {
            return;
        }
        let renderable = symbol.renderable().clone();
        self.index.insert(id, renderable.id);
        self.layer.add_renderable(renderable);
    }

    fn apply_removed(&mut self, id: SymbolId) {
        self.settled.remove(&id);
        if let Some(renderable_id) = self.index.remove(&id) {
            if !self.layer.remove_renderable(renderable_id) {
                log::warn!("renderable for symbol {id} already absent from layer");
            }
        }
        self.selection.deselect(id);
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut S {
        &mut self.selection
    }

    /// Renderable id currently mirrored for a symbol, if any.
    pub fn mirrored(&self, symbol: SymbolId) -> Option<RenderableId> {
        self.index.get(&symbol).copied()
    }
}
