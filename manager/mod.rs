/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Collection manager: owns the symbol collection and drives the
//! layer synchronizer from its change stream.
//!
//! Changes queue on a channel while a mutation runs and are drained
//! into the synchronizer before the mutating call returns, so callers
//! observe a consistent collection/layer pair after every operation.

use crossbeam_channel::Receiver;

use crate::layer::{LayerSync, RenderLayer, SelectionSink};
use crate::symbols::{Symbol, SymbolChange, SymbolCollection, SymbolId};

/// Orchestrator for a symbol collection and its mirrored render layer.
pub struct SymbolManager<L: RenderLayer, S: SelectionSink> {
    collection: SymbolCollection,
    changes: Receiver<SymbolChange>,
    sync: LayerSync<L, S>,
}

impl<L: RenderLayer, S: SelectionSink> SymbolManager<L, S> {
    pub fn new(layer: L, selection: S) -> Self {
        let (collection, changes) = SymbolCollection::new();
        Self {
            collection,
            changes,
            sync: LayerSync::new(layer, selection),
        }
    }

    /// Append a symbol to the collection.
    ///
    /// By the time this returns the symbol's name has been resolved
    /// against the rest of the collection and, unless the symbol is
    /// invalid, its renderable is present in the layer.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        self.collection.push(symbol);
        self.drain_changes();
    }

    /// First symbol with the given id, or `None`.
    pub fn find_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.collection.find(id)
    }

    pub fn find_symbol_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.collection.find_mut(id)
    }

    /// Remove the symbol with the given id; a no-op when absent.
    pub fn remove_symbol(&mut self, id: SymbolId) {
        let _ = self.collection.remove(id);
        self.drain_changes();
    }

    /// Move a symbol between positions in the collection. Transparent
    /// to the layer and to naming. Returns `false` for out-of-range
    /// indices.
    pub fn reorder_symbol(&mut self, from: usize, to: usize) -> bool {
        let moved = self.collection.reorder(from, to);
        self.drain_changes();
        moved
    }

    /// Tear down the whole collection, unmirroring and deselecting
    /// every symbol.
    pub fn clear(&mut self) {
        self.collection.clear();
        self.drain_changes();
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.collection.iter()
    }

    pub fn symbol_count(&self) -> usize {
        self.collection.len()
    }

    pub fn layer(&self) -> &L {
        self.sync.layer()
    }

    pub fn selection(&self) -> &S {
        self.sync.selection()
    }

    pub fn selection_mut(&mut self) -> &mut S {
        self.sync.selection_mut()
    }

    fn drain_changes(&mut self) {
        while let Ok(change) = self.changes.try_recv() {
            self.sync.apply(&mut self.collection, change);
        }
    }
}
