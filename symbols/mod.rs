/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Symbol data model and the observed collection.
//!
//! Core structures:
//! - `Symbol`: a positioned, named map marker owning one `Renderable`
//! - `SymbolCollection`: ordered collection that emits one
//!   `SymbolChange` record per structural mutation
//! - `SymbolFactory`: constructor collaborator; marks a symbol
//!   `invalid` on construction failure instead of raising

use crossbeam_channel::{Receiver, Sender};
use uuid::Uuid;

use crate::layer::Renderable;

/// Stable symbol identity.
pub type SymbolId = Uuid;

/// Geographic position of a symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Position {
    /// Surface position (altitude zero).
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: 0.0,
        }
    }

    /// Whether both coordinates are finite and within geographic range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Construction parameters for a symbol.
#[derive(Debug, Clone)]
pub struct SymbolParams {
    /// Stable identity; restored symbols keep their persisted id.
    pub id: SymbolId,
    /// Display name; re-resolved against the collection on add.
    pub name: String,
    /// Image/appearance reference.
    pub image_source: String,
    pub is_movable: bool,
}

impl SymbolParams {
    /// Params for a brand-new symbol with a generated id.
    pub fn new(name: impl Into<String>, image_source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image_source: image_source.into(),
            is_movable: true,
        }
    }
}

/// A tactical symbol (map marker).
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Stable identity.
    pub id: SymbolId,

    /// Display name. Mutable; the synchronizer rewrites it when the
    /// symbol enters the collection and the name collides.
    pub name: String,

    /// Image/appearance reference.
    pub source: String,

    pub position: Position,

    /// Whether the symbol may be repositioned by the user.
    pub is_movable: bool,

    /// Set when construction failed. Invalid symbols stay out of the
    /// render layer and out of persistence.
    pub invalid: bool,

    /// The symbol's visual representation, owned for its lifetime.
    /// The synchronizer mirrors a handle to it into the render layer.
    renderable: Renderable,
}

impl Symbol {
    /// Build a symbol from parameters, creating its renderable alongside.
    pub fn new(position: Position, params: SymbolParams) -> Self {
        let renderable = Renderable::new(params.id, params.image_source.clone());
        Self {
            id: params.id,
            name: params.name,
            source: params.image_source,
            position,
            is_movable: params.is_movable,
            invalid: false,
            renderable,
        }
    }

    /// The owned visual representation.
    pub fn renderable(&self) -> &Renderable {
        &self.renderable
    }
}

/// Constructor collaborator for symbols.
///
/// Implementations must not fail: a symbol that cannot be built is
/// returned with its `invalid` flag set, so one bad record never
/// aborts a batch restore.
pub trait SymbolFactory {
    fn create(&self, position: Position, params: SymbolParams) -> Symbol;
}

/// Default factory: rejects out-of-range or non-finite coordinates
/// and an empty image source by flagging the symbol invalid.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFactory;

impl SymbolFactory for DefaultFactory {
    fn create(&self, position: Position, params: SymbolParams) -> Symbol {
        let mut symbol = Symbol::new(position, params);
        if !position.is_valid() || symbol.source.trim().is_empty() {
            log::warn!(
                "symbol {} failed construction (position or source invalid), flagging",
                symbol.id
            );
            symbol.invalid = true;
        }
        symbol
    }
}

/// Kind of structural change applied to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
}

/// One structural change to the collection.
///
/// A reorder is emitted as a `Removed` + `Added` pair for the same
/// symbol with `moved` set on both records; consumers must treat such
/// records as position-only and take no add/remove side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolChange {
    pub kind: ChangeKind,
    pub symbol: SymbolId,
    pub moved: bool,
}

/// Ordered, observable collection of symbols, unique by id.
///
/// Every structural mutation emits a `SymbolChange` onto the channel
/// handed out at construction. Records are emitted in mutation order;
/// the manager drains them into the synchronizer.
pub struct SymbolCollection {
    items: Vec<Symbol>,
    changes_tx: Sender<SymbolChange>,
}

impl SymbolCollection {
    /// Create an empty collection and the receiving end of its
    /// change stream.
    pub fn new() -> (Self, Receiver<SymbolChange>) {
        let (changes_tx, changes_rx) = crossbeam_channel::unbounded();
        (
            Self {
                items: Vec::new(),
                changes_tx,
            },
            changes_rx,
        )
    }

    /// Append a symbol. Emits an unmoved `Added` record.
    ///
    /// A symbol whose id is already present is rejected (logged no-op);
    /// id uniqueness is the caller's contract.
    pub fn push(&mut self, symbol: Symbol) {
        if self.contains(symbol.id) {
            log::warn!("ignoring add of duplicate symbol id {}", symbol.id);
            return;
        }
        let id = symbol.id;
        self.items.push(symbol);
        self.emit(ChangeKind::Added, id, false);
    }

    /// Remove the symbol with the given id. Emits an unmoved `Removed`
    /// record and returns the symbol; `None` (no record) when absent.
    pub fn remove(&mut self, id: SymbolId) -> Option<Symbol> {
        let index = self.items.iter().position(|s| s.id == id)?;
        let symbol = self.items.remove(index);
        self.emit(ChangeKind::Removed, id, false);
        Some(symbol)
    }

    /// Move the symbol at `from` to position `to`, preserving the
    /// order of everything else. Emits a `moved` Removed+Added pair.
    /// Out-of-range indices are a no-op returning `false`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        if from == to {
            return true;
        }
        let symbol = self.items.remove(from);
        let id = symbol.id;
        self.items.insert(to, symbol);
        self.emit(ChangeKind::Removed, id, true);
        self.emit(ChangeKind::Added, id, true);
        true
    }

    /// Remove every symbol, emitting one unmoved `Removed` record per
    /// symbol in collection order.
    pub fn clear(&mut self) {
        for symbol in self.items.drain(..) {
            let _ = self.changes_tx.send(SymbolChange {
                kind: ChangeKind::Removed,
                symbol: symbol.id,
                moved: false,
            });
        }
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        self.items.iter().any(|s| s.id == id)
    }

    /// First symbol with the given id (linear scan).
    pub fn find(&self, id: SymbolId) -> Option<&Symbol> {
        self.items.iter().find(|s| s.id == id)
    }

    pub fn find_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.items.iter_mut().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn emit(&self, kind: ChangeKind, symbol: SymbolId, moved: bool) {
        // The receiver lives in the manager alongside this collection,
        // so the send cannot fail while the collection is reachable.
        let _ = self.changes_tx.send(SymbolChange {
            kind,
            symbol,
            moved,
        });
    }
}
