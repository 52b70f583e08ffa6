/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Geomark: an order-sensitive collection of tactical symbols (map
//! markers) kept in sync with a render layer and a durable store.
//!
//! The collection is the single source of truth. Every structural
//! change it emits (insert, delete, reorder) is mirrored onto the
//! render layer by exactly one synchronizer, with reorders suppressed
//! from add/remove side effects. Colliding names are resolved with a
//! parenthesized suffix sequence. Persistence is an explicit
//! save/restore boundary over an injected key-value store, outside
//! the reactive loop.

pub mod layer;
pub mod manager;
pub mod naming;
pub mod persistence;
pub mod symbols;

pub use layer::{
    LayerSync, MemoryLayer, RenderLayer, Renderable, RenderableId, SelectionSink, SelectionState,
};
pub use manager::SymbolManager;
pub use naming::resolve_unique_name;
pub use persistence::{restore, save, KeyValueStore, MemoryStore, StoreError, SYMBOL_SLOT_KEY};
pub use symbols::{
    ChangeKind, DefaultFactory, Position, Symbol, SymbolChange, SymbolCollection, SymbolFactory,
    SymbolId, SymbolParams,
};
