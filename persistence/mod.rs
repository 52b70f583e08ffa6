/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Symbol persistence over an injected key-value store.
//!
//! The whole marker set lives under one well-known slot key as a JSON
//! array. `save` writes the non-invalid projection of the collection;
//! `restore` rebuilds symbols record by record through the factory,
//! treating absent or corrupt data as "nothing to restore" and never
//! letting one bad record abort its neighbors.

pub mod types;

use std::collections::HashMap;

use log::warn;
use uuid::Uuid;

use crate::layer::{RenderLayer, SelectionSink};
use crate::manager::SymbolManager;
use crate::symbols::{Position, SymbolFactory, SymbolParams};
use types::PersistedSymbol;

/// The single slot under which the marker set is stored.
pub const SYMBOL_SLOT_KEY: &str = "geomark.symbols";

/// Durable string key-value store.
pub trait KeyValueStore {
    /// Value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-memory store, the reference `KeyValueStore`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value);
        Ok(())
    }
}

/// Serialize the collection's non-invalid symbols into the store slot.
pub fn save<L, S, K>(manager: &SymbolManager<L, S>, store: &mut K) -> Result<(), StoreError>
where
    L: RenderLayer,
    S: SelectionSink,
    K: KeyValueStore,
{
    let records: Vec<PersistedSymbol> = manager
        .symbols()
        .filter(|symbol| !symbol.invalid)
        .map(|symbol| PersistedSymbol {
            id: symbol.id.to_string(),
            name: symbol.name.clone(),
            source: symbol.source.clone(),
            latitude: symbol.position.latitude,
            longitude: symbol.position.longitude,
            is_movable: symbol.is_movable,
        })
        .collect();

    let payload =
        serde_json::to_string(&records).map_err(|e| StoreError::Serialize(format!("{e}")))?;
    store.set(SYMBOL_SLOT_KEY, payload)
}

/// Rebuild symbols from the store slot into the manager.
///
/// An absent, empty, or unparsable slot leaves the collection
/// untouched. Each record is restored independently: a record with a
/// malformed id is skipped, and one whose construction fails yields
/// an `invalid` symbol (present but never mirrored or re-persisted).
pub fn restore<L, S, K, F>(manager: &mut SymbolManager<L, S>, factory: &F, store: &K)
where
    L: RenderLayer,
    S: SelectionSink,
    K: KeyValueStore,
    F: SymbolFactory,
{
    let Some(payload) = store.get(SYMBOL_SLOT_KEY) else {
        return;
    };
    if payload.is_empty() {
        return;
    }
    let records: Vec<PersistedSymbol> = match serde_json::from_str(&payload) {
        Ok(records) => records,
        Err(e) => {
            warn!("stored symbol data unreadable, restoring nothing: {e}");
            return;
        },
    };

    for record in records {
        let Ok(id) = Uuid::parse_str(&record.id) else {
            warn!("skipping persisted symbol with malformed id {:?}", record.id);
            continue;
        };
        let position = Position::new(record.latitude, record.longitude);
        let params = SymbolParams {
            id,
            name: record.name,
            image_source: record.source,
            is_movable: record.is_movable,
        };
        manager.add_symbol(factory.create(position, params));
    }
}

/// Persistence failure. Store reads never produce one; absence and
/// corruption are "no data".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Io(String),
    Serialize(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {e}"),
            StoreError::Serialize(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}
