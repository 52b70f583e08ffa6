/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Serializable types for symbol persistence.

use serde::{Deserialize, Serialize};

/// Persisted projection of one symbol.
///
/// The on-store format is a versionless JSON array of these records;
/// schema migration is the caller's concern.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersistedSymbol {
    /// Stable symbol identity (UUID in canonical string form).
    pub id: String,
    pub name: String,
    pub source: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "isMovable")]
    pub is_movable: bool,
}
