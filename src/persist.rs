//! JSON codec for the persisted board entry.
//!
//! The whole board is stored as a single value:
//! `{ "columns": [ { "id", "title", "color", "cards": [ ... ] } ] }`
//! with camelCase card fields and RFC 3339 timestamps. Entries written by
//! the mobile app wrap that object as `{ "state": { ... }, "version": 0 }`;
//! both shapes are accepted on load.

use crate::{domain::Column, error::Result};
use serde::{Deserialize, Serialize};

/// Owned copy of the persisted board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub columns: Vec<Column>,
}

#[derive(Serialize)]
struct BoardSnapshotRef<'a> {
    columns: &'a [Column],
}

/// Serializes columns into the persisted layout
pub fn encode(columns: &[Column]) -> Result<String> {
    Ok(serde_json::to_string(&BoardSnapshotRef { columns })?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBoard {
    Bare(BoardSnapshot),
    Wrapped { state: BoardSnapshot },
}

/// Parses a persisted entry, bare or wrapped in a `state` envelope
pub fn decode(raw: &str) -> Result<BoardSnapshot> {
    let snapshot = match serde_json::from_str(raw)? {
        StoredBoard::Bare(snapshot) => snapshot,
        StoredBoard::Wrapped { state } => state,
    };
    Ok(snapshot)
}
