//! # Kanban Core
//!
//! State store and local persistence for a mobile kanban board.
//!
//! This crate holds the ordered columns and prioritized cards of a board,
//! exposes the operations a UI needs to edit them, and mirrors every change
//! to a key-value [`Storage`] backend without any dependency on a specific
//! UI toolkit.

pub mod config;
pub mod domain;
pub mod error;
pub mod persist;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::StoreConfig;
pub use domain::{
    card::{Card, CardDraft, CardId, CardPatch, Priority},
    column::{Column, ColumnId, ColumnPatch},
};
pub use error::{KanbanError, Result};
pub use persist::BoardSnapshot;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{KanbanStore, PersistWarning};
