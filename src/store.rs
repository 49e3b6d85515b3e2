//! The board state store.
//!
//! [`KanbanStore`] owns the ordered columns and their cards. Every mutation
//! runs synchronously on the caller's thread and, when it changes the board,
//! queues a full JSON snapshot for the background writer task. Writes are
//! applied in order and never block or fail the caller.
//!
//! Unknown ids are silent no-ops: the operation reports `false` (or `None`)
//! and the board is left untouched.

use crate::{
    config::StoreConfig,
    domain::{seed_columns, Card, CardDraft, CardId, CardPatch, Column, ColumnId, ColumnPatch},
    error::{KanbanError, Result},
    persist::{self, BoardSnapshot},
    storage::Storage,
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

/// Non-fatal persistence problem reported to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistWarning {
    /// A snapshot could not be written; the in-memory board is unaffected.
    WriteFailed {
        /// Description of the error.
        reason: String,
    },
}

enum WriteCommand {
    Write(String),
    Flush(oneshot::Sender<()>),
}

/// In-memory kanban board synchronized to a [`Storage`] backend
pub struct KanbanStore {
    columns: Vec<Column>,
    hydrated: watch::Sender<bool>,
    storage: Arc<dyn Storage>,
    config: StoreConfig,
    writer: mpsc::UnboundedSender<WriteCommand>,
    warning_tx: mpsc::Sender<PersistWarning>,
    /// Set when the board is edited before hydration
    dirty: bool,
}

impl KanbanStore {
    /// Creates an un-hydrated store on the seed columns and starts its writer task.
    ///
    /// Must be called from within a Tokio runtime. Returns the store and a
    /// receiver for [`PersistWarning`]s.
    pub fn new(
        storage: Arc<dyn Storage>,
        config: StoreConfig,
    ) -> Result<(Self, mpsc::Receiver<PersistWarning>)> {
        config.validate()?;

        let (warning_tx, warning_rx) = mpsc::channel(config.warning_buffer);
        let (writer, queue) = mpsc::unbounded_channel();
        let (hydrated, _) = watch::channel(false);

        tokio::spawn(run_writer(
            Arc::clone(&storage),
            config.storage_key.clone(),
            queue,
            warning_tx.clone(),
        ));

        let store = Self {
            columns: seed_columns(),
            hydrated,
            storage,
            config,
            writer,
            warning_tx,
            dirty: false,
        };
        Ok((store, warning_rx))
    }

    /// Creates a store and loads the persisted board
    pub async fn open(
        storage: Arc<dyn Storage>,
        config: StoreConfig,
    ) -> Result<(Self, mpsc::Receiver<PersistWarning>)> {
        let (mut store, warnings) = Self::new(storage, config)?;
        store.hydrate().await;
        Ok((store, warnings))
    }

    /// Loads the persisted board, once.
    ///
    /// A missing, unreadable or malformed entry keeps the current columns
    /// (the seed data unless the board was edited first). Hydration is marked
    /// complete either way, and a board edited before this point is written
    /// out once it is kept. Later calls do nothing.
    pub async fn hydrate(&mut self) {
        if self.is_hydrated() {
            return;
        }

        let key = &self.config.storage_key;
        let restored = match self.storage.get_item(key).await {
            Ok(Some(raw)) => match persist::decode(&raw) {
                Ok(snapshot) => {
                    tracing::info!(
                        storage_key = %key,
                        columns = snapshot.columns.len(),
                        "board restored from storage"
                    );
                    self.columns = snapshot.columns;
                    true
                }
                Err(err) => {
                    tracing::warn!(
                        storage_key = %key,
                        error = %err,
                        "persisted board is malformed, using defaults"
                    );
                    false
                }
            },
            Ok(None) => {
                tracing::info!(storage_key = %key, "no persisted board, using defaults");
                false
            }
            Err(err) => {
                tracing::warn!(
                    storage_key = %key,
                    error = %err,
                    "failed to read persisted board, using defaults"
                );
                false
            }
        };

        self.hydrated.send_replace(true);
        if std::mem::take(&mut self.dirty) && !restored {
            tracing::debug!("writing board edited before hydration");
            self.persist();
        }
    }

    pub fn is_hydrated(&self) -> bool {
        *self.hydrated.borrow()
    }

    /// Receiver that observes `true` once hydration completes
    pub fn hydration_signal(&self) -> watch::Receiver<bool> {
        self.hydrated.subscribe()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // --- Read model ---

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == column_id)
    }

    /// Finds a card and the column holding it
    pub fn find_card(&self, card_id: &CardId) -> Option<(&Column, &Card)> {
        self.columns
            .iter()
            .find_map(|col| col.card(card_id).map(|card| (col, card)))
    }

    /// Total number of cards across all columns
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|col| col.cards.len()).sum()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            columns: self.columns.clone(),
        }
    }

    // --- Mutations ---

    /// Appends an empty column
    pub fn add_column(&mut self, title: impl Into<String>, color: impl Into<String>) -> ColumnId {
        let column = Column::new(title, color);
        let id = column.id.clone();
        tracing::debug!(column_id = %id, "adding column");

        self.columns.push(column);
        self.persist();
        id
    }

    pub fn remove_column(&mut self, column_id: &ColumnId) -> bool {
        let Some(index) = self.column_index(column_id) else {
            return false;
        };
        tracing::debug!(column_id = %column_id, "removing column");

        self.columns.remove(index);
        self.persist();
        true
    }

    pub fn update_column(&mut self, column_id: &ColumnId, patch: ColumnPatch) -> bool {
        let Some(column) = self.column_mut(column_id) else {
            return false;
        };
        column.apply(patch);
        tracing::debug!(column_id = %column_id, "updated column");

        self.persist();
        true
    }

    /// Appends a new card to a column; `None` if the column does not exist
    pub fn add_card(&mut self, column_id: &ColumnId, draft: CardDraft) -> Option<CardId> {
        let column = self.column_mut(column_id)?;
        let card = Card::new(draft);
        let card_id = card.id.clone();
        column.cards.push(card);
        tracing::debug!(column_id = %column_id, card_id = %card_id, "added card");

        self.persist();
        Some(card_id)
    }

    /// Removes the first card with this id from whichever column holds it
    pub fn remove_card(&mut self, card_id: &CardId) -> bool {
        let removed = self.columns.iter_mut().any(|col| {
            match col.position_of(card_id) {
                Some(pos) => {
                    col.cards.remove(pos);
                    true
                }
                None => false,
            }
        });

        if removed {
            tracing::debug!(card_id = %card_id, "removed card");
            self.persist();
        }
        removed
    }

    /// Merges the patch into the card and refreshes its `updated_at`
    pub fn update_card(&mut self, card_id: &CardId, patch: CardPatch) -> bool {
        let Some(card) = self.columns.iter_mut().find_map(|col| col.card_mut(card_id)) else {
            return false;
        };
        card.apply(patch);
        tracing::debug!(card_id = %card_id, "updated card");

        self.persist();
        true
    }

    /// Moves a card from one column to a position in another.
    ///
    /// `new_index` is clamped to the destination's length after the card has
    /// left its source. Moving within one column behaves like a reorder.
    pub fn move_card(
        &mut self,
        card_id: &CardId,
        from_column_id: &ColumnId,
        to_column_id: &ColumnId,
        new_index: usize,
    ) -> bool {
        let (Some(from), Some(to)) = (
            self.column_index(from_column_id),
            self.column_index(to_column_id),
        ) else {
            return false;
        };
        let Some(position) = self.columns[from].position_of(card_id) else {
            return false;
        };

        let card = self.columns[from].cards.remove(position);
        self.columns[to].insert_clamped(new_index, card);
        tracing::debug!(
            card_id = %card_id,
            from = %from_column_id,
            to = %to_column_id,
            index = new_index,
            "moved card"
        );

        self.persist();
        true
    }

    /// Moves the card at `old_index` to `new_index` (clamped) within one column
    pub fn reorder_cards(
        &mut self,
        column_id: &ColumnId,
        old_index: usize,
        new_index: usize,
    ) -> bool {
        let Some(column) = self.column_mut(column_id) else {
            return false;
        };
        if old_index >= column.cards.len() {
            return false;
        }

        let card = column.cards.remove(old_index);
        column.insert_clamped(new_index, card);
        tracing::debug!(column_id = %column_id, old_index, new_index, "reordered cards");

        self.persist();
        true
    }

    /// Waits until every snapshot queued so far has been handed to storage
    pub async fn flush(&self) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.writer
            .send(WriteCommand::Flush(done_tx))
            .map_err(|_| KanbanError::WriterClosed)?;
        done_rx.await.map_err(|_| KanbanError::WriterClosed)
    }

    fn column_index(&self, column_id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|col| &col.id == column_id)
    }

    fn column_mut(&mut self, column_id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|col| &col.id == column_id)
    }

    /// Queues a snapshot of the whole board. Deferred until hydration so an
    /// early edit cannot overwrite the entry before it is read.
    fn persist(&mut self) {
        if !self.is_hydrated() {
            tracing::debug!("board not hydrated yet, deferring write");
            self.dirty = true;
            return;
        }

        match persist::encode(&self.columns) {
            Ok(json) => {
                if self.writer.send(WriteCommand::Write(json)).is_err() {
                    tracing::warn!("persistence writer has stopped, snapshot dropped");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode board snapshot");
                let _ = self.warning_tx.try_send(PersistWarning::WriteFailed {
                    reason: err.to_string(),
                });
            }
        }
    }
}

async fn run_writer(
    storage: Arc<dyn Storage>,
    key: String,
    mut queue: mpsc::UnboundedReceiver<WriteCommand>,
    warning_tx: mpsc::Sender<PersistWarning>,
) {
    while let Some(command) = queue.recv().await {
        match command {
            WriteCommand::Write(json) => {
                if let Err(err) = storage.set_item(&key, &json).await {
                    tracing::warn!(
                        storage_key = %key,
                        error = %err,
                        "board write failed, change kept in memory only"
                    );
                    // Best effort: drop the warning if nobody is draining the channel
                    let _ = warning_tx.try_send(PersistWarning::WriteFailed {
                        reason: err.to_string(),
                    });
                }
            }
            WriteCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::debug!(storage_key = %key, "persistence writer stopped");
}
