use crate::domain::card::{Card, CardId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Generates a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named color offered when creating a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnColor {
    pub name: &'static str,
    pub value: &'static str,
}

/// Colors offered when creating a column
pub const COLUMN_PALETTE: [ColumnColor; 8] = [
    ColumnColor { name: "Blue", value: "#3B82F6" },
    ColumnColor { name: "Green", value: "#10B981" },
    ColumnColor { name: "Yellow", value: "#EAB308" },
    ColumnColor { name: "Red", value: "#EF4444" },
    ColumnColor { name: "Purple", value: "#8B5CF6" },
    ColumnColor { name: "Pink", value: "#EC4899" },
    ColumnColor { name: "Indigo", value: "#6366F1" },
    ColumnColor { name: "Teal", value: "#14B8A6" },
];

pub const DEFAULT_COLUMN_COLOR: &str = "#3B82F6";

/// A workflow stage holding an ordered list of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    /// Creates an empty column with a fresh id
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: ColumnId::generate(),
            title: title.into(),
            color: color.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    /// Position of a card in this column
    pub fn position_of(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == card_id)
    }

    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| &card.id == card_id)
    }

    /// Inserts at `index`, clamped to the end of the list
    pub(crate) fn insert_clamped(&mut self, index: usize, card: Card) {
        let index = index.min(self.cards.len());
        self.cards.insert(index, card);
    }

    pub fn apply(&mut self, patch: ColumnPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Partial update of a column
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnPatch {
    pub title: Option<String>,
    pub color: Option<String>,
}

impl ColumnPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::{CardDraft, Priority};

    #[test]
    fn test_column_creation() {
        let column = Column::new("Backlog", DEFAULT_COLUMN_COLOR);
        assert_eq!(column.title, "Backlog");
        assert_eq!(column.color, "#3B82F6");
        assert!(column.cards.is_empty());
    }

    #[test]
    fn test_insert_clamped() {
        let mut column = Column::new("Backlog", DEFAULT_COLUMN_COLOR);
        let a = Card::new(CardDraft::new("A", Priority::Low));
        let b = Card::new(CardDraft::new("B", Priority::Low));
        let b_id = b.id.clone();

        column.insert_clamped(0, a);
        column.insert_clamped(99, b);

        assert_eq!(column.cards.len(), 2);
        assert_eq!(column.position_of(&b_id), Some(1));
    }

    #[test]
    fn test_apply_patch() {
        let mut column = Column::new("Backlog", DEFAULT_COLUMN_COLOR);
        let id = column.id.clone();

        column.apply(ColumnPatch::default().color("#EF4444"));
        assert_eq!(column.title, "Backlog");
        assert_eq!(column.color, "#EF4444");
        assert_eq!(column.id, id);
    }

    #[test]
    fn test_palette_contains_default() {
        assert!(COLUMN_PALETTE
            .iter()
            .any(|c| c.value == DEFAULT_COLUMN_COLOR));
    }
}
