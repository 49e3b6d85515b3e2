pub mod card;
pub mod column;
pub mod seed;

pub use card::{Card, CardDraft, CardId, CardPatch, Priority, PriorityStyle};
pub use column::{Column, ColumnColor, ColumnId, ColumnPatch, COLUMN_PALETTE, DEFAULT_COLUMN_COLOR};
pub use seed::seed_columns;
