use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Unique identifier for a card
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Generates a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Badge colors used to render a priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityStyle {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Badge colors for this priority
    pub fn style(&self) -> PriorityStyle {
        match self {
            Self::Low => PriorityStyle {
                background: "#D1FAE5",
                text: "#065F46",
                border: "#A7F3D0",
            },
            Self::Medium => PriorityStyle {
                background: "#FEF3C7",
                text: "#92400E",
                border: "#FDE68A",
            },
            Self::High => PriorityStyle {
                background: "#FEE2E2",
                text: "#991B1B",
                border: "#FECACA",
            },
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid priorities: low, medium, high",
                s
            )),
        }
    }
}

/// A single task on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Creates a card from a draft with a fresh id and both timestamps set to now
    pub fn new(draft: CardDraft) -> Self {
        let now = Utc::now();
        Self {
            id: CardId::generate(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the patch and refreshes `updated_at`
    pub fn apply(&mut self, patch: CardPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        self.updated_at = Utc::now();
    }
}

/// Fields supplied by the caller when adding a card
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
}

impl CardDraft {
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Trims the title and drops a blank description
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: normalize_description(self.description),
            priority: self.priority,
        }
    }

    /// True when the (trimmed) title is non-empty
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Partial update of a card. `description: Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
}

impl CardPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Trims the title and turns a blank description into a clear
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description.map(normalize_description),
            priority: self.priority,
        }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = CardId::generate();
        let b = CardId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!(Priority::from_str("low").unwrap(), Priority::Low);
        assert_eq!(Priority::from_str("HIGH").unwrap(), Priority::High);
        assert_eq!(Priority::from_str(" Medium ").unwrap(), Priority::Medium);
        assert!(Priority::from_str("urgent").is_err());
    }

    #[test]
    fn test_priority_display_parses_back() {
        for priority in Priority::ALL {
            assert_eq!(Priority::from_str(&priority.to_string()).unwrap(), priority);
        }
    }

    #[test]
    fn test_priority_style() {
        assert_eq!(Priority::High.style().background, "#FEE2E2");
        assert_eq!(Priority::Low.style().text, "#065F46");
    }

    #[test]
    fn test_new_card_timestamps_match() {
        let card = Card::new(CardDraft::new("Write docs", Priority::Low));
        assert_eq!(card.created_at, card.updated_at);
        assert!(card.description.is_none());
    }

    #[test]
    fn test_apply_patch_updates_only_given_fields() {
        let mut card =
            Card::new(CardDraft::new("Write docs", Priority::Low).with_description("README"));
        let created_at = card.created_at;
        let before = card.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));
        card.apply(CardPatch::default().priority(Priority::High));

        assert_eq!(card.priority, Priority::High);
        assert_eq!(card.title, "Write docs");
        assert_eq!(card.description.as_deref(), Some("README"));
        assert_eq!(card.created_at, created_at);
        assert!(card.updated_at > before);
    }

    #[test]
    fn test_apply_patch_clears_description() {
        let mut card =
            Card::new(CardDraft::new("Write docs", Priority::Low).with_description("README"));
        card.apply(CardPatch::default().description(None));
        assert!(card.description.is_none());
    }

    #[test]
    fn test_draft_normalization() {
        let draft = CardDraft::new("  Ship it  ", Priority::High).with_description("   ");
        let draft = draft.normalized();
        assert_eq!(draft.title, "Ship it");
        assert!(draft.description.is_none());
        assert!(draft.is_valid());
        assert!(!CardDraft::new("   ", Priority::Low).is_valid());
    }

    #[test]
    fn test_patch_normalization() {
        let patch = CardPatch::default()
            .title("  Ship it  ")
            .description(Some("  ".to_string()))
            .priority(Priority::Low)
            .normalized();

        assert_eq!(patch.title.as_deref(), Some("Ship it"));
        // A blank description becomes a clear, not an untouched field
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.priority, Some(Priority::Low));

        let patch = CardPatch::default()
            .description(Some(" Wireframes ".to_string()))
            .normalized();
        assert_eq!(patch.description, Some(Some("Wireframes".to_string())));
        assert!(patch.title.is_none());
    }

    #[test]
    fn test_card_serialization_layout() {
        let card = Card::new(CardDraft::new("Test", Priority::Medium));
        let json = serde_json::to_value(&card).unwrap();

        assert_eq!(json["priority"], "medium");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        // Unset descriptions are omitted
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_legacy_card_deserialization() {
        let old_json = r#"{
        "id": "k3j9x0a1b",
        "title": "Project Setup",
        "description": "Initialize React Native project with Expo",
        "priority": "low",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    }"#;

        let card: Card = serde_json::from_str(old_json).unwrap();
        assert_eq!(card.id.as_str(), "k3j9x0a1b");
        assert_eq!(card.priority, Priority::Low);
    }
}
