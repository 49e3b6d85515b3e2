use crate::domain::{
    card::{Card, CardDraft, Priority},
    column::Column,
};

/// Columns a fresh board starts with
pub fn seed_columns() -> Vec<Column> {
    vec![
        Column::new("To Do", "#3B82F6").with_cards(vec![
            Card::new(
                CardDraft::new("Design Mobile UI", Priority::High)
                    .with_description("Create wireframes and mockups for the mobile app"),
            ),
            Card::new(
                CardDraft::new("Setup Navigation", Priority::Medium)
                    .with_description("Configure React Navigation"),
            ),
        ]),
        Column::new("In Progress", "#EAB308").with_cards(vec![Card::new(
            CardDraft::new("API Integration", Priority::High)
                .with_description("Connect mobile app with backend services"),
        )]),
        Column::new("Review", "#8B5CF6"),
        Column::new("Done", "#10B981").with_cards(vec![Card::new(
            CardDraft::new("Project Setup", Priority::Low)
                .with_description("Initialize React Native project with Expo"),
        )]),
    ]
}
