use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConditionLabel {
    Normal,
    Mild,
    Moderate,
    Critical,
}

impl ConditionLabel {
    pub const ALL: [ConditionLabel; 4] = [
        ConditionLabel::Normal,
        ConditionLabel::Mild,
        ConditionLabel::Moderate,
        ConditionLabel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionLabel::Normal => "Normal",
            ConditionLabel::Mild => "Mild",
            ConditionLabel::Moderate => "Moderate",
            ConditionLabel::Critical => "Critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == value)
    }
}

impl std::fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
