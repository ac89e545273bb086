use serde::Serialize;

/// A level-4+ heading and the raw text that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// A section without title and without visible body text carries nothing worth a card.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.body.trim().is_empty()
    }
}
