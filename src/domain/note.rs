use crate::domain::{DomainError, Section};
use serde::Serialize;
use std::collections::BTreeMap;

/// Split a comma separated tag list, dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validated settings shared by every note of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTemplate {
    pub deck: String,
    pub model: String,
    pub front_field: String,
    pub back_field: String,
    pub tags: Vec<String>,
}

impl NoteTemplate {
    /// Fails with every missing name at once so the user can fix them in one go.
    pub fn new(
        deck: &str,
        model: &str,
        front_field: &str,
        back_field: &str,
        tags: &str,
    ) -> Result<Self, DomainError> {
        let required = [
            ("deck", deck),
            ("note type", model),
            ("front field", front_field),
            ("back field", back_field),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::ConfigIncomplete(missing));
        }

        Ok(Self {
            deck: deck.trim().to_string(),
            model: model.trim().to_string(),
            front_field: front_field.trim().to_string(),
            back_field: back_field.trim().to_string(),
            tags: parse_tags(tags),
        })
    }

    pub fn note_for(&self, section: &Section) -> NotePayload {
        let mut fields = BTreeMap::new();
        fields.insert(self.front_field.clone(), section.title.clone());
        // identical field names: body wins, like a plain map insert
        fields.insert(self.back_field.clone(), section.body.clone());

        NotePayload {
            deck: self.deck.clone(),
            model: self.model.clone(),
            fields,
            tags: self.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePayload {
    pub deck: String,
    pub model: String,
    pub fields: BTreeMap<String, String>,
    pub tags: Vec<String>,
}

/// Result for one submitted note, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteUpload {
    pub title: String,
    pub note_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadTally {
    pub notes: Vec<NoteUpload>,
    /// Set when the batch call itself failed; every note then counts as failed.
    pub batch_error: Option<String>,
}

impl UploadTally {
    /// Align remote results with the submitted sections.
    ///
    /// A result list shorter than the batch leaves the trailing notes without an id.
    pub fn from_results(sections: &[Section], results: &[Option<i64>]) -> Self {
        let notes = sections
            .iter()
            .enumerate()
            .map(|(i, section)| NoteUpload {
                title: section.title.clone(),
                note_id: results.get(i).copied().flatten(),
            })
            .collect();
        Self {
            notes,
            batch_error: None,
        }
    }

    pub fn batch_failed(sections: &[Section], error: impl Into<String>) -> Self {
        Self {
            notes: sections
                .iter()
                .map(|section| NoteUpload {
                    title: section.title.clone(),
                    note_id: None,
                })
                .collect(),
            batch_error: Some(error.into()),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.notes.iter().filter(|n| n.note_id.is_some()).count()
    }

    pub fn failed(&self) -> usize {
        self.notes.len() - self.succeeded()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The file holds no level-4+ sections.
    NothingToDo,
    Uploaded(UploadTally),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> NoteTemplate {
        NoteTemplate::new("Deck", "Basic", "Front", "Back", "a, b").unwrap()
    }

    #[test]
    fn given_comma_list_with_blanks_when_parsing_tags_then_trims_and_drops_empties() {
        assert_eq!(parse_tags(" rust , ,cli,, "), vec!["rust", "cli"]);
    }

    #[test]
    fn given_empty_string_when_parsing_tags_then_returns_empty() {
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn given_all_names_when_creating_template_then_succeeds() {
        let template = template();

        assert_eq!(template.deck, "Deck");
        assert_eq!(template.tags, vec!["a", "b"]);
    }

    #[test]
    fn given_blank_names_when_creating_template_then_reports_each_missing() {
        let result = NoteTemplate::new("Deck", "", "Front", "  ", "");

        match result {
            Err(DomainError::ConfigIncomplete(missing)) => {
                assert_eq!(missing, vec!["note type", "back field"])
            }
            other => panic!("Expected ConfigIncomplete, got {:?}", other),
        }
    }

    #[test]
    fn given_section_when_building_note_then_maps_title_and_body_to_fields() {
        // Arrange
        let section = Section::new("What is Rust?", "A language.\n");

        // Act
        let note = template().note_for(&section);

        // Assert
        assert_eq!(note.deck, "Deck");
        assert_eq!(note.model, "Basic");
        assert_eq!(note.fields["Front"], "What is Rust?");
        assert_eq!(note.fields["Back"], "A language.\n");
        assert_eq!(note.tags, vec!["a", "b"]);
    }

    #[test]
    fn given_same_front_and_back_field_when_building_note_then_body_wins() {
        let template = NoteTemplate::new("Deck", "Basic", "Text", "Text", "").unwrap();

        let note = template.note_for(&Section::new("title", "body"));

        assert_eq!(note.fields.len(), 1);
        assert_eq!(note.fields["Text"], "body");
    }

    #[test]
    fn given_mixed_results_when_tallying_then_counts_aligned_to_input() {
        // Arrange
        let sections = vec![
            Section::new("A", ""),
            Section::new("B", ""),
            Section::new("C", ""),
        ];

        // Act
        let tally = UploadTally::from_results(&sections, &[Some(1), None, Some(3)]);

        // Assert
        assert_eq!(tally.succeeded(), 2);
        assert_eq!(tally.failed(), 1);
        assert_eq!(tally.notes[1].title, "B");
        assert_eq!(tally.notes[1].note_id, None);
    }

    #[test]
    fn given_short_result_list_when_tallying_then_missing_entries_fail() {
        let sections = vec![Section::new("A", ""), Section::new("B", "")];

        let tally = UploadTally::from_results(&sections, &[Some(7)]);

        assert_eq!(tally.succeeded(), 1);
        assert_eq!(tally.failed(), 1);
    }

    #[test]
    fn given_batch_failure_when_tallying_then_every_note_fails() {
        let sections = vec![Section::new("A", ""), Section::new("B", "")];

        let tally = UploadTally::batch_failed(&sections, "boom");

        assert_eq!(tally.succeeded(), 0);
        assert_eq!(tally.failed(), 2);
        assert_eq!(tally.batch_error.as_deref(), Some("boom"));
    }
}
