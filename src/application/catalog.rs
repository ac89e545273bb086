use crate::application::AnkiGateway;
use crate::domain::{DomainError, RemoteError};
use tracing::{debug, instrument, warn};

/// Preferred front field names, in order
const FRONT_FIELD_NAMES: &[&str] = &["Front", "正面"];
/// Preferred back field names, in order
const BACK_FIELD_NAMES: &[&str] = &["Back", "背面"];

/// Listing use cases: decks, note types and their fields
pub struct Catalog<G: AnkiGateway> {
    gateway: G,
}

impl<G: AnkiGateway> Catalog<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn deck_names(&mut self) -> Result<Vec<String>, DomainError> {
        Ok(self.gateway.deck_names()?)
    }

    pub fn model_names(&mut self) -> Result<Vec<String>, DomainError> {
        Ok(self.gateway.model_names()?)
    }

    /// Field names of `model`.
    ///
    /// Empty for a blank name or a note type AnkiConnect does not know. Transport
    /// failures are errors.
    #[instrument(level = "debug", skip(self))]
    pub fn field_names(&mut self, model: &str) -> Result<Vec<String>, DomainError> {
        if model.trim().is_empty() {
            debug!("No note type given, skipping field lookup");
            return Ok(vec![]);
        }
        match self.gateway.model_field_names(model) {
            Ok(fields) => Ok(fields),
            Err(RemoteError::Api { message, .. }) => {
                warn!(model, message = %message, "Note type rejected by AnkiConnect");
                Ok(vec![])
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSuggestion {
    pub front: Option<String>,
    pub back: Option<String>,
}

/// Pick front and back fields from a note type's field list.
///
/// Known names win; otherwise the first field is the front and the second (or the
/// only) field is the back.
pub fn suggest_fields(fields: &[String]) -> FieldSuggestion {
    let named = |candidates: &[&str]| {
        candidates
            .iter()
            .find(|name| fields.iter().any(|f| f.as_str() == **name))
            .map(|name| name.to_string())
    };

    let front = named(FRONT_FIELD_NAMES).or_else(|| fields.first().cloned());
    let back = named(BACK_FIELD_NAMES).or_else(|| fields.get(1).or(fields.first()).cloned());
    FieldSuggestion { front, back }
}
