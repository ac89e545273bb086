use crate::domain::{NotePayload, RemoteError};

/// The AnkiConnect actions the converter relies on.
pub trait AnkiGateway {
    fn deck_names(&mut self) -> Result<Vec<String>, RemoteError>;

    fn model_names(&mut self) -> Result<Vec<String>, RemoteError>;

    /// Field names of a note type, empty when Anki does not know the model
    fn model_field_names(&mut self, model: &str) -> Result<Vec<String>, RemoteError>;

    /// Create notes in one batch. The result holds one entry per payload, in order;
    /// `None` marks a note Anki refused (duplicate, unknown field, ...).
    fn add_notes(&mut self, notes: &[NotePayload]) -> Result<Vec<Option<i64>>, RemoteError>;
}

impl<G: AnkiGateway + ?Sized> AnkiGateway for &mut G {
    fn deck_names(&mut self) -> Result<Vec<String>, RemoteError> {
        (**self).deck_names()
    }

    fn model_names(&mut self) -> Result<Vec<String>, RemoteError> {
        (**self).model_names()
    }

    fn model_field_names(&mut self, model: &str) -> Result<Vec<String>, RemoteError> {
        (**self).model_field_names(model)
    }

    fn add_notes(&mut self, notes: &[NotePayload]) -> Result<Vec<Option<i64>>, RemoteError> {
        (**self).add_notes(notes)
    }
}
