use crate::application::{suggest_fields, AnkiGateway, Catalog, LogSink};
use crate::domain::{ConversionOutcome, DomainError, NotePayload, NoteTemplate, UploadTally};
use crate::infrastructure::section_extractor;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Everything the user supplies for one conversion run, unvalidated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertRequest {
    pub path: PathBuf,
    pub deck: String,
    pub model: String,
    pub front_field: String,
    pub back_field: String,
    /// Comma separated
    pub tags: String,
}

/// Main use case: turn the level-4+ sections of a markdown file into Anki notes
pub struct Converter<G: AnkiGateway> {
    gateway: G,
}

impl<G: AnkiGateway> Converter<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    #[cfg(test)]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Fill empty front/back field names from the note type, the way picking a model
    /// in a form preselects its fields.
    ///
    /// Makes no remote call while the deck or note type is missing; `convert` reports
    /// those. A failed lookup means AnkiConnect is unreachable, an unknown note type
    /// leaves the names empty.
    #[instrument(level = "debug", skip(self, request, log))]
    pub fn fill_missing_fields(
        &mut self,
        request: &mut ConvertRequest,
        log: &mut dyn LogSink,
    ) -> Result<(), DomainError> {
        let front_missing = request.front_field.trim().is_empty();
        let back_missing = request.back_field.trim().is_empty();
        if !front_missing && !back_missing {
            return Ok(());
        }
        if request.deck.trim().is_empty() || request.model.trim().is_empty() {
            debug!("Deck or note type missing, skipping field lookup");
            return Ok(());
        }

        let fields = Catalog::new(&mut self.gateway)
            .field_names(&request.model)
            .map_err(|e| match e {
                DomainError::RemoteCall(e) => DomainError::RemoteUnreachable(e),
                other => other,
            })
            .inspect_err(|e| log.log(&format!("AnkiConnect connection failed: {}", e)))?;
        if fields.is_empty() {
            log.log(&format!(
                "No fields found for note type '{}', pass --front and --back",
                request.model
            ));
            return Ok(());
        }

        let suggestion = suggest_fields(&fields);
        if let (true, Some(front)) = (front_missing, suggestion.front) {
            log.log(&format!("Using front field '{}'", front));
            request.front_field = front;
        }
        if let (true, Some(back)) = (back_missing, suggestion.back) {
            log.log(&format!("Using back field '{}'", back));
            request.back_field = back;
        }
        Ok(())
    }

    /// Validate, probe AnkiConnect, extract sections and upload them in one batch.
    ///
    /// Returns an error when nothing was uploaded because of configuration, file or
    /// connectivity problems. A failed batch call is not an error here: the tally
    /// then counts every note as failed and carries the reason.
    #[instrument(level = "debug", skip(self, log))]
    pub fn convert(
        &mut self,
        request: &ConvertRequest,
        log: &mut dyn LogSink,
    ) -> Result<ConversionOutcome, DomainError> {
        let template = NoteTemplate::new(
            &request.deck,
            &request.model,
            &request.front_field,
            &request.back_field,
            &request.tags,
        )
        .inspect_err(|e| log.log(&format!("Error: {}", e)))?;
        debug!(?template, "Validated note template");

        log.log("Checking AnkiConnect connection...");
        if let Err(e) = self.gateway.deck_names() {
            warn!(action = e.action(), error = %e, "Connectivity probe failed");
            log.log(&format!("AnkiConnect connection failed: {}", e));
            return Err(DomainError::RemoteUnreachable(e));
        }
        log.log("AnkiConnect connection OK");

        log.log(&format!("Parsing markdown file: {}", request.path.display()));
        let sections = section_extractor::read_sections(&request.path).inspect_err(|e| {
            log.log(&format!("Error: {}", e));
            log.log("Markdown parsing failed, nothing uploaded");
        })?;

        if sections.is_empty() {
            log.log(&format!(
                "No level 4+ headings found in '{}', nothing to upload",
                request.path.display()
            ));
            return Ok(ConversionOutcome::NothingToDo);
        }

        let notes: Vec<NotePayload> = sections.iter().map(|s| template.note_for(s)).collect();
        log.log(&format!("Adding {} sections to Anki...", notes.len()));

        let tally = match self.gateway.add_notes(&notes) {
            Ok(results) => {
                if results.len() != notes.len() {
                    warn!(
                        submitted = notes.len(),
                        returned = results.len(),
                        "addNotes returned a result list of unexpected length"
                    );
                }
                UploadTally::from_results(&sections, &results)
            }
            Err(e) => {
                warn!(action = e.action(), error = %e, "Batch note creation failed");
                log.log(&format!("Batch 'addNotes' call failed: {}", e));
                UploadTally::batch_failed(&sections, e.to_string())
            }
        };

        if tally.batch_error.is_none() {
            for note in &tally.notes {
                match note.note_id {
                    Some(id) => log.log(&format!("Added note '{}' (ID: {})", note.title, id)),
                    None => log.log(&format!(
                        "Failed to add note '{}' (duplicate or field problem, see AnkiConnect for details)",
                        note.title
                    )),
                }
            }
        }

        info!(
            added = tally.succeeded(),
            failed = tally.failed(),
            "Upload finished"
        );
        log.log(&format!(
            "Done. Added: {}, failed: {}",
            tally.succeeded(),
            tally.failed()
        ));
        Ok(ConversionOutcome::Uploaded(tally))
    }
}
