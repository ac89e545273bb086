// src/util/testing.rs

use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::AnkiGateway;
use crate::domain::{NotePayload, RemoteError};

enum AddBehavior {
    /// Hand out increasing ids for every note
    AcceptAll,
    Results(Vec<Option<i64>>),
    Fail(RemoteError),
}

/// In-memory stand-in for AnkiConnect
///
/// Records every action it receives so tests can assert on what was (not) sent.
///
/// # Examples
///
/// ```
/// use md2anki::util::testing::MockAnkiGateway;
///
/// let mock = MockAnkiGateway::builder()
///     .with_deck("Default")
///     .with_model("Basic", &["Front", "Back"])
///     .with_add_results(vec![Some(1), None])
///     .build();
/// ```
pub struct MockAnkiGateway {
    decks: Vec<String>,
    unreachable: bool,
    models: Vec<(String, Vec<String>)>,
    add_behavior: AddBehavior,
    calls: Vec<String>,
    submitted: Vec<NotePayload>,
}

impl MockAnkiGateway {
    pub fn builder() -> MockAnkiGatewayBuilder {
        MockAnkiGatewayBuilder::new()
    }

    /// Action names in call order
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn call_count(&self, action: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == action).count()
    }

    /// Every payload passed to `add_notes`
    pub fn submitted(&self) -> &[NotePayload] {
        &self.submitted
    }

    fn record(&mut self, action: &str) -> Result<(), RemoteError> {
        self.calls.push(action.to_string());
        if self.unreachable {
            return Err(RemoteError::Unreachable {
                action: action.to_string(),
                detail: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

impl AnkiGateway for MockAnkiGateway {
    fn deck_names(&mut self) -> Result<Vec<String>, RemoteError> {
        self.record("deckNames")?;
        Ok(self.decks.clone())
    }

    fn model_names(&mut self) -> Result<Vec<String>, RemoteError> {
        self.record("modelNames")?;
        Ok(self.models.iter().map(|(name, _)| name.clone()).collect())
    }

    fn model_field_names(&mut self, model: &str) -> Result<Vec<String>, RemoteError> {
        self.record("modelFieldNames")?;
        self.models
            .iter()
            .find(|(name, _)| name == model)
            .map(|(_, fields)| fields.clone())
            .ok_or_else(|| RemoteError::Api {
                action: "modelFieldNames".to_string(),
                message: "model was not found".to_string(),
            })
    }

    fn add_notes(&mut self, notes: &[NotePayload]) -> Result<Vec<Option<i64>>, RemoteError> {
        self.record("addNotes")?;
        self.submitted.extend_from_slice(notes);
        match &self.add_behavior {
            AddBehavior::AcceptAll => Ok((0..notes.len()).map(|i| Some(1000 + i as i64)).collect()),
            AddBehavior::Results(results) => Ok(results.clone()),
            AddBehavior::Fail(err) => Err(err.clone()),
        }
    }
}

/// Builder for MockAnkiGateway
pub struct MockAnkiGatewayBuilder {
    decks: Vec<String>,
    unreachable: bool,
    models: HashMap<String, Vec<String>>,
    model_order: Vec<String>,
    add_behavior: AddBehavior,
}

impl MockAnkiGatewayBuilder {
    pub fn new() -> Self {
        Self {
            decks: vec![],
            unreachable: false,
            models: HashMap::new(),
            model_order: vec![],
            add_behavior: AddBehavior::AcceptAll,
        }
    }

    pub fn with_deck(mut self, name: &str) -> Self {
        self.decks.push(name.to_string());
        self
    }

    /// Every call fails as if Anki were not running
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn with_model(mut self, name: &str, fields: &[&str]) -> Self {
        if !self.models.contains_key(name) {
            self.model_order.push(name.to_string());
        }
        self.models.insert(
            name.to_string(),
            fields.iter().map(|f| f.to_string()).collect(),
        );
        self
    }

    /// Configure the per-note ids returned by add_notes
    pub fn with_add_results(mut self, results: Vec<Option<i64>>) -> Self {
        self.add_behavior = AddBehavior::Results(results);
        self
    }

    /// Configure add_notes to fail as a whole
    pub fn with_add_failure(mut self, error: RemoteError) -> Self {
        self.add_behavior = AddBehavior::Fail(error);
        self
    }

    pub fn build(mut self) -> MockAnkiGateway {
        let models = self
            .model_order
            .iter()
            .map(|name| {
                let fields = self.models.remove(name).unwrap_or_default();
                (name.clone(), fields)
            })
            .collect();
        MockAnkiGateway {
            decks: self.decks,
            unreachable: self.unreachable,
            models,
            add_behavior: self.add_behavior,
            calls: vec![],
            submitted: vec![],
        }
    }
}

impl Default for MockAnkiGatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "mockito"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
