use crate::application::AnkiGateway;
use crate::constants::ANKICONNECT_API_VERSION;
use crate::domain::{NotePayload, RemoteError};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct Request<'a, P: Serialize> {
    action: &'a str,
    params: P,
    version: u8,
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelFieldNamesParams<'a> {
    model_name: &'a str,
}

#[derive(Debug, Serialize)]
struct AddNotesParams<'a> {
    notes: Vec<WireNote<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireNote<'a> {
    deck_name: &'a str,
    model_name: &'a str,
    fields: &'a BTreeMap<String, String>,
    options: WireNoteOptions,
    tags: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireNoteOptions {
    allow_duplicate: bool,
}

impl<'a> From<&'a NotePayload> for WireNote<'a> {
    fn from(note: &'a NotePayload) -> Self {
        Self {
            deck_name: &note.deck,
            model_name: &note.model,
            fields: &note.fields,
            options: WireNoteOptions {
                allow_duplicate: false,
            },
            tags: &note.tags,
        }
    }
}

/// Blocking client for the AnkiConnect add-on
#[derive(Debug, Clone)]
pub struct AnkiConnectClient {
    client: Client,
    url: String,
}

impl AnkiConnectClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Send one action and unwrap the `{result, error}` envelope.
    #[instrument(level = "debug", skip(self, params))]
    fn invoke<P, T>(&self, action: &str, params: P) -> Result<T, RemoteError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let request = Request {
            action,
            params,
            version: ANKICONNECT_API_VERSION,
        };
        debug!(
            request = %serde_json::to_string(&request).unwrap_or_default(),
            "AnkiConnect request"
        );

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .map_err(|e| transport_error(action, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Http {
                action: action.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| transport_error(action, e))?;
        debug!(response = %body, "AnkiConnect response");

        let envelope: Response = serde_json::from_str(&body).map_err(|e| RemoteError::Malformed {
            action: action.to_string(),
            detail: e.to_string(),
        })?;
        if let Some(message) = envelope.error {
            return Err(RemoteError::Api {
                action: action.to_string(),
                message,
            });
        }
        serde_json::from_value(envelope.result).map_err(|e| RemoteError::Malformed {
            action: action.to_string(),
            detail: e.to_string(),
        })
    }
}

fn transport_error(action: &str, err: reqwest::Error) -> RemoteError {
    let action = action.to_string();
    if err.is_timeout() {
        RemoteError::Timeout { action }
    } else if err.is_connect() || err.is_request() {
        RemoteError::Unreachable {
            action,
            detail: err.to_string(),
        }
    } else {
        RemoteError::Malformed {
            action,
            detail: err.to_string(),
        }
    }
}

impl AnkiGateway for AnkiConnectClient {
    fn deck_names(&mut self) -> Result<Vec<String>, RemoteError> {
        self.invoke("deckNames", json!({}))
    }

    fn model_names(&mut self) -> Result<Vec<String>, RemoteError> {
        self.invoke("modelNames", json!({}))
    }

    fn model_field_names(&mut self, model: &str) -> Result<Vec<String>, RemoteError> {
        let fields: Option<Vec<String>> =
            self.invoke("modelFieldNames", ModelFieldNamesParams { model_name: model })?;
        Ok(fields.unwrap_or_default())
    }

    fn add_notes(&mut self, notes: &[NotePayload]) -> Result<Vec<Option<i64>>, RemoteError> {
        let params = AddNotesParams {
            notes: notes.iter().map(WireNote::from).collect(),
        };
        self.invoke("addNotes", params)
    }
}
