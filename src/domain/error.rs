use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single AnkiConnect call.
///
/// Callers treat every variant the same way ("call failed"); the variant only
/// decides what ends up in the log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("AnkiConnect call '{action}' timed out")]
    Timeout { action: String },
    #[error("Cannot reach AnkiConnect for '{action}': {detail}")]
    Unreachable { action: String, detail: String },
    #[error("AnkiConnect call '{action}' returned HTTP {status}")]
    Http { action: String, status: u16 },
    #[error("Malformed AnkiConnect response for '{action}': {detail}")]
    Malformed { action: String, detail: String },
    #[error("AnkiConnect rejected '{action}': {message}")]
    Api { action: String, message: String },
}

impl RemoteError {
    pub fn action(&self) -> &str {
        match self {
            RemoteError::Timeout { action }
            | RemoteError::Unreachable { action, .. }
            | RemoteError::Http { action, .. }
            | RemoteError::Malformed { action, .. }
            | RemoteError::Api { action, .. } => action,
        }
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration incomplete, missing: {}", .0.join(", "))]
    ConfigIncomplete(Vec<&'static str>),
    #[error("Cannot read markdown file {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Markdown file {} is not valid UTF-8", path.display())]
    SourceDecode { path: PathBuf },
    #[error("AnkiConnect is not reachable. Is Anki running with the AnkiConnect add-on?")]
    RemoteUnreachable(#[source] RemoteError),
    #[error(transparent)]
    RemoteCall(#[from] RemoteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_missing_fields_when_formatting_then_lists_all_names() {
        let err = DomainError::ConfigIncomplete(vec!["deck", "back field"]);

        assert_eq!(
            err.to_string(),
            "Configuration incomplete, missing: deck, back field"
        );
    }

    #[test]
    fn given_api_error_when_asking_action_then_returns_action_name() {
        let err = RemoteError::Api {
            action: "addNotes".to_string(),
            message: "model was not found".to_string(),
        };

        assert_eq!(err.action(), "addNotes");
        assert!(err.to_string().contains("model was not found"));
    }
}
