// src/constants.rs
//
// Application-wide constants for talking to AnkiConnect and locating configuration.

/// Default AnkiConnect endpoint.
///
/// The add-on listens on localhost only unless the user reconfigures it.
pub const DEFAULT_ANKICONNECT_URL: &str = "http://127.0.0.1:8765";

/// AnkiConnect API version sent with every request.
///
/// Version 6 is the first one returning the `{result, error}` envelope for every action.
pub const ANKICONNECT_API_VERSION: u8 = 6;

/// Per-call timeout in seconds. A timed out call is not retried.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Heading marker depth range that turns a heading into a card.
pub const MIN_CARD_HEADING_DEPTH: usize = 4;
pub const MAX_CARD_HEADING_DEPTH: usize = 6;

/// Directory name below the platform config dir.
pub const CONFIG_DIR_NAME: &str = "md2anki";
pub const CONFIG_FILE_NAME: &str = "config.toml";
