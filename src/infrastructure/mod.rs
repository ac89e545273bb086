pub mod anki_connect;
pub mod config;
pub mod section_extractor;

pub use anki_connect::AnkiConnectClient;
pub use config::Config;
