pub mod catalog;
pub mod converter;
pub mod gateway;
pub mod log_sink;

pub use catalog::{suggest_fields, Catalog, FieldSuggestion};
pub use converter::{ConvertRequest, Converter};
pub use gateway::AnkiGateway;
pub use log_sink::LogSink;
