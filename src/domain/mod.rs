pub mod error;
pub mod note;
pub mod section;

pub use error::{DomainError, RemoteError};
pub use note::{parse_tags, ConversionOutcome, NotePayload, NoteTemplate, NoteUpload, UploadTally};
pub use section::Section;
