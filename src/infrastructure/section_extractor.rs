use crate::constants::{MAX_CARD_HEADING_DEPTH, MIN_CARD_HEADING_DEPTH};
use crate::domain::{DomainError, Section};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use tracing::{debug, info, instrument};

lazy_static! {
    static ref CARD_HEADING_REGEX: Regex = Regex::new(&format!(
        r"^(#{{{},{}}})\s+(.*)",
        MIN_CARD_HEADING_DEPTH, MAX_CARD_HEADING_DEPTH
    ))
    .expect("Failed to compile card heading regex");
}

/// Read a markdown file and split it into card sections.
///
/// The file must be UTF-8; a leading byte order mark is ignored.
#[instrument(level = "debug")]
pub fn read_sections(path: &Path) -> Result<Vec<Section>, DomainError> {
    let bytes = std::fs::read(path).map_err(|source| DomainError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| DomainError::SourceDecode {
        path: path.to_path_buf(),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    info!(path = %path.display(), lines = text.lines().count(), "Read markdown file");

    let sections = extract_sections(text);
    info!(count = sections.len(), "Extracted level 4+ sections");
    Ok(sections)
}

/// Split markdown text into sections headed by `####`, `#####` or `######`.
///
/// Body lines keep their original terminators. Text before the first card heading
/// and shallower headings are skipped; they never open or close a section.
pub fn extract_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;

    for (index, raw_line) in text.split_inclusive('\n').enumerate() {
        let line = raw_line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(raw_line);

        if let Some(caps) = CARD_HEADING_REGEX.captures(line) {
            let depth = caps.get(1).map_or(0, |m| m.as_str().len());
            let title = caps.get(2).map_or("", |m| m.as_str()).trim();
            debug!(line = index + 1, depth, title, "Matched card heading");

            close_section(&mut sections, current.take());
            current = Some(Section::new(title, String::new()));
        } else if let Some(section) = current.as_mut() {
            section.body.push_str(raw_line);
        }
    }
    close_section(&mut sections, current);

    sections
}

fn close_section(sections: &mut Vec<Section>, section: Option<Section>) {
    match section {
        Some(section) if !section.is_blank() => sections.push(section),
        Some(_) => debug!("Dropping section without title and content"),
        None => {}
    }
}
