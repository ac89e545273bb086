use crate::application::LogSink;
use crate::domain::{ConversionOutcome, Section};
use std::fmt;
use std::io::Write;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Final message for the user after a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Info => "INFO",
            NoticeLevel::Warning => "WARNING",
            NoticeLevel::Error => "ERROR",
        };
        write!(f, "[{}] {}: {}", tag, self.title, self.message)
    }
}

pub fn summarize(outcome: &ConversionOutcome) -> Notice {
    match outcome {
        ConversionOutcome::NothingToDo => Notice::new(
            NoticeLevel::Info,
            "Nothing to upload",
            "No level 4+ headings found in the markdown file.",
        ),
        ConversionOutcome::Uploaded(tally) => match &tally.batch_error {
            Some(error) => Notice::new(
                NoticeLevel::Error,
                "Upload failed",
                format!("None of the {} notes were added: {}", tally.failed(), error),
            ),
            None if tally.failed() > 0 => Notice::new(
                NoticeLevel::Warning,
                "Some notes failed",
                format!(
                    "Added {} notes. {} notes were rejected, check the log and the AnkiConnect console.",
                    tally.succeeded(),
                    tally.failed()
                ),
            ),
            None => Notice::new(
                NoticeLevel::Info,
                "Done",
                format!("Added {} notes to Anki.", tally.succeeded()),
            ),
        },
    }
}

/// Writes run log lines to a terminal or any other writer
pub struct ConsoleLog<W: Write> {
    out: W,
}

impl<W: Write> ConsoleLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> LogSink for ConsoleLog<W> {
    fn log(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{}", message) {
            warn!(error = %e, "Failed to write log line");
        }
    }
}

/// Human readable preview of extracted sections
pub fn render_sections(sections: &[Section]) -> String {
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        out.push_str(&format!("#{} {}\n", i + 1, section.title));
        for line in section.body.lines() {
            out.push_str(&format!("    {}\n", line));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UploadTally;

    fn sections(titles: &[&str]) -> Vec<Section> {
        titles.iter().map(|t| Section::new(*t, "")).collect()
    }

    #[test]
    fn given_nothing_to_do_when_summarizing_then_info_notice() {
        let notice = summarize(&ConversionOutcome::NothingToDo);

        assert_eq!(notice.level, NoticeLevel::Info);
    }

    #[test]
    fn given_all_added_when_summarizing_then_info_with_count() {
        let tally = UploadTally::from_results(&sections(&["A", "B"]), &[Some(1), Some(2)]);

        let notice = summarize(&ConversionOutcome::Uploaded(tally));

        assert_eq!(notice.level, NoticeLevel::Info);
        assert!(notice.message.contains("Added 2 notes"));
    }

    #[test]
    fn given_partial_failure_when_summarizing_then_warning() {
        let tally = UploadTally::from_results(&sections(&["A", "B"]), &[Some(1), None]);

        let notice = summarize(&ConversionOutcome::Uploaded(tally));

        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("1 notes were rejected"));
    }

    #[test]
    fn given_batch_failure_when_summarizing_then_error() {
        let tally = UploadTally::batch_failed(&sections(&["A"]), "timed out");

        let notice = summarize(&ConversionOutcome::Uploaded(tally));

        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(
            notice.to_string(),
            "[ERROR] Upload failed: None of the 1 notes were added: timed out"
        );
    }

    #[test]
    fn given_console_log_when_logging_then_writes_lines() {
        let mut out = Vec::new();
        let mut log = ConsoleLog::new(&mut out);

        log.log("first");
        log.log("second");

        assert_eq!(String::from_utf8(out).unwrap(), "first\nsecond\n");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn given_closed_output_when_logging_then_keeps_going() {
        let mut log = ConsoleLog::new(ClosedPipe);

        log.log("first");
        log.log("second");
    }

    #[test]
    fn given_sections_when_rendering_then_indents_bodies() {
        let sections = vec![Section::new("Q", "line1\nline2\n"), Section::new("R", "")];

        let text = render_sections(&sections);

        assert_eq!(text, "#1 Q\n    line1\n    line2\n#2 R\n");
    }
}
