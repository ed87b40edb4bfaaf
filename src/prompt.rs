//! Operator prompts.
//!
//! The installer asks questions through the [`Prompt`] trait. The terminal
//! implementation is generic over its reader and writer so it can be driven
//! from tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use serde::Serialize;

/// Kind of answer a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    FilePath,
}

/// A question put to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRequest {
    pub description: String,
    #[serde(rename = "type")]
    pub kind: PromptKind,
    pub required: bool,
}

impl PromptRequest {
    /// A required filesystem path question.
    pub fn filepath(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            kind: PromptKind::FilePath,
            required: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptAnswer {
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("input closed before an answer was given")]
    Closed,

    #[error("prompting is disabled; set the nad install path in the configuration")]
    NonInteractive,

    #[error("prompt I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Asks the operator a question and returns the answer.
///
/// Calls are synchronous; [`TerminalPrompt`] blocks until a line is read.
pub trait Prompt {
    fn question(&mut self, request: &PromptRequest) -> Result<PromptAnswer, PromptError>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn question(&mut self, request: &PromptRequest) -> Result<PromptAnswer, PromptError> {
        (**self).question(request)
    }
}

impl<P: Prompt + ?Sized> Prompt for Box<P> {
    fn question(&mut self, request: &PromptRequest) -> Result<PromptAnswer, PromptError> {
        (**self).question(request)
    }
}

/// Line-oriented prompt on a reader/writer pair, normally stdin/stderr.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn question(&mut self, request: &PromptRequest) -> Result<PromptAnswer, PromptError> {
        writeln!(self.output, "{}", request.description)?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PromptError::Closed);
            }

            let answer = line.trim();
            if answer.is_empty() && request.required {
                writeln!(self.output, "An answer is required.")?;
                continue;
            }

            return Ok(PromptAnswer {
                path: PathBuf::from(answer),
            });
        }
    }
}

/// Refuses every question.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractive;

impl Prompt for NonInteractive {
    fn question(&mut self, _request: &PromptRequest) -> Result<PromptAnswer, PromptError> {
        Err(PromptError::NonInteractive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_terminal_prompt_reads_trimmed_answer() {
        let mut out = Vec::new();
        let mut prompt = TerminalPrompt::new(Cursor::new("  /usr/local/circonus \n"), &mut out);

        let answer = prompt
            .question(&PromptRequest::filepath("Where is nad?"))
            .expect("answer");
        assert_eq!(answer.path, PathBuf::from("/usr/local/circonus"));

        let shown = String::from_utf8(out).expect("utf8");
        assert!(shown.starts_with("Where is nad?\n"));
    }

    #[test]
    fn test_terminal_prompt_reasks_on_blank_required_answer() {
        let mut out = Vec::new();
        let mut prompt = TerminalPrompt::new(Cursor::new("\n   \n/opt/nad\n"), &mut out);

        let answer = prompt
            .question(&PromptRequest::filepath("Where is nad?"))
            .expect("answer");
        assert_eq!(answer.path, PathBuf::from("/opt/nad"));

        let shown = String::from_utf8(out).expect("utf8");
        assert_eq!(shown.matches("An answer is required.").count(), 2);
    }

    #[test]
    fn test_terminal_prompt_eof() {
        let mut prompt = TerminalPrompt::new(Cursor::new(""), Vec::new());
        let err = prompt
            .question(&PromptRequest::filepath("Where is nad?"))
            .expect_err("eof");
        assert!(matches!(err, PromptError::Closed));
    }

    #[test]
    fn test_non_interactive_refuses() {
        let err = NonInteractive
            .question(&PromptRequest::filepath("Where is nad?"))
            .expect_err("refused");
        assert!(matches!(err, PromptError::NonInteractive));
    }

    #[test]
    fn test_request_wire_shape() {
        let json = serde_json::to_value(PromptRequest::filepath("q")).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"description": "q", "type": "filepath", "required": true})
        );
    }
}
