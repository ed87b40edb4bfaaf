//! Reassembly of chunked script output into complete lines.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

/// Line break accepted in script output: `\n` or `\r\n`.
static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n").expect("line break pattern is valid"));

/// Pending output of one script that has not yet been terminated by a line break.
///
/// Bytes are kept undecoded until a full line is available, so a multi-byte
/// character split across two chunks is decoded intact.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` and returns every line it completed, in output order.
    ///
    /// Whatever follows the last line break stays pending. It is either empty
    /// or a fragment waiting for more data.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        for brk in LINE_BREAK.find_iter(&self.pending) {
            lines.push(String::from_utf8_lossy(&self.pending[start..brk.start()]).into_owned());
            start = brk.end();
        }
        self.pending.drain(..start);

        lines
    }

    /// Bytes received after the last line break.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Consumes the buffer at process close. The returned fragment is never a line.
    pub fn finish(self) -> Vec<u8> {
        self.pending
    }
}
