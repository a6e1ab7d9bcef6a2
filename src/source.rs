use serde::{Deserialize, Serialize};

/// A single line of source text, terminator included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    text: String,
}

impl SourceLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build a line from its content and the terminator to append
    pub fn with_terminator(content: &str, terminator: &str) -> Self {
        let mut text = String::with_capacity(content.len() + terminator.len());
        text.push_str(content);
        text.push_str(terminator);
        Self { text }
    }

    /// Full text, terminator included
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Text without its terminator
    pub fn content(&self) -> &str {
        &self.text[..self.text.len() - self.terminator().len()]
    }

    pub fn terminator(&self) -> &str {
        if self.text.ends_with("\r\n") {
            "\r\n"
        } else if self.text.ends_with('\n') {
            "\n"
        } else if self.text.ends_with('\r') {
            "\r"
        } else {
            ""
        }
    }

    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// Append `terminator` if the line has none
    pub fn ensure_terminated(&mut self, terminator: &str) {
        if self.terminator().is_empty() {
            self.text.push_str(terminator);
        }
    }
}

/// Split text into lines, keeping `\n`, `\r\n` and `\r` terminators attached
pub fn split_lines(text: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(SourceLine::new(&text[start..=i]));
                start = i + 1;
            }
            b'\r' => {
                let end = if bytes.get(i + 1) == Some(&b'\n') { i + 1 } else { i };
                lines.push(SourceLine::new(&text[start..=end]));
                i = end;
                start = end + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < bytes.len() {
        lines.push(SourceLine::new(&text[start..]));
    }

    lines
}

pub fn join_lines(lines: &[SourceLine]) -> String {
    lines.iter().map(SourceLine::as_str).collect()
}

/// First terminator used in the file, `\n` if there is none
pub fn detect_terminator(lines: &[SourceLine]) -> &'static str {
    lines
        .iter()
        .map(SourceLine::terminator)
        .find(|t| !t.is_empty())
        .map(|t| match t {
            "\r\n" => "\r\n",
            "\r" => "\r",
            _ => "\n",
        })
        .unwrap_or("\n")
}
