use std::{fmt, io::Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::domain::error::TodoError;

/// Colour palette shared by status lines and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Warning,
    Danger,
    Success,
}

impl Tone {
    pub fn color(&self) -> Color {
        let (r, g, b) = match self {
            Tone::Warning => (0xeb, 0xcb, 0x8b),
            Tone::Danger => (0xbf, 0x61, 0x6a),
            Tone::Success => (0xa3, 0xbe, 0x8c),
        };
        Color::Rgb { r, g, b }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Warning => "[WARNING]",
            Tone::Danger => "[ERROR]",
            Tone::Success => "[SUCCESS]",
        }
    }
}

/// One-line outcome message, e.g. `[SUCCESS] Todo added successfully (id: …)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub tone: Tone,
    pub message: String,
    pub id: Option<String>,
    pub details: Option<String>,
}

impl StatusLine {
    pub fn new(tone: Tone, message: impl Into<String>) -> Self {
        Self { tone, message: message.into(), id: None, details: None }
    }

    pub fn success(message: impl Into<String>) -> Self { Self::new(Tone::Success, message) }
    pub fn warning(message: impl Into<String>) -> Self { Self::new(Tone::Warning, message) }
    pub fn error(message: impl Into<String>) -> Self { Self::new(Tone::Danger, message) }

    pub fn with_id(mut self, id: impl fmt::Display) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_details(mut self, details: impl fmt::Display) -> Self {
        self.details = Some(details.to_string());
        self
    }

    /// Builds the error line for anything the binary can fail with.
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<TodoError>() {
            Some(todo_err) => Self::from(todo_err),
            None => Self::error(err.to_string()),
        }
    }

    fn suffix(&self) -> String {
        let mut suffix = String::new();
        if let Some(id) = &self.id { suffix.push_str(&format!(" (id: {id})")); }
        if let Some(details) = &self.details { suffix.push_str(&format!(" (Details: {details})")); }
        suffix
    }

    pub fn write_styled<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        queue!(
            out,
            Print("\n"),
            SetForegroundColor(self.tone.color()),
            SetAttribute(Attribute::Bold),
            Print(self.tone.label()),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print(format!(" {}", self.message)),
            SetAttribute(Attribute::Dim),
            Print(self.suffix()),
            SetAttribute(Attribute::Reset),
            Print("\n\n"),
        )?;
        out.flush()
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.tone.label(), self.message, self.suffix())
    }
}

impl From<&TodoError> for StatusLine {
    fn from(err: &TodoError) -> Self {
        match err {
            TodoError::StorageUnavailable(source) => StatusLine::error("Database error").with_details(source),
            other => StatusLine::error(other.to_string()),
        }
    }
}
