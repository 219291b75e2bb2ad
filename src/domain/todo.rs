use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::NaiveDate;
use uuid::Uuid;

use super::error::{TodoError, ValidationError};

/// Format accepted for end dates on input and used when storing them.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for TodoId {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl FromStr for TodoId {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(TodoId)
            .map_err(|_| TodoError::InvalidIdentifier(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ValidationError::InvalidPriority(s.to_string())),
        }
    }
}

/// The per-user partition every operation is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// User names are case-insensitive: `Alice` and `alice` share records.
    pub fn parse(user: &str) -> Result<Self, ValidationError> {
        let user = user.trim();
        if user.is_empty() {
            return Err(ValidationError::EmptyUser);
        }
        Ok(Self(user.to_lowercase()))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub priority: Priority,
    pub end_date: Option<NaiveDate>,
    pub done: bool,
}

/// Raw input for `add`, validated by the store before anything is written.
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub text: String,
    pub priority: Priority,
    pub end_date: Option<String>,
}

/// A validated record ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodo {
    pub text: String,
    pub priority: Priority,
    pub end_date: Option<NaiveDate>,
}

impl TryFrom<NewTodo> for CreateTodo {
    type Error = ValidationError;

    fn try_from(input: NewTodo) -> Result<Self, Self::Error> {
        // The date is checked first so a bad deadline is reported even when the text is fine.
        let end_date = input.end_date.as_deref().map(parse_end_date).transpose()?;
        let text = input.text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(CreateTodo { text: text.to_string(), priority: input.priority, end_date })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub sort: bool,
    pub priority: Option<Priority>,
    pub done: Option<bool>,
}

impl ListQuery {
    pub fn matches(&self, todo: &Todo) -> bool {
        self.priority.is_none_or(|p| todo.priority == p) && self.done.is_none_or(|d| todo.done == d)
    }
}

/// Parses a strict `YYYY-MM-DD` date. Years must be exactly four digits so the
/// stored text sorts in date order.
pub fn parse_end_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate(input.to_string());
    let trimmed = input.trim();
    let well_formed = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())
}

/// Ascending by end date, todos without a deadline last.
pub fn cmp_end_date(a: &Todo, b: &Todo) -> Ordering {
    match (a.end_date, b.end_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
