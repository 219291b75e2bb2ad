use std::{fmt, io::Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use super::status::Tone;
use crate::domain::todo::{Todo, DATE_FORMAT};

const HEADERS: [&str; 5] = ["End Date", "Todo", "Priority", "Done", "ID"];
const MIN_WIDTH: usize = 75;
const SEPARATOR: &str = "  ";
const GAP: usize = SEPARATOR.len();

/// Completion counts over a listed result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub done: usize,
    pub total: usize,
}

impl Summary {
    pub fn of(todos: &[Todo]) -> Self {
        Self { done: todos.iter().filter(|t| t.done).count(), total: todos.len() }
    }

    /// Rounded to the nearest integer; 0 for an empty set.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 { return 0; }
        (self.done as f64 * 100.0 / self.total as f64).round() as u32
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} % Completed ( {} / {} )", self.percentage(), self.done, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: [String; 5],
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTable {
    pub rows: Vec<TableRow>,
    pub summary: Summary,
}

enum Line {
    Header(String),
    Rule(String),
    Row(String, bool),
    Footer(String),
}

impl TodoTable {
    pub fn from_todos(todos: &[Todo]) -> Self {
        let rows = todos
            .iter()
            .map(|t| TableRow {
                cells: [
                    t.end_date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_else(|| "-".to_string()),
                    single_line(&t.text),
                    t.priority.to_string(),
                    if t.done { "Yes" } else { "No" }.to_string(),
                    t.id.to_string(),
                ],
                done: t.done,
            })
            .collect();
        Self { rows, summary: Summary::of(todos) }
    }

    // Widths count chars, so alignment assumes single-width characters; wide
    // glyphs (CJK, emoji) push the following columns right.
    fn widths(&self) -> [usize; 5] {
        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(&row.cells) {
                *w = (*w).max(cell.chars().count());
            }
        }
        // Spread leftover space onto the text column to honour the minimum width.
        let used: usize = widths.iter().sum::<usize>() + GAP * (widths.len() - 1);
        if used < MIN_WIDTH { widths[1] += MIN_WIDTH - used; }
        widths
    }

    fn lines(&self) -> Vec<Line> {
        let widths = self.widths();
        let join = |cells: &[&str]| {
            cells
                .iter()
                .zip(widths)
                .map(|(c, w)| format!("{c:<w$}"))
                .collect::<Vec<_>>()
                .join(SEPARATOR)
                .trim_end()
                .to_string()
        };
        let total_width = widths.iter().sum::<usize>() + GAP * (widths.len() - 1);

        let mut lines = vec![Line::Header(join(&HEADERS)), Line::Rule("-".repeat(total_width))];
        for row in &self.rows {
            let cells: Vec<&str> = row.cells.iter().map(String::as_str).collect();
            lines.push(Line::Row(join(&cells), row.done));
        }
        lines.push(Line::Rule("-".repeat(total_width)));
        lines.push(Line::Footer(format!("{:>total_width$}", self.summary.to_string())));
        lines
    }

    pub fn write_styled<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        queue!(out, Print("\n"))?;
        for line in self.lines() {
            match line {
                Line::Header(text) => queue!(
                    out,
                    SetForegroundColor(Color::Magenta),
                    SetAttribute(Attribute::Bold),
                    Print(text),
                    SetAttribute(Attribute::Reset),
                    ResetColor,
                )?,
                Line::Rule(text) => queue!(out, SetForegroundColor(Tone::Warning.color()), Print(text), ResetColor)?,
                Line::Row(text, done) => {
                    let tone = if done { Tone::Success } else { Tone::Danger };
                    queue!(out, SetForegroundColor(tone.color()), Print(text), ResetColor)?
                }
                Line::Footer(text) => queue!(out, SetAttribute(Attribute::Bold), Print(text), SetAttribute(Attribute::Reset))?,
            }
            queue!(out, Print("\n"))?;
        }
        queue!(out, Print("\n"))?;
        out.flush()
    }
}

/// Control characters (newlines, tabs) would break the row layout.
fn single_line(text: &str) -> String {
    text.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}

impl fmt::Display for TodoTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            let (Line::Header(text) | Line::Rule(text) | Line::Row(text, _) | Line::Footer(text)) = line;
            writeln!(f, "{text}")?;
        }
        Ok(())
    }
}
