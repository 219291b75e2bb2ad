//! Terminal rendering of command outcomes. Everything here is pure apart
//! from writing to the `Write` handed in.

pub mod status;
pub mod table;

use std::io::Write;

pub use status::{StatusLine, Tone};
pub use table::{Summary, TodoTable};

/// What a command prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Status(StatusLine),
    Table(TodoTable),
}

impl Report {
    pub fn write_styled<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        match self {
            Report::Status(line) => line.write_styled(out),
            Report::Table(table) => table.write_styled(out),
        }
    }

    pub fn write_plain<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        match self {
            Report::Status(line) => writeln!(out, "{line}"),
            Report::Table(table) => write!(out, "{table}"),
        }
    }
}
