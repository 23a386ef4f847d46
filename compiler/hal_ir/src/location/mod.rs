//! Source locations.
//!
//! HAL/S input is line oriented (one card per line), so positions are kept
//! as line and column rather than byte offsets. A [`Location`] is 12 bytes
//! and `Copy`; the file or member it refers to is named by the
//! [`SourceMap`].

use std::fmt;

use crate::SourceId;

/// A 1-based line/column position in a named source.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Location {
    pub source: SourceId,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub const fn new(source: SourceId, line: u32, column: u32) -> Self {
        Location {
            source,
            line,
            column,
        }
    }

    /// Position inside text that has no file behind it.
    pub const fn synthetic(line: u32, column: u32) -> Self {
        Location::new(SourceId::SYNTHETIC, line, column)
    }

    /// Same source and line, different column.
    #[must_use]
    pub const fn with_column(self, column: u32) -> Self {
        Location { column, ..self }
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::synthetic(1, 1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// What kind of text a source entry holds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SourceKind {
    /// The compilation unit's main input.
    Primary,
    /// A member spliced in by an `INCLUDE` directive.
    Member,
}

#[derive(Clone, Debug)]
struct SourceEntry {
    name: String,
    kind: SourceKind,
}

/// Names every source a compilation unit has read from.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    entries: Vec<SourceEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        SourceMap::default()
    }

    /// Register a source and get its handle.
    pub fn add(&mut self, name: impl Into<String>, kind: SourceKind) -> SourceId {
        let id = SourceId::from_index(self.entries.len()).unwrap_or(SourceId::SYNTHETIC);
        self.entries.push(SourceEntry {
            name: name.into(),
            kind,
        });
        id
    }

    pub fn name(&self, id: SourceId) -> &str {
        if id.is_synthetic() {
            return "<macro text>";
        }
        self.entries
            .get(id.index())
            .map_or("<unknown>", |entry| entry.name.as_str())
    }

    pub fn kind(&self, id: SourceId) -> Option<SourceKind> {
        self.entries.get(id.index()).map(|entry| entry.kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render a location as `name:line:column`.
    pub fn describe(&self, location: Location) -> String {
        format!("{}:{}", self.name(location.source), location)
    }
}

#[cfg(test)]
mod tests;
