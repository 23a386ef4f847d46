//! Program text extraction.
//!
//! [`SourceReader`] turns raw lines into [`PhysicalLine`]s: the part of a
//! line that holds program text, stamped with where it came from. In card
//! format column 1 holds the card type and program text starts in column 2.
//! `D INCLUDE name` cards splice a library member in place.

use std::path::Path;

use hal_diagnostic::{Aborted, Diagnostic, DiagnosticSink, ErrorCode};
use hal_ir::{Location, SourceId, SourceKind, SourceMap};
use tracing::debug;

use crate::library::MemberLibrary;
use crate::source::{FileSource, LineSource, SourceError, SourceLine, TextSource};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum LineFormat {
    /// Column 1 is the card type.
    #[default]
    Cards,
    /// Every line is program text.
    Free,
}

/// Program text of one line.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PhysicalLine {
    pub text: String,
    /// Position of the first character of `text`.
    pub start: Location,
}

/// One pull from a [`LineFeed`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Feed {
    Line(PhysicalLine),
    /// Input switched into or out of an included member.
    MemberBoundary,
    EndOfFile,
}

/// Where the scanner gets its lines.
pub trait LineFeed {
    fn next_line(&mut self, sink: &mut dyn DiagnosticSink) -> Result<Feed, Aborted>;
}

struct OpenSource {
    lines: Box<dyn LineSource>,
    id: SourceId,
    line: u32,
}

/// Reads the primary source and any members it includes.
pub struct SourceReader {
    format: LineFormat,
    library: Option<Box<dyn MemberLibrary>>,
    open: Vec<OpenSource>,
    sources: SourceMap,
}

impl SourceReader {
    pub fn new(name: impl Into<String>, lines: Box<dyn LineSource>, format: LineFormat) -> Self {
        let mut sources = SourceMap::new();
        let id = sources.add(name, SourceKind::Primary);
        SourceReader {
            format,
            library: None,
            open: vec![OpenSource { lines, id, line: 0 }],
            sources,
        }
    }

    pub fn from_text(name: impl Into<String>, text: &str, format: LineFormat) -> Self {
        SourceReader::new(name, Box::new(TextSource::new(text)), format)
    }

    pub fn open(path: &Path, format: LineFormat) -> Result<Self, SourceError> {
        let lines = FileSource::open(path)?;
        Ok(SourceReader::new(path.display().to_string(), Box::new(lines), format))
    }

    #[must_use]
    pub fn with_library(mut self, library: Box<dyn MemberLibrary>) -> Self {
        self.library = Some(library);
        self
    }

    pub fn format(&self) -> LineFormat {
        self.format
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.sources
    }

    pub fn into_source_map(self) -> SourceMap {
        self.sources
    }

    /// Number of members currently included inside the primary source.
    pub fn include_depth(&self) -> usize {
        self.open.len().saturating_sub(1)
    }

    fn card(&mut self, text: String, location: Location, sink: &mut dyn DiagnosticSink) -> Card {
        let Some(kind) = text.chars().next() else {
            return Card::Program(PhysicalLine {
                text,
                start: location.with_column(2),
            });
        };
        let rest = text[kind.len_utf8()..].to_owned();
        match kind.to_ascii_uppercase() {
            ' ' | 'M' => Card::Program(PhysicalLine {
                text: rest,
                start: location.with_column(2),
            }),
            'C' => Card::Skip,
            'D' => self.directive(&rest, location, sink),
            'E' | 'S' => {
                sink.report(
                    Diagnostic::warning(ErrorCode::E3003)
                        .with_message(format!(
                            "multi-line exponent and subscript cards are not supported; `{kind}` card skipped"
                        ))
                        .with_label(location, "skipped"),
                );
                Card::Skip
            }
            other => {
                sink.report(
                    Diagnostic::error(ErrorCode::E3002)
                        .with_message(format!("illegal card type `{other}`; card treated as a comment"))
                        .with_label(location, "card type in column 1"),
                );
                Card::Skip
            }
        }
    }

    fn directive(&mut self, text: &str, location: Location, sink: &mut dyn DiagnosticSink) -> Card {
        let mut words = text.split_whitespace();
        let Some(verb) = words.next() else {
            return Card::Skip;
        };
        if !verb.eq_ignore_ascii_case("INCLUDE") {
            sink.report(
                Diagnostic::info(ErrorCode::E3004)
                    .with_message(format!("directive `{verb}` ignored"))
                    .with_label(location.with_column(2), "directive"),
            );
            return Card::Skip;
        }
        // Anything after the member name (template options, comments) is not ours.
        let Some(member) = words
            .next()
            .map(|word| word.trim_end_matches(|c: char| !c.is_ascii_alphanumeric() && c != '_'))
            .filter(|word| !word.is_empty())
        else {
            sink.report(
                Diagnostic::error(ErrorCode::E3001)
                    .with_message("INCLUDE names no member")
                    .with_label(location.with_column(2), "directive"),
            );
            return Card::Skip;
        };
        if self.include_depth() > 0 {
            sink.report(
                Diagnostic::error(ErrorCode::E3005)
                    .with_message(format!("INCLUDE of `{member}` inside an included member ignored"))
                    .with_label(location.with_column(2), "nested INCLUDE"),
            );
            return Card::Skip;
        }

        let opened = match &self.library {
            Some(library) => library.open_member(member),
            None => Err(SourceError::NoLibrary),
        };
        match opened {
            Ok(lines) => {
                let id = self.sources.add(member, SourceKind::Member);
                debug!(member, source = %id, "including member");
                self.open.push(OpenSource { lines, id, line: 0 });
                Card::Boundary
            }
            Err(err) => {
                sink.report(
                    Diagnostic::error(ErrorCode::E3001)
                        .with_message(err.to_string())
                        .with_label(location.with_column(2), "INCLUDE directive"),
                );
                Card::Skip
            }
        }
    }
}

enum Card {
    Program(PhysicalLine),
    Boundary,
    Skip,
}

impl LineFeed for SourceReader {
    fn next_line(&mut self, sink: &mut dyn DiagnosticSink) -> Result<Feed, Aborted> {
        loop {
            let Some(top) = self.open.last_mut() else {
                return Ok(Feed::EndOfFile);
            };
            let pulled = top.lines.next_line().map_err(|err| {
                let at = Location::new(top.id, top.line + 1, 1);
                sink.fatal(
                    Diagnostic::fatal(ErrorCode::E3006)
                        .with_message(err.to_string())
                        .with_label(at, "reading stopped here"),
                )
            })?;
            match pulled {
                SourceLine::Text(text) => {
                    top.line += 1;
                    let location = Location::new(top.id, top.line, 1);
                    match self.format {
                        LineFormat::Free => {
                            return Ok(Feed::Line(PhysicalLine {
                                text,
                                start: location,
                            }))
                        }
                        LineFormat::Cards => match self.card(text, location, sink) {
                            Card::Program(line) => return Ok(Feed::Line(line)),
                            Card::Boundary => return Ok(Feed::MemberBoundary),
                            Card::Skip => {}
                        },
                    }
                }
                SourceLine::EndOfMember | SourceLine::EndOfFile => {
                    if self.open.len() > 1 {
                        self.open.pop();
                        debug!(depth = self.include_depth(), "member finished");
                        return Ok(Feed::MemberBoundary);
                    }
                    self.open.clear();
                    return Ok(Feed::EndOfFile);
                }
            }
        }
    }
}

/// Lines of a text held in memory, at synthetic locations.
///
/// Used to scan macro bodies, which have no physical position of their own.
#[derive(Clone, Debug)]
pub struct TextLines {
    lines: Vec<String>,
    next: usize,
}

impl TextLines {
    pub fn new(text: &str) -> Self {
        TextLines {
            lines: text.lines().map(str::to_owned).collect(),
            next: 0,
        }
    }
}

impl LineFeed for TextLines {
    fn next_line(&mut self, _sink: &mut dyn DiagnosticSink) -> Result<Feed, Aborted> {
        let Some(text) = self.lines.get(self.next) else {
            return Ok(Feed::EndOfFile);
        };
        self.next += 1;
        let line = u32::try_from(self.next).unwrap_or(u32::MAX);
        Ok(Feed::Line(PhysicalLine {
            text: text.clone(),
            start: Location::synthetic(line, 1),
        }))
    }
}
