//! Raw line sources.
//!
//! A source hands out lines of text until it runs dry. Sources that are
//! members of a library end with [`SourceLine::EndOfMember`]; sequential
//! files end with [`SourceLine::EndOfFile`]. The reader uses the
//! difference to decide whether to resume an enclosing source.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Failure to open or read a source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot open `{}`: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read `{name}`: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("member `{member}` not found in {library}")]
    MemberNotFound { member: String, library: String },
    #[error("no include library is configured")]
    NoLibrary,
}

/// One pull from a [`LineSource`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SourceLine {
    Text(String),
    EndOfMember,
    EndOfFile,
}

pub trait LineSource {
    /// Next line without its terminator. Once an end marker has been
    /// returned it is returned again on every later call.
    fn next_line(&mut self) -> Result<SourceLine, SourceError>;
}

/// Lines held in memory.
#[derive(Clone, Debug)]
pub struct TextSource {
    lines: Vec<String>,
    next: usize,
    end: SourceLine,
}

impl TextSource {
    /// A sequential source ending in end-of-file.
    pub fn new(text: &str) -> Self {
        TextSource {
            lines: text.lines().map(str::to_owned).collect(),
            next: 0,
            end: SourceLine::EndOfFile,
        }
    }

    /// A library member ending in end-of-member.
    pub fn member(text: &str) -> Self {
        TextSource {
            end: SourceLine::EndOfMember,
            ..TextSource::new(text)
        }
    }
}

impl LineSource for TextSource {
    fn next_line(&mut self) -> Result<SourceLine, SourceError> {
        match self.lines.get(self.next) {
            Some(line) => {
                self.next += 1;
                Ok(SourceLine::Text(line.clone()))
            }
            None => Ok(self.end.clone()),
        }
    }
}

/// Lines read lazily from a file. Invalid UTF-8 is replaced rather than
/// rejected; the translator reports the resulting characters.
#[derive(Debug)]
pub struct FileSource {
    reader: BufReader<File>,
    name: String,
    end: SourceLine,
    done: bool,
    buffer: Vec<u8>,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(FileSource {
            reader: BufReader::new(file),
            name: path.display().to_string(),
            end: SourceLine::EndOfFile,
            done: false,
            buffer: Vec::new(),
        })
    }

    /// Open a file as a library member.
    pub fn open_member(path: &Path) -> Result<Self, SourceError> {
        let mut source = FileSource::open(path)?;
        source.end = SourceLine::EndOfMember;
        Ok(source)
    }
}

impl LineSource for FileSource {
    fn next_line(&mut self) -> Result<SourceLine, SourceError> {
        if self.done {
            return Ok(self.end.clone());
        }
        self.buffer.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .map_err(|source| SourceError::Read {
                name: self.name.clone(),
                source,
            })?;
        if read == 0 {
            self.done = true;
            return Ok(self.end.clone());
        }
        while matches!(self.buffer.last(), Some(b'\n' | b'\r')) {
            self.buffer.pop();
        }
        Ok(SourceLine::Text(
            String::from_utf8_lossy(&self.buffer).into_owned(),
        ))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
