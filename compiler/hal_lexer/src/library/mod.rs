//! Named-member libraries for `INCLUDE`.

use std::path::PathBuf;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::source::{FileSource, LineSource, SourceError, TextSource};

/// A partitioned container of source members.
pub trait MemberLibrary {
    /// Open `name` as a source that ends with end-of-member.
    fn open_member(&self, name: &str) -> Result<Box<dyn LineSource>, SourceError>;
}

/// Members stored as files in one directory.
///
/// A member `NAME` is looked up as `NAME`, then `NAME.hal`, then the same
/// two spellings in upper case.
#[derive(Clone, Debug)]
pub struct DirectoryLibrary {
    root: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryLibrary { root: root.into() }
    }

    fn candidates(&self, name: &str) -> impl Iterator<Item = PathBuf> + '_ {
        let upper = name.to_ascii_uppercase();
        [
            name.to_owned(),
            format!("{name}.hal"),
            upper.clone(),
            format!("{upper}.hal"),
        ]
        .into_iter()
        .map(move |file| self.root.join(file))
    }
}

impl MemberLibrary for DirectoryLibrary {
    fn open_member(&self, name: &str) -> Result<Box<dyn LineSource>, SourceError> {
        match self.candidates(name).find(|path| path.is_file()) {
            Some(path) => Ok(Box::new(FileSource::open_member(&path)?)),
            None => Err(SourceError::MemberNotFound {
                member: name.to_owned(),
                library: self.root.display().to_string(),
            }),
        }
    }
}

/// Members held in memory, keyed by exact name.
#[derive(Clone, Debug, Default)]
pub struct MemoryLibrary {
    members: FxHashMap<String, Arc<str>>,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        MemoryLibrary::default()
    }

    #[must_use]
    pub fn with_member(mut self, name: impl Into<String>, text: &str) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: &str) {
        self.members.insert(name.into(), Arc::from(text));
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl MemberLibrary for MemoryLibrary {
    fn open_member(&self, name: &str) -> Result<Box<dyn LineSource>, SourceError> {
        match self.members.get(name) {
            Some(text) => Ok(Box::new(TextSource::member(text))),
            None => Err(SourceError::MemberNotFound {
                member: name.to_owned(),
                library: "the in-memory library".to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
