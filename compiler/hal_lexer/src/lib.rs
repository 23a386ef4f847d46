//! HAL/S source reading and scanning.
//!
//! Input flows through three layers:
//! - [`LineSource`]: raw lines from a file, a string or a library member
//! - [`SourceReader`]: card-format handling and `INCLUDE` splicing, producing
//!   program text stamped with its location
//! - [`Scanner`]: tokens, matched against a [`Vocabulary`](hal_ir::Vocabulary)
//!
//! Every layer above the scanner pulls tokens through [`TokenSource`].

mod library;
mod reader;
mod scanner;
mod source;

use hal_diagnostic::{Aborted, DiagnosticSink};
use hal_ir::Token;

pub use library::{DirectoryLibrary, MemberLibrary, MemoryLibrary};
pub use reader::{Feed, LineFeed, LineFormat, PhysicalLine, SourceReader, TextLines};
pub use scanner::{Scanner, MAX_IDENTIFIER_LENGTH, MAX_STRING_LENGTH};
pub use source::{FileSource, LineSource, SourceError, SourceLine, TextSource};

/// Pull interface shared by the scanner and the macro layer.
pub trait TokenSource {
    /// The next token. After end of input, the end-of-file token on every call.
    /// `Err` means the unit was aborted and a fatal diagnostic is in `sink`.
    fn next_token(&mut self, sink: &mut dyn DiagnosticSink) -> Result<Token, Aborted>;
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn next_token(&mut self, sink: &mut dyn DiagnosticSink) -> Result<Token, Aborted> {
        (**self).next_token(sink)
    }
}
