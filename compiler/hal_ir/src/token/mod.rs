//! Token records handed from the scanner and macro layer to the parser.

use std::fmt;
use std::sync::Arc;

use crate::{Location, SymbolId};

/// One macro invocation that a token was produced by.
///
/// Sites form a chain from the innermost expansion out to the invocation
/// written in the physical source.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExpansionSite {
    /// Name of the expanded macro.
    pub macro_name: String,
    /// Where the macro name was read.
    pub call_site: Location,
    /// Where the macro was defined.
    pub definition: Location,
    /// The expansion the call itself came from, if any.
    pub parent: Option<Arc<ExpansionSite>>,
}

impl ExpansionSite {
    /// Number of expansions from this site out to physical text, inclusive.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// Iterate from this site outwards.
    pub fn chain(&self) -> impl Iterator<Item = &ExpansionSite> {
        std::iter::successors(Some(self), |site| site.parent.as_deref())
    }

    /// The call site that appears in physical source text.
    pub fn outermost_call(&self) -> Location {
        self.chain()
            .last()
            .map_or(self.call_site, |site| site.call_site)
    }
}

/// A vocabulary index plus the literal text semantic actions need.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub symbol: SymbolId,
    /// Identifier, number and string tokens carry their source text;
    /// strings hold the translated contents without delimiters.
    pub text: String,
    pub location: Location,
    /// Set when the token came out of a macro body or argument.
    pub origin: Option<Arc<ExpansionSite>>,
}

impl Token {
    pub fn new(symbol: SymbolId, text: impl Into<String>, location: Location) -> Self {
        Token {
            symbol,
            text: text.into(),
            location,
            origin: None,
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Option<Arc<ExpansionSite>>) -> Self {
        self.origin = origin;
        self
    }

    pub fn is_expanded(&self) -> bool {
        self.origin.is_some()
    }

    /// Location a user can find in physical source: the token itself, or
    /// the outermost macro call that produced it.
    pub fn reported_location(&self) -> Location {
        self.origin
            .as_ref()
            .map_or(self.location, |site| site.outermost_call())
    }

    /// Compare symbol and text only, ignoring where the token came from.
    pub fn same_lexeme(&self, other: &Token) -> bool {
        self.symbol == other.symbol && self.text == other.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} `{}` @ {}", self.symbol, self.text, self.location)
    }
}
