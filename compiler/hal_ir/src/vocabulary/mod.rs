//! Grammar vocabulary.
//!
//! A [`Vocabulary`] is the ordered symbol set every table is built over:
//! terminals first, then nonterminals. Besides names it answers the two
//! questions the scanner asks: "is this word reserved?" and "which
//! punctuation terminal starts here?". Terminals that stand for a whole
//! class of lexemes (identifiers, numbers, strings) are bound to a
//! [`TokenClass`] and never matched by spelling.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::SymbolId;

/// Lexeme classes the scanner synthesises tokens for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenClass {
    Identifier,
    SimpleNumber,
    CompoundNumber,
    CharString,
    /// Double-quoted text of a `REPLACE` definition.
    ReplaceText,
    /// `%name` built-in macro reference.
    PercentMacro,
    EndOfFile,
}

impl TokenClass {
    pub const ALL: [TokenClass; 7] = [
        TokenClass::Identifier,
        TokenClass::SimpleNumber,
        TokenClass::CompoundNumber,
        TokenClass::CharString,
        TokenClass::ReplaceText,
        TokenClass::PercentMacro,
        TokenClass::EndOfFile,
    ];

    const fn slot(self) -> usize {
        match self {
            TokenClass::Identifier => 0,
            TokenClass::SimpleNumber => 1,
            TokenClass::CompoundNumber => 2,
            TokenClass::CharString => 3,
            TokenClass::ReplaceText => 4,
            TokenClass::PercentMacro => 5,
            TokenClass::EndOfFile => 6,
        }
    }
}

/// Error building a vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VocabularyError {
    DuplicateSymbol(String),
    /// A class was bound to a name that is not a declared terminal.
    UnknownClassSymbol(TokenClass, String),
    MissingClass(TokenClass),
    TerminalAfterNonterminal(String),
    TooManySymbols,
}

impl fmt::Display for VocabularyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabularyError::DuplicateSymbol(name) => write!(f, "symbol `{name}` declared twice"),
            VocabularyError::UnknownClassSymbol(class, name) => {
                write!(f, "{class:?} is bound to `{name}`, which is not a terminal")
            }
            VocabularyError::MissingClass(class) => {
                write!(f, "no terminal is bound to the {class:?} class")
            }
            VocabularyError::TerminalAfterNonterminal(name) => {
                write!(f, "terminal `{name}` declared after the first nonterminal")
            }
            VocabularyError::TooManySymbols => {
                write!(f, "vocabulary exceeds {} symbols", u16::MAX)
            }
        }
    }
}

impl std::error::Error for VocabularyError {}

/// Incrementally declares terminals, class bindings and nonterminals.
#[derive(Clone, Debug, Default)]
pub struct VocabularyBuilder {
    names: Vec<String>,
    terminal_count: Option<usize>,
    classes: Vec<(TokenClass, String)>,
    duplicate: Option<String>,
    late_terminal: Option<String>,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        VocabularyBuilder::default()
    }

    /// Declare the next terminal.
    #[must_use]
    pub fn terminal(mut self, name: impl Into<String>) -> Self {
        self.push_terminal(name.into());
        self
    }

    #[must_use]
    pub fn terminals<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.push_terminal(name.into());
        }
        self
    }

    /// Bind a lexeme class to an already declared terminal.
    #[must_use]
    pub fn class(mut self, class: TokenClass, name: impl Into<String>) -> Self {
        self.classes.push((class, name.into()));
        self
    }

    /// Declare a nonterminal, returning its index. No terminals may follow.
    pub fn nonterminal(&mut self, name: impl Into<String>) -> SymbolId {
        if self.terminal_count.is_none() {
            self.terminal_count = Some(self.names.len());
        }
        self.push(name.into())
    }

    /// Look up a symbol declared so far.
    pub fn position(&self, name: &str) -> Option<SymbolId> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(SymbolId::from_index)
    }

    /// Whether `name` was declared as a terminal.
    pub fn is_terminal(&self, name: &str) -> bool {
        let limit = self.terminal_count.unwrap_or(self.names.len());
        self.names[..limit].iter().any(|n| n == name)
    }

    fn push_terminal(&mut self, name: String) {
        if self.terminal_count.is_some() {
            self.late_terminal.get_or_insert(name);
            return;
        }
        self.push(name);
    }

    fn push(&mut self, name: String) -> SymbolId {
        if self.names.contains(&name) {
            self.duplicate.get_or_insert(name.clone());
        }
        let id = SymbolId::from_index(self.names.len()).unwrap_or(SymbolId::new(u16::MAX));
        self.names.push(name);
        id
    }

    pub fn build(self) -> Result<Vocabulary, VocabularyError> {
        if let Some(name) = self.duplicate {
            return Err(VocabularyError::DuplicateSymbol(name));
        }
        if let Some(name) = self.late_terminal {
            return Err(VocabularyError::TerminalAfterNonterminal(name));
        }
        if self.names.len() > usize::from(u16::MAX) {
            return Err(VocabularyError::TooManySymbols);
        }

        let terminal_count = self.terminal_count.unwrap_or(self.names.len());
        let mut by_name = FxHashMap::default();
        for (index, name) in self.names.iter().enumerate() {
            if let Some(id) = SymbolId::from_index(index) {
                by_name.insert(name.clone(), id);
            }
        }

        let mut classes = [None; 7];
        for (class, name) in &self.classes {
            match by_name.get(name) {
                Some(&id) if id.index() < terminal_count => classes[class.slot()] = Some(id),
                _ => return Err(VocabularyError::UnknownClassSymbol(*class, name.clone())),
            }
        }
        for required in [TokenClass::Identifier, TokenClass::EndOfFile] {
            if classes[required.slot()].is_none() {
                return Err(VocabularyError::MissingClass(required));
            }
        }

        let mut reserved = FxHashMap::default();
        let mut punctuation = Vec::new();
        for (index, name) in self.names[..terminal_count].iter().enumerate() {
            let Some(id) = SymbolId::from_index(index) else {
                continue;
            };
            if classes.contains(&Some(id)) || is_class_name(name) {
                continue;
            }
            if is_word(name) {
                reserved.insert(name.to_ascii_uppercase(), id);
            } else if is_punctuation(name) {
                punctuation.push((name.clone(), id));
            }
        }
        // Longest spelling first so `**` wins over `*`.
        punctuation.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.1.cmp(&b.1)));

        Ok(Vocabulary {
            names: self.names,
            terminal_count,
            by_name,
            reserved,
            punctuation,
            classes,
        })
    }
}

/// `<IDENTIFIER>`-style names denote lexeme classes, not spellings.
fn is_class_name(name: &str) -> bool {
    name.len() >= 3 && name.starts_with('<') && name.ends_with('>')
}

fn is_word(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_punctuation(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_graphic() && !c.is_ascii_alphanumeric())
}

/// The ordered symbol set of a grammar.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    names: Vec<String>,
    terminal_count: usize,
    by_name: FxHashMap<String, SymbolId>,
    reserved: FxHashMap<String, SymbolId>,
    punctuation: Vec<(String, SymbolId)>,
    classes: [Option<SymbolId>; 7],
}

impl Vocabulary {
    pub fn builder() -> VocabularyBuilder {
        VocabularyBuilder::new()
    }

    /// Total number of symbols.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn terminal_count(&self) -> usize {
        self.terminal_count
    }

    pub fn is_terminal(&self, symbol: SymbolId) -> bool {
        symbol.index() < self.terminal_count
    }

    pub fn is_nonterminal(&self, symbol: SymbolId) -> bool {
        symbol.index() >= self.terminal_count && symbol.index() < self.names.len()
    }

    pub fn name(&self, symbol: SymbolId) -> &str {
        self.names.get(symbol.index()).map_or("<?>", String::as_str)
    }

    /// Exact-spelling lookup of any symbol.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.by_name.get(name).copied()
    }

    /// Case-insensitive reserved word lookup.
    pub fn reserved_word(&self, word: &str) -> Option<SymbolId> {
        if word.bytes().any(|b| b.is_ascii_lowercase()) {
            self.reserved.get(&word.to_ascii_uppercase()).copied()
        } else {
            self.reserved.get(word).copied()
        }
    }

    /// Longest punctuation terminal that prefixes `text`.
    pub fn match_punctuation(&self, text: &str) -> Option<(SymbolId, usize)> {
        self.punctuation
            .iter()
            .find(|(spelling, _)| text.starts_with(spelling.as_str()))
            .map(|(spelling, id)| (*id, spelling.len()))
    }

    pub fn class(&self, class: TokenClass) -> Option<SymbolId> {
        self.classes[class.slot()]
    }

    pub fn identifier(&self) -> SymbolId {
        self.classes[TokenClass::Identifier.slot()].unwrap_or_default()
    }

    pub fn end_of_file(&self) -> SymbolId {
        self.classes[TokenClass::EndOfFile.slot()].unwrap_or_default()
    }

    pub fn terminals(&self) -> impl Iterator<Item = SymbolId> {
        (0..self.terminal_count).filter_map(SymbolId::from_index)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = SymbolId> {
        (self.terminal_count..self.names.len()).filter_map(SymbolId::from_index)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
