//! Context-free grammar over a [`Vocabulary`].

use std::fmt;
use std::sync::Arc;

use hal_ir::{ProductionId, SymbolId, Vocabulary, VocabularyError};
use smallvec::SmallVec;

use crate::TableError;

/// Right-hand side storage; most HAL/S productions have few symbols.
pub type Symbols = SmallVec<[SymbolId; 6]>;

/// One rule `lhs ::= rhs`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: SymbolId,
    pub rhs: Symbols,
}

impl Production {
    pub fn new(lhs: SymbolId, rhs: impl IntoIterator<Item = SymbolId>) -> Self {
        Production {
            lhs,
            rhs: rhs.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}

/// Errors found while reading or checking a grammar.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: `{name}` is neither a terminal nor defined by any rule")]
    UndefinedSymbol { line: usize, name: String },

    #[error("terminal `{0}` appears on the left of a rule")]
    TerminalOnLeft(String),

    #[error("nonterminal `{0}` is used but has no productions")]
    NoProductionsFor(String),

    #[error("start symbol `{0}` is not a nonterminal")]
    StartNotNonterminal(String),

    #[error("symbol index {0} is outside the vocabulary")]
    UnknownSymbol(u16),

    #[error("grammar has no rules")]
    Empty,

    #[error("grammar exceeds {} productions", u16::MAX)]
    TooManyProductions,

    #[error("automaton exceeds {} states", u16::MAX)]
    TooManyStates,

    #[error("recovery terminal `{0}` is not a terminal")]
    SyncNotTerminal(String),

    #[error("generated tables are inconsistent: {0}")]
    Tables(#[from] TableError),

    #[error("invalid vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),
}

/// A checked grammar, augmented with the accept production.
///
/// Production 0 is `S' ::= start`, where `S'` is a symbol one past the end of
/// the vocabulary. It never appears on any right-hand side and is never
/// handed to a semantic action.
#[derive(Clone, Debug)]
pub struct Grammar {
    vocabulary: Arc<Vocabulary>,
    start: SymbolId,
    productions: Vec<Production>,
    /// Productions of each nonterminal, indexed from the first nonterminal.
    by_lhs: Vec<Vec<ProductionId>>,
}

impl Grammar {
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        start: SymbolId,
        rules: Vec<Production>,
    ) -> Result<Self, GrammarError> {
        if rules.is_empty() {
            return Err(GrammarError::Empty);
        }
        if !vocabulary.is_nonterminal(start) {
            return Err(GrammarError::StartNotNonterminal(
                vocabulary.name(start).to_owned(),
            ));
        }
        let accept = SymbolId::from_index(vocabulary.len()).ok_or(GrammarError::Vocabulary(
            VocabularyError::TooManySymbols,
        ))?;
        if rules.len() >= usize::from(u16::MAX) {
            return Err(GrammarError::TooManyProductions);
        }

        let terminal_count = vocabulary.terminal_count();
        let mut by_lhs = vec![Vec::new(); vocabulary.len() - terminal_count];
        let mut productions = Vec::with_capacity(rules.len() + 1);
        productions.push(Production::new(accept, [start]));

        for rule in rules {
            if rule.lhs.index() >= vocabulary.len() {
                return Err(GrammarError::UnknownSymbol(rule.lhs.raw()));
            }
            if vocabulary.is_terminal(rule.lhs) {
                return Err(GrammarError::TerminalOnLeft(
                    vocabulary.name(rule.lhs).to_owned(),
                ));
            }
            if let Some(bad) = rule.rhs.iter().find(|s| s.index() >= vocabulary.len()) {
                return Err(GrammarError::UnknownSymbol(bad.raw()));
            }
            let id = ProductionId::from_index(productions.len())
                .ok_or(GrammarError::TooManyProductions)?;
            by_lhs[rule.lhs.index() - terminal_count].push(id);
            productions.push(rule);
        }

        for production in &productions[1..] {
            for &symbol in &production.rhs {
                if vocabulary.is_nonterminal(symbol)
                    && by_lhs[symbol.index() - terminal_count].is_empty()
                {
                    return Err(GrammarError::NoProductionsFor(
                        vocabulary.name(symbol).to_owned(),
                    ));
                }
            }
        }
        if by_lhs[start.index() - terminal_count].is_empty() {
            return Err(GrammarError::NoProductionsFor(
                vocabulary.name(start).to_owned(),
            ));
        }

        Ok(Grammar {
            vocabulary,
            start,
            productions,
            by_lhs,
        })
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    pub fn start(&self) -> SymbolId {
        self.start
    }

    /// The synthetic left-hand side of production 0.
    pub fn accept_symbol(&self) -> SymbolId {
        self.productions[0].lhs
    }

    /// Number of symbols including the accept symbol.
    pub fn symbol_count(&self) -> usize {
        self.vocabulary.len() + 1
    }

    /// All productions, accept production first.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id.index()]
    }

    pub fn production_count(&self) -> usize {
        self.productions.len()
    }

    /// Productions whose left-hand side is `nonterminal`.
    pub fn productions_of(&self, nonterminal: SymbolId) -> &[ProductionId] {
        nonterminal
            .index()
            .checked_sub(self.vocabulary.terminal_count())
            .and_then(|slot| self.by_lhs.get(slot))
            .map_or(&[], Vec::as_slice)
    }

    pub fn is_terminal(&self, symbol: SymbolId) -> bool {
        self.vocabulary.is_terminal(symbol)
    }

    pub fn symbol_name(&self, symbol: SymbolId) -> &str {
        if symbol == self.accept_symbol() {
            "<ACCEPT>"
        } else {
            self.vocabulary.name(symbol)
        }
    }

    /// Render a production as BNF.
    pub fn display(&self, id: ProductionId) -> DisplayProduction<'_> {
        DisplayProduction { grammar: self, id }
    }
}

/// BNF rendering of one production.
pub struct DisplayProduction<'a> {
    grammar: &'a Grammar,
    id: ProductionId,
}

impl fmt::Display for DisplayProduction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let production = self.grammar.production(self.id);
        write!(f, "{} ::=", self.grammar.symbol_name(production.lhs))?;
        for &symbol in &production.rhs {
            let name = self.grammar.symbol_name(symbol);
            if name.contains('|') {
                write!(f, " '{name}'")?;
            } else {
                write!(f, " {name}")?;
            }
        }
        Ok(())
    }
}
