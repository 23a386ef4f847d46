//! Compact parse tables.
//!
//! Each state owns three rows stored back to back in shared flat arrays:
//!
//! - **read**: `(symbol, target)` pairs, sorted by symbol. Terminal entries
//!   are shifts; nonterminal entries are gotos taken after a reduction.
//! - **look**: `(terminal, production)` pairs used to pick among several
//!   reductions. Present only when a state has more than one candidate.
//! - **apply**: the productions that may be reduced in the state.
//!
//! Parallel `offset`/`count` index arrays address a state's slice of each
//! flat array. Terminals sort before nonterminals, so a state's terminal
//! reads are a prefix of its read row.

#[cfg(feature = "cache")]
mod cache;
mod dump;

use std::ops::Range;
use std::sync::Arc;

use hal_ir::{ProductionId, StateId, SymbolId, Vocabulary};
use rustc_hash::FxHashSet;

pub use dump::DumpTables;

/// Table-level inconsistencies.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("{table} index arrays cover {found} states, expected {expected}")]
    IndexLength {
        table: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{table} row of state {state} runs past the end of its entries")]
    SegmentOutOfBounds { table: &'static str, state: usize },

    #[error("{table} row of state {state} is not strictly ascending")]
    UnsortedRow { table: &'static str, state: usize },

    #[error("state {state} reads symbol {symbol}, which is not in the vocabulary")]
    SymbolOutOfRange { state: usize, symbol: SymbolId },

    #[error("state {state} has a transition to missing state {target}")]
    TargetOutOfRange { state: usize, target: StateId },

    #[error("state {state} refers to missing production {production}")]
    ProductionOutOfRange {
        state: usize,
        production: ProductionId,
    },

    #[error("state {state} has a lookahead entry on nonterminal {symbol}")]
    LookaheadNotTerminal { state: usize, symbol: SymbolId },

    #[error("state {state} looks ahead to production {production}, which it cannot reduce")]
    LookaheadNotApplicable {
        state: usize,
        production: ProductionId,
    },

    #[error("state {state} has both a read and a lookahead entry for terminal {symbol}")]
    ShadowedLookahead { state: usize, symbol: SymbolId },

    #[error("state {state} has several reductions but no lookahead entries")]
    MissingLookahead { state: usize },

    #[error("state {state} has no goto on {lhs} needed after reducing production {production}")]
    MissingGoto {
        state: usize,
        production: ProductionId,
        lhs: SymbolId,
    },

    #[error("production table is inconsistent: {0}")]
    Productions(&'static str),

    #[error("symbol {0} cannot be used for recovery")]
    BadSyncTerminal(SymbolId),

    #[error("table has too many entries to index")]
    Overflow,

    #[error("cached tables were built for a different vocabulary")]
    VocabularyMismatch,

    #[error("cannot encode tables: {0}")]
    Encode(String),

    #[error("cannot decode tables: {0}")]
    Decode(String),
}

/// Left-hand side and length of a production.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProductionShape {
    pub lhs: SymbolId,
    pub len: usize,
}

/// The rows of one state before compaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateRow {
    pub reads: Vec<(SymbolId, StateId)>,
    pub look: Vec<(SymbolId, ProductionId)>,
    pub apply: Vec<ProductionId>,
}

/// What the automaton does in a state for one lookahead terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Shift(StateId),
    Reduce(ProductionId),
    Error,
}

/// Entry counts, for reporting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableSizes {
    pub states: usize,
    pub productions: usize,
    pub reads: usize,
    pub lookaheads: usize,
    pub applies: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
struct Segments {
    offset: Vec<u32>,
    count: Vec<u16>,
}

impl Segments {
    fn range(&self, state: usize) -> Range<usize> {
        let start = self.offset[state] as usize;
        start..start + usize::from(self.count[state])
    }

    fn push(&mut self, start: usize, len: usize) -> Result<(), TableError> {
        self.offset
            .push(u32::try_from(start).map_err(|_| TableError::Overflow)?);
        self.count
            .push(u16::try_from(len).map_err(|_| TableError::Overflow)?);
        Ok(())
    }

    fn check(&self, table: &'static str, states: usize, entries: usize) -> Result<(), TableError> {
        for found in [self.offset.len(), self.count.len()] {
            if found != states {
                return Err(TableError::IndexLength {
                    table,
                    expected: states,
                    found,
                });
            }
        }
        for state in 0..states {
            if self.range(state).end > entries {
                return Err(TableError::SegmentOutOfBounds { table, state });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
struct Compact {
    fingerprint: u64,
    start: SymbolId,
    production_lhs: Vec<SymbolId>,
    production_len: Vec<u16>,
    read_index: Segments,
    read_symbol: Vec<SymbolId>,
    read_target: Vec<StateId>,
    look_index: Segments,
    look_symbol: Vec<SymbolId>,
    look_production: Vec<ProductionId>,
    apply_index: Segments,
    apply_production: Vec<ProductionId>,
    sync: Vec<SymbolId>,
}

/// LALR(1) automaton in compact form.
#[derive(Clone, Debug)]
pub struct ParseTables {
    vocabulary: Arc<Vocabulary>,
    compact: Compact,
}

impl PartialEq for ParseTables {
    fn eq(&self, other: &Self) -> bool {
        self.compact == other.compact
    }
}

impl Eq for ParseTables {}

impl ParseTables {
    /// Compact per-state rows into tables and validate the result.
    ///
    /// `productions[0]` is the accept production. Rows are sorted here, so
    /// callers may supply them in any order.
    pub fn from_rows(
        vocabulary: Arc<Vocabulary>,
        start: SymbolId,
        productions: Vec<ProductionShape>,
        rows: Vec<StateRow>,
        mut sync: Vec<SymbolId>,
    ) -> Result<Self, TableError> {
        sync.sort_unstable();
        sync.dedup();
        let mut compact = Compact {
            fingerprint: fingerprint(&vocabulary),
            start,
            production_lhs: Vec::with_capacity(productions.len()),
            production_len: Vec::with_capacity(productions.len()),
            read_index: Segments::default(),
            read_symbol: Vec::new(),
            read_target: Vec::new(),
            look_index: Segments::default(),
            look_symbol: Vec::new(),
            look_production: Vec::new(),
            apply_index: Segments::default(),
            apply_production: Vec::new(),
            sync,
        };
        for shape in productions {
            compact.production_lhs.push(shape.lhs);
            compact
                .production_len
                .push(u16::try_from(shape.len).map_err(|_| TableError::Overflow)?);
        }

        for mut row in rows {
            row.reads.sort_unstable();
            row.look.sort_unstable();
            row.apply.sort_unstable();

            compact
                .read_index
                .push(compact.read_symbol.len(), row.reads.len())?;
            for (symbol, target) in row.reads {
                compact.read_symbol.push(symbol);
                compact.read_target.push(target);
            }
            compact
                .look_index
                .push(compact.look_symbol.len(), row.look.len())?;
            for (symbol, production) in row.look {
                compact.look_symbol.push(symbol);
                compact.look_production.push(production);
            }
            compact
                .apply_index
                .push(compact.apply_production.len(), row.apply.len())?;
            compact.apply_production.extend(row.apply);
        }

        let tables = ParseTables {
            vocabulary,
            compact,
        };
        tables.validate()?;
        Ok(tables)
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// Hash of the vocabulary the tables were built against.
    pub fn fingerprint(&self) -> u64 {
        self.compact.fingerprint
    }

    pub fn state_count(&self) -> usize {
        self.compact.read_index.count.len()
    }

    pub fn production_count(&self) -> usize {
        self.compact.production_lhs.len()
    }

    pub fn start_symbol(&self) -> SymbolId {
        self.compact.start
    }

    pub fn end_of_file(&self) -> SymbolId {
        self.vocabulary.end_of_file()
    }

    pub fn is_terminal(&self, symbol: SymbolId) -> bool {
        self.vocabulary.is_terminal(symbol)
    }

    /// Terminals at which error recovery resynchronises.
    pub fn sync_terminals(&self) -> &[SymbolId] {
        &self.compact.sync
    }

    pub fn is_sync(&self, terminal: SymbolId) -> bool {
        self.compact.sync.binary_search(&terminal).is_ok()
    }

    pub fn production_lhs(&self, production: ProductionId) -> SymbolId {
        self.compact.production_lhs[production.index()]
    }

    /// Number of stack entries a reduction by `production` pops.
    pub fn production_len(&self, production: ProductionId) -> usize {
        usize::from(self.compact.production_len[production.index()])
    }

    /// Read row of `state`: shifts first, then gotos.
    pub fn reads(&self, state: StateId) -> impl Iterator<Item = (SymbolId, StateId)> + '_ {
        let range = self.compact.read_index.range(state.index());
        self.compact.read_symbol[range.clone()]
            .iter()
            .copied()
            .zip(self.compact.read_target[range].iter().copied())
    }

    /// Transition on `symbol`, either a shift or a goto.
    pub fn read_entry(&self, state: StateId, symbol: SymbolId) -> Option<StateId> {
        let range = self.compact.read_index.range(state.index());
        let symbols = &self.compact.read_symbol[range.clone()];
        symbols
            .binary_search(&symbol)
            .ok()
            .map(|at| self.compact.read_target[range.start + at])
    }

    pub fn lookaheads(
        &self,
        state: StateId,
    ) -> impl Iterator<Item = (SymbolId, ProductionId)> + '_ {
        let range = self.compact.look_index.range(state.index());
        self.compact.look_symbol[range.clone()]
            .iter()
            .copied()
            .zip(self.compact.look_production[range].iter().copied())
    }

    /// Reduction chosen for `terminal` among several candidates.
    pub fn lookahead(&self, state: StateId, terminal: SymbolId) -> Option<ProductionId> {
        let range = self.compact.look_index.range(state.index());
        let symbols = &self.compact.look_symbol[range.clone()];
        symbols
            .binary_search(&terminal)
            .ok()
            .map(|at| self.compact.look_production[range.start + at])
    }

    /// Productions reducible in `state`.
    pub fn apply(&self, state: StateId) -> &[ProductionId] {
        &self.compact.apply_production[self.compact.apply_index.range(state.index())]
    }

    /// Whether any terminal can be shifted in `state`.
    pub fn has_terminal_reads(&self, state: StateId) -> bool {
        let range = self.compact.read_index.range(state.index());
        self.compact.read_symbol[range]
            .first()
            .is_some_and(|&s| self.is_terminal(s))
    }

    /// Whether the next action depends on the lookahead terminal. When it
    /// does not, the state reduces its single candidate unconditionally.
    pub fn needs_lookahead(&self, state: StateId) -> bool {
        self.has_terminal_reads(state) || self.apply(state).len() != 1
    }

    /// The unconditional reduction of a state that needs no lookahead.
    pub fn default_reduction(&self, state: StateId) -> Option<ProductionId> {
        if self.needs_lookahead(state) {
            None
        } else {
            self.apply(state).first().copied()
        }
    }

    /// Action for `terminal`. A read entry always takes priority; a sole
    /// candidate reduces on any other terminal.
    pub fn action(&self, state: StateId, terminal: SymbolId) -> Action {
        if self.is_terminal(terminal) {
            if let Some(target) = self.read_entry(state, terminal) {
                return Action::Shift(target);
            }
        }
        match self.apply(state) {
            [only] => Action::Reduce(*only),
            _ => self
                .lookahead(state, terminal)
                .map_or(Action::Error, Action::Reduce),
        }
    }

    /// Terminals that have an explicit entry in `state`.
    pub fn expected_terminals(&self, state: StateId) -> Vec<SymbolId> {
        let mut expected: Vec<SymbolId> = self
            .reads(state)
            .map(|(symbol, _)| symbol)
            .filter(|&s| self.is_terminal(s))
            .chain(self.lookaheads(state).map(|(symbol, _)| symbol))
            .collect();
        expected.sort_unstable();
        expected.dedup();
        expected
    }

    pub fn sizes(&self) -> TableSizes {
        TableSizes {
            states: self.state_count(),
            productions: self.production_count(),
            reads: self.compact.read_symbol.len(),
            lookaheads: self.compact.look_symbol.len(),
            applies: self.compact.apply_production.len(),
        }
    }

    /// Human-readable listing of every state.
    pub fn dump(&self) -> DumpTables<'_> {
        DumpTables::new(self)
    }

    /// Check that the compact form is deterministic and total.
    pub fn validate(&self) -> Result<(), TableError> {
        let c = &self.compact;
        let states = self.state_count();
        let symbols = self.vocabulary.len();

        if c.production_len.len() != c.production_lhs.len() {
            return Err(TableError::Productions("length and lhs arrays differ"));
        }
        if c.production_lhs.is_empty() {
            return Err(TableError::Productions("accept production is missing"));
        }
        if c.production_lhs[1..]
            .iter()
            .any(|&lhs| !self.vocabulary.is_nonterminal(lhs))
        {
            return Err(TableError::Productions("left-hand side is not a nonterminal"));
        }
        if !self.vocabulary.is_nonterminal(c.start) {
            return Err(TableError::Productions("start symbol is not a nonterminal"));
        }
        if let Some(&bad) = c.sync.iter().find(|&&s| !self.is_terminal(s)) {
            return Err(TableError::BadSyncTerminal(bad));
        }
        if c.sync.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TableError::Productions("recovery terminals are not sorted"));
        }

        c.read_index.check("read", states, c.read_symbol.len())?;
        c.look_index.check("look", states, c.look_symbol.len())?;
        c.apply_index.check("apply", states, c.apply_production.len())?;
        if c.read_target.len() != c.read_symbol.len()
            || c.look_production.len() != c.look_symbol.len()
        {
            return Err(TableError::Productions("entry arrays have different lengths"));
        }

        for index in 0..states {
            let Some(state) = StateId::from_index(index) else {
                return Err(TableError::Overflow);
            };
            let reads: Vec<_> = self.reads(state).collect();
            if reads.windows(2).any(|w| w[0].0 >= w[1].0) {
                return Err(TableError::UnsortedRow {
                    table: "read",
                    state: index,
                });
            }
            for &(symbol, target) in &reads {
                if symbol.index() >= symbols {
                    return Err(TableError::SymbolOutOfRange {
                        state: index,
                        symbol,
                    });
                }
                if target.index() >= states {
                    return Err(TableError::TargetOutOfRange {
                        state: index,
                        target,
                    });
                }
            }

            let apply = self.apply(state);
            if apply.windows(2).any(|w| w[0] >= w[1]) {
                return Err(TableError::UnsortedRow {
                    table: "apply",
                    state: index,
                });
            }
            if let Some(&production) = apply
                .iter()
                .find(|p| p.index() == 0 || p.index() >= self.production_count())
            {
                return Err(TableError::ProductionOutOfRange {
                    state: index,
                    production,
                });
            }

            let look: Vec<_> = self.lookaheads(state).collect();
            if look.windows(2).any(|w| w[0].0 >= w[1].0) {
                return Err(TableError::UnsortedRow {
                    table: "look",
                    state: index,
                });
            }
            for &(symbol, production) in &look {
                if !self.is_terminal(symbol) {
                    return Err(TableError::LookaheadNotTerminal {
                        state: index,
                        symbol,
                    });
                }
                if apply.binary_search(&production).is_err() {
                    return Err(TableError::LookaheadNotApplicable {
                        state: index,
                        production,
                    });
                }
                if self.read_entry(state, symbol).is_some() {
                    return Err(TableError::ShadowedLookahead {
                        state: index,
                        symbol,
                    });
                }
            }
            if apply.len() > 1 && look.is_empty() {
                return Err(TableError::MissingLookahead { state: index });
            }
        }

        self.check_gotos()
    }

    /// Every state a reduction can uncover must have a goto on the
    /// production's left-hand side.
    fn check_gotos(&self) -> Result<(), TableError> {
        let states = self.state_count();
        let mut predecessors = vec![Vec::new(); states];
        for index in 0..states {
            let Some(state) = StateId::from_index(index) else {
                return Err(TableError::Overflow);
            };
            for (_, target) in self.reads(state) {
                predecessors[target.index()].push(index);
            }
        }

        for index in 0..states {
            let Some(state) = StateId::from_index(index) else {
                return Err(TableError::Overflow);
            };
            for &production in self.apply(state) {
                let lhs = self.production_lhs(production);
                let mut frontier: FxHashSet<usize> = FxHashSet::default();
                frontier.insert(index);
                for _ in 0..self.production_len(production) {
                    frontier = frontier
                        .iter()
                        .flat_map(|&s| predecessors[s].iter().copied())
                        .collect();
                }
                let mut uncovered: Vec<usize> = frontier.into_iter().collect();
                uncovered.sort_unstable();
                for exposed in uncovered {
                    let Some(exposed_id) = StateId::from_index(exposed) else {
                        return Err(TableError::Overflow);
                    };
                    if self.read_entry(exposed_id, lhs).is_none() {
                        return Err(TableError::MissingGoto {
                            state: exposed,
                            production,
                            lhs,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Stable hash of a vocabulary's symbol names.
fn fingerprint(vocabulary: &Vocabulary) -> u64 {
    use std::hash::{Hash, Hasher};

    let mut hasher = rustc_hash::FxHasher::default();
    vocabulary.terminal_count().hash(&mut hasher);
    for symbol in vocabulary.terminals().chain(vocabulary.nonterminals()) {
        vocabulary.name(symbol).hash(&mut hasher);
    }
    hasher.finish()
}
