//! LALR(1) table construction.
//!
//! The builder computes the LR(0) canonical collection, then attaches
//! lookaheads to kernel items by the spontaneous-generation and propagation
//! method, and finally compacts each state into read, lookahead and apply
//! rows. Conflicts are resolved rather than rejected: shift beats reduce,
//! and between two reductions the earlier production wins. Every resolution
//! is listed in the [`BuildReport`].

mod sets;

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use hal_ir::{ProductionId, StateId, SymbolId};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::tables::{ParseTables, ProductionShape, StateRow};
use crate::{Grammar, GrammarError};
use self::sets::TerminalSet;

/// A production with a dot position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Item {
    production: usize,
    dot: usize,
}

/// How a conflict was settled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConflictKind {
    /// The read entry was kept over a reduction by `production`.
    ShiftReduce { production: ProductionId },
    /// `kept` was chosen over `dropped` for this lookahead.
    ReduceReduce {
        kept: ProductionId,
        dropped: ProductionId,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub state: StateId,
    pub terminal: SymbolId,
    pub kind: ConflictKind,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConflictKind::ShiftReduce { production } => write!(
                f,
                "state {} on {}: shift preferred over reduce by production {}",
                self.state, self.terminal, production
            ),
            ConflictKind::ReduceReduce { kept, dropped } => write!(
                f,
                "state {} on {}: production {} preferred over production {}",
                self.state, self.terminal, kept, dropped
            ),
        }
    }
}

/// Summary of one table build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub states: usize,
    pub conflicts: Vec<Conflict>,
}

impl BuildReport {
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn shift_reduce(&self) -> usize {
        self.conflicts
            .iter()
            .filter(|c| matches!(c.kind, ConflictKind::ShiftReduce { .. }))
            .count()
    }

    pub fn reduce_reduce(&self) -> usize {
        self.conflicts.len() - self.shift_reduce()
    }
}

/// Builds [`ParseTables`] for a grammar.
pub struct TableBuilder<'g> {
    grammar: &'g Grammar,
    sync: Vec<SymbolId>,
}

impl<'g> TableBuilder<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        TableBuilder {
            grammar,
            sync: Vec::new(),
        }
    }

    /// Terminals at which error recovery resynchronises.
    #[must_use]
    pub fn sync_terminals(mut self, terminals: impl IntoIterator<Item = SymbolId>) -> Self {
        self.sync.extend(terminals);
        self
    }

    pub fn build(self) -> Result<(ParseTables, BuildReport), GrammarError> {
        let grammar = self.grammar;
        if let Some(&bad) = self.sync.iter().find(|&&s| !grammar.is_terminal(s)) {
            return Err(GrammarError::SyncNotTerminal(
                grammar.symbol_name(bad).to_owned(),
            ));
        }

        let mut automaton = Automaton::new(grammar);
        automaton.collect_states();
        automaton.compute_lookaheads();
        let (rows, conflicts) = automaton.rows()?;

        let report = BuildReport {
            states: rows.len(),
            conflicts,
        };
        debug!(
            states = report.states,
            productions = grammar.production_count(),
            shift_reduce = report.shift_reduce(),
            reduce_reduce = report.reduce_reduce(),
            "built LALR(1) tables"
        );

        let shapes = grammar
            .productions()
            .iter()
            .map(|p| ProductionShape {
                lhs: p.lhs,
                len: p.len(),
            })
            .collect();
        let tables = ParseTables::from_rows(
            Arc::clone(grammar.vocabulary()),
            grammar.start(),
            shapes,
            rows,
            self.sync,
        )?;
        Ok((tables, report))
    }
}

struct Automaton<'g> {
    grammar: &'g Grammar,
    terminal_count: usize,
    /// Marker bit meaning "inherit the kernel item's lookaheads".
    marker: usize,
    nullable: Vec<bool>,
    first: Vec<TerminalSet>,
    kernels: Vec<Vec<Item>>,
    gotos: Vec<Vec<(usize, usize)>>,
    lookaheads: Vec<Vec<TerminalSet>>,
}

impl<'g> Automaton<'g> {
    fn new(grammar: &'g Grammar) -> Self {
        let terminal_count = grammar.vocabulary().terminal_count();
        let mut automaton = Automaton {
            grammar,
            terminal_count,
            marker: terminal_count,
            nullable: vec![false; grammar.symbol_count()],
            first: vec![TerminalSet::with_width(terminal_count + 1); grammar.symbol_count()],
            kernels: Vec::new(),
            gotos: Vec::new(),
            lookaheads: Vec::new(),
        };
        automaton.compute_first();
        automaton
    }

    fn width(&self) -> usize {
        self.terminal_count + 1
    }

    fn rhs(&self, production: usize) -> &[SymbolId] {
        &self.grammar.productions()[production].rhs
    }

    fn next_symbol(&self, item: Item) -> Option<usize> {
        self.rhs(item.production).get(item.dot).map(|s| s.index())
    }

    fn is_terminal(&self, symbol: usize) -> bool {
        symbol < self.terminal_count
    }

    fn productions_of(&self, symbol: usize) -> impl Iterator<Item = usize> + '_ {
        SymbolId::from_index(symbol)
            .map(|s| self.grammar.productions_of(s))
            .unwrap_or_default()
            .iter()
            .map(|p| p.index())
    }

    fn compute_first(&mut self) {
        for t in 0..self.terminal_count {
            self.first[t].insert(t);
        }
        let grammar = self.grammar;
        let mut changed = true;
        while changed {
            changed = false;
            for production in grammar.productions() {
                let lhs = production.lhs.index();
                let mut all_nullable = true;
                for symbol in &production.rhs {
                    let s = symbol.index();
                    let add = self.first[s].clone();
                    changed |= self.first[lhs].union_with(&add);
                    if !self.nullable[s] {
                        all_nullable = false;
                        break;
                    }
                }
                if all_nullable && !self.nullable[lhs] {
                    self.nullable[lhs] = true;
                    changed = true;
                }
            }
        }
    }

    /// FIRST of `sequence` followed by `tail`.
    fn first_of(&self, sequence: &[SymbolId], tail: &TerminalSet) -> TerminalSet {
        let mut out = TerminalSet::with_width(self.width());
        for symbol in sequence {
            out.union_with(&self.first[symbol.index()]);
            if !self.nullable[symbol.index()] {
                return out;
            }
        }
        out.union_with(tail);
        out
    }

    fn closure0(&self, kernel: &[Item]) -> Vec<Item> {
        let mut items = kernel.to_vec();
        let mut expanded = vec![false; self.grammar.symbol_count()];
        let mut next = 0;
        while next < items.len() {
            if let Some(symbol) = self.next_symbol(items[next]) {
                if !self.is_terminal(symbol) && !expanded[symbol] {
                    expanded[symbol] = true;
                    items.extend(
                        self.productions_of(symbol)
                            .map(|production| Item { production, dot: 0 }),
                    );
                }
            }
            next += 1;
        }
        items
    }

    fn collect_states(&mut self) {
        let mut index: FxHashMap<Vec<Item>, usize> = FxHashMap::default();
        let initial = vec![Item {
            production: 0,
            dot: 0,
        }];
        index.insert(initial.clone(), 0);
        self.kernels.push(initial);

        let mut state = 0;
        while state < self.kernels.len() {
            let mut successors: BTreeMap<usize, Vec<Item>> = BTreeMap::new();
            for item in self.closure0(&self.kernels[state]) {
                if let Some(symbol) = self.next_symbol(item) {
                    successors.entry(symbol).or_default().push(Item {
                        production: item.production,
                        dot: item.dot + 1,
                    });
                }
            }

            let mut edges = Vec::with_capacity(successors.len());
            for (symbol, mut kernel) in successors {
                kernel.sort_unstable();
                kernel.dedup();
                let target = match index.get(&kernel) {
                    Some(&existing) => existing,
                    None => {
                        let fresh = self.kernels.len();
                        index.insert(kernel.clone(), fresh);
                        self.kernels.push(kernel);
                        fresh
                    }
                };
                edges.push((symbol, target));
            }
            self.gotos.push(edges);
            state += 1;
        }
    }

    fn goto(&self, state: usize, symbol: usize) -> Option<usize> {
        let edges = &self.gotos[state];
        edges
            .binary_search_by_key(&symbol, |&(s, _)| s)
            .ok()
            .map(|i| edges[i].1)
    }

    /// Closure of LR(1) items, merging lookahead sets per LR(0) item.
    fn closure1(
        &self,
        seeds: impl IntoIterator<Item = (Item, TerminalSet)>,
    ) -> Vec<(Item, TerminalSet)> {
        let mut items: Vec<(Item, TerminalSet)> = Vec::new();
        let mut position: FxHashMap<Item, usize> = FxHashMap::default();
        let mut work = Vec::new();

        for (item, lookahead) in seeds {
            match position.get(&item) {
                Some(&at) => {
                    items[at].1.union_with(&lookahead);
                }
                None => {
                    position.insert(item, items.len());
                    items.push((item, lookahead));
                }
            }
        }
        work.extend(0..items.len());

        while let Some(at) = work.pop() {
            let (item, lookahead) = items[at].clone();
            let Some(symbol) = self.next_symbol(item) else {
                continue;
            };
            if self.is_terminal(symbol) {
                continue;
            }
            let follow = self.first_of(&self.rhs(item.production)[item.dot + 1..], &lookahead);
            for production in self.productions_of(symbol) {
                let child = Item { production, dot: 0 };
                match position.get(&child) {
                    Some(&existing) => {
                        if items[existing].1.union_with(&follow) {
                            work.push(existing);
                        }
                    }
                    None => {
                        position.insert(child, items.len());
                        work.push(items.len());
                        items.push((child, follow.clone()));
                    }
                }
            }
        }
        items
    }

    fn compute_lookaheads(&mut self) {
        let width = self.width();
        self.lookaheads = self
            .kernels
            .iter()
            .map(|kernel| vec![TerminalSet::with_width(width); kernel.len()])
            .collect();
        self.lookaheads[0][0].insert(self.grammar.vocabulary().end_of_file().index());

        let mut propagate: Vec<((usize, usize), (usize, usize))> = Vec::new();
        for state in 0..self.kernels.len() {
            for slot in 0..self.kernels[state].len() {
                let kernel_item = self.kernels[state][slot];
                let probe = TerminalSet::single(width, self.marker);
                for (item, mut lookahead) in self.closure1([(kernel_item, probe)]) {
                    let Some(symbol) = self.next_symbol(item) else {
                        continue;
                    };
                    let Some(target) = self.goto(state, symbol) else {
                        continue;
                    };
                    let advanced = Item {
                        production: item.production,
                        dot: item.dot + 1,
                    };
                    let Ok(target_slot) = self.kernels[target].binary_search(&advanced) else {
                        continue;
                    };
                    if lookahead.contains(self.marker) {
                        propagate.push(((state, slot), (target, target_slot)));
                        lookahead.remove(self.marker);
                    }
                    if !lookahead.is_empty() {
                        self.lookaheads[target][target_slot].union_with(&lookahead);
                    }
                }
            }
        }

        let mut changed = true;
        while changed {
            changed = false;
            for &((from, from_slot), (to, to_slot)) in &propagate {
                let source = self.lookaheads[from][from_slot].clone();
                changed |= self.lookaheads[to][to_slot].union_with(&source);
            }
        }
    }

    fn rows(&self) -> Result<(Vec<StateRow>, Vec<Conflict>), GrammarError> {
        let mut rows = Vec::with_capacity(self.kernels.len());
        let mut conflicts = Vec::new();

        for state in 0..self.kernels.len() {
            let state_id = StateId::from_index(state).ok_or(GrammarError::TooManyStates)?;
            let seeds = self.kernels[state]
                .iter()
                .copied()
                .zip(self.lookaheads[state].iter().cloned());

            let mut reductions: BTreeMap<usize, TerminalSet> = BTreeMap::new();
            for (item, lookahead) in self.closure1(seeds) {
                if item.production != 0 && item.dot == self.rhs(item.production).len() {
                    reductions
                        .entry(item.production)
                        .or_insert_with(|| TerminalSet::with_width(self.width()))
                        .union_with(&lookahead);
                }
            }

            let mut reads = Vec::with_capacity(self.gotos[state].len());
            for &(symbol, target) in &self.gotos[state] {
                let symbol = SymbolId::from_index(symbol).ok_or(GrammarError::TooManyStates)?;
                let target = StateId::from_index(target).ok_or(GrammarError::TooManyStates)?;
                reads.push((symbol, target));
            }

            let mut look: BTreeMap<usize, usize> = BTreeMap::new();
            for (&production, lookahead) in &reductions {
                let reduced = production_id(production)?;
                for terminal in lookahead.iter().filter(|&t| t != self.marker) {
                    let terminal_id =
                        SymbolId::from_index(terminal).ok_or(GrammarError::TooManyStates)?;
                    if self.goto(state, terminal).is_some() {
                        conflicts.push(Conflict {
                            state: state_id,
                            terminal: terminal_id,
                            kind: ConflictKind::ShiftReduce {
                                production: reduced,
                            },
                        });
                        continue;
                    }
                    match look.entry(terminal) {
                        Entry::Occupied(kept) => conflicts.push(Conflict {
                            state: state_id,
                            terminal: terminal_id,
                            kind: ConflictKind::ReduceReduce {
                                kept: production_id(*kept.get())?,
                                dropped: reduced,
                            },
                        }),
                        Entry::Vacant(slot) => {
                            slot.insert(production);
                        }
                    }
                }
            }

            let mut apply: Vec<usize> = reductions.keys().copied().collect();
            if apply.len() > 1 {
                // A candidate that lost every lookahead can never be chosen.
                apply.retain(|p| look.values().any(|q| q == p));
            }
            if apply.len() <= 1 {
                look.clear();
            }

            rows.push(StateRow {
                reads,
                look: look
                    .into_iter()
                    .map(|(t, p)| {
                        Ok((
                            SymbolId::from_index(t).ok_or(GrammarError::TooManyStates)?,
                            production_id(p)?,
                        ))
                    })
                    .collect::<Result<_, GrammarError>>()?,
                apply: apply
                    .into_iter()
                    .map(production_id)
                    .collect::<Result<_, _>>()?,
            });
        }
        Ok((rows, conflicts))
    }
}

fn production_id(index: usize) -> Result<ProductionId, GrammarError> {
    ProductionId::from_index(index).ok_or(GrammarError::TooManyProductions)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
