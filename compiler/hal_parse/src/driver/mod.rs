//! The LALR(1) driver.
//!
//! Two stacks run in parallel: automaton states, and the slots (tokens or
//! nonterminal values) that produced them. The state stack starts with the
//! initial state and is always one longer than the slot stack.
//!
//! The lookahead is fetched only when the top state needs it. A state with
//! no terminal reads and a single candidate reduces without looking, so a
//! reduction's semantic action runs before the token after it is scanned.
//! `REPLACE` definitions rely on this to take effect immediately.

mod recovery;

use std::sync::Arc;

use hal_diagnostic::{Aborted, Diagnostic, DiagnosticSink, ErrorCode};
use hal_grammar::{Action, ParseTables};
use hal_ir::{Location, ProductionId, StateId, SymbolId, Token};
use hal_lexer::TokenSource;
use tracing::trace;

use crate::{SemanticActions, StackSlot};

/// Most states the parse stack may hold.
pub const DEFAULT_STACK_LIMIT: usize = 75;

/// Counters for one parse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Tokens pulled from the source, including discarded ones.
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
    /// Syntax errors detected, reported or not.
    pub syntax_errors: usize,
    pub recoveries: usize,
    pub max_depth: usize,
}

/// Result of one driver step.
enum ParseOutcome<V> {
    Continue,
    Resynchronize,
    Accept(V),
}

/// One parse of one compilation unit.
pub struct Parser<S, A: SemanticActions> {
    tables: Arc<ParseTables>,
    source: S,
    actions: A,
    stack_limit: usize,
    states: Vec<StateId>,
    slots: Vec<StackSlot<A::Value>>,
    lookahead: Option<Token>,
    /// Location of the most recently fetched token.
    last_location: Location,
    /// Set after a syntax error until the next shift; further errors in
    /// that window are repaired without another diagnostic.
    quiet: bool,
    stats: ParseStats,
}

impl<S: TokenSource, A: SemanticActions> Parser<S, A> {
    pub fn new(tables: Arc<ParseTables>, source: S, actions: A) -> Self {
        Parser {
            tables,
            source,
            actions,
            stack_limit: DEFAULT_STACK_LIMIT,
            states: vec![StateId::INITIAL],
            slots: Vec::new(),
            lookahead: None,
            last_location: Location::synthetic(1, 1),
            quiet: false,
            stats: ParseStats {
                max_depth: 1,
                ..ParseStats::default()
            },
        }
    }

    #[must_use]
    pub fn with_stack_limit(mut self, limit: usize) -> Self {
        self.stack_limit = limit.max(1);
        self
    }

    pub fn stack_limit(&self) -> usize {
        self.stack_limit
    }

    pub fn tables(&self) -> &Arc<ParseTables> {
        &self.tables
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut A {
        &mut self.actions
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current depth of the state stack.
    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn into_parts(self) -> (S, A) {
        (self.source, self.actions)
    }

    /// Run to acceptance. Syntax errors are reported to `sink` and repaired;
    /// `Err` means a fatal diagnostic ended the unit.
    pub fn parse(&mut self, sink: &mut dyn DiagnosticSink) -> Result<A::Value, Aborted> {
        loop {
            match self.step(sink)? {
                ParseOutcome::Continue => {}
                ParseOutcome::Resynchronize => self.recover(sink)?,
                ParseOutcome::Accept(value) => return Ok(value),
            }
            if let Some(aborted) = sink.abort_requested() {
                return Err(aborted);
            }
        }
    }

    fn top(&self) -> StateId {
        self.states.last().copied().unwrap_or(StateId::INITIAL)
    }

    /// Terminal of the lookahead token, fetching it if needed.
    fn peek(&mut self, sink: &mut dyn DiagnosticSink) -> Result<SymbolId, Aborted> {
        if let Some(token) = &self.lookahead {
            return Ok(token.symbol);
        }
        let token = self.source.next_token(sink)?;
        self.stats.tokens += 1;
        self.last_location = token.location;
        let symbol = token.symbol;
        self.lookahead = Some(token);
        Ok(symbol)
    }

    fn step(&mut self, sink: &mut dyn DiagnosticSink) -> Result<ParseOutcome<A::Value>, Aborted> {
        let state = self.top();
        let action = match self.tables.default_reduction(state) {
            Some(production) => Action::Reduce(production),
            None => {
                let terminal = self.peek(sink)?;
                self.tables.action(state, terminal)
            }
        };

        match action {
            Action::Shift(target) => {
                self.shift(target, sink)?;
                Ok(ParseOutcome::Continue)
            }
            Action::Reduce(production) => self.reduce(production, sink),
            Action::Error => {
                self.syntax_error(sink);
                Ok(ParseOutcome::Resynchronize)
            }
        }
    }

    fn shift(&mut self, target: StateId, sink: &mut dyn DiagnosticSink) -> Result<(), Aborted> {
        let Some(token) = self.lookahead.take() else {
            return Err(self.inconsistent(sink, "shift without a lookahead token".into()));
        };
        trace!(
            symbol = self.tables.vocabulary().name(token.symbol),
            text = %token.text,
            state = target.raw(),
            "shift"
        );
        self.push(target, StackSlot::Token(token), sink)?;
        self.stats.shifts += 1;
        self.quiet = false;
        Ok(())
    }

    fn reduce(
        &mut self,
        production: ProductionId,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ParseOutcome<A::Value>, Aborted> {
        let tables = Arc::clone(&self.tables);
        let length = tables.production_len(production);
        if length >= self.states.len() {
            return Err(self.inconsistent(
                sink,
                format!("reducing production {production} would empty the parse stack"),
            ));
        }

        let children = self.slots.split_off(self.slots.len() - length);
        self.states.truncate(self.states.len() - length);
        self.stats.reductions += 1;
        let lhs = tables.production_lhs(production);
        trace!(
            production = production.raw(),
            lhs = tables.vocabulary().name(lhs),
            "reduce"
        );

        let value = self.actions.on_reduce(production, children, sink)?;

        if lhs == tables.start_symbol()
            && self.states.len() == 1
            && self.peek(sink)? == tables.end_of_file()
        {
            return Ok(ParseOutcome::Accept(value));
        }

        match tables.read_entry(self.top(), lhs) {
            Some(target) => {
                self.push(target, StackSlot::Value(value), sink)?;
                Ok(ParseOutcome::Continue)
            }
            None => Err(self.inconsistent(
                sink,
                format!(
                    "state {} has no goto on `{}`",
                    self.top(),
                    tables.vocabulary().name(lhs)
                ),
            )),
        }
    }

    fn push(
        &mut self,
        state: StateId,
        slot: StackSlot<A::Value>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), Aborted> {
        if self.states.len() >= self.stack_limit {
            let mut diagnostic = Diagnostic::fatal(ErrorCode::E2003)
                .with_message(format!(
                    "parse stack exceeds {} entries",
                    self.stack_limit
                ))
                .with_note("the program nests too deeply to be parsed");
            diagnostic = match slot.token().or(self.lookahead.as_ref()) {
                Some(token) => diagnostic.with_token_label(token, "stack overflowed here"),
                None => diagnostic.with_label(self.last_location, "stack overflowed here"),
            };
            return Err(sink.fatal(diagnostic));
        }
        self.states.push(state);
        self.slots.push(slot);
        self.stats.max_depth = self.stats.max_depth.max(self.states.len());
        Ok(())
    }

    fn inconsistent(&self, sink: &mut dyn DiagnosticSink, message: String) -> Aborted {
        sink.fatal(
            Diagnostic::fatal(ErrorCode::E9002)
                .with_message(message)
                .with_label(self.last_location, "while parsing here"),
        )
    }
}
