//! Syntax error reporting and resynchronisation.

use hal_diagnostic::{Aborted, Diagnostic, DiagnosticSink, ErrorCode};
use hal_grammar::{Action, ParseTables};
use hal_ir::{StateId, SymbolId, Token};
use tracing::debug;

use super::Parser;
use crate::SemanticActions;

/// Bound on simulated reductions when testing a candidate state.
const SIMULATION_STEPS: usize = 1000;

impl<S: hal_lexer::TokenSource, A: SemanticActions> Parser<S, A> {
    /// Report the error at the current lookahead, unless no token has been
    /// shifted since the previous one.
    pub(super) fn syntax_error(&mut self, sink: &mut dyn DiagnosticSink) {
        self.stats.syntax_errors += 1;
        if self.quiet {
            debug!("suppressed cascading syntax error");
            return;
        }
        self.quiet = true;

        let state = self.top();
        let vocabulary = self.tables.vocabulary();
        let expected: Vec<String> = self
            .tables
            .expected_terminals(state)
            .into_iter()
            .map(|symbol| format!("`{}`", vocabulary.name(symbol)))
            .collect();

        let mut diagnostic = Diagnostic::error(ErrorCode::E2001);
        diagnostic = match &self.lookahead {
            Some(token) => diagnostic
                .with_message(format!("unexpected {}", describe(&self.tables, token)))
                .with_token_label(token, "not expected here"),
            None => diagnostic
                .with_message("unexpected token")
                .with_label(self.last_location, "not expected here"),
        };
        if !expected.is_empty() {
            diagnostic = diagnostic.with_note(format!("expected {}", expected.join(", ")));
        }
        sink.report(diagnostic);
    }

    /// Skip to a synchronising terminal and pop to a state that can use it.
    /// If no state can, that terminal is discarded too and the search goes on.
    pub(super) fn recover(&mut self, sink: &mut dyn DiagnosticSink) -> Result<(), Aborted> {
        loop {
            let terminal = self.skip_to_sync(sink)?;
            for depth in (1..=self.states.len()).rev() {
                if can_resume(&self.tables, &self.states[..depth], terminal) {
                    let popped = self.states.len() - depth;
                    self.states.truncate(depth);
                    self.slots.truncate(depth - 1);
                    self.stats.recoveries += 1;
                    debug!(
                        popped,
                        state = self.top().raw(),
                        terminal = self.tables.vocabulary().name(terminal),
                        "resynchronised"
                    );
                    return Ok(());
                }
            }
            debug!(
                terminal = self.tables.vocabulary().name(terminal),
                "no state accepts synchronising terminal; discarding it"
            );
            self.lookahead = None;
        }
    }

    fn skip_to_sync(&mut self, sink: &mut dyn DiagnosticSink) -> Result<SymbolId, Aborted> {
        loop {
            let terminal = self.peek(sink)?;
            if self.tables.is_sync(terminal) {
                return Ok(terminal);
            }
            if terminal == self.tables.end_of_file() {
                let mut diagnostic = Diagnostic::fatal(ErrorCode::E2002)
                    .with_message("end of file reached while recovering from a syntax error");
                if let Some(token) = &self.lookahead {
                    diagnostic = diagnostic.with_token_label(token, "input ends here");
                }
                return Err(sink.fatal(diagnostic));
            }
            if let Some(skipped) = self.lookahead.take() {
                debug!(text = %skipped.text, "skipped during recovery");
            }
            if let Some(aborted) = sink.abort_requested() {
                return Err(aborted);
            }
        }
    }
}

/// Whether the automaton, with `states` as its stack, would eventually shift
/// `terminal`. Reductions are simulated on a copy of the state stack; no
/// semantic action runs.
fn can_resume(tables: &ParseTables, states: &[StateId], terminal: SymbolId) -> bool {
    let mut stack = states.to_vec();
    for _ in 0..SIMULATION_STEPS {
        let Some(&top) = stack.last() else {
            return false;
        };
        match tables.action(top, terminal) {
            Action::Shift(_) => return true,
            Action::Error => return false,
            Action::Reduce(production) => {
                let length = tables.production_len(production);
                if length >= stack.len() {
                    return false;
                }
                stack.truncate(stack.len() - length);
                let lhs = tables.production_lhs(production);
                if lhs == tables.start_symbol() && stack.len() == 1 && terminal == tables.end_of_file() {
                    return false;
                }
                let Some(&exposed) = stack.last() else {
                    return false;
                };
                match tables.read_entry(exposed, lhs) {
                    Some(next) => stack.push(next),
                    None => return false,
                }
            }
        }
    }
    false
}

fn describe(tables: &ParseTables, token: &Token) -> String {
    if token.symbol == tables.end_of_file() {
        "end of file".to_owned()
    } else if token.text.is_empty() {
        format!("`{}`", tables.vocabulary().name(token.symbol))
    } else {
        format!("`{}`", token.text)
    }
}
