//! One active expansion.

use std::collections::VecDeque;
use std::sync::Arc;

use hal_diagnostic::{Aborted, Diagnostic, DiagnosticSink};
use hal_ir::{ExpansionSite, Token, Vocabulary};
use hal_lexer::{Scanner, TextLines};

use crate::MacroDefinition;

/// Saved state of one invocation: the body being rescanned, the bound
/// actuals, and tokens waiting to be handed out ahead of the body.
pub(crate) struct Frame {
    pub(crate) definition: Arc<MacroDefinition>,
    pub(crate) site: Arc<ExpansionSite>,
    body: Scanner<TextLines>,
    /// Substituted actuals and pushed-back tokens, in order.
    pending: VecDeque<Token>,
    arguments: Vec<Vec<Token>>,
    /// Cleared once the first token has been pulled.
    pub(crate) first_time: bool,
    exhausted: bool,
}

impl Frame {
    pub(crate) fn new(
        definition: Arc<MacroDefinition>,
        site: Arc<ExpansionSite>,
        arguments: Vec<Vec<Token>>,
        vocabulary: Arc<Vocabulary>,
    ) -> Self {
        let body = Scanner::new(TextLines::new(&definition.body), vocabulary);
        Frame {
            definition,
            site,
            body,
            pending: VecDeque::new(),
            arguments,
            first_time: true,
            exhausted: false,
        }
    }

    /// Next token of the expansion, or `None` once the body is used up.
    ///
    /// Formals are replaced by their actuals here; the actuals are not
    /// themselves searched for formals.
    pub(crate) fn next_token(
        &mut self,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Option<Token>, Aborted> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            if self.exhausted {
                return Ok(None);
            }
            let mut scoped = ExpansionSink {
                inner: sink,
                site: &self.site,
            };
            let token = self.body.next_token(&mut scoped)?;
            let vocabulary = self.body.vocabulary();
            if token.symbol == vocabulary.end_of_file() {
                self.exhausted = true;
                continue;
            }
            if token.symbol == vocabulary.identifier() {
                if let Some(index) = self.definition.parameter_index(&token.text) {
                    let actual = self.arguments.get(index).map_or(&[][..], Vec::as_slice);
                    self.pending.extend(actual.iter().cloned());
                    continue;
                }
            }
            return Ok(Some(token.with_origin(Some(Arc::clone(&self.site)))));
        }
    }

    /// Return a token so it is the next one handed out.
    pub(crate) fn push_back(&mut self, token: Token) {
        self.pending.push_front(token);
    }
}

/// Attributes diagnostics raised while rescanning a body to the call.
struct ExpansionSink<'a> {
    inner: &'a mut dyn DiagnosticSink,
    site: &'a ExpansionSite,
}

impl DiagnosticSink for ExpansionSink<'_> {
    fn report(&mut self, diagnostic: Diagnostic) {
        let mut diagnostic = diagnostic;
        for site in self.site.chain() {
            diagnostic = diagnostic
                .with_secondary_label(
                    site.call_site,
                    format!("in expansion of `{}`", site.macro_name),
                )
                .with_note(format!(
                    "macro `{}` is defined at {}",
                    site.macro_name, site.definition
                ));
        }
        self.inner.report(diagnostic);
    }

    fn abort_requested(&self) -> Option<Aborted> {
        self.inner.abort_requested()
    }
}
