//! The macro expansion layer.

use std::collections::VecDeque;
use std::sync::Arc;

use hal_diagnostic::{Aborted, Diagnostic, DiagnosticSink, ErrorCode};
use hal_ir::{ExpansionSite, SymbolId, Token, TokenClass, Vocabulary};
use hal_lexer::TokenSource;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::frame::Frame;
use crate::{MacroDefinition, MacroStore, MacroUse};

/// Bounds on expansion.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExpansionLimits {
    /// Most expansions that may be active at once.
    pub depth: usize,
    /// Most formal parameters a definition may declare.
    pub max_parameters: usize,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        ExpansionLimits {
            depth: 8,
            max_parameters: 12,
        }
    }
}

/// Symbols the expander needs to recognise, if the grammar has them.
#[derive(Copy, Clone, Debug)]
struct Landmarks {
    identifier: SymbolId,
    end_of_file: SymbolId,
    left_paren: Option<SymbolId>,
    right_paren: Option<SymbolId>,
    comma: Option<SymbolId>,
    semicolon: Option<SymbolId>,
    replace: Option<SymbolId>,
    replace_text: Option<SymbolId>,
}

impl Landmarks {
    fn new(vocabulary: &Vocabulary) -> Self {
        Landmarks {
            identifier: vocabulary.identifier(),
            end_of_file: vocabulary.end_of_file(),
            left_paren: vocabulary.lookup("("),
            right_paren: vocabulary.lookup(")"),
            comma: vocabulary.lookup(","),
            semicolon: vocabulary.lookup(";"),
            replace: vocabulary.reserved_word("REPLACE"),
            replace_text: vocabulary.class(TokenClass::ReplaceText),
        }
    }
}

fn is(symbol: SymbolId, landmark: Option<SymbolId>) -> bool {
    landmark == Some(symbol)
}

/// Wraps a token source and expands macro names found in it.
///
/// Tokens are pulled from the innermost active expansion, or from the
/// wrapped source when none is active. A macro name is expanded unless it
/// is the name being defined by a `REPLACE` statement or it is read as part
/// of another macro's actual arguments (those are expanded later, after
/// substitution).
pub struct MacroExpander<S, M> {
    source: S,
    store: M,
    vocabulary: Arc<Vocabulary>,
    limits: ExpansionLimits,
    landmarks: Landmarks,
    frames: Vec<Frame>,
    /// Tokens returned to the wrapped source's level.
    held: VecDeque<Token>,
    /// Inside `REPLACE ... BY "text"`, before the text.
    defining: bool,
    uses: Vec<MacroUse>,
}

impl<S: TokenSource, M: MacroStore> MacroExpander<S, M> {
    pub fn new(source: S, store: M, vocabulary: Arc<Vocabulary>) -> Self {
        let landmarks = Landmarks::new(&vocabulary);
        MacroExpander {
            source,
            store,
            vocabulary,
            limits: ExpansionLimits::default(),
            landmarks,
            frames: Vec::new(),
            held: VecDeque::new(),
            defining: false,
            uses: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: ExpansionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> ExpansionLimits {
        self.limits
    }

    /// Number of expansions currently active.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Every expansion performed so far, in order.
    pub fn uses(&self) -> &[MacroUse] {
        &self.uses
    }

    pub fn take_uses(&mut self) -> Vec<MacroUse> {
        std::mem::take(&mut self.uses)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &M {
        &self.store
    }

    pub fn into_source(self) -> S {
        self.source
    }

    pub fn next_token(&mut self, sink: &mut dyn DiagnosticSink) -> Result<Token, Aborted> {
        loop {
            let Some(token) = self.pull(sink)? else {
                if let Some(frame) = self.frames.pop() {
                    debug!(name = %frame.definition.name, depth = self.frames.len(), "expansion finished");
                }
                continue;
            };
            if let Some(definition) = self.expandable(&token) {
                self.invoke(token, definition, sink)?;
                continue;
            }
            self.note_definition(&token);
            return Ok(token);
        }
    }

    /// Next unexpanded token at the current level. `None` when the
    /// innermost expansion has run out.
    fn pull(&mut self, sink: &mut dyn DiagnosticSink) -> Result<Option<Token>, Aborted> {
        match self.frames.last_mut() {
            Some(frame) => {
                if frame.first_time {
                    frame.first_time = false;
                    trace!(name = %frame.definition.name, "entering expansion");
                    self.uses.push(MacroUse {
                        name: frame.definition.name.clone(),
                        site: Arc::clone(&frame.site),
                    });
                }
                frame.next_token(sink)
            }
            None => match self.held.pop_front() {
                Some(token) => Ok(Some(token)),
                None => self.source.next_token(sink).map(Some),
            },
        }
    }

    fn push_back(&mut self, token: Token) {
        match self.frames.last_mut() {
            Some(frame) => frame.push_back(token),
            None => self.held.push_front(token),
        }
    }

    fn expandable(&self, token: &Token) -> Option<Arc<MacroDefinition>> {
        if self.defining || token.symbol != self.landmarks.identifier {
            return None;
        }
        self.store.lookup_macro(&token.text)
    }

    /// Track whether the next identifiers belong to a `REPLACE` head.
    fn note_definition(&mut self, token: &Token) {
        let marks = &self.landmarks;
        if is(token.symbol, marks.replace) {
            self.defining = true;
        } else if is(token.symbol, marks.replace_text) || is(token.symbol, marks.semicolon) {
            self.defining = false;
        }
    }

    fn invoke(
        &mut self,
        name: Token,
        definition: Arc<MacroDefinition>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), Aborted> {
        if self.frames.len() >= self.limits.depth {
            return Err(sink.fatal(
                Diagnostic::fatal(ErrorCode::E1002)
                    .with_message(format!(
                        "expanding `{}` would nest more than {} macro expansions",
                        definition.name, self.limits.depth
                    ))
                    .with_token_label(&name, "expansion refused here"),
            ));
        }

        let arguments = if definition.parameters.is_empty() {
            Vec::new()
        } else {
            self.arguments(&name, &definition, sink)?
        };

        let site = Arc::new(ExpansionSite {
            macro_name: definition.name.clone(),
            call_site: name.location,
            definition: definition.location,
            parent: name.origin.clone(),
        });
        debug!(
            name = %definition.name,
            depth = self.frames.len() + 1,
            arguments = arguments.len(),
            "expansion pushed"
        );
        self.frames.push(Frame::new(
            definition,
            site,
            arguments,
            Arc::clone(&self.vocabulary),
        ));
        Ok(())
    }

    /// Collect `(a, b, ...)` after a parameterised macro name. The result
    /// always has one entry per formal.
    fn arguments(
        &mut self,
        name: &Token,
        definition: &MacroDefinition,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<Vec<Token>>, Aborted> {
        let arity = definition.arity();
        let opener = self.argument_token(name, sink)?;
        match opener {
            Some(token) if is(token.symbol, self.landmarks.left_paren) => {}
            other => {
                if let Some(token) = other {
                    self.push_back(token);
                }
                sink.report(
                    Diagnostic::error(ErrorCode::E1007)
                        .with_message(format!(
                            "`{}` takes {arity} arguments but is used without an argument list",
                            definition.name
                        ))
                        .with_token_label(name, "arguments expected after this"),
                );
                return Ok(vec![Vec::new(); arity]);
            }
        }

        let mut arguments: SmallVec<[Vec<Token>; 4]> = SmallVec::new();
        arguments.push(Vec::new());
        let mut depth = 0usize;
        loop {
            let Some(token) = self.argument_token(name, sink)? else {
                return Err(sink.fatal(
                    Diagnostic::fatal(ErrorCode::E1004)
                        .with_message(format!(
                            "argument list of `{}` is not closed before end of input",
                            definition.name
                        ))
                        .with_token_label(name, "invocation starts here"),
                ));
            };
            let marks = &self.landmarks;
            if is(token.symbol, marks.right_paren) {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            } else if is(token.symbol, marks.left_paren) {
                depth += 1;
            } else if depth == 0 && is(token.symbol, marks.comma) {
                arguments.push(Vec::new());
                continue;
            }
            if let Some(current) = arguments.last_mut() {
                current.push(token);
            }
        }

        if arguments.len() != arity {
            sink.report(
                Diagnostic::error(ErrorCode::E1001)
                    .with_message(format!(
                        "`{}` takes {arity} arguments but {} were given",
                        definition.name,
                        arguments.len()
                    ))
                    .with_token_label(name, if arguments.len() < arity {
                        "missing arguments are empty"
                    } else {
                        "extra arguments ignored"
                    }),
            );
            arguments.resize(arity, Vec::new());
        }
        Ok(arguments.into_vec())
    }

    /// A token of an argument list, read at the level of the macro name
    /// without expansion. `None` at physical end of input.
    fn argument_token(
        &mut self,
        name: &Token,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Option<Token>, Aborted> {
        match self.pull(sink)? {
            Some(token) if token.symbol == self.landmarks.end_of_file => {
                self.push_back(token);
                Ok(None)
            }
            Some(token) => Ok(Some(token)),
            None => Err(sink.fatal(
                Diagnostic::fatal(ErrorCode::E1003)
                    .with_message(format!(
                        "invocation of `{}` runs past the end of the enclosing macro body",
                        name.text
                    ))
                    .with_token_label(name, "invocation starts here"),
            )),
        }
    }
}

impl<S: TokenSource, M: MacroStore> TokenSource for MacroExpander<S, M> {
    fn next_token(&mut self, sink: &mut dyn DiagnosticSink) -> Result<Token, Aborted> {
        MacroExpander::next_token(self, sink)
    }
}
