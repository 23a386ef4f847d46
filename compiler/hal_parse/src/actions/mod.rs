//! Semantic action dispatch.

use hal_diagnostic::{Aborted, DiagnosticSink};
use hal_ir::{Location, ProductionId, Token};

/// One entry of the value stack: a shifted token or a nonterminal's value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackSlot<V> {
    Token(Token),
    Value(V),
}

impl<V> StackSlot<V> {
    pub fn token(&self) -> Option<&Token> {
        match self {
            StackSlot::Token(token) => Some(token),
            StackSlot::Value(_) => None,
        }
    }

    pub fn into_token(self) -> Option<Token> {
        match self {
            StackSlot::Token(token) => Some(token),
            StackSlot::Value(_) => None,
        }
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            StackSlot::Value(value) => Some(value),
            StackSlot::Token(_) => None,
        }
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            StackSlot::Value(value) => Some(value),
            StackSlot::Token(_) => None,
        }
    }

    /// Where a token slot came from; values carry no location of their own.
    pub fn location(&self) -> Option<Location> {
        self.token().map(|t| t.location)
    }
}

/// Receives every reduction the parser performs, in order.
///
/// `children` holds the popped slots for the production's right-hand side,
/// leftmost first. The returned value is pushed for the produced
/// nonterminal. Returning `Err` aborts the parse.
pub trait SemanticActions {
    type Value;

    fn on_reduce(
        &mut self,
        production: ProductionId,
        children: Vec<StackSlot<Self::Value>>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self::Value, Aborted>;
}

impl<A: SemanticActions + ?Sized> SemanticActions for &mut A {
    type Value = A::Value;

    fn on_reduce(
        &mut self,
        production: ProductionId,
        children: Vec<StackSlot<Self::Value>>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self::Value, Aborted> {
        (**self).on_reduce(production, children, sink)
    }
}

/// Recognise only.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoActions;

impl SemanticActions for NoActions {
    type Value = ();

    fn on_reduce(
        &mut self,
        _production: ProductionId,
        _children: Vec<StackSlot<()>>,
        _sink: &mut dyn DiagnosticSink,
    ) -> Result<(), Aborted> {
        Ok(())
    }
}
