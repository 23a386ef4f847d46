//! LALR(1) parsing for the HAL/S front end.
//!
//! [`Parser`] drives a [`ParseTables`](hal_grammar::ParseTables) automaton
//! over tokens pulled from a [`TokenSource`](hal_lexer::TokenSource),
//! handing each completed production to a [`SemanticActions`]
//! implementation. Syntax errors are reported and repaired by skipping to a
//! synchronising terminal; the parse only stops early on a fatal
//! diagnostic.

mod actions;
mod driver;

pub use actions::{NoActions, SemanticActions, StackSlot};
pub use driver::{ParseStats, Parser, DEFAULT_STACK_LIMIT};
