//! Macro expansion for the HAL/S front end.
//!
//! `REPLACE name(p1, ..., pn) BY "text";` stores a definition; afterwards
//! every use of `name` is replaced by `text` with actual arguments
//! substituted for the formals. The [`MacroExpander`] sits between the
//! scanner and the parser and exposes the same [`TokenSource`] pull
//! interface, so the parser never sees a macro name it should have expanded.
//!
//! [`TokenSource`]: hal_lexer::TokenSource

mod definition;
mod expander;
mod frame;

pub use definition::{MacroDefinition, MacroStore, MacroTable, MacroUse, SharedMacroTable};
pub use expander::{ExpansionLimits, MacroExpander};
