//! HAL/S grammar and LALR(1) tables.
//!
//! - [`Grammar`]: productions over a [`Vocabulary`](hal_ir::Vocabulary),
//!   augmented with the accept production
//! - [`parse_bnf`]: reads grammars written in BNF
//! - [`TableBuilder`]: LALR(1) construction with conflict resolution
//! - [`ParseTables`]: the compact automaton the parser drives
//! - [`reference`]: the HAL/S grammar shipped with the compiler
//!
//! Tables can be built from a grammar or assembled directly from per-state
//! rows; both paths end in [`ParseTables::validate`].

mod bnf;
mod grammar;
mod lalr;
mod tables;

pub mod reference;

pub use bnf::parse_bnf;
pub use grammar::{DisplayProduction, Grammar, GrammarError, Production, Symbols};
pub use lalr::{BuildReport, Conflict, ConflictKind, TableBuilder};
pub use tables::{
    Action, DumpTables, ParseTables, ProductionShape, StateRow, TableError, TableSizes,
};
