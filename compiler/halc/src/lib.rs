//! HAL/S Pass 1 driver.
//!
//! Ties the front end together: a [`SourceReader`](hal_lexer::SourceReader)
//! feeds the scanner, the macro expander sits between the scanner and the
//! parser, and [`Pass1Actions`] records `REPLACE` definitions as their
//! statements are reduced so later tokens see them at once.

mod actions;
pub mod commands;
mod compile;
mod options;
mod tracing_setup;

pub use actions::{Pass1Actions, Pass1Value};
pub use compile::{compile_file, compile_text, compile_unit, CompilationReport, Outcome};
pub use options::{parse_compile_options, CompileOptions, OptionError, ParsedArgs};
pub use tracing_setup::{init_tracing, LOG_ENV, TREE_ENV};
