//! The HAL/S reference grammar.
//!
//! A subset of HAL/S covering block structure, declarations, `REPLACE`,
//! assignments, calls, conditionals, `DO` groups, I/O statements and
//! arithmetic, concatenation and relational expressions. It is built once
//! per process and shared.

use std::sync::{Arc, OnceLock};

use hal_ir::hal;

use crate::{parse_bnf, BuildReport, Grammar, GrammarError, ParseTables, TableBuilder};

/// BNF source of the reference grammar.
pub const HAL_SUBSET_BNF: &str = include_str!("hal.bnf");

/// A grammar together with the tables built from it.
#[derive(Clone, Debug)]
pub struct Language {
    pub grammar: Grammar,
    pub tables: Arc<ParseTables>,
    pub report: BuildReport,
}

/// Build the reference grammar and its tables from scratch.
pub fn build_hal_language() -> Result<Language, GrammarError> {
    let grammar = parse_bnf(HAL_SUBSET_BNF, hal::terminals())?;
    let (tables, report) = TableBuilder::new(&grammar)
        .sync_terminals([hal::SEMI_COLON])
        .build()?;
    Ok(Language {
        grammar,
        tables: Arc::new(tables),
        report,
    })
}

/// The shared reference language, built on first use.
pub fn hal_language() -> Result<&'static Language, GrammarError> {
    static LANGUAGE: OnceLock<Result<Language, GrammarError>> = OnceLock::new();
    LANGUAGE
        .get_or_init(build_hal_language)
        .as_ref()
        .map_err(Clone::clone)
}
