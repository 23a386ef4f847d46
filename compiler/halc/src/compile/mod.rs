//! Compile one unit: read, scan, expand macros and parse.

use std::path::Path;
use std::sync::Arc;

use hal_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue, DiagnosticSink, ErrorCode};
use hal_grammar::reference::hal_language;
use hal_ir::{ProductionId, SourceMap};
use hal_lexer::{DirectoryLibrary, Scanner, SourceError, SourceReader};
use hal_macro::{MacroExpander, MacroTable, MacroUse};
use hal_parse::{ParseStats, Parser};
use tracing::debug;

use crate::actions::Pass1Actions;
use crate::options::CompileOptions;

/// How the unit ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The parser reached the end of the unit. Recoverable errors may
    /// still have been reported.
    Accepted,
    /// A fatal diagnostic stopped the unit.
    Aborted,
}

/// Everything Pass 1 learned about one unit.
#[derive(Debug)]
pub struct CompilationReport {
    pub outcome: Outcome,
    /// In emission order.
    pub diagnostics: Vec<Diagnostic>,
    pub sources: SourceMap,
    pub stats: ParseStats,
    pub macro_uses: Vec<MacroUse>,
    /// Names defined by `REPLACE`, sorted.
    pub macros: Vec<String>,
    /// Reductions in order; empty unless tracing was requested.
    pub trace: Vec<ProductionId>,
}

impl CompilationReport {
    pub fn is_accepted(&self) -> bool {
        self.outcome == Outcome::Accepted
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Accepted without a single error.
    pub fn is_clean(&self) -> bool {
        self.is_accepted() && !self.has_errors()
    }

    fn failed(diagnostic: Diagnostic, sources: SourceMap) -> Self {
        CompilationReport {
            outcome: Outcome::Aborted,
            diagnostics: vec![diagnostic],
            sources,
            stats: ParseStats::default(),
            macro_uses: Vec::new(),
            macros: Vec::new(),
            trace: Vec::new(),
        }
    }
}

/// Compile a source file.
pub fn compile_file(
    path: &Path,
    options: &CompileOptions,
) -> Result<CompilationReport, SourceError> {
    let reader = SourceReader::open(path, options.line_format)?;
    Ok(compile_unit(reader, options))
}

/// Compile program text held in memory.
pub fn compile_text(name: &str, text: &str, options: &CompileOptions) -> CompilationReport {
    compile_unit(SourceReader::from_text(name, text, options.line_format), options)
}

/// Run Pass 1 over the unit `reader` produces.
pub fn compile_unit(reader: SourceReader, options: &CompileOptions) -> CompilationReport {
    let language = match hal_language() {
        Ok(language) => language,
        Err(err) => {
            let diagnostic = Diagnostic::fatal(ErrorCode::E9002)
                .with_message(format!("the HAL/S grammar did not build: {err}"));
            return CompilationReport::failed(diagnostic, reader.into_source_map());
        }
    };
    let reader = match &options.include_library {
        Some(dir) => reader.with_library(Box::new(DirectoryLibrary::new(dir))),
        None => reader,
    };

    let tables = Arc::clone(&language.tables);
    let vocabulary = Arc::clone(tables.vocabulary());
    let macros = MacroTable::shared();

    let scanner = Scanner::new(reader, Arc::clone(&vocabulary));
    let expander = MacroExpander::new(scanner, Arc::clone(&macros), vocabulary)
        .with_limits(options.expansion_limits());
    let mut actions =
        Pass1Actions::new(Arc::clone(&tables), Arc::clone(&macros), options.max_parameters);
    if options.trace_reductions {
        actions = actions.with_trace();
    }
    let mut parser =
        Parser::new(tables, expander, actions).with_stack_limit(options.parse_stack_limit);

    let config = DiagnosticConfig::default().with_error_limit(options.error_limit);
    let mut queue = DiagnosticQueue::with_config(config);
    let result = parser.parse(&mut queue);
    let outcome = if result.is_ok() && queue.abort_requested().is_none() {
        Outcome::Accepted
    } else {
        Outcome::Aborted
    };

    let stats = parser.stats();
    let (mut expander, mut actions) = parser.into_parts();
    let macro_uses = expander.take_uses();
    let sources = expander.into_source().into_feed().into_source_map();
    let trace = actions.take_trace();
    let defined: Vec<String> = macros.read().names().into_iter().map(str::to_owned).collect();

    debug!(
        ?outcome,
        tokens = stats.tokens,
        reductions = stats.reductions,
        errors = queue.error_count(),
        macros = defined.len(),
        "unit compiled"
    );

    CompilationReport {
        outcome,
        diagnostics: queue.into_diagnostics(),
        sources,
        stats,
        macro_uses,
        macros: defined,
        trace,
    }
}
