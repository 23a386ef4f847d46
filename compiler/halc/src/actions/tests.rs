use hal_diagnostic::{Diagnostic, ErrorCode, Severity};
use hal_grammar::reference::hal_language;
use hal_ir::hal;
use hal_lexer::{LineFormat, Scanner, SourceReader};
use hal_macro::MacroTable;
use hal_parse::Parser;
use pretty_assertions::assert_eq;

use super::*;

fn run(text: &str, max_parameters: usize, trace: bool) -> (Pass1Actions, Vec<Diagnostic>) {
    let tables = Arc::clone(&hal_language().unwrap().tables);
    let reader = SourceReader::from_text("TEST", text, LineFormat::Free);
    let scanner = Scanner::new(reader, Arc::clone(tables.vocabulary()));
    let mut actions = Pass1Actions::new(Arc::clone(&tables), MacroTable::shared(), max_parameters);
    if trace {
        actions = actions.with_trace();
    }
    let mut parser = Parser::new(tables, scanner, actions);
    let mut sink = Vec::new();
    parser.parse(&mut sink).unwrap();
    let (_, actions) = parser.into_parts();
    (actions, sink)
}

#[test]
fn replace_defines_a_macro() {
    let (actions, diagnostics) = run(
        "T: PROGRAM;\nREPLACE LIMIT BY \"100\";\nREPLACE SUM(A, B, C) BY \"A + B + C\";\nCLOSE T;",
        12,
        false,
    );
    assert!(diagnostics.is_empty(), "{diagnostics:#?}");
    assert_eq!(actions.definitions(), 2);

    let table = actions.macros().read();
    assert_eq!(table.names(), vec!["LIMIT", "SUM"]);
    let limit = table.get("LIMIT").unwrap();
    assert_eq!(limit.body, "100");
    assert_eq!(limit.arity(), 0);
    assert_eq!((limit.location.line, limit.location.column), (2, 9));

    let sum = table.get("SUM").unwrap();
    assert_eq!(sum.parameters, vec!["A", "B", "C"]);
    assert_eq!(sum.body, "A + B + C");
}

#[test]
fn excess_parameters_are_reported_and_dropped() {
    let (actions, diagnostics) = run(
        "T: PROGRAM; REPLACE F(A, B, C) BY \"A\"; CLOSE T;",
        2,
        false,
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E1005);
    let table = actions.macros().read();
    assert_eq!(table.get("F").unwrap().parameters, vec!["A", "B"]);
}

#[test]
fn redefinition_warns_and_replaces() {
    let (actions, diagnostics) = run(
        "T: PROGRAM; REPLACE K BY \"1\"; REPLACE K BY \"2\"; CLOSE T;",
        12,
        false,
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E1006);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(actions.definitions(), 2);
    assert_eq!(actions.macros().read().get("K").unwrap().body, "2");
}

#[test]
fn trace_records_every_reduction() {
    let (mut actions, _) = run("T: PROGRAM; X = 1; CLOSE T;", 12, true);
    let trace = actions.take_trace();
    let grammar = &hal_language().unwrap().grammar;
    let first = grammar.display(trace[0]).to_string();
    assert_eq!(first, "<LABEL DEFINITION> ::= <IDENTIFIER> :");
    let last = grammar.display(*trace.last().unwrap()).to_string();
    assert_eq!(last, "<COMPILATION> ::= <BLOCK DEFINITION>");
    assert!(actions.trace().is_empty());
}

#[test]
fn trace_is_off_by_default() {
    let (actions, _) = run("T: PROGRAM; CLOSE T;", 12, false);
    assert!(actions.trace().is_empty());
    assert_eq!(actions.definitions(), 0);
}

#[test]
fn argument_lists_keep_identifiers_only() {
    let comma = Token::new(hal::COMMA, ",", hal_ir::Location::synthetic(1, 2));
    let a = Token::new(hal::IDENTIFIER, "A", hal_ir::Location::synthetic(1, 1));
    let b = Token::new(hal::IDENTIFIER, "B", hal_ir::Location::synthetic(1, 3));
    let value = names(
        vec![
            StackSlot::Value(Pass1Value::Names(vec![a.clone()])),
            StackSlot::Token(comma),
            StackSlot::Token(b.clone()),
        ],
        hal::IDENTIFIER,
    );
    assert_eq!(value, Pass1Value::Names(vec![a, b]));
}
