use std::sync::Arc;

use hal_ir::{ExpansionSite, SourceId, SymbolId};
use pretty_assertions::assert_eq;

use super::*;

fn loc(line: u32, column: u32) -> Location {
    Location::new(SourceId::new(0), line, column)
}

#[test]
fn builder_collects_labels_and_notes() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("unexpected `ELSE`")
        .with_label(loc(3, 5), "expected `;`")
        .with_secondary_label(loc(2, 1), "statement starts here")
        .with_note("ELSE must follow a complete statement");

    assert_eq!(diag.primary_location(), Some(loc(3, 5)));
    assert_eq!(diag.labels.len(), 2);
    assert!(diag.is_error());
    assert!(!diag.is_fatal());
}

#[test]
fn display_renders_labels_and_notes() {
    let diag = Diagnostic::warning(ErrorCode::E1006)
        .with_message("macro `PI` redefined")
        .with_label(loc(7, 9), "new definition")
        .with_note("the previous body is discarded");

    assert_eq!(
        diag.to_string(),
        "warning [E1006]: macro `PI` redefined\n  --> 7:9: new definition\n  = note: the previous body is discarded"
    );
}

#[test]
fn new_uses_the_code_default_severity() {
    assert_eq!(Diagnostic::new(ErrorCode::E2003).severity, Severity::Fatal);
    assert_eq!(Diagnostic::new(ErrorCode::E3004).severity, Severity::Info);
    assert_eq!(Diagnostic::new(ErrorCode::E0001).severity, Severity::Error);
}

#[test]
fn token_label_attributes_every_expansion_level() {
    let outer = Arc::new(ExpansionSite {
        macro_name: "OUTER".to_string(),
        call_site: loc(10, 4),
        definition: loc(1, 1),
        parent: None,
    });
    let inner = Arc::new(ExpansionSite {
        macro_name: "INNER".to_string(),
        call_site: Location::synthetic(1, 6),
        definition: loc(2, 1),
        parent: Some(outer),
    });
    let token = Token::new(SymbolId::new(3), "+", Location::synthetic(1, 2)).with_origin(Some(inner));

    let diag = Diagnostic::error(ErrorCode::E2001).with_token_label(&token, "unexpected `+`");

    assert_eq!(diag.primary_location(), Some(loc(10, 4)));
    let secondary: Vec<_> = diag
        .labels
        .iter()
        .filter(|l| !l.is_primary)
        .map(|l| l.message.as_str())
        .collect();
    assert_eq!(secondary, vec!["in expansion of `INNER`", "in expansion of `OUTER`"]);
    assert_eq!(diag.notes.len(), 2);
}

#[test]
fn severities_are_ordered() {
    assert!(Severity::Info < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
    assert!(Severity::Error < Severity::Fatal);
}
