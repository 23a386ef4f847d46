use hal_ir::{Location, SourceKind};
use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

#[test]
fn text_emitter_names_sources() {
    let mut sources = SourceMap::new();
    let main = sources.add("GUIDE.hal", SourceKind::Primary);
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("unexpected `ELSE`")
        .with_label(Location::new(main, 4, 3), "expected a statement")
        .with_note("check the preceding IF");

    let mut emitter = TextEmitter::new(Vec::new(), &sources);
    emitter.emit(&diag);
    emitter.emit_summary(1, 0);
    let out = String::from_utf8(emitter.into_inner()).unwrap();

    assert_eq!(
        out,
        "error [E2001]: unexpected `ELSE`\n  --> GUIDE.hal:4:3: expected a statement\n  = note: check the preceding IF\n1 error\n"
    );
}

#[test]
fn summary_pluralises() {
    let sources = SourceMap::new();
    let mut emitter = TextEmitter::new(Vec::new(), &sources);
    emitter.emit_summary(2, 1);
    emitter.emit_summary(0, 0);
    assert_eq!(String::from_utf8(emitter.into_inner()).unwrap(), "2 errors, 1 warning\n");
}

#[test]
fn count_at_least_includes_higher_severities() {
    let diags = vec![
        Diagnostic::info(ErrorCode::E3004),
        Diagnostic::warning(ErrorCode::E1006),
        Diagnostic::error(ErrorCode::E2001),
        Diagnostic::fatal(ErrorCode::E2003),
    ];
    assert_eq!(count_at_least(&diags, Severity::Error), 2);
    assert_eq!(count_at_least(&diags, Severity::Info), 4);
}
