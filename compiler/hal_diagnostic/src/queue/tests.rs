use hal_ir::{Location, SourceId};
use pretty_assertions::assert_eq;

use super::*;

fn at(line: u32) -> Location {
    Location::new(SourceId::new(0), line, 1)
}

fn syntax(line: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2001)
        .with_message("unexpected token")
        .with_label(at(line), "here")
}

#[test]
fn keeps_emission_order() {
    let mut queue = DiagnosticQueue::new();
    queue.report(syntax(5));
    queue.report(Diagnostic::warning(ErrorCode::E1006).with_message("redefined"));
    queue.report(syntax(2));

    let codes: Vec<_> = queue.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2001, ErrorCode::E1006, ErrorCode::E2001]);
    assert_eq!(queue.error_count(), 2);
    assert_eq!(queue.warning_count(), 1);
}

#[test]
fn identical_diagnostics_are_dropped() {
    let mut queue = DiagnosticQueue::new();
    queue.report(syntax(5));
    queue.report(syntax(5));
    assert_eq!(queue.len(), 1);
}

#[test]
fn dedup_can_be_disabled() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 0,
        deduplicate: false,
    });
    queue.report(syntax(5));
    queue.report(syntax(5));
    assert_eq!(queue.len(), 2);
}

#[test]
fn error_limit_records_one_fatal_and_requests_abort() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited().with_error_limit(2));
    queue.report(syntax(1));
    assert!(queue.abort_requested().is_none());
    queue.report(syntax(2));
    queue.report(syntax(3));

    assert!(queue.limit_reached());
    assert!(queue.has_fatal());
    assert!(queue.abort_requested().is_some());
    let codes: Vec<_> = queue.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2001, ErrorCode::E2001, ErrorCode::E9001]);
}

#[test]
fn info_does_not_count_as_error() {
    let mut queue = DiagnosticQueue::new();
    queue.report(Diagnostic::info(ErrorCode::E3004).with_message("directive ignored"));
    assert_eq!(queue.error_count(), 0);
    assert!(queue.aborted().is_none());
}

#[test]
fn fatal_is_recorded_as_proof() {
    let mut queue = DiagnosticQueue::new();
    let proof = queue.fatal(Diagnostic::fatal(ErrorCode::E2003).with_message("overflow"));
    assert_eq!(queue.aborted(), Some(proof));
}
