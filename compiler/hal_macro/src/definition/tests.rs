use hal_diagnostic::{Diagnostic, ErrorCode, Severity};
use pretty_assertions::assert_eq;

use super::*;

fn at(line: u32) -> Location {
    Location::synthetic(line, 1)
}

#[test]
fn parameters_are_positional() {
    let def = MacroDefinition::new("SWAP", "T = A; A = B; B = T", at(1)).with_parameters(["A", "B"]);
    assert_eq!(def.arity(), 2);
    assert_eq!(def.parameter_index("B"), Some(1));
    assert_eq!(def.parameter_index("T"), None);
}

#[test]
fn redefinition_warns_and_replaces() {
    let mut table = MacroTable::new();
    let mut sink: Vec<Diagnostic> = Vec::new();
    table.define(MacroDefinition::new("N", "1", at(1)), 12, &mut sink);
    table.define(MacroDefinition::new("N", "2", at(5)), 12, &mut sink);

    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup_macro("N").map(|d| d.body.clone()), Some("2".to_owned()));
    assert_eq!(sink.len(), 1);
    assert_eq!(sink[0].code, ErrorCode::E1006);
    assert_eq!(sink[0].severity, Severity::Warning);
    assert_eq!(sink[0].labels[1].location, at(1));
}

#[test]
fn excess_formals_are_dropped() {
    let mut table = MacroTable::new();
    let mut sink: Vec<Diagnostic> = Vec::new();
    let def = MacroDefinition::new("WIDE", "", at(1)).with_parameters(["A", "B", "C"]);
    table.define(def, 2, &mut sink);
    assert_eq!(table.get("WIDE").map(|d| d.arity()), Some(2));
    assert_eq!(sink[0].code, ErrorCode::E1005);
}

#[test]
fn names_are_case_sensitive_and_sorted() {
    let mut table = MacroTable::new();
    table.insert(MacroDefinition::new("beta", "", at(1)));
    table.insert(MacroDefinition::new("ALPHA", "", at(2)));
    assert_eq!(table.names(), vec!["ALPHA", "beta"]);
    assert!(table.lookup_macro("BETA").is_none());
}

#[test]
fn shared_table_is_visible_through_the_lock() {
    let shared = MacroTable::shared();
    assert!(shared.lookup_macro("X").is_none());
    shared.write().insert(MacroDefinition::new("X", "Y", at(1)));
    assert_eq!(shared.lookup_macro("X").map(|d| d.body.clone()), Some("Y".to_owned()));
}
