use hal_ir::{TokenClass, Vocabulary, VocabularyBuilder};
use pretty_assertions::assert_eq;

use super::*;
use crate::{parse_bnf, Action};

const ASSIGNMENTS: &str = "\
<program> ::= <statement>
            | <program> <statement>
<statement> ::= <assignment> ;
<assignment> ::= IDENT := <expression>
<expression> ::= <operand> + <operand>
               | <operand>
<operand> ::= IDENT
";

fn terminals() -> VocabularyBuilder {
    Vocabulary::builder()
        .terminals(["END_OF_FILE", "IDENT", ":=", "+", ";", "IF", "ELSE"])
        .class(TokenClass::EndOfFile, "END_OF_FILE")
        .class(TokenClass::Identifier, "IDENT")
}

fn build(bnf: &str) -> (Grammar, ParseTables, BuildReport) {
    let grammar = parse_bnf(bnf, terminals()).unwrap();
    let (tables, report) = TableBuilder::new(&grammar).build().unwrap();
    (grammar, tables, report)
}

fn sym(grammar: &Grammar, name: &str) -> SymbolId {
    grammar.vocabulary().lookup(name).unwrap()
}

fn state(n: u16) -> StateId {
    StateId::new(n)
}

fn prod(n: u16) -> ProductionId {
    ProductionId::new(n)
}

#[test]
fn assignment_grammar_automaton() {
    let (grammar, tables, report) = build(ASSIGNMENTS);
    assert!(report.is_conflict_free());
    assert_eq!(report.states, 13);
    assert_eq!(tables.state_count(), 13);
    assert_eq!(tables.production_count(), 8);

    let ident = sym(&grammar, "IDENT");
    let plus = sym(&grammar, "+");
    let semi = sym(&grammar, ";");
    let program = sym(&grammar, "<program>");
    let statement = sym(&grammar, "<statement>");
    let assignment = sym(&grammar, "<assignment>");

    assert_eq!(
        tables.reads(state(0)).collect::<Vec<_>>(),
        vec![
            (ident, state(1)),
            (program, state(2)),
            (statement, state(3)),
            (assignment, state(4)),
        ]
    );
    assert_eq!(tables.read_entry(state(4), semi), Some(state(7)));
    assert_eq!(tables.read_entry(state(4), plus), None);

    // `<expression> ::= <operand>` competes with the shift of `+`.
    assert_eq!(tables.apply(state(10)), &[prod(6)]);
    assert!(tables.needs_lookahead(state(10)));
    assert_eq!(tables.action(state(10), plus), Action::Shift(state(11)));
    assert_eq!(tables.action(state(10), semi), Action::Reduce(prod(6)));

    // Pure reduce states decide without a lookahead.
    assert_eq!(tables.default_reduction(state(3)), Some(prod(1)));
    assert_eq!(tables.default_reduction(state(8)), Some(prod(7)));
    assert_eq!(tables.default_reduction(state(0)), None);
    assert_eq!(tables.action(state(1), semi), Action::Error);
    assert_eq!(tables.expected_terminals(state(1)), vec![sym(&grammar, ":=")]);
}

#[test]
fn dangling_else_prefers_shift() {
    let bnf = "\
<stmt> ::= IF <stmt>
         | IF <stmt> ELSE <stmt>
         | IDENT
";
    let (grammar, tables, report) = build(bnf);
    let else_ = sym(&grammar, "ELSE");

    assert_eq!(report.shift_reduce(), 1);
    assert_eq!(report.reduce_reduce(), 0);
    let conflict = report.conflicts[0];
    assert_eq!(conflict.terminal, else_);
    assert_eq!(
        conflict.kind,
        ConflictKind::ShiftReduce {
            production: prod(1)
        }
    );
    assert!(matches!(
        tables.action(conflict.state, else_),
        Action::Shift(_)
    ));
    assert_eq!(
        tables.action(conflict.state, sym(&grammar, "END_OF_FILE")),
        Action::Reduce(prod(1))
    );
}

#[test]
fn reduce_reduce_keeps_earlier_production() {
    let bnf = "\
<goal> ::= <left>
         | <right>
<left> ::= IDENT
<right> ::= IDENT
";
    let (grammar, tables, report) = build(bnf);
    assert_eq!(report.reduce_reduce(), 1);
    let conflict = report.conflicts[0];
    assert_eq!(
        conflict.kind,
        ConflictKind::ReduceReduce {
            kept: prod(3),
            dropped: prod(4)
        }
    );
    assert_eq!(conflict.terminal, sym(&grammar, "END_OF_FILE"));
    // The losing candidate can never be chosen, so only one remains.
    assert_eq!(tables.apply(conflict.state), &[prod(3)]);
    assert_eq!(tables.lookaheads(conflict.state).count(), 0);
    assert_eq!(
        conflict.to_string(),
        format!(
            "state {} on {}: production 3 preferred over production 4",
            conflict.state, conflict.terminal
        )
    );
}

#[test]
fn lookahead_rows_separate_candidates() {
    // After IDENT, `;` reduces to <a> and `+` reduces to <b>.
    let bnf = "\
<goal> ::= <a> ;
         | <b> +
<a> ::= IDENT
<b> ::= IDENT
";
    let (grammar, tables, report) = build(bnf);
    assert!(report.is_conflict_free());
    let ident = sym(&grammar, "IDENT");
    let after_ident = tables.read_entry(StateId::INITIAL, ident).unwrap();

    assert_eq!(tables.apply(after_ident), &[prod(3), prod(4)]);
    assert_eq!(
        tables.lookaheads(after_ident).collect::<Vec<_>>(),
        vec![(sym(&grammar, "+"), prod(4)), (sym(&grammar, ";"), prod(3))]
    );
    assert!(tables.needs_lookahead(after_ident));
    assert_eq!(
        tables.action(after_ident, sym(&grammar, ";")),
        Action::Reduce(prod(3))
    );
    assert_eq!(tables.action(after_ident, ident), Action::Error);
}

#[test]
fn empty_productions_reduce_by_default() {
    let bnf = "\
<list> ::=
       | <list> IDENT
";
    let (grammar, tables, report) = build(bnf);
    assert!(report.is_conflict_free());
    assert_eq!(tables.default_reduction(StateId::INITIAL), Some(prod(1)));
    let list = tables
        .read_entry(StateId::INITIAL, sym(&grammar, "<list>"))
        .unwrap();
    assert!(tables.needs_lookahead(list));
    assert_eq!(tables.apply(list), &[] as &[ProductionId]);
}

#[test]
fn recovery_terminals_must_be_terminals() {
    let grammar = parse_bnf(ASSIGNMENTS, terminals()).unwrap();
    let program = sym(&grammar, "<program>");
    let err = TableBuilder::new(&grammar)
        .sync_terminals([program])
        .build()
        .unwrap_err();
    assert_eq!(err, GrammarError::SyncNotTerminal("<program>".into()));

    let semi = sym(&grammar, ";");
    let (tables, _) = TableBuilder::new(&grammar)
        .sync_terminals([semi, semi])
        .build()
        .unwrap();
    assert_eq!(tables.sync_terminals(), &[semi]);
    assert!(tables.is_sync(semi));
}

#[test]
fn builds_are_deterministic() {
    let (_, first, first_report) = build(ASSIGNMENTS);
    let (_, second, second_report) = build(ASSIGNMENTS);
    assert_eq!(first, second);
    assert_eq!(first_report, second_report);
}
