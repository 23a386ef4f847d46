#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use hal_ir::{hal, Location, Token, Vocabulary};
use hal_lexer::{LineFormat, Scanner, SourceReader, TokenSource};
use hal_macro::{MacroDefinition, MacroExpander, MacroTable};
use proptest::prelude::*;

fn vocabulary() -> Arc<Vocabulary> {
    Arc::new(hal::terminals().build().unwrap())
}

fn expand(text: &str, table: &MacroTable) -> Vec<Token> {
    let vocab = vocabulary();
    let reader = SourceReader::from_text("UNIT", text, LineFormat::Free);
    let scanner = Scanner::new(reader, Arc::clone(&vocab));
    let mut expander = MacroExpander::new(scanner, table, vocab);
    let mut sink = Vec::new();
    let mut tokens = Vec::new();
    loop {
        let token = expander.next_token(&mut sink).unwrap();
        if token.symbol == hal::END_OF_FILE {
            assert!(sink.is_empty(), "{sink:?}");
            return tokens;
        }
        tokens.push(token);
    }
}

fn same_lexemes(left: &[Token], right: &[Token]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| a.same_lexeme(b))
}

fn two_parameter_table() -> MacroTable {
    let mut table = MacroTable::new();
    table.insert(
        MacroDefinition::new("MIX", "A * (A + B) - B / 2", Location::synthetic(1, 1))
            .with_parameters(["A", "B"]),
    );
    table.insert(MacroDefinition::new(
        "WRAP",
        "MIX(X, Y)",
        Location::synthetic(2, 1),
    ));
    table
}

#[test]
fn expansion_matches_manual_substitution() {
    let table = two_parameter_table();
    let expanded = expand("Z = MIX(X, Y);", &table);
    let manual = expand("Z = X * (X + Y) - Y / 2;", &MacroTable::new());
    assert!(same_lexemes(&expanded, &manual));
}

#[test]
fn expansion_inside_another_expansion_matches_too() {
    let table = two_parameter_table();
    let nested = expand("Z = WRAP;", &table);
    let manual = expand("Z = X * (X + Y) - Y / 2;", &MacroTable::new());
    assert!(same_lexemes(&nested, &manual));

    // Tokens from the inner body carry both expansions.
    let from_body = &nested[3];
    assert_eq!(from_body.text, "*");
    let names: Vec<&str> = from_body
        .origin
        .as_ref()
        .unwrap()
        .chain()
        .map(|site| site.macro_name.as_str())
        .collect();
    assert_eq!(names, vec!["MIX", "WRAP"]);
}

#[test]
fn expander_is_a_token_source() {
    fn pull_all(source: &mut dyn TokenSource) -> usize {
        let mut sink = Vec::new();
        let mut count = 0;
        while source.next_token(&mut sink).unwrap().symbol != hal::END_OF_FILE {
            count += 1;
        }
        count
    }
    let table = two_parameter_table();
    let vocab = vocabulary();
    let reader = SourceReader::from_text("UNIT", "WRAP", LineFormat::Free);
    let mut expander = MacroExpander::new(Scanner::new(reader, Arc::clone(&vocab)), &table, vocab);
    assert_eq!(pull_all(&mut expander), 11);
}

fn body_word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["P", "Q", "K", "+", "-", "*", "(", ")", "1", "2.5", ";", "'S'"])
}

fn actual() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["U", "V", "3", "+", "W(1)"]), 0..4)
        .prop_map(|words| words.join(" "))
}

proptest! {
    /// The same call with the same actuals always expands to the same tokens.
    #[test]
    fn expansion_is_idempotent(
        body in prop::collection::vec(body_word(), 0..16),
        first in actual(),
        second in actual(),
    ) {
        let mut table = MacroTable::new();
        table.insert(
            MacroDefinition::new("M", body.join(" "), Location::synthetic(1, 1))
                .with_parameters(["P", "Q"]),
        );
        let call = format!("M({first}, {second})");
        let once = expand(&call, &table);
        let twice = expand(&format!("{call} {call}"), &table);
        prop_assert_eq!(twice.len(), once.len() * 2);
        prop_assert!(same_lexemes(&twice[..once.len()], &once));
        prop_assert!(same_lexemes(&twice[once.len()..], &once));
    }
}
