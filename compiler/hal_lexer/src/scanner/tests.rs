use std::sync::Arc;

use hal_diagnostic::{Diagnostic, ErrorCode};
use hal_ir::{hal, Vocabulary};
use pretty_assertions::assert_eq;

use super::*;
use crate::reader::{LineFormat, SourceReader, TextLines};

fn vocabulary() -> Arc<Vocabulary> {
    Arc::new(hal::terminals().build().unwrap())
}

fn scan_with(text: &str, format: LineFormat) -> (Vec<Token>, Vec<Diagnostic>) {
    let reader = SourceReader::from_text("TEST", text, format);
    let mut scanner = Scanner::new(reader, vocabulary());
    let mut sink = Vec::new();
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token(&mut sink).unwrap();
        if token.symbol == hal::END_OF_FILE {
            return (tokens, sink);
        }
        tokens.push(token);
    }
}

fn scan(text: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    scan_with(text, LineFormat::Free)
}

/// `(vocabulary name, text)` for each token.
fn lexemes(text: &str) -> Vec<(String, String)> {
    let vocab = vocabulary();
    let (tokens, diagnostics) = scan(text);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    tokens
        .into_iter()
        .map(|t| (vocab.name(t.symbol).to_owned(), t.text))
        .collect()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(a, b)| ((*a).to_owned(), (*b).to_owned()))
        .collect()
}

#[test]
fn assignment_statement() {
    assert_eq!(
        lexemes("ALPHA = BETA + 2;"),
        pairs(&[
            ("<IDENTIFIER>", "ALPHA"),
            ("=", "="),
            ("<IDENTIFIER>", "BETA"),
            ("+", "+"),
            ("<SIMPLE NUMBER>", "2"),
            (";", ";"),
        ])
    );
}

#[test]
fn reserved_words_match_case_insensitively() {
    let tokens = lexemes("declare Integer replace by");
    let names: Vec<&str> = tokens.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["DECLARE", "INTEGER", "REPLACE", "BY"]);
    assert_eq!(tokens[1].1, "Integer");
}

#[test]
fn longest_punctuation_wins() {
    assert_eq!(
        lexemes("A||B**2|C*D"),
        pairs(&[
            ("<IDENTIFIER>", "A"),
            ("||", "||"),
            ("<IDENTIFIER>", "B"),
            ("**", "**"),
            ("<SIMPLE NUMBER>", "2"),
            ("|", "|"),
            ("<IDENTIFIER>", "C"),
            ("*", "*"),
            ("<IDENTIFIER>", "D"),
        ])
    );
}

#[test]
fn numbers_are_simple_or_compound() {
    assert_eq!(
        lexemes("12 3.5 .25 1E5 2.0E-3 7B2 4H+1 1.5E3B2"),
        pairs(&[
            ("<SIMPLE NUMBER>", "12"),
            ("<COMPOUND NUMBER>", "3.5"),
            ("<COMPOUND NUMBER>", ".25"),
            ("<COMPOUND NUMBER>", "1E5"),
            ("<COMPOUND NUMBER>", "2.0E-3"),
            ("<COMPOUND NUMBER>", "7B2"),
            ("<COMPOUND NUMBER>", "4H+1"),
            ("<COMPOUND NUMBER>", "1.5E3B2"),
        ])
    );
}

#[test]
fn letter_after_digits_can_start_a_word() {
    assert_eq!(
        lexemes("2END"),
        pairs(&[("<SIMPLE NUMBER>", "2"), ("END", "END")])
    );
}

#[test]
fn exponent_without_digits_is_malformed() {
    let (tokens, diagnostics) = scan("3E+ ;");
    assert_eq!(tokens[0].text, "3E+");
    assert_eq!(tokens[0].symbol, hal::COMPOUND_NUMBER);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E0003);
    assert_eq!(tokens[1].symbol, hal::SEMI_COLON);
}

#[test]
fn strings_undouble_apostrophes_and_keep_escapes() {
    assert_eq!(
        lexemes("'IT''S' 'A`B``C' '` '"),
        pairs(&[
            ("<CHAR STRING>", "IT'S"),
            ("<CHAR STRING>", "A`B``C"),
            ("<CHAR STRING>", "` "),
        ])
    );
}

#[test]
fn undefined_escape_keeps_the_base_character() {
    let (tokens, diagnostics) = scan("'X`!Y'");
    assert_eq!(tokens[0].text, "X!Y");
    assert_eq!(diagnostics[0].code, ErrorCode::E0005);
    assert_eq!(diagnostics[0].primary_location().unwrap().column, 3);
}

#[test]
fn three_escape_characters_are_too_many() {
    let (tokens, diagnostics) = scan("'```A'");
    assert_eq!(tokens[0].text, "``A");
    assert_eq!(diagnostics[0].code, ErrorCode::E0004);
}

#[test]
fn unterminated_string_yields_a_best_effort_token() {
    let (tokens, diagnostics) = scan("X = 'OPEN\nY;");
    let vocab = vocabulary();
    let names: Vec<&str> = tokens.iter().map(|t| vocab.name(t.symbol)).collect();
    assert_eq!(names, vec!["<IDENTIFIER>", "=", "<CHAR STRING>", "<IDENTIFIER>", ";"]);
    assert_eq!(tokens[2].text, "OPEN");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E0002);
}

#[test]
fn long_strings_are_truncated() {
    let text = format!("'{}'", "Q".repeat(300));
    let (tokens, diagnostics) = scan(&text);
    assert_eq!(tokens[0].text.len(), MAX_STRING_LENGTH);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E0010);
}

#[test]
fn long_identifiers_are_truncated() {
    let name = "N".repeat(40);
    let (tokens, diagnostics) = scan(&name);
    assert_eq!(tokens[0].text.len(), MAX_IDENTIFIER_LENGTH);
    assert_eq!(diagnostics[0].code, ErrorCode::E0009);
}

#[test]
fn comments_may_span_lines() {
    assert_eq!(
        lexemes("A /* one\n two */ B"),
        pairs(&[("<IDENTIFIER>", "A"), ("<IDENTIFIER>", "B")])
    );
}

#[test]
fn unterminated_comment_is_reported_once() {
    let (tokens, diagnostics) = scan("A /* never closed\nB C");
    assert_eq!(tokens.len(), 1);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E0006);
}

#[test]
fn replace_text_spans_lines_and_undoubles_quotes() {
    assert_eq!(
        lexemes("REPLACE M BY \"X + \"\"Y\"\"\n + Z\";"),
        pairs(&[
            ("REPLACE", "REPLACE"),
            ("<IDENTIFIER>", "M"),
            ("BY", "BY"),
            ("<TEXT>", "X + \"Y\"\n + Z"),
            (";", ";"),
        ])
    );
}

#[test]
fn percent_macro_names() {
    assert_eq!(
        lexemes("%COPY(A)"),
        pairs(&[
            ("<% MACRO NAME>", "%COPY"),
            ("(", "("),
            ("<IDENTIFIER>", "A"),
            (")", ")"),
        ])
    );
}

#[test]
fn illegal_characters_are_skipped() {
    let (tokens, diagnostics) = scan("A ! [ B");
    assert_eq!(tokens.len(), 2);
    let codes: Vec<ErrorCode> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0011, ErrorCode::E0001]);
}

#[test]
fn locations_follow_card_columns() {
    let (tokens, _) = scan_with(" A = 1;\nC comment\n  B;", LineFormat::Cards);
    let spots: Vec<(u32, u32)> = tokens
        .iter()
        .map(|t| (t.location.line, t.location.column))
        .collect();
    assert_eq!(spots, vec![(1, 2), (1, 4), (1, 6), (1, 7), (3, 3), (3, 4)]);
}

#[test]
fn end_of_file_repeats() {
    let mut scanner = Scanner::new(TextLines::new("X"), vocabulary());
    let mut sink = Vec::new();
    assert_eq!(scanner.next_token(&mut sink).unwrap().text, "X");
    for _ in 0..3 {
        assert_eq!(scanner.next_token(&mut sink).unwrap().symbol, hal::END_OF_FILE);
    }
}

#[test]
fn missing_lexeme_class_drops_the_token() {
    let vocab = Vocabulary::builder()
        .terminals(["ID", "EOF", ";"])
        .class(hal_ir::TokenClass::Identifier, "ID")
        .class(hal_ir::TokenClass::EndOfFile, "EOF")
        .build()
        .unwrap();
    let mut scanner = Scanner::new(TextLines::new("A 'S' ;"), Arc::new(vocab));
    let mut sink = Vec::new();
    let texts: Vec<String> = (0..3)
        .map(|_| scanner.next_token(&mut sink).unwrap().text)
        .collect();
    assert_eq!(texts, vec!["A", ";", ""]);
    assert_eq!(sink[0].code, ErrorCode::E0008);
}
