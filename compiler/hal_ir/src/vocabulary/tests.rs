use pretty_assertions::assert_eq;

use super::*;

fn small() -> Vocabulary {
    let mut builder = Vocabulary::builder()
        .terminals(["EOF", "IDENT", ":=", ":", "=", "+", ";", "*", "**", "DO", "<NUMBER>"])
        .class(TokenClass::EndOfFile, "EOF")
        .class(TokenClass::Identifier, "IDENT")
        .class(TokenClass::SimpleNumber, "<NUMBER>");
    builder.nonterminal("statement");
    builder.nonterminal("expression");
    builder.build().unwrap()
}

#[test]
fn terminals_precede_nonterminals() {
    let vocab = small();
    assert_eq!(vocab.terminal_count(), 11);
    assert_eq!(vocab.len(), 13);
    let statement = vocab.lookup("statement").unwrap();
    assert!(vocab.is_nonterminal(statement));
    assert!(!vocab.is_terminal(statement));
    assert_eq!(vocab.nonterminals().count(), 2);
}

#[test]
fn class_terminals_are_not_matched_by_spelling() {
    let vocab = small();
    assert_eq!(vocab.reserved_word("EOF"), None);
    assert_eq!(vocab.reserved_word("IDENT"), None);
    assert_eq!(vocab.identifier(), vocab.lookup("IDENT").unwrap());
    assert_eq!(vocab.end_of_file(), SymbolId::new(0));
}

#[test]
fn reserved_words_match_case_insensitively() {
    let vocab = small();
    let do_word = vocab.lookup("DO");
    assert_eq!(vocab.reserved_word("DO"), do_word);
    assert_eq!(vocab.reserved_word("do"), do_word);
    assert_eq!(vocab.reserved_word("Do"), do_word);
    assert_eq!(vocab.reserved_word("DONE"), None);
}

#[test]
fn punctuation_prefers_longest_match() {
    let vocab = small();
    assert_eq!(vocab.match_punctuation(":= B"), Some((vocab.lookup(":=").unwrap(), 2)));
    assert_eq!(vocab.match_punctuation(": B"), Some((vocab.lookup(":").unwrap(), 1)));
    assert_eq!(vocab.match_punctuation("**2"), Some((vocab.lookup("**").unwrap(), 2)));
    assert_eq!(vocab.match_punctuation("?"), None);
}

#[test]
fn duplicate_symbols_are_rejected() {
    let err = Vocabulary::builder()
        .terminals(["EOF", "ID", "ID"])
        .class(TokenClass::EndOfFile, "EOF")
        .class(TokenClass::Identifier, "ID")
        .build()
        .unwrap_err();
    assert_eq!(err, VocabularyError::DuplicateSymbol("ID".to_string()));
}

#[test]
fn identifier_and_end_of_file_classes_are_required() {
    let err = Vocabulary::builder()
        .terminals(["EOF", "ID"])
        .class(TokenClass::EndOfFile, "EOF")
        .build()
        .unwrap_err();
    assert_eq!(err, VocabularyError::MissingClass(TokenClass::Identifier));
}

#[test]
fn terminals_after_nonterminals_are_rejected() {
    let mut builder = Vocabulary::builder()
        .terminals(["EOF", "ID"])
        .class(TokenClass::EndOfFile, "EOF")
        .class(TokenClass::Identifier, "ID");
    builder.nonterminal("s");
    let err = builder.terminal("late").build().unwrap_err();
    assert_eq!(err, VocabularyError::TerminalAfterNonterminal("late".to_string()));
}

#[test]
fn class_bound_to_nonterminal_is_rejected() {
    let mut builder = Vocabulary::builder()
        .terminals(["EOF", "ID"])
        .class(TokenClass::EndOfFile, "EOF")
        .class(TokenClass::Identifier, "s");
    builder.nonterminal("s");
    assert_eq!(
        builder.build().unwrap_err(),
        VocabularyError::UnknownClassSymbol(TokenClass::Identifier, "s".to_string())
    );
}
