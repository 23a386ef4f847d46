//! The standard HAL/S terminal vocabulary.
//!
//! Order follows the HAL/S grammar's vocabulary: short punctuation first,
//! then reserved words grouped by length, with the synthetic class tokens
//! (`<IDENTIFIER>`, `<SIMPLE NUMBER>`, ...) interleaved where the language
//! definition puts them. Indices are zero-based. The not sign is spelled
//! `~` and the cent sign `` ` `` in this ASCII rendition.

use crate::{SymbolId, TokenClass, VocabularyBuilder};

/// All HAL/S terminals in vocabulary order.
pub const TERMINALS: [&str; 142] = [
    // 0..=20
    ".", "<", "(", "+", "|", "&", "$", "*", ")", ";", "~", "-", "/", ",", ">", ":", "#", "@", "=",
    "||", "**",
    // 21..=29
    "AT", "BY", "DO", "GO", "IF", "IN", "ON", "OR", "TO",
    // 30
    "END_OF_FILE",
    // 31..=74
    "AND", "BIN", "BIT", "CAT", "DEC", "END", "FOR", "HEX", "NOT", "OCT", "OFF", "SET", "TAB",
    "CALL", "CASE", "CHAR", "ELSE", "EXIT", "FILE", "LINE", "LOCK", "NAME", "NULL", "PAGE",
    "READ", "SEND", "SKIP", "TASK", "THEN", "TRUE", "WAIT", "AFTER", "ARRAY", "CLOSE", "DENSE",
    "ERROR", "EVENT", "EVERY", "FALSE", "RESET", "RIGID", "UNTIL", "WHILE", "WRITE",
    // 75
    "<TEXT>",
    // 76..=95
    "ACCESS", "ASSIGN", "CANCEL", "COLUMN", "DOUBLE", "EQUATE", "IGNORE", "MATRIX", "NONHAL",
    "REMOTE", "REPEAT", "RETURN", "SCALAR", "SIGNAL", "SINGLE", "STATIC", "SUBBIT", "SYSTEM",
    "UPDATE", "VECTOR",
    // 96..=124
    "<EMPTY>", "<LABEL>", "<LEVEL>", "ALIGNED", "BOOLEAN", "COMPOOL", "DECLARE", "INITIAL",
    "INTEGER", "LATCHED", "PROGRAM", "READALL", "REPLACE", "<BIT ID>", "CONSTANT", "EXTERNAL",
    "FUNCTION", "PRIORITY", "SCHEDULE", "<CHAR ID>", "AUTOMATIC", "CHARACTER", "DEPENDENT",
    "EXCLUSIVE", "PROCEDURE", "REENTRANT", "STRUCTURE", "TEMPORARY", "TERMINATE",
    // 125..=141
    "<ARITH ID>", "<BIT FUNC>", "<EVENT ID>", "<CHAR FUNC>", "<ARITH FUNC>", "<IDENTIFIER>",
    "<CHAR STRING>", "<STRUCT FUNC>", "<% MACRO NAME>", "<STRUCTURE ID>", "<SIMPLE NUMBER>",
    "<COMPOUND NUMBER>", "<NO ARG BIT FUNC>", "<STRUCT TEMPLATE>", "<NO ARG CHAR FUNC>",
    "<NO ARG ARITH FUNC>", "<NO ARG STRUCT FUNC>",
];

pub const LEFT_PAREN: SymbolId = SymbolId::new(2);
pub const RIGHT_PAREN: SymbolId = SymbolId::new(8);
pub const SEMI_COLON: SymbolId = SymbolId::new(9);
pub const COMMA: SymbolId = SymbolId::new(13);
pub const END_OF_FILE: SymbolId = SymbolId::new(30);
pub const REPLACE_TEXT: SymbolId = SymbolId::new(75);
pub const REPLACE: SymbolId = SymbolId::new(108);
pub const IDENTIFIER: SymbolId = SymbolId::new(130);
pub const CHAR_STRING: SymbolId = SymbolId::new(131);
pub const PERCENT_MACRO: SymbolId = SymbolId::new(133);
pub const SIMPLE_NUMBER: SymbolId = SymbolId::new(135);
pub const COMPOUND_NUMBER: SymbolId = SymbolId::new(136);

/// Class bindings for the synthetic HAL/S tokens.
const CLASSES: [(TokenClass, &str); 7] = [
    (TokenClass::Identifier, "<IDENTIFIER>"),
    (TokenClass::SimpleNumber, "<SIMPLE NUMBER>"),
    (TokenClass::CompoundNumber, "<COMPOUND NUMBER>"),
    (TokenClass::CharString, "<CHAR STRING>"),
    (TokenClass::ReplaceText, "<TEXT>"),
    (TokenClass::PercentMacro, "<% MACRO NAME>"),
    (TokenClass::EndOfFile, "END_OF_FILE"),
];

/// A builder holding every HAL/S terminal and class binding; add the
/// grammar's nonterminals and build.
pub fn terminals() -> VocabularyBuilder {
    CLASSES
        .iter()
        .fold(VocabularyBuilder::new().terminals(TERMINALS), |builder, (class, name)| {
            builder.class(*class, *name)
        })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn named_constants_match_spellings() {
        let vocab = terminals().build().unwrap();
        for (id, name) in [
            (LEFT_PAREN, "("),
            (RIGHT_PAREN, ")"),
            (SEMI_COLON, ";"),
            (COMMA, ","),
            (END_OF_FILE, "END_OF_FILE"),
            (REPLACE_TEXT, "<TEXT>"),
            (REPLACE, "REPLACE"),
            (IDENTIFIER, "<IDENTIFIER>"),
            (CHAR_STRING, "<CHAR STRING>"),
            (PERCENT_MACRO, "<% MACRO NAME>"),
            (SIMPLE_NUMBER, "<SIMPLE NUMBER>"),
            (COMPOUND_NUMBER, "<COMPOUND NUMBER>"),
        ] {
            assert_eq!(vocab.name(id), name);
        }
    }

    #[test]
    fn classes_resolve_to_synthetic_tokens() {
        let vocab = terminals().build().unwrap();
        assert_eq!(vocab.identifier(), IDENTIFIER);
        assert_eq!(vocab.end_of_file(), END_OF_FILE);
        assert_eq!(vocab.class(TokenClass::ReplaceText), Some(REPLACE_TEXT));
        assert_eq!(vocab.reserved_word("replace"), Some(REPLACE));
        assert_eq!(vocab.reserved_word("IDENTIFIER"), None);
    }

    #[test]
    fn bar_and_star_pairs_are_punctuation() {
        let vocab = terminals().build().unwrap();
        assert_eq!(vocab.match_punctuation("||X").map(|(_, n)| n), Some(2));
        assert_eq!(vocab.match_punctuation("|X").map(|(_, n)| n), Some(1));
        assert_eq!(vocab.match_punctuation("**2").map(|(_, n)| n), Some(2));
    }
}
