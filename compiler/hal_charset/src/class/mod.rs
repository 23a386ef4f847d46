//! Lexical character classes over internal codes.

use crate::tables::INTERNAL_TO_ASCII;
use crate::translate::{EOF_SENTINEL, ESCAPE_CHAR, ESCAPE_CODE};

/// Coarse class of an internal character, as seen by the scanner's
/// dispatch on the first character of a token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CharClass {
    Digit,
    Letter,
    Blank,
    Period,
    Apostrophe,
    Bar,
    Star,
    DoubleQuote,
    Percent,
    Escape,
    /// Single-character operators and punctuation.
    Special,
    EndOfFile,
    Illegal,
}

impl CharClass {
    pub fn of(code: u8) -> CharClass {
        match code {
            ESCAPE_CODE => return CharClass::Escape,
            EOF_SENTINEL => return CharClass::EndOfFile,
            _ => {}
        }
        match INTERNAL_TO_ASCII[usize::from(code)] {
            b'0'..=b'9' => CharClass::Digit,
            b'A'..=b'Z' | b'a'..=b'z' => CharClass::Letter,
            b' ' => CharClass::Blank,
            b'.' => CharClass::Period,
            b'\'' => CharClass::Apostrophe,
            b'|' => CharClass::Bar,
            b'*' => CharClass::Star,
            b'"' => CharClass::DoubleQuote,
            b'%' => CharClass::Percent,
            b'<' | b'(' | b'+' | b'&' | b'$' | b')' | b';' | b'~' | b'-' | b'/' | b',' | b'>'
            | b':' | b'#' | b'@' | b'=' => CharClass::Special,
            _ => CharClass::Illegal,
        }
    }

    /// Class of a raw source byte, without translating it first.
    pub fn of_ascii(byte: u8) -> CharClass {
        if byte == ESCAPE_CHAR {
            return CharClass::Escape;
        }
        match crate::translate::translate_in(byte) {
            Ok(code) => CharClass::of(code),
            Err(_) => CharClass::Illegal,
        }
    }
}

/// Letters, digits and the break character may continue an identifier.
pub fn is_identifier_char(code: u8) -> bool {
    matches!(
        INTERNAL_TO_ASCII[usize::from(code)],
        b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z' | b'_'
    )
}
