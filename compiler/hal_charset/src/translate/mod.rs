//! Bidirectional translation between ASCII source text and internal codes.

use std::fmt;

use crate::tables::{ASCII_TO_INTERNAL, ESCAPE_IN, ESCAPE_OUT, INTERNAL_TO_ASCII};

/// The escape introducer as typed in source (stands for the cent sign).
pub const ESCAPE_CHAR: u8 = b'`';
/// Internal code of the escape introducer.
pub const ESCAPE_CODE: u8 = 0x4A;
/// End-of-file marker in the internal character stream. It is never
/// produced by [`translate_in`].
pub const EOF_SENTINEL: u8 = 0xFE;
/// Operator of the only escape allowed to produce internal code 0x00...
pub const VALID_00_OP: u8 = b'_';
/// ...when applied to this character.
pub const VALID_00_CHAR: u8 = b'0';

/// How many escape introducers precede a base character.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum EscapeLevel {
    One,
    Two,
}

impl EscapeLevel {
    pub const fn number(self) -> usize {
        match self {
            EscapeLevel::One => 1,
            EscapeLevel::Two => 2,
        }
    }

    /// Overpunch operator character that selects this level.
    pub const fn op(self) -> u8 {
        match self {
            EscapeLevel::One => b'_',
            EscapeLevel::Two => b'=',
        }
    }
}

impl fmt::Display for EscapeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Result of re-emitting one internal code as source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OutputChar {
    Direct(u8),
    Escaped { level: EscapeLevel, base: u8 },
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("character {0:#04x} has no internal code")]
    Unmapped(u8),
    #[error("internal code {0:#04x} has no external representation")]
    Unrepresentable(u8),
    #[error("escape level {0} is not defined; at most two introducers may be used")]
    LevelTooHigh(usize),
    #[error("level {level} escape of `{}` is undefined", as_char(.base))]
    UndefinedEscape { level: EscapeLevel, base: u8 },
}

fn as_char(byte: &u8) -> char {
    char::from(*byte)
}

/// Map a source byte to its internal code.
///
/// Defined for the ASCII data characters only. The escape introducer has
/// no code of its own; it is resolved together with the character after it
/// by [`translate_escape`].
pub fn translate_in(byte: u8) -> Result<u8, TranslateError> {
    match ASCII_TO_INTERNAL.get(usize::from(byte)) {
        Some(&code) if code != 0 => Ok(code),
        _ => Err(TranslateError::Unmapped(byte)),
    }
}

/// Whether `byte` is a data character: it translates in and straight back out.
pub fn is_data_char(byte: u8) -> bool {
    translate_in(byte).is_ok()
}

/// Level for a run of `count` escape introducers.
pub fn escape_level(count: usize) -> Result<EscapeLevel, TranslateError> {
    match count {
        1 => Ok(EscapeLevel::One),
        2 => Ok(EscapeLevel::Two),
        n => Err(TranslateError::LevelTooHigh(n)),
    }
}

/// Internal code produced by escaping `base` at `level`.
///
/// A zero code doubles as "undefined" in the escape table, so it is
/// accepted only for the validated operator/character pair.
pub fn translate_escape(level: EscapeLevel, base: u8) -> Result<u8, TranslateError> {
    let undefined = TranslateError::UndefinedEscape { level, base };
    let row = ESCAPE_IN.get(usize::from(base)).ok_or(undefined)?;
    let code = match level {
        EscapeLevel::One => row[0],
        EscapeLevel::Two => row[1],
    };
    if code == 0 && !(level.op() == VALID_00_OP && base == VALID_00_CHAR) {
        return Err(undefined);
    }
    Ok(code)
}

/// Map an internal code back to source text.
///
/// Prefers a direct byte. The escape introducer's own code is always
/// written as an escape so re-scanning the output cannot misread it.
pub fn translate_out(code: u8) -> Result<OutputChar, TranslateError> {
    let direct = INTERNAL_TO_ASCII[usize::from(code)];
    if direct != 0 {
        return Ok(OutputChar::Direct(direct));
    }
    match ESCAPE_OUT[usize::from(code)] {
        (1, base) => Ok(OutputChar::Escaped {
            level: EscapeLevel::One,
            base,
        }),
        (2, base) => Ok(OutputChar::Escaped {
            level: EscapeLevel::Two,
            base,
        }),
        _ => Err(TranslateError::Unrepresentable(code)),
    }
}

/// Render internal text as source text, spelling escapes out.
///
/// Codes with no representation are written as `?`.
pub fn render(codes: &[u8]) -> String {
    let mut out = String::with_capacity(codes.len());
    for &code in codes {
        match translate_out(code) {
            Ok(OutputChar::Direct(byte)) => out.push(char::from(byte)),
            Ok(OutputChar::Escaped { level, base }) => {
                for _ in 0..level.number() {
                    out.push(char::from(ESCAPE_CHAR));
                }
                out.push(char::from(base));
            }
            Err(_) => out.push('?'),
        }
    }
    out
}
