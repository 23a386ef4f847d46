//! HAL/S character set.
//!
//! The language's internal representation is one byte per symbol, using
//! the EBCDIC code page. Source text arrives as ASCII. Symbols the ASCII
//! keyboard lacks (the cent sign, subscript letters, ...) are written inside
//! character strings with the escape character `` ` ``: one introducer
//! selects level 1, two select level 2.
//!
//! - [`translate_in`] / [`translate_out`]: direct mapping in both directions
//! - [`translate_escape`]: the two-level escape table
//! - [`CharClass`]: scanner classification of internal codes

mod class;
mod tables;
mod translate;

pub use class::{is_identifier_char, CharClass};
pub use translate::{
    escape_level, is_data_char, render, translate_escape, translate_in, translate_out,
    EscapeLevel, OutputChar, TranslateError, ESCAPE_CHAR, ESCAPE_CODE, EOF_SENTINEL,
    VALID_00_CHAR, VALID_00_OP,
};
