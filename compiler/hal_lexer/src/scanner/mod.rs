//! The scanner: program text to tokens.
//!
//! Dispatch is on the character class of the first character of a token:
//! letters start identifiers and reserved words, digits (or a period
//! followed by a digit) start numbers, apostrophes start character
//! strings, double quotes start REPLACE text and `%` starts a `%macro`
//! name. Everything else is matched against the vocabulary's punctuation.
//!
//! Lexical errors never stop the scan. The offending text is reported and
//! either skipped or turned into a best-effort token.

use std::sync::Arc;

use hal_charset::{
    escape_level, render, translate_escape, translate_in, CharClass, EscapeLevel, TranslateError,
    ESCAPE_CHAR,
};
use hal_diagnostic::{Aborted, Diagnostic, DiagnosticSink, ErrorCode};
use hal_ir::{Location, SymbolId, Token, TokenClass, Vocabulary};
use tracing::trace;

use crate::reader::{Feed, LineFeed, PhysicalLine};
use crate::TokenSource;

/// Longest identifier the language allows.
pub const MAX_IDENTIFIER_LENGTH: usize = 32;
/// Longest character string the language allows.
pub const MAX_STRING_LENGTH: usize = 255;

/// Stand-in for characters outside ASCII so every line is indexable by byte.
const NON_ASCII: u8 = 0x1A;

/// The line being scanned.
struct Cursor {
    bytes: Vec<u8>,
    pos: usize,
    start: Location,
}

impl Cursor {
    fn new(line: PhysicalLine) -> Self {
        let bytes = line
            .text
            .chars()
            .map(|c| u8::try_from(c).ok().filter(u8::is_ascii).unwrap_or(NON_ASCII))
            .collect();
        Cursor {
            bytes,
            pos: 0,
            start: line.start,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn location(&self) -> Location {
        let column = u32::try_from(self.pos).unwrap_or(u32::MAX);
        self.start.with_column(self.start.column.saturating_add(column))
    }

    fn rest(&self) -> &str {
        std::str::from_utf8(&self.bytes[self.pos.min(self.bytes.len())..]).unwrap_or("")
    }

    fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> String {
        let begin = self.pos;
        while self.peek().is_some_and(&accept) {
            self.bump();
        }
        String::from_utf8_lossy(&self.bytes[begin..self.pos]).into_owned()
    }
}

/// Outcome of moving to the next line.
enum NextLine {
    Ready,
    Boundary,
    End,
}

fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn describe_byte(byte: u8) -> String {
    if byte == NON_ASCII {
        "non-ASCII character".to_owned()
    } else if byte.is_ascii_graphic() {
        format!("character `{}`", char::from(byte))
    } else {
        format!("character {byte:#04x}")
    }
}

/// Pull-style scanner over any [`LineFeed`].
pub struct Scanner<F> {
    feed: F,
    vocabulary: Arc<Vocabulary>,
    line: Option<Cursor>,
    finished: bool,
    end_location: Location,
}

impl<F: LineFeed> Scanner<F> {
    pub fn new(feed: F, vocabulary: Arc<Vocabulary>) -> Self {
        Scanner {
            feed,
            vocabulary,
            line: None,
            finished: false,
            end_location: Location::default(),
        }
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn into_feed(self) -> F {
        self.feed
    }

    /// Scan one token. At end of input this returns the end-of-file token,
    /// and keeps returning it.
    pub fn next_token(&mut self, sink: &mut dyn DiagnosticSink) -> Result<Token, Aborted> {
        loop {
            let Some(byte) = self.line.as_ref().and_then(Cursor::peek) else {
                match self.next_line(sink)? {
                    NextLine::Ready | NextLine::Boundary => continue,
                    NextLine::End => return Ok(self.end_of_file()),
                }
            };
            if byte == b'\t' {
                self.cursor_mut().bump();
                continue;
            }
            if let Some(token) = self.scan_from(byte, sink)? {
                trace!(token = %token, at = %token.location, "scanned");
                return Ok(token);
            }
        }
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        self.line.get_or_insert_with(|| Cursor {
            bytes: Vec::new(),
            pos: 0,
            start: Location::default(),
        })
    }

    fn location(&self) -> Location {
        self.line.as_ref().map_or(self.end_location, Cursor::location)
    }

    fn next_line(&mut self, sink: &mut dyn DiagnosticSink) -> Result<NextLine, Aborted> {
        if let Some(line) = &self.line {
            self.end_location = line.location();
        }
        self.line = None;
        if self.finished {
            return Ok(NextLine::End);
        }
        match self.feed.next_line(sink)? {
            Feed::Line(line) => {
                self.end_location = line.start;
                self.line = Some(Cursor::new(line));
                Ok(NextLine::Ready)
            }
            Feed::MemberBoundary => Ok(NextLine::Boundary),
            Feed::EndOfFile => {
                self.finished = true;
                Ok(NextLine::End)
            }
        }
    }

    fn end_of_file(&self) -> Token {
        Token::new(self.vocabulary.end_of_file(), "", self.end_location)
    }

    fn class_symbol(
        &self,
        class: TokenClass,
        at: Location,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<SymbolId> {
        let symbol = self.vocabulary.class(class);
        if symbol.is_none() {
            sink.report(
                Diagnostic::error(ErrorCode::E0008)
                    .with_message(format!("this grammar has no {class:?} tokens"))
                    .with_label(at, "lexeme dropped"),
            );
        }
        symbol
    }

    /// Scan the token starting with `byte`, or consume text that yields none.
    fn scan_from(&mut self, byte: u8, sink: &mut dyn DiagnosticSink) -> Result<Option<Token>, Aborted> {
        let at = self.location();
        let next = self.line.as_ref().and_then(|line| line.peek_at(1));
        let token = match CharClass::of_ascii(byte) {
            CharClass::Blank => {
                self.cursor_mut().bump();
                None
            }
            CharClass::Letter => Some(self.identifier(at, sink)),
            CharClass::Digit => self.number(at, sink),
            CharClass::Period if next.is_some_and(|b| b.is_ascii_digit()) => self.number(at, sink),
            CharClass::Apostrophe => self.string(at, sink),
            CharClass::DoubleQuote => self.replace_text(at, sink)?,
            CharClass::Percent => self.percent_name(at, sink),
            CharClass::Special if byte == b'/' && next == Some(b'*') => {
                self.comment(at, sink)?;
                None
            }
            CharClass::Escape => {
                self.cursor_mut().bump();
                sink.report(
                    Diagnostic::error(ErrorCode::E0005)
                        .with_message("escape character outside a character string")
                        .with_label(at, "ignored"),
                );
                None
            }
            CharClass::Period | CharClass::Special | CharClass::Bar | CharClass::Star => {
                self.punctuation(byte, at, sink)
            }
            CharClass::Illegal | CharClass::EndOfFile => {
                self.cursor_mut().bump();
                let code = if translate_in(byte).is_ok() {
                    ErrorCode::E0011
                } else {
                    ErrorCode::E0001
                };
                sink.report(
                    Diagnostic::error(code)
                        .with_message(format!("{} is not valid here", describe_byte(byte)))
                        .with_label(at, "skipped"),
                );
                None
            }
        };
        Ok(token)
    }

    fn identifier(&mut self, at: Location, sink: &mut dyn DiagnosticSink) -> Token {
        let mut text = self.cursor_mut().take_while(is_identifier_byte);
        if let Some(symbol) = self.vocabulary.reserved_word(&text) {
            return Token::new(symbol, text, at);
        }
        if text.len() > MAX_IDENTIFIER_LENGTH {
            sink.report(
                Diagnostic::error(ErrorCode::E0009)
                    .with_message(format!(
                        "identifier `{text}` is longer than {MAX_IDENTIFIER_LENGTH} characters"
                    ))
                    .with_label(at, "truncated"),
            );
            text.truncate(MAX_IDENTIFIER_LENGTH);
        }
        Token::new(self.vocabulary.identifier(), text, at)
    }

    /// Numbers are validated for shape only; their text is kept verbatim.
    fn number(&mut self, at: Location, sink: &mut dyn DiagnosticSink) -> Option<Token> {
        let cursor = self.cursor_mut();
        let mut text = cursor.take_while(|b| b.is_ascii_digit());
        let mut compound = false;
        let mut malformed = None;
        if cursor.peek() == Some(b'.') {
            cursor.bump();
            text.push('.');
            text.push_str(&cursor.take_while(|b| b.is_ascii_digit()));
            compound = true;
        }
        while let Some(letter) = cursor
            .peek()
            .filter(|b| matches!(b.to_ascii_uppercase(), b'E' | b'B' | b'H'))
        {
            let after = cursor.peek_at(1);
            let signed = matches!(after, Some(b'+' | b'-'));
            let marker = if signed { 2 } else { 1 };
            let has_digits = cursor.peek_at(marker).is_some_and(|b| b.is_ascii_digit());
            if !has_digits && !signed && after.is_some_and(is_identifier_byte) {
                // `2END`: the letter starts the next token.
                break;
            }
            let exponent_at = cursor.location();
            for _ in 0..marker {
                if let Some(b) = cursor.peek() {
                    text.push(char::from(b));
                }
                cursor.bump();
            }
            compound = true;
            if !has_digits {
                malformed = Some((exponent_at, letter));
                break;
            }
            text.push_str(&cursor.take_while(|b| b.is_ascii_digit()));
        }
        if let Some((exponent_at, letter)) = malformed {
            sink.report(
                Diagnostic::error(ErrorCode::E0003)
                    .with_message(format!("exponent `{}` in `{text}` has no digits", char::from(letter)))
                    .with_label(exponent_at, "exponent"),
            );
        }
        let class = if compound {
            TokenClass::CompoundNumber
        } else {
            TokenClass::SimpleNumber
        };
        let symbol = self.class_symbol(class, at, sink)?;
        Some(Token::new(symbol, text, at))
    }

    /// Character string between apostrophes. Token text is the canonical
    /// rendering of the translated contents.
    fn string(&mut self, at: Location, sink: &mut dyn DiagnosticSink) -> Option<Token> {
        let cursor = self.cursor_mut();
        cursor.bump();
        let mut codes = Vec::new();
        let mut too_long = false;
        loop {
            let here = cursor.location();
            let Some(byte) = cursor.peek() else {
                sink.report(
                    Diagnostic::error(ErrorCode::E0002)
                        .with_message("character string not closed before end of line")
                        .with_label(at, "string starts here"),
                );
                break;
            };
            let code = match byte {
                b'\'' if cursor.peek_at(1) == Some(b'\'') => {
                    cursor.bump();
                    cursor.bump();
                    translate_in(b'\'').ok()
                }
                b'\'' => {
                    cursor.bump();
                    break;
                }
                ESCAPE_CHAR => {
                    let count = cursor.take_while(|b| b == ESCAPE_CHAR).len();
                    // An apostrophe after the escape still closes the string.
                    let Some(base) = cursor.peek().filter(|&b| b != b'\'') else {
                        sink.report(
                            Diagnostic::error(ErrorCode::E0005)
                                .with_message("escape character with nothing to escape")
                                .with_label(here, "escape"),
                        );
                        continue;
                    };
                    cursor.bump();
                    match escape(count, base) {
                        Ok(code) => Some(code),
                        Err((error, fallback)) => {
                            sink.report(escape_diagnostic(error, here));
                            fallback
                        }
                    }
                }
                _ => {
                    cursor.bump();
                    let code = translate_in(byte).ok();
                    if code.is_none() {
                        sink.report(
                            Diagnostic::error(ErrorCode::E0001)
                                .with_message(format!("{} has no internal code", describe_byte(byte)))
                                .with_label(here, "dropped from the string"),
                        );
                    }
                    code
                }
            };
            let Some(code) = code else {
                continue;
            };
            if codes.len() < MAX_STRING_LENGTH {
                codes.push(code);
            } else if !too_long {
                too_long = true;
                sink.report(
                    Diagnostic::error(ErrorCode::E0010)
                        .with_message(format!(
                            "character string is longer than {MAX_STRING_LENGTH} characters"
                        ))
                        .with_label(at, "truncated"),
                );
            }
        }
        let symbol = self.class_symbol(TokenClass::CharString, at, sink)?;
        Some(Token::new(symbol, render(&codes), at))
    }

    /// REPLACE text between double quotes; may continue over several lines.
    fn replace_text(
        &mut self,
        at: Location,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Option<Token>, Aborted> {
        self.cursor_mut().bump();
        let mut text = String::new();
        loop {
            let Some(byte) = self.line.as_ref().and_then(Cursor::peek) else {
                if let NextLine::Ready = self.next_line(sink)? {
                    text.push('\n');
                    continue;
                }
                sink.report(
                    Diagnostic::error(ErrorCode::E0007)
                        .with_message("replace text not closed")
                        .with_label(at, "text starts here"),
                );
                break;
            };
            let cursor = self.cursor_mut();
            cursor.bump();
            if byte == b'"' {
                if cursor.peek() != Some(b'"') {
                    break;
                }
                cursor.bump();
            }
            text.push(char::from(byte));
        }
        Ok(self
            .class_symbol(TokenClass::ReplaceText, at, sink)
            .map(|symbol| Token::new(symbol, text, at)))
    }

    fn percent_name(&mut self, at: Location, sink: &mut dyn DiagnosticSink) -> Option<Token> {
        let cursor = self.cursor_mut();
        cursor.bump();
        if !cursor.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            sink.report(
                Diagnostic::error(ErrorCode::E0011)
                    .with_message("`%` must be followed by a macro name")
                    .with_label(at, "skipped"),
            );
            return None;
        }
        let name = cursor.take_while(is_identifier_byte);
        let symbol = self.class_symbol(TokenClass::PercentMacro, at, sink)?;
        Some(Token::new(symbol, format!("%{name}"), at))
    }

    fn comment(&mut self, at: Location, sink: &mut dyn DiagnosticSink) -> Result<(), Aborted> {
        self.cursor_mut().bump();
        self.cursor_mut().bump();
        loop {
            let Some(byte) = self.line.as_ref().and_then(Cursor::peek) else {
                if let NextLine::Ready = self.next_line(sink)? {
                    continue;
                }
                sink.report(
                    Diagnostic::error(ErrorCode::E0006)
                        .with_message("comment not closed")
                        .with_label(at, "comment starts here"),
                );
                return Ok(());
            };
            let cursor = self.cursor_mut();
            cursor.bump();
            if byte == b'*' && cursor.peek() == Some(b'/') {
                cursor.bump();
                return Ok(());
            }
        }
    }

    fn punctuation(&mut self, byte: u8, at: Location, sink: &mut dyn DiagnosticSink) -> Option<Token> {
        let matched = self
            .line
            .as_ref()
            .and_then(|line| self.vocabulary.match_punctuation(line.rest()));
        let cursor = self.cursor_mut();
        match matched {
            Some((symbol, length)) => {
                let text = cursor.rest()[..length].to_owned();
                for _ in 0..length {
                    cursor.bump();
                }
                Some(Token::new(symbol, text, at))
            }
            None => {
                cursor.bump();
                sink.report(
                    Diagnostic::error(ErrorCode::E0011)
                        .with_message(format!("{} is not a symbol of this grammar", describe_byte(byte)))
                        .with_label(at, "skipped"),
                );
                None
            }
        }
    }
}

/// Resolve an escape run. On failure, also give the best substitute code.
fn escape(count: usize, base: u8) -> Result<u8, (TranslateError, Option<u8>)> {
    let (level, level_error) = match escape_level(count) {
        Ok(level) => (level, None),
        Err(error) => (EscapeLevel::Two, Some(error)),
    };
    let fallback = translate_in(base).ok();
    let code = translate_escape(level, base).map_err(|error| (error, fallback))?;
    match level_error {
        Some(error) => Err((error, Some(code))),
        None => Ok(code),
    }
}

fn escape_diagnostic(error: TranslateError, at: Location) -> Diagnostic {
    let code = match error {
        TranslateError::LevelTooHigh(_) => ErrorCode::E0004,
        TranslateError::Unmapped(_) => ErrorCode::E0001,
        TranslateError::UndefinedEscape { .. } | TranslateError::Unrepresentable(_) => ErrorCode::E0005,
    };
    Diagnostic::error(code)
        .with_message(error.to_string())
        .with_label(at, "escape")
}

impl<F: LineFeed> TokenSource for Scanner<F> {
    fn next_token(&mut self, sink: &mut dyn DiagnosticSink) -> Result<Token, Aborted> {
        Scanner::next_token(self, sink)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
