//! Reader for grammars written in BNF.
//!
//! ```text
//! <BASIC STATEMENT> ::= <ASSIGNMENT> ;
//!                     | CALL <IDENTIFIER> ;
//! <BLOCK BODY> ::=
//!                | <BLOCK BODY> <ANY STATEMENT>
//! ```
//!
//! A rule starts with a bracketed name and `::=`; a line starting with `|`
//! adds another alternative to the previous rule. Symbols are separated by
//! blanks. A name in angle brackets may contain blanks. Quotes protect
//! spellings that would otherwise be read as syntax, such as `'|'`. Lines
//! whose first character is `#` are comments. Every name that is not a
//! terminal of the supplied vocabulary must be defined by some rule; the
//! first rule's left-hand side is the start symbol.

use std::sync::Arc;

use hal_ir::{SymbolId, VocabularyBuilder};
use rustc_hash::FxHashMap;

use crate::{Grammar, GrammarError, Production};

struct RawRule<'a> {
    line: usize,
    lhs: &'a str,
    rhs: Vec<&'a str>,
}

/// Read `text`, adding its nonterminals to `terminals`.
pub fn parse_bnf(text: &str, mut terminals: VocabularyBuilder) -> Result<Grammar, GrammarError> {
    let rules = read_rules(text)?;
    let Some(first) = rules.first() else {
        return Err(GrammarError::Empty);
    };
    let start_name = first.lhs;

    let mut nonterminals: FxHashMap<&str, SymbolId> = FxHashMap::default();
    for rule in &rules {
        if nonterminals.contains_key(rule.lhs) {
            continue;
        }
        if terminals.is_terminal(rule.lhs) {
            return Err(GrammarError::TerminalOnLeft(rule.lhs.to_owned()));
        }
        let id = terminals.nonterminal(rule.lhs);
        nonterminals.insert(rule.lhs, id);
    }

    let vocabulary = Arc::new(terminals.build()?);
    let mut productions = Vec::with_capacity(rules.len());
    for rule in &rules {
        let lhs = nonterminals[rule.lhs];
        let mut rhs = Vec::with_capacity(rule.rhs.len());
        for &name in &rule.rhs {
            let symbol = vocabulary
                .lookup(name)
                .ok_or_else(|| GrammarError::UndefinedSymbol {
                    line: rule.line,
                    name: name.to_owned(),
                })?;
            rhs.push(symbol);
        }
        productions.push(Production::new(lhs, rhs));
    }

    let start = nonterminals[start_name];
    Grammar::new(vocabulary, start, productions)
}

fn read_rules(text: &str) -> Result<Vec<RawRule<'_>>, GrammarError> {
    let mut rules = Vec::new();
    let mut current: Option<&str> = None;

    for (line, raw) in (1..).zip(text.lines()) {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (lhs, alternative) = if let Some((head, rest)) = trimmed.split_once("::=") {
            let head = head.trim();
            if !(head.len() > 2 && head.starts_with('<') && head.ends_with('>')) {
                return Err(syntax(line, format!("`{head}` is not a bracketed rule name")));
            }
            current = Some(head);
            (head, rest)
        } else if let Some(rest) = trimmed.strip_prefix('|') {
            let Some(lhs) = current else {
                return Err(syntax(line, "alternative before the first rule".to_owned()));
            };
            (lhs, rest)
        } else {
            return Err(syntax(line, "expected `<name> ::=` or `|`".to_owned()));
        };

        rules.push(RawRule {
            line,
            lhs,
            rhs: symbols(alternative, line)?,
        });
    }
    Ok(rules)
}

fn symbols(text: &str, line: usize) -> Result<Vec<&str>, GrammarError> {
    let mut out = Vec::new();
    let mut rest = text.trim_start();

    while let Some(first) = rest.chars().next() {
        let (symbol, tail) = if first == '\'' {
            let body = &rest[1..];
            let Some(end) = body.find('\'') else {
                return Err(syntax(line, "unterminated quoted symbol".to_owned()));
            };
            if end == 0 {
                return Err(syntax(line, "empty quoted symbol".to_owned()));
            }
            (&body[..end], &body[end + 1..])
        } else if first == '<' && starts_name(&rest[1..]) {
            let Some(end) = rest.find('>') else {
                return Err(syntax(line, "unterminated `<` name".to_owned()));
            };
            (&rest[..=end], &rest[end + 1..])
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            rest.split_at(end)
        };
        out.push(symbol);
        rest = tail.trim_start();
    }
    Ok(out)
}

/// `<` opens a bracketed name only when a name follows at once; a lone `<`
/// is the less-than terminal.
fn starts_name(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '%')
}

fn syntax(line: usize, message: String) -> GrammarError {
    GrammarError::Syntax { line, message }
}
