//! Token cursor with one token of lookahead

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\S+").expect("bad token regexp");
}

/// A whitespace-separated token and its byte offset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Token<'r> {
    start: usize,
    text: &'r str,
}

/// Cursor over the tokens of one report line
///
/// The cursor only ever moves forward. It may be advanced past
/// the final token, after which every `peek` returns `None`.
#[derive(Clone, Debug)]
pub(crate) struct Cursor<'r> {
    line: &'r str,
    tokens: Vec<Token<'r>>,
    pos: usize,
}

impl<'r> Cursor<'r> {
    /// Tokenize `line`
    pub fn new(line: &'r str) -> Self {
        let tokens = TOKEN
            .find_iter(line)
            .map(|m| Token {
                start: m.start(),
                text: m.as_str(),
            })
            .collect();
        Self {
            line,
            tokens,
            pos: 0,
        }
    }

    /// True if the line has no tokens at all
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Current token
    pub fn peek(&self) -> Option<&'r str> {
        self.tokens.get(self.pos).map(|t| t.text)
    }

    /// Token after the current token
    pub fn peek_next(&self) -> Option<&'r str> {
        self.tokens.get(self.pos + 1).map(|t| t.text)
    }

    /// Move forward by `count` tokens
    pub fn advance(&mut self, count: usize) {
        self.pos = self.pos.saturating_add(count);
    }

    /// Consume and return the current token
    pub fn next(&mut self) -> Option<&'r str> {
        let out = self.peek();
        self.advance(1);
        out
    }

    /// Consume the current token if it satisfies `pred`
    pub fn next_if<F>(&mut self, pred: F) -> Option<&'r str>
    where
        F: FnOnce(&str) -> bool,
    {
        match self.peek() {
            Some(tok) if pred(tok) => {
                self.advance(1);
                Some(tok)
            }
            _ => None,
        }
    }

    /// Verbatim text of the line from the current token onward
    ///
    /// Whitespace between tokens is preserved. Leading and
    /// trailing whitespace is not.
    pub fn rest_of_line(&self) -> &'r str {
        match self.tokens.get(self.pos) {
            Some(tok) => self.line[tok.start..].trim_end(),
            None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor() {
        let mut cursor = Cursor::new("  KLAX  060250Z\t34010KT ");
        assert!(!cursor.is_empty());
        assert_eq!(Some("KLAX"), cursor.peek());
        assert_eq!(Some("060250Z"), cursor.peek_next());

        assert_eq!(None, cursor.next_if(|t| t.ends_with('Z')));
        assert_eq!(Some("KLAX"), cursor.next());
        assert_eq!("060250Z\t34010KT", cursor.rest_of_line());
        assert_eq!(Some("060250Z"), cursor.next_if(|t| t.ends_with('Z')));
        assert_eq!(Some("34010KT"), cursor.next());
        assert_eq!(None, cursor.peek());
        assert_eq!("", cursor.rest_of_line());

        // running off the end is harmless
        cursor.advance(2);
        assert_eq!(None, cursor.next());
        assert_eq!(None, cursor.next_if(|_| true));

        assert!(Cursor::new(" \t ").is_empty());
    }
}
