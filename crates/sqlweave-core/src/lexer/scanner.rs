//! Placeholder scanner.

use super::Span;

/// What a [`Mark`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    /// A `?` bound to the next argument.
    Placeholder,
    /// An escaped `??`, rendered as a literal `?`.
    EscapedQuestion,
}

/// A location in scanned text that the renderer must rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    /// The marked kind.
    pub kind: MarkKind,
    /// The bytes covered by the mark.
    pub span: Span,
}

/// Finds `?` placeholders in SQL text.
///
/// Question marks inside single-quoted strings, double-quoted or
/// backtick-quoted identifiers, `--` comments and `/* */` comments are part
/// of the text, not placeholders. Unterminated quotes and comments run to the
/// end of the input.
pub struct Scanner<'a> {
    /// The input SQL text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips a quoted run; a doubled quote is an escaped quote.
    fn skip_quoted(&mut self, quote: char) {
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        return;
                    }
                }
                Some(_) => {}
                None => return,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return;
                }
                None => return,
                _ => {}
            }
        }
    }

    /// Scans to the next mark.
    pub fn next_mark(&mut self) -> Option<Mark> {
        while let Some(c) = self.advance() {
            let start = self.pos - c.len_utf8();
            match c {
                '?' => {
                    if self.peek() == Some('?') {
                        self.advance();
                        return Some(Mark {
                            kind: MarkKind::EscapedQuestion,
                            span: Span::new(start, self.pos),
                        });
                    }
                    return Some(Mark {
                        kind: MarkKind::Placeholder,
                        span: Span::new(start, self.pos),
                    });
                }
                '\'' | '"' | '`' => self.skip_quoted(c),
                '-' if self.peek() == Some('-') => self.skip_line_comment(),
                '/' if self.peek() == Some('*') => {
                    self.advance();
                    self.skip_block_comment();
                }
                _ => {}
            }
        }
        None
    }

    /// Scans the entire input and returns all marks in order.
    #[must_use]
    pub fn scan(mut self) -> Vec<Mark> {
        let mut marks = Vec::new();
        while let Some(mark) = self.next_mark() {
            marks.push(mark);
        }
        marks
    }

    /// Counts the placeholders in `input`.
    #[must_use]
    pub fn count_placeholders(input: &str) -> usize {
        let mut scanner = Scanner::new(input);
        let mut count = 0;
        while let Some(mark) = scanner.next_mark() {
            if mark.kind == MarkKind::Placeholder {
                count += 1;
            }
        }
        count
    }
}

impl Iterator for Scanner<'_> {
    type Item = Mark;

    fn next(&mut self) -> Option<Mark> {
        self.next_mark()
    }
}
