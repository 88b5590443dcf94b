//! Forward-only line and token reader over library text.

use lexer::{TokenIter, TokenKind};

mod lexer;

/// Outcome of the most recent extraction.
///
/// A failure is sticky: it is only cleared when [`Reader::read_line`] moves
/// the cursor onto a new line boundary.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    Ok,
    ReadPastEnd,
    ReadCorruptData,
}

#[derive(Debug, Clone)]
pub struct Reader<'a> {
    input: &'a str,
    pos: usize,
    status: Status,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            status: Status::Ok,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// True once no more data remains.
    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn remainder(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn fail(&mut self, status: Status) {
        if self.status == Status::Ok {
            self.status = status;
        }
    }

    /// Returns the rest of the current line without its terminator and
    /// moves to the start of the next one.
    pub fn read_line(&mut self) -> &'a str {
        if self.at_end() {
            self.fail(Status::ReadPastEnd);
            return "";
        }
        self.status = Status::Ok;

        let rest = self.remainder();
        let (line, consumed) = match rest.find('\n') {
            Some(n) => (&rest[..n], n + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        line.strip_suffix('\r').unwrap_or(line)
    }

    /// Returns the next whitespace-delimited token, crossing line breaks.
    pub fn read_token(&mut self) -> Option<&'a str> {
        let rest = self.remainder();
        match TokenIter::new(rest).next() {
            Some(tok) => {
                self.pos += tok.span.end;
                match tok.kind {
                    TokenKind::Word => Some(&rest[tok.span]),
                    TokenKind::Error => {
                        self.fail(Status::ReadCorruptData);
                        None
                    }
                }
            }
            None => {
                self.pos = self.input.len();
                self.fail(Status::ReadPastEnd);
                None
            }
        }
    }

    /// Reads the next token as a signed integer.
    pub fn read_int(&mut self) -> Option<i32> {
        let tok = self.read_token()?;
        match tok.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                self.fail(Status::ReadCorruptData);
                None
            }
        }
    }

    /// Reads a single character at the cursor. Fails on a line break.
    pub fn read_char(&mut self) -> Option<char> {
        match self.remainder().chars().next() {
            Some(c) if c == '\n' || c == '\r' => {
                self.fail(Status::ReadCorruptData);
                None
            }
            Some(c) => {
                self.pos += c.len_utf8();
                Some(c)
            }
            None => {
                self.fail(Status::ReadPastEnd);
                None
            }
        }
    }

    /// Advances past spaces and tabs without consuming a token.
    pub fn skip_whitespace(&mut self) {
        let rest = self.remainder();
        let trimmed = rest.trim_start_matches([' ', '\t']);
        self.pos += rest.len() - trimmed.len();
    }
}
