//! Forward-only line cursor shared by the scan and decode passes.

use std::io::{BufRead, ErrorKind};
use std::str::FromStr;

use log::debug;

use super::ReaderError;

/// Line-at-a-time reader with one line of push-back
pub(crate) struct LineCursor<R> {
    reader: R,
    buf: String,
    line_number: usize,
    pending: bool,
    comment_char: char,
}

impl<R: BufRead> LineCursor<R> {
    pub(crate) fn new(reader: R, comment_char: char) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_number: 0,
            pending: false,
            comment_char,
        }
    }

    /// 1-based number of the current line (0 before the first read)
    pub(crate) fn line_number(&self) -> usize {
        self.line_number
    }

    /// Advance to the next line. Returns `false` at end of stream.
    pub(crate) fn advance(&mut self) -> Result<bool, ReaderError> {
        if self.pending {
            self.pending = false;
            return Ok(true);
        }
        self.buf.clear();
        let read = match self.reader.read_line(&mut self.buf) {
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(ReaderError::format(
                    self.line_number + 1,
                    "line is not valid UTF-8",
                ));
            }
            Err(e) => return Err(e.into()),
        };
        if read == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        let trimmed = self.buf.trim_end_matches(['\n', '\r']).len();
        self.buf.truncate(trimmed);
        Ok(true)
    }

    /// The current line, without its terminator
    pub(crate) fn current(&self) -> &str {
        &self.buf
    }

    /// Make the next [`advance`](Self::advance) return the current line again
    pub(crate) fn push_back(&mut self) {
        self.pending = true;
    }

    pub(crate) fn is_comment(&self) -> bool {
        self.buf.starts_with(self.comment_char)
    }

    /// Next line, or a FormatError naming `what` at end of stream
    pub(crate) fn expect_line(&mut self, what: &str) -> Result<&str, ReaderError> {
        if !self.advance()? {
            return Err(self.eof_error(what));
        }
        Ok(self.current())
    }

    /// Next line split into whitespace-delimited tokens
    pub(crate) fn expect_record<'s>(&'s mut self, what: &'s str) -> Result<Record<'s>, ReaderError> {
        if !self.advance()? {
            return Err(self.eof_error(what));
        }
        Ok(Record::new(&self.buf, self.line_number, what))
    }

    /// Next non-comment line
    pub(crate) fn expect_content_line(&mut self, what: &str) -> Result<&str, ReaderError> {
        loop {
            if !self.advance()? {
                return Err(self.eof_error(what));
            }
            if !self.is_comment() {
                return Ok(self.current());
            }
        }
    }

    /// Read and discard `count` lines
    pub(crate) fn skip_lines(&mut self, count: usize, what: &str) -> Result<(), ReaderError> {
        for _ in 0..count {
            if !self.advance()? {
                return Err(self.eof_error(what));
            }
        }
        Ok(())
    }

    /// Read the single leading count token of the next line
    pub(crate) fn expect_count(&mut self, what: &str) -> Result<usize, ReaderError> {
        self.expect_record(what)?.get(0, what)
    }

    pub(crate) fn format_error(&self, message: impl Into<String>) -> ReaderError {
        ReaderError::format(self.line_number, message)
    }

    fn eof_error(&self, what: &str) -> ReaderError {
        self.format_error(format!("unexpected end of file while reading {}", what))
    }
}

/// Advance `cursor` until a non-comment line containing `marker` is read.
///
/// A line pushed back onto the cursor is examined first.
pub(crate) fn locate_section<R: BufRead>(
    cursor: &mut LineCursor<R>,
    marker: &str,
) -> Result<(), ReaderError> {
    while cursor.advance()? {
        if !cursor.is_comment() && cursor.current().contains(marker) {
            debug!("Found {} at line {}", marker, cursor.line_number());
            return Ok(());
        }
    }
    Err(cursor.format_error(format!("section marker {} not found", marker)))
}

/// One whitespace-tokenised line
pub(crate) struct Record<'a> {
    tokens: Vec<&'a str>,
    line: usize,
    what: &'a str,
}

impl<'a> Record<'a> {
    fn new(text: &'a str, line: usize, what: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace().collect(),
            line,
            what,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }

    pub(crate) fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Fails unless the record has at least `count` tokens
    pub(crate) fn require(&self, count: usize) -> Result<(), ReaderError> {
        if self.tokens.len() < count {
            return Err(ReaderError::format(
                self.line,
                format!(
                    "{} needs {} tokens, found {}",
                    self.what,
                    count,
                    self.tokens.len()
                ),
            ));
        }
        Ok(())
    }

    /// Fails unless the record has exactly `count` tokens
    pub(crate) fn require_exact(&self, count: usize) -> Result<(), ReaderError> {
        if self.tokens.len() != count {
            return Err(ReaderError::format(
                self.line,
                format!(
                    "{} has {} tokens, expected {}",
                    self.what,
                    self.tokens.len(),
                    count
                ),
            ));
        }
        Ok(())
    }

    /// Parse token `index` as `T`
    pub(crate) fn get<T: FromStr>(&self, index: usize, field: &str) -> Result<T, ReaderError> {
        let token = self.tokens.get(index).ok_or_else(|| {
            ReaderError::format(
                self.line,
                format!("{}: missing {} (token {})", self.what, field, index),
            )
        })?;
        parse_token(token, self.line, field)
    }

    /// Parse the last token as `T`
    pub(crate) fn last<T: FromStr>(&self, field: &str) -> Result<T, ReaderError> {
        match self.tokens.len() {
            0 => Err(ReaderError::format(
                self.line,
                format!("{}: missing {}", self.what, field),
            )),
            n => self.get(n - 1, field),
        }
    }
}

pub(crate) fn parse_token<T: FromStr>(token: &str, line: usize, field: &str) -> Result<T, ReaderError> {
    token.parse().map_err(|_| {
        ReaderError::format(line, format!("cannot parse {} from {:?}", field, token))
    })
}
