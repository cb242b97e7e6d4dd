// src/input/tokenizer.rs

//! Delimiter-aware tokenizer over an async byte stream.

use std::collections::VecDeque;
use std::ffi::OsStr;
use std::ops::Range;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::trace;

use crate::errors::{QueryError, Result};
use crate::types::DelimitationMode;

/// One candidate file path carved out of the input.
///
/// `echo` is what gets written to stdout when the token is displayed: the
/// path plus a newline, or for NUL-delimited input the raw record exactly as
/// it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    path: Vec<u8>,
    echo: Vec<u8>,
}

impl Token {
    fn newline_terminated(path: &[u8]) -> Self {
        let mut echo = Vec::with_capacity(path.len() + 1);
        echo.extend_from_slice(path);
        echo.push(b'\n');
        Self {
            path: path.to_vec(),
            echo,
        }
    }

    fn raw_record(path: &[u8], record: &[u8]) -> Self {
        Self {
            path: path.to_vec(),
            echo: record.to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.path
    }

    pub fn as_os_str(&self) -> &OsStr {
        OsStr::from_bytes(&self.path)
    }

    pub fn path(&self) -> &Path {
        Path::new(self.as_os_str())
    }

    pub fn echo(&self) -> &[u8] {
        &self.echo
    }

    /// Lossy rendering for diagnostics and logs.
    pub fn display(&self) -> String {
        String::from_utf8_lossy(&self.path).into_owned()
    }
}

/// The C `isspace` set in the "C" locale. Unlike
/// [`u8::is_ascii_whitespace`] this includes vertical tab.
pub fn is_ascii_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// Lazy, single-pass token source.
///
/// Each call to [`Tokenizer::next_token`] reads at most as many records as
/// it needs to produce the next token. Empty records (and, in whitespace
/// mode, records with no fields) produce nothing and are passed over.
#[derive(Debug)]
pub struct Tokenizer<R> {
    reader: R,
    mode: DelimitationMode,
    record: Vec<u8>,
    fields: VecDeque<Range<usize>>,
}

impl<R: AsyncBufRead + Unpin> Tokenizer<R> {
    pub fn new(reader: R, mode: DelimitationMode) -> Self {
        Self {
            reader,
            mode,
            record: Vec::new(),
            fields: VecDeque::new(),
        }
    }

    pub fn mode(&self) -> DelimitationMode {
        self.mode
    }

    /// Next token, or `None` once the input is exhausted.
    ///
    /// Read errors other than a clean end of stream are fatal.
    pub async fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            if let Some(range) = self.fields.pop_front() {
                return Ok(Some(Token::newline_terminated(&self.record[range])));
            }

            if !self.read_record().await? {
                return Ok(None);
            }

            match self.mode {
                DelimitationMode::Line => {
                    let path = strip_delimiter(&self.record, b'\n');
                    if !path.is_empty() {
                        return Ok(Some(Token::newline_terminated(path)));
                    }
                }
                DelimitationMode::NullByte => {
                    let path = strip_delimiter(&self.record, b'\0');
                    if !path.is_empty() {
                        return Ok(Some(Token::raw_record(path, &self.record)));
                    }
                }
                DelimitationMode::Whitespace => {
                    self.fields = field_ranges(&self.record).collect();
                    trace!(fields = self.fields.len(), "split whitespace record");
                }
            }
        }
    }

    async fn read_record(&mut self) -> Result<bool> {
        self.record.clear();
        let read = self
            .reader
            .read_until(self.mode.record_delimiter(), &mut self.record)
            .await
            .map_err(QueryError::ReadInput)?;
        Ok(read > 0)
    }
}

fn strip_delimiter(record: &[u8], delimiter: u8) -> &[u8] {
    record.strip_suffix(&[delimiter]).unwrap_or(record)
}

/// Byte ranges of the maximal non-whitespace runs in `record`.
fn field_ranges(record: &[u8]) -> impl Iterator<Item = Range<usize>> + '_ {
    let mut pos = 0;
    std::iter::from_fn(move || {
        while pos < record.len() && is_ascii_space(record[pos]) {
            pos += 1;
        }
        if pos >= record.len() {
            return None;
        }
        let start = pos;
        while pos < record.len() && !is_ascii_space(record[pos]) {
            pos += 1;
        }
        Some(start..pos)
    })
}
