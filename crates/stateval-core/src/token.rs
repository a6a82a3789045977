// Stateval - Stationary Distribution Benchmark Evaluation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Whitespace token reader.
//!
//! Both record formats and the exported distributions are consumed as a flat
//! sequence of whitespace-delimited tokens. [`TokenReader`] produces that
//! sequence lazily from any [`Read`] source, so a multi-gigabyte export is
//! never held in memory, even when it is written on a single line.

use crate::error::{RecordError, RecordResult};
use std::io::{BufRead, BufReader, Read};

/// Buffered whitespace tokenizer with token counting and one-token lookahead.
///
/// # Examples
///
/// ```rust
/// use stateval_core::TokenReader;
/// use std::io::Cursor;
///
/// let mut reader = TokenReader::new(Cursor::new("\"v\": 0.25\n  \"v\": 0.75"));
///
/// assert_eq!(reader.next_token().unwrap(), Some("\"v\":".to_string()));
/// assert_eq!(reader.peek_token().unwrap(), Some("0.25"));
/// assert_eq!(reader.next_token().unwrap(), Some("0.25".to_string()));
/// assert_eq!(reader.tokens_read(), 2);
/// assert!(reader.has_more().unwrap());
/// ```
pub struct TokenReader<R: Read> {
    reader: BufReader<R>,
    tokens_read: usize,
    max_token_length: usize,
    buffer: Vec<u8>,
    peeked: Option<String>,
}

impl<R: Read> TokenReader<R> {
    /// Create a new token reader.
    pub fn new(reader: R) -> Self {
        Self::with_limit(reader, usize::MAX)
    }

    /// Create a token reader that rejects tokens longer than `max_token_length` bytes.
    pub fn with_limit(reader: R, max_token_length: usize) -> Self {
        Self {
            reader: BufReader::new(reader),
            tokens_read: 0,
            max_token_length,
            buffer: Vec::new(),
            peeked: None,
        }
    }

    /// Create with a specific buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            tokens_read: 0,
            max_token_length: usize::MAX,
            buffer: Vec::new(),
            peeked: None,
        }
    }

    /// Number of tokens handed out so far (peeked tokens are not counted).
    #[inline]
    pub fn tokens_read(&self) -> usize {
        self.tokens_read
    }

    /// Read the next token.
    pub fn next_token(&mut self) -> RecordResult<Option<String>> {
        let token = match self.peeked.take() {
            Some(token) => Some(token),
            None => self.read_token()?,
        };
        if token.is_some() {
            self.tokens_read += 1;
        }
        Ok(token)
    }

    /// Peek at the next token without consuming it.
    pub fn peek_token(&mut self) -> RecordResult<Option<&str>> {
        if self.peeked.is_none() {
            self.peeked = self.read_token()?;
        }
        Ok(self.peeked.as_deref())
    }

    /// Whether at least one more token can be read.
    pub fn has_more(&mut self) -> RecordResult<bool> {
        Ok(self.peek_token()?.is_some())
    }

    /// Discard up to `count` tokens, returning how many were actually skipped.
    pub fn skip_tokens(&mut self, count: usize) -> RecordResult<usize> {
        let mut skipped = 0;
        while skipped < count && self.next_token()?.is_some() {
            skipped += 1;
        }
        Ok(skipped)
    }

    fn read_token(&mut self) -> RecordResult<Option<String>> {
        self.buffer.clear();

        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                break;
            }

            let mut used = 0;
            let mut complete = false;
            for &byte in available {
                used += 1;
                if byte.is_ascii_whitespace() {
                    if !self.buffer.is_empty() {
                        complete = true;
                        break;
                    }
                } else {
                    self.buffer.push(byte);
                }
            }
            self.reader.consume(used);

            if self.buffer.len() > self.max_token_length {
                return Err(RecordError::security(
                    format!(
                        "token exceeds maximum length of {} bytes",
                        self.max_token_length
                    ),
                    self.tokens_read,
                ));
            }
            if complete {
                break;
            }
        }

        if self.buffer.is_empty() {
            return Ok(None);
        }

        String::from_utf8(std::mem::take(&mut self.buffer))
            .map(Some)
            .map_err(|e| RecordError::encoding(e.to_string(), self.tokens_read))
    }
}

impl<R: Read> Iterator for TokenReader<R> {
    type Item = RecordResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordErrorKind;
    use std::io::Cursor;

    fn tokens(input: &str) -> Vec<String> {
        TokenReader::new(Cursor::new(input))
            .filter_map(|r| r.ok())
            .collect()
    }

    #[test]
    fn test_read_tokens() {
        let mut reader = TokenReader::new(Cursor::new("tool: storm\nprecision: 0.001"));

        assert_eq!(reader.next_token().unwrap(), Some("tool:".to_string()));
        assert_eq!(reader.next_token().unwrap(), Some("storm".to_string()));
        assert_eq!(reader.next_token().unwrap(), Some("precision:".to_string()));
        assert_eq!(reader.next_token().unwrap(), Some("0.001".to_string()));
        assert_eq!(reader.next_token().unwrap(), None);
    }

    // ==================== Whitespace handling ====================

    #[test]
    fn test_empty_input() {
        let mut reader = TokenReader::new(Cursor::new(""));
        assert_eq!(reader.next_token().unwrap(), None);
        assert!(!reader.has_more().unwrap());
    }

    #[test]
    fn test_only_whitespace() {
        assert!(tokens("  \n\t\r\n   ").is_empty());
    }

    #[test]
    fn test_mixed_separators() {
        assert_eq!(tokens("a\tb\r\nc  d\n"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_single_line_json() {
        let input = r#"[{"s": {"x": 0}, "v": 0.5}, {"s": {"x": 1}, "v": 0.5}]"#;
        let all = tokens(input);
        assert_eq!(all.iter().filter(|t| *t == "\"v\":").count(), 2);
    }

    // ==================== Peek and count ====================

    #[test]
    fn test_peek_does_not_consume() {
        let mut reader = TokenReader::new(Cursor::new("one two"));
        assert_eq!(reader.peek_token().unwrap(), Some("one"));
        assert_eq!(reader.peek_token().unwrap(), Some("one"));
        assert_eq!(reader.tokens_read(), 0);
        assert_eq!(reader.next_token().unwrap(), Some("one".to_string()));
        assert_eq!(reader.tokens_read(), 1);
        assert_eq!(reader.peek_token().unwrap(), Some("two"));
    }

    #[test]
    fn test_skip_tokens() {
        let mut reader = TokenReader::new(Cursor::new("a b c"));
        assert_eq!(reader.skip_tokens(2).unwrap(), 2);
        assert_eq!(reader.next_token().unwrap(), Some("c".to_string()));
        assert_eq!(reader.skip_tokens(5).unwrap(), 0);
    }

    #[test]
    fn test_small_buffer_splits_tokens() {
        let mut reader = TokenReader::with_capacity(Cursor::new("alpha beta"), 1);
        assert_eq!(reader.next_token().unwrap(), Some("alpha".to_string()));
        assert_eq!(reader.next_token().unwrap(), Some("beta".to_string()));
        assert_eq!(reader.next_token().unwrap(), None);
    }

    // ==================== Errors ====================

    #[test]
    fn test_token_limit() {
        let mut reader = TokenReader::with_limit(Cursor::new("short loooooong"), 5);
        assert_eq!(reader.next_token().unwrap(), Some("short".to_string()));
        let err = reader.next_token().unwrap_err();
        assert_eq!(err.kind, RecordErrorKind::Security);
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes: Vec<u8> = vec![b'o', b'k', b' ', 0xff, 0xfe];
        let mut reader = TokenReader::new(Cursor::new(bytes));
        assert_eq!(reader.next_token().unwrap(), Some("ok".to_string()));
        let err = reader.next_token().unwrap_err();
        assert_eq!(err.kind, RecordErrorKind::Encoding);
    }

    #[test]
    fn test_unicode_tokens() {
        assert_eq!(tokens("modèle état"), vec!["modèle", "état"]);
    }

    #[test]
    fn test_many_tokens() {
        let input: String = (0..1000).map(|i| format!("t{} ", i)).collect();
        let mut reader = TokenReader::new(Cursor::new(input));
        for i in 0..1000 {
            assert_eq!(reader.next_token().unwrap(), Some(format!("t{}", i)));
        }
        assert_eq!(reader.next_token().unwrap(), None);
        assert_eq!(reader.tokens_read(), 1000);
    }
}
