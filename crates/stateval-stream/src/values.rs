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

//! Lazy numeric sequences over exported distributions.

use crate::error::StreamResult;
use stateval_core::TokenReader;
use std::io::Read;
use tracing::debug;

/// Token that precedes each probability in a marker-tagged export.
pub const VALUE_MARKER: &str = "\"v\":";

/// How values are laid out in an export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueEncoding {
    /// Each value follows a [`VALUE_MARKER`] token; everything else is skipped.
    Marked,
    /// Every token is a value.
    Bare,
}

/// A finite, non-restartable sequence of probabilities read from a token
/// stream.
///
/// Tokens that should be numbers but are not yield `0.0`.
///
/// # Examples
///
/// ```rust
/// use stateval_stream::{ValueEncoding, ValueStream};
/// use std::io::Cursor;
///
/// let export = r#"[ { "s": { "x": 0 }, "v": 0.75 }, { "s": { "x": 1 }, "v": 0.25 } ]"#;
/// let mut values = ValueStream::new(Cursor::new(export), ValueEncoding::Marked);
///
/// assert_eq!(values.next_value().unwrap(), Some(0.75));
/// assert_eq!(values.next_value().unwrap(), Some(0.25));
/// assert_eq!(values.next_value().unwrap(), None);
/// ```
pub struct ValueStream<R: Read> {
    tokens: TokenReader<R>,
    encoding: ValueEncoding,
    values_read: usize,
}

impl<R: Read> ValueStream<R> {
    pub fn new(reader: R, encoding: ValueEncoding) -> Self {
        Self::from_tokens(TokenReader::new(reader), encoding)
    }

    /// Build on an existing token reader, e.g. one with a token length limit.
    pub fn from_tokens(tokens: TokenReader<R>, encoding: ValueEncoding) -> Self {
        Self {
            tokens,
            encoding,
            values_read: 0,
        }
    }

    #[inline]
    pub fn encoding(&self) -> ValueEncoding {
        self.encoding
    }

    /// Number of values produced so far.
    #[inline]
    pub fn values_read(&self) -> usize {
        self.values_read
    }

    /// Next value, or `None` once the stream is exhausted.
    pub fn next_value(&mut self) -> StreamResult<Option<f64>> {
        let token = match self.encoding {
            ValueEncoding::Bare => self.tokens.next_token()?,
            ValueEncoding::Marked => self.next_marked_token()?,
        };

        Ok(token.map(|token| {
            self.values_read += 1;
            token.parse::<f64>().unwrap_or_else(|_| {
                debug!(token = %token, index = self.values_read, "non-numeric value, using 0");
                0.0
            })
        }))
    }

    fn next_marked_token(&mut self) -> StreamResult<Option<String>> {
        while let Some(token) = self.tokens.next_token()? {
            if token == VALUE_MARKER {
                return Ok(self.tokens.next_token()?);
            }
        }
        Ok(None)
    }

    /// Whether any unread tokens remain.
    pub fn has_more_tokens(&mut self) -> StreamResult<bool> {
        Ok(self.tokens.has_more()?)
    }
}

impl<R: Read> Iterator for ValueStream<R> {
    type Item = StreamResult<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_value().transpose()
    }
}
