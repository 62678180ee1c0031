// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::BackendResult;
use crate::traits::backend::Token;
use crate::traits::{Backend, BackendCapabilities, Capability};

/// Tokenizer that splits on whitespace and nothing else.
pub struct WhitespaceBackend;

impl WhitespaceBackend {
    pub const NAME: &'static str = "whitespace";

    pub fn new() -> Self {
        Self
    }
}

impl Default for WhitespaceBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for WhitespaceBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities::from_list(&[Capability::Tokenization])
    }

    async fn tokenize(&self, text: &str) -> BackendResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;
        for (idx, ch) in text.char_indices() {
            match (ch.is_whitespace(), start) {
                (true, Some(s)) => {
                    tokens.push(Token {
                        text: text[s..idx].to_string(),
                        start: s,
                        end: idx,
                    });
                    start = None;
                }
                (false, None) => start = Some(idx),
                _ => {}
            }
        }
        if let Some(s) = start {
            tokens.push(Token {
                text: text[s..].to_string(),
                start: s,
                end: text.len(),
            });
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BackendError;

    #[tokio::test]
    async fn test_splits_on_whitespace_with_offsets() {
        let tokens = WhitespaceBackend::new().tokenize("  hi,  there\n").await.unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["hi,", "there"]);
        assert_eq!((tokens[0].start, tokens[0].end), (2, 5));
        assert_eq!((tokens[1].start, tokens[1].end), (7, 12));
    }

    #[tokio::test]
    async fn test_everything_else_is_not_supported() {
        let err = WhitespaceBackend::new().lemmatize("cats").await.unwrap_err();
        assert_eq!(err, BackendError::not_supported("whitespace", "lemmatize"));
    }
}
