// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::BackendResult;
use crate::traits::backend::{Entity, Lemma, Sentence, Token};
use crate::traits::{Backend, BackendCapabilities, Capability};

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];
const ENTITY_LABEL: &str = "PROPER_NOUN";

/// Dependency-free backend built on character rules.
///
/// * Tokens are runs of alphanumerics (with inner `'` or `-`); any other
///   non-space character is a token of its own.
/// * Sentences end at `.`, `!` or `?` followed by whitespace or end of text.
/// * Lemmas are lowercase words with common English suffixes stripped.
/// * Entities are runs of capitalized words, ignoring the first word of a
///   sentence.
pub struct RuleBasedBackend;

impl RuleBasedBackend {
    pub const NAME: &'static str = "rule_based";

    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleBasedBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn split_tokens(text: &str) -> Vec<Token> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, ch) = chars[i];
        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if ch.is_alphanumeric() {
            let mut j = i + 1;
            while j < chars.len() {
                let c = chars[j].1;
                let joins_word = (c == '\'' || c == '-')
                    && chars.get(j + 1).map_or(false, |(_, next)| next.is_alphanumeric());
                if c.is_alphanumeric() || joins_word {
                    j += 1;
                } else {
                    break;
                }
            }
            let end = chars.get(j).map_or(text.len(), |(idx, _)| *idx);
            tokens.push(Token {
                text: text[start..end].to_string(),
                start,
                end,
            });
            i = j;
        } else {
            let end = start + ch.len_utf8();
            tokens.push(Token {
                text: text[start..end].to_string(),
                start,
                end,
            });
            i += 1;
        }
    }

    tokens
}

fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if start.is_none() {
            if ch.is_whitespace() {
                continue;
            }
            start = Some(idx);
        }

        if SENTENCE_TERMINATORS.contains(&ch) {
            let mut end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !SENTENCE_TERMINATORS.contains(&next) {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
            if at_boundary {
                if let Some(s) = start.take() {
                    sentences.push(Sentence {
                        text: text[s..end].to_string(),
                        start: s,
                        end,
                    });
                }
            }
        }
    }

    if let Some(s) = start {
        let rest = text[s..].trim_end();
        if !rest.is_empty() {
            sentences.push(Sentence {
                text: rest.to_string(),
                start: s,
                end: s + rest.len(),
            });
        }
    }

    sentences
}

fn lemma_of(word: &str) -> String {
    let lower = word.to_lowercase();
    let chars = lower.chars().count();
    let len = lower.len();

    if chars > 4 && lower.ends_with("ies") {
        format!("{}y", &lower[..len - 3])
    } else if chars > 5 && lower.ends_with("ing") {
        lower[..len - 3].to_string()
    } else if chars > 4 && lower.ends_with("ed") {
        lower[..len - 2].to_string()
    } else if chars > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
    {
        lower[..len - 1].to_string()
    } else {
        lower
    }
}

fn is_word(token: &Token) -> bool {
    token.text.chars().next().map_or(false, char::is_alphabetic)
}

fn is_capitalized(token: &Token) -> bool {
    token.text.chars().next().map_or(false, char::is_uppercase)
}

fn find_entities(text: &str, tokens: &[Token]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut run: Option<(usize, usize)> = None;
    let mut sentence_start = true;

    let mut close = |run: &mut Option<(usize, usize)>| {
        if let Some((start, end)) = run.take() {
            entities.push(Entity {
                text: text[start..end].to_string(),
                label: ENTITY_LABEL.to_string(),
                start,
                end,
            });
        }
    };

    for token in tokens {
        if is_capitalized(token) && !sentence_start {
            run = Some(match run {
                Some((start, _)) => (start, token.end),
                None => (token.start, token.end),
            });
        } else {
            close(&mut run);
        }
        sentence_start = token
            .text
            .chars()
            .all(|c| SENTENCE_TERMINATORS.contains(&c));
    }
    close(&mut run);

    entities
}

#[async_trait]
impl Backend for RuleBasedBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities::from_list(&[
            Capability::Tokenization,
            Capability::Sentencization,
            Capability::Lemmatization,
            Capability::Ner,
        ])
    }

    async fn tokenize(&self, text: &str) -> BackendResult<Vec<Token>> {
        Ok(split_tokens(text))
    }

    async fn sentencize(&self, text: &str) -> BackendResult<Vec<Sentence>> {
        Ok(split_sentences(text))
    }

    async fn lemmatize(&self, text: &str) -> BackendResult<Vec<Lemma>> {
        Ok(split_tokens(text)
            .iter()
            .filter(|t| is_word(t))
            .map(|t| Lemma {
                token: t.text.clone(),
                lemma: lemma_of(&t.text),
            })
            .collect())
    }

    async fn extract_entities(&self, text: &str) -> BackendResult<Vec<Entity>> {
        Ok(find_entities(text, &split_tokens(text)))
    }
}
