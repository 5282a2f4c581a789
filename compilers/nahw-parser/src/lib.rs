pub mod parser;
pub mod token;

use nahw_protocol::{Word, WordId};
use crate::parser::parse_with_spans;
use crate::token::{Span, Token};

/// Primary entry point: Sentence -> Tokens
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    parse_with_spans(input)
        .into_iter()
        .map(|(span, text): (Span, &str)| Token { span, text })
        .collect()
}

/// Splits a sentence into fresh, untagged words numbered from zero.
pub fn words(sentence: &str) -> Vec<Word> {
    let words: Vec<Word> = tokenize(sentence)
        .into_iter()
        .enumerate()
        .map(|(index, token)| Word::new(WordId(index as u32), token.text))
        .collect();
    tracing::debug!(count = words.len(), "tokenized sentence");
    words
}
