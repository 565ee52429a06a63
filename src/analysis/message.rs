//! Messages carried through the crowd-analysis pipeline.
//!
//! A message is owned by the host pipeline; stages receive it, mutate its
//! tokens in place and hand the same value back.

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;

/// A message with its (optional) list of tagged tokens.
///
/// `tokens` is `None` when no tokenizer ran on the message. That is
/// different from an empty list, though lemmatization treats both as a
/// no-op.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier assigned by the source
    #[serde(default)]
    pub id: Option<String>,

    /// Raw message text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Language code detected upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Tagged tokens
    #[serde(default)]
    pub tokens: Option<Vec<Token>>,
}

impl Message {
    /// Create an empty message with the given identifier.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Message {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Set the raw text.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the language code.
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the token list.
    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Get the tokens, if a token list exists.
    pub fn tokens(&self) -> Option<&[Token]> {
        self.tokens.as_deref()
    }

    /// Get mutable access to the tokens, if a token list exists.
    pub fn tokens_mut(&mut self) -> Option<&mut Vec<Token>> {
        self.tokens.as_mut()
    }

    /// Number of tokens, zero when the list is absent.
    pub fn token_count(&self) -> usize {
        self.tokens.as_ref().map_or(0, Vec::len)
    }
}
