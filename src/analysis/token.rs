//! Token types for lemmatization.
//!
//! Tokens reach this crate already produced by an upstream tokenizer and
//! tagged with a part-of-speech label by an upstream tagger. A stop-word
//! detector may have flagged some of them. The only field written here is
//! [`Token::lemma`].
//!
//! # Examples
//!
//! ```
//! use crowd_lemmatizer::analysis::token::Token;
//!
//! let token = Token::new("running", 0).with_pos("VBG");
//! assert_eq!(token.text, "running");
//! assert_eq!(token.pos.as_deref(), Some("VBG"));
//! assert!(!token.is_stop_word());
//! assert!(!token.has_lemma());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single tagged token of a message.
///
/// # Fields
///
/// - `text` - The raw token text
/// - `position` - Position in the message's token list (0-based)
/// - `pos` - Part-of-speech tag (Penn Treebank), if the tagger set one
/// - `stop_word` - Whether a stop-word stage excluded this token
/// - `lemma` - Dictionary base form, unset until a lemmatizer fills it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the message (0-based)
    #[serde(default)]
    pub position: usize,

    /// Part-of-speech tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,

    /// Whether this token has been marked as a stop word
    #[serde(default)]
    pub stop_word: bool,

    /// The lemma computed for this token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
}

impl Token {
    /// Create a new untagged token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            pos: None,
            stop_word: false,
            lemma: None,
        }
    }

    /// Set the part-of-speech tag.
    pub fn with_pos<S: Into<String>>(mut self, pos: S) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Pre-seed the lemma.
    pub fn with_lemma<S: Into<String>>(mut self, lemma: S) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// Mark this token as a stop word.
    pub fn stop(mut self) -> Self {
        self.stop_word = true;
        self
    }

    /// Check if this token is a stop word.
    pub fn is_stop_word(&self) -> bool {
        self.stop_word
    }

    /// Check if a lemma has already been assigned.
    pub fn has_lemma(&self) -> bool {
        self.lemma.is_some()
    }

    /// Get the part-of-speech tag as a string slice.
    pub fn pos(&self) -> Option<&str> {
        self.pos.as_deref()
    }

    /// Get the lemma as a string slice.
    pub fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }

    /// Replace the lemma, returning the previous one.
    pub fn set_lemma<S: Into<String>>(&mut self, lemma: S) -> Option<String> {
        self.lemma.replace(lemma.into())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pos {
            Some(pos) => write!(f, "{}/{}", self.text, pos),
            None => write!(f, "{}", self.text),
        }
    }
}

/// A token stream represents a sequence of tokens flowing through filters.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
