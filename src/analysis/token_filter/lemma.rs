//! Lemma filter implementation.
//!
//! Assigns lemmas to tokens using a [`Morphology`] analyzer. Stop words are
//! never touched. In [`CalculationMode::All`] every other token gets a fresh
//! lemma, overwriting any previous value; in [`CalculationMode::New`] only
//! tokens without a lemma are analyzed.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use crowd_lemmatizer::analysis::morphology::EnglishMorphology;
//! use crowd_lemmatizer::analysis::token::Token;
//! use crowd_lemmatizer::analysis::token_filter::Filter;
//! use crowd_lemmatizer::analysis::token_filter::lemma::LemmaFilter;
//!
//! let filter = LemmaFilter::new(Arc::new(EnglishMorphology::new()));
//! let tokens = vec![
//!     Token::new("running", 0).with_pos("VBG"),
//!     Token::new("the", 1).with_pos("DT").stop(),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].lemma(), Some("run"));
//! assert_eq!(result[1].lemma(), None);
//! ```

use std::sync::Arc;

use crate::analysis::morphology::Morphology;
use crate::analysis::token::{IntoTokenStream, Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::plugin::config::CalculationMode;

/// Counters describing one lemmatization pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LemmatizeStats {
    /// Tokens that received a lemma
    pub lemmatized: usize,
    /// Tokens skipped because they are stop words
    pub skipped_stop_words: usize,
    /// Tokens skipped because they already had a lemma
    pub skipped_existing: usize,
}

impl LemmatizeStats {
    /// Total number of tokens visited.
    pub fn total(&self) -> usize {
        self.lemmatized + self.skipped_stop_words + self.skipped_existing
    }
}

/// Why a token is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Stop words never receive a lemma
    StopWord,
    /// `New` mode keeps lemmas set upstream
    LemmaExists,
}

/// Decide whether `token` is skipped under `mode`.
pub fn skip_reason(token: &Token, mode: CalculationMode) -> Option<SkipReason> {
    if token.is_stop_word() {
        Some(SkipReason::StopWord)
    } else if mode == CalculationMode::New && token.has_lemma() {
        Some(SkipReason::LemmaExists)
    } else {
        None
    }
}

/// Assign lemmas to `tokens` in place according to `mode`.
///
/// Stops at the first analyzer error and returns it; tokens visited before
/// the failure keep their new lemma.
pub fn lemmatize_tokens(
    tokens: &mut [Token],
    morphology: &dyn Morphology,
    mode: CalculationMode,
) -> Result<LemmatizeStats> {
    let mut stats = LemmatizeStats::default();

    for token in tokens.iter_mut() {
        match skip_reason(token, mode) {
            Some(SkipReason::StopWord) => {
                if mode == CalculationMode::New {
                    log::debug!("Token skipped (stop word): {token}");
                }
                stats.skipped_stop_words += 1;
                continue;
            }
            Some(SkipReason::LemmaExists) => {
                log::debug!("Token skipped (lemma already exists): {token}");
                stats.skipped_existing += 1;
                continue;
            }
            None => {}
        }

        let lemma = morphology.lemma(&token.text, token.pos())?;
        token.set_lemma(lemma);
        stats.lemmatized += 1;
    }

    Ok(stats)
}

/// Filter that assigns lemmas to the tokens of a stream.
#[derive(Clone)]
pub struct LemmaFilter {
    /// The analyzer to use.
    morphology: Arc<dyn Morphology>,
    mode: CalculationMode,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("morphology", &self.morphology.name())
            .field("mode", &self.mode)
            .finish()
    }
}

impl LemmaFilter {
    /// Create a lemma filter that recomputes every lemma.
    pub fn new(morphology: Arc<dyn Morphology>) -> Self {
        LemmaFilter {
            morphology,
            mode: CalculationMode::All,
        }
    }

    /// Set which tokens are lemmatized.
    pub fn with_mode(mut self, mode: CalculationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Get the calculation mode.
    pub fn mode(&self) -> CalculationMode {
        self.mode
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut tokens: Vec<Token> = tokens.collect();
        lemmatize_tokens(&mut tokens, self.morphology.as_ref(), self.mode)?;

        Ok(tokens.into_token_stream())
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::morphology::{EnglishMorphology, IdentityMorphology};
    use crate::error::LemmatizeError;

    struct FailingMorphology;

    impl Morphology for FailingMorphology {
        fn lemma(&self, word: &str, _pos: Option<&str>) -> Result<String> {
            if word == "boom" {
                Err(LemmatizeError::morphology("cannot analyze 'boom'"))
            } else {
                Ok(word.to_uppercase())
            }
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn sample_tokens() -> Vec<Token> {
        vec![
            Token::new("running", 0).with_pos("VBG"),
            Token::new("the", 1).with_pos("DT").stop(),
            Token::new("dogs", 2).with_pos("NNS").with_lemma("foo"),
        ]
    }

    #[test]
    fn test_all_mode_overwrites() {
        let mut tokens = sample_tokens();
        let stats =
            lemmatize_tokens(&mut tokens, &EnglishMorphology::new(), CalculationMode::All).unwrap();

        assert_eq!(tokens[0].lemma(), Some("run"));
        assert_eq!(tokens[1].lemma(), None);
        assert_eq!(tokens[2].lemma(), Some("dog"));
        assert_eq!(stats.lemmatized, 2);
        assert_eq!(stats.skipped_stop_words, 1);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn test_new_mode_keeps_existing() {
        let mut tokens = sample_tokens();
        let stats =
            lemmatize_tokens(&mut tokens, &EnglishMorphology::new(), CalculationMode::New).unwrap();

        assert_eq!(tokens[0].lemma(), Some("run"));
        assert_eq!(tokens[1].lemma(), None);
        assert_eq!(tokens[2].lemma(), Some("foo"));
        assert_eq!(stats.lemmatized, 1);
        assert_eq!(stats.skipped_existing, 1);
    }

    #[test]
    fn test_stop_word_lemma_is_never_modified() {
        let mut tokens = vec![Token::new("the", 0).with_pos("DT").stop().with_lemma("keep")];
        for mode in [CalculationMode::All, CalculationMode::New] {
            lemmatize_tokens(&mut tokens, &IdentityMorphology::new(), mode).unwrap();
            assert_eq!(tokens[0].lemma(), Some("keep"));
        }
    }

    #[test]
    fn test_skip_reason() {
        let stop = Token::new("the", 0).stop();
        let existing = Token::new("dogs", 1).with_lemma("dog");
        let fresh = Token::new("cats", 2);

        assert_eq!(skip_reason(&stop, CalculationMode::New), Some(SkipReason::StopWord));
        assert_eq!(skip_reason(&stop, CalculationMode::All), Some(SkipReason::StopWord));
        assert_eq!(skip_reason(&existing, CalculationMode::New), Some(SkipReason::LemmaExists));
        assert_eq!(skip_reason(&existing, CalculationMode::All), None);
        assert_eq!(skip_reason(&fresh, CalculationMode::New), None);
    }

    #[test]
    fn test_new_mode_counts_stop_word_skips() {
        let mut tokens = sample_tokens();
        let stats =
            lemmatize_tokens(&mut tokens, &IdentityMorphology::new(), CalculationMode::New).unwrap();

        assert_eq!(stats.skipped_stop_words, 1);
        assert_eq!(stats.skipped_existing, 1);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn test_error_propagates_and_stops() {
        let mut tokens = vec![
            Token::new("a", 0),
            Token::new("boom", 1),
            Token::new("c", 2),
        ];

        let err = lemmatize_tokens(&mut tokens, &FailingMorphology, CalculationMode::All).unwrap_err();

        assert!(matches!(err, LemmatizeError::Morphology(_)));
        assert_eq!(tokens[0].lemma(), Some("A"));
        assert_eq!(tokens[1].lemma(), None);
        assert_eq!(tokens[2].lemma(), None);
    }

    #[test]
    fn test_lemma_filter() {
        let filter = LemmaFilter::new(Arc::new(EnglishMorphology::new())).with_mode(CalculationMode::New);
        let token_stream = sample_tokens().into_token_stream();

        let result: Vec<Token> = filter.filter(token_stream).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].lemma(), Some("run"));
        assert_eq!(result[2].lemma(), Some("foo"));
        assert_eq!(filter.mode(), CalculationMode::New);
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LemmaFilter::new(Arc::new(IdentityMorphology::new())).name(), "lemma");
    }
}
