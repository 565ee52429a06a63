//! Morphological analyzers that turn a tagged word into its lemma.
//!
//! The lemmatizer treats an analyzer as a black box with one capability:
//! given a word and its part-of-speech tag, return the dictionary base form.
//! Any type implementing [`Morphology`] can be plugged into the lemmatizer.

use crate::error::Result;

/// Trait for morphological analyzers.
///
/// Implementations must be shareable across threads; a single instance is
/// reused for every message a lemmatizer processes.
pub trait Morphology: Send + Sync {
    /// Compute the lemma of `word` given its part-of-speech tag.
    ///
    /// Errors are returned to the caller unchanged; the lemmatizer does not
    /// catch them.
    fn lemma(&self, word: &str, pos: Option<&str>) -> Result<String>;

    /// Get the name of this analyzer.
    fn name(&self) -> &'static str;
}

// Analyzer implementations
pub mod dictionary;
pub mod english;
pub mod identity;

// Re-export analyzers
pub use dictionary::DictionaryMorphology;
pub use english::EnglishMorphology;
pub use identity::IdentityMorphology;
