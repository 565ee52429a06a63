//! Dictionary-backed analyzer.
//!
//! Looks lemmas up in a table of inflected forms, optionally keyed by
//! part-of-speech tag. Words missing from the table go to a fallback
//! analyzer; without one, a miss is reported as an error.
//!
//! Dictionaries can be loaded from tab-separated text:
//!
//! ```text
//! # form <TAB> [pos <TAB>] lemma
//! geese	NNS	goose
//! data	datum
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::morphology::Morphology;
use crate::error::{LemmatizeError, Result};

/// Analyzer that resolves lemmas from a lookup table.
///
/// Forms are matched case-insensitively. A tagged entry wins over an
/// untagged entry for the same form.
#[derive(Clone, Default)]
pub struct DictionaryMorphology {
    tagged: AHashMap<(String, String), String>,
    untagged: AHashMap<String, String>,
    fallback: Option<Arc<dyn Morphology>>,
}

impl std::fmt::Debug for DictionaryMorphology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryMorphology")
            .field("entries", &self.len())
            .field("fallback", &self.fallback.as_ref().map(|m| m.name()))
            .finish()
    }
}

impl DictionaryMorphology {
    /// Create an empty dictionary without fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary from a tab-separated file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let dictionary = Self::from_reader(BufReader::new(file))?;
        log::debug!(
            "Loaded {} dictionary entries from {}",
            dictionary.len(),
            path.as_ref().display()
        );
        Ok(dictionary)
    }

    /// Load a dictionary from tab-separated lines.
    ///
    /// Each non-empty line that does not start with `#` holds either
    /// `form<TAB>lemma` or `form<TAB>pos<TAB>lemma`.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut dictionary = Self::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if fields.iter().any(|field| field.is_empty()) {
                return Err(LemmatizeError::dictionary(format!(
                    "line {}: empty field",
                    line_num + 1
                )));
            }
            match fields.as_slice() {
                [form, lemma] => dictionary.insert(*form, *lemma),
                [form, pos, lemma] => dictionary.insert_tagged(*form, *pos, *lemma),
                _ => {
                    return Err(LemmatizeError::dictionary(format!(
                        "line {}: expected 2 or 3 tab-separated fields, found {}",
                        line_num + 1,
                        fields.len()
                    )));
                }
            }
        }

        Ok(dictionary)
    }

    /// Set the analyzer consulted for words missing from the table.
    pub fn with_fallback(mut self, fallback: Arc<dyn Morphology>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Add an entry that applies to any tag.
    pub fn insert<F, L>(&mut self, form: F, lemma: L)
    where
        F: AsRef<str>,
        L: Into<String>,
    {
        self.untagged
            .insert(form.as_ref().to_lowercase(), lemma.into());
    }

    /// Add an entry that applies to one tag only.
    pub fn insert_tagged<F, P, L>(&mut self, form: F, pos: P, lemma: L)
    where
        F: AsRef<str>,
        P: Into<String>,
        L: Into<String>,
    {
        self.tagged
            .insert((form.as_ref().to_lowercase(), pos.into()), lemma.into());
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.tagged.len() + self.untagged.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, form: &str, pos: Option<&str>) -> Option<&str> {
        if let Some(pos) = pos {
            // The tuple key needs owned strings; a miss is the common path.
            if let Some(lemma) = self.tagged.get(&(form.to_string(), pos.to_string())) {
                return Some(lemma);
            }
        }
        self.untagged.get(form).map(String::as_str)
    }
}

impl Morphology for DictionaryMorphology {
    fn lemma(&self, word: &str, pos: Option<&str>) -> Result<String> {
        if let Some(lemma) = self.lookup(&word.to_lowercase(), pos) {
            return Ok(lemma.to_string());
        }
        match &self.fallback {
            Some(fallback) => fallback.lemma(word, pos),
            None => Err(LemmatizeError::morphology(format!(
                "no dictionary entry for '{}' ({})",
                word,
                pos.unwrap_or("untagged")
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}
