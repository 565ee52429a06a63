//! Identity analyzer implementation.

use crate::analysis::morphology::Morphology;
use crate::error::Result;

/// Identity analyzer that returns words unchanged.
#[derive(Debug, Clone, Default)]
pub struct IdentityMorphology;

impl IdentityMorphology {
    pub fn new() -> Self {
        IdentityMorphology
    }
}

impl Morphology for IdentityMorphology {
    fn lemma(&self, word: &str, _pos: Option<&str>) -> Result<String> {
        Ok(word.to_string())
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}
