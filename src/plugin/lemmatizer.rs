//! The `lemmatizer-stanford` plugin.
//!
//! Annotates every non-stop-word token of a message with its lemma. The
//! morphological analyzer doing the actual work is created on first use
//! and shared by every operator the plugin hands out.
//!
//! # Examples
//!
//! ```
//! use crowd_lemmatizer::analysis::message::Message;
//! use crowd_lemmatizer::analysis::token::Token;
//! use crowd_lemmatizer::plugin::{LemmatizerPlugin, MessageOperator, SingleablePlugin};
//! use serde_json::json;
//!
//! let plugin = LemmatizerPlugin::new();
//! let config = plugin.build_config(&json!({"calculate": "new"})).unwrap();
//! let operator = plugin.operator(Some(config));
//!
//! let message = Message::new("m1").with_tokens(vec![
//!     Token::new("running", 0).with_pos("VBG"),
//!     Token::new("dogs", 1).with_pos("NNS").with_lemma("foo"),
//! ]);
//! let message = operator.call(message).unwrap();
//!
//! let tokens = message.tokens().unwrap();
//! assert_eq!(tokens[0].lemma(), Some("run"));
//! assert_eq!(tokens[1].lemma(), Some("foo"));
//! ```

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::analysis::message::Message;
use crate::analysis::morphology::{EnglishMorphology, Morphology};
use crate::analysis::token_filter::lemmatize_tokens;
use crate::error::Result;
use crate::plugin::SingleablePlugin;
use crate::plugin::config::{CalculationMode, LemmatizerConfig};
use crate::plugin::operator::LemmatizeOperator;

/// Name under which the plugin is registered with the host.
pub const PLUGIN_NAME: &str = "lemmatizer-stanford";

type MorphologyFactory = dyn Fn() -> Result<Arc<dyn Morphology>> + Send + Sync;

struct LemmatizerInner {
    morphology: OnceCell<Arc<dyn Morphology>>,
    factory: Box<MorphologyFactory>,
}

/// Lemmatization plugin backed by a lazily created analyzer.
///
/// Cloning is cheap; clones share the same analyzer.
#[derive(Clone)]
pub struct LemmatizerPlugin {
    inner: Arc<LemmatizerInner>,
}

impl fmt::Debug for LemmatizerPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LemmatizerPlugin")
            .field("name", &PLUGIN_NAME)
            .field(
                "morphology",
                &self.inner.morphology.get().map(|m| m.name()),
            )
            .finish()
    }
}

impl LemmatizerPlugin {
    /// Create a plugin backed by [`EnglishMorphology`].
    pub fn new() -> Self {
        Self::with_factory(|| Ok(Arc::new(EnglishMorphology::new()) as Arc<dyn Morphology>))
    }

    /// Create a plugin whose analyzer is built by `factory` on first use.
    ///
    /// The factory runs at most once per plugin, even under concurrent
    /// use. If it fails, the error is returned to the caller and the next
    /// message retries.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Morphology>> + Send + Sync + 'static,
    {
        LemmatizerPlugin {
            inner: Arc::new(LemmatizerInner {
                morphology: OnceCell::new(),
                factory: Box::new(factory),
            }),
        }
    }

    /// Create a plugin around an existing analyzer.
    pub fn with_morphology(morphology: Arc<dyn Morphology>) -> Self {
        Self::with_factory(move || Ok(Arc::clone(&morphology)))
    }

    /// Get the analyzer, creating it if needed.
    pub fn morphology(&self) -> Result<Arc<dyn Morphology>> {
        self.inner
            .morphology
            .get_or_try_init(|| -> Result<Arc<dyn Morphology>> {
                let morphology = (self.inner.factory)()?;
                log::info!("Created {} morphology for {}", morphology.name(), PLUGIN_NAME);
                Ok(morphology)
            })
            .map(Arc::clone)
    }

    /// Check whether the analyzer has been created.
    pub fn is_initialized(&self) -> bool {
        self.inner.morphology.get().is_some()
    }

    /// Lemmatize only the non-stop-word tokens that have no lemma yet.
    pub fn single_item_process_with_filter(&self, message: Message) -> Result<Message> {
        self.process(message, CalculationMode::New)
    }

    fn process(&self, mut message: Message, mode: CalculationMode) -> Result<Message> {
        if let Some(tokens) = message.tokens_mut() {
            if !tokens.is_empty() {
                let morphology = self.morphology()?;
                let stats = lemmatize_tokens(tokens, morphology.as_ref(), mode)?;
                log::debug!(
                    "Lemmatized message {} ({mode}): {} lemmatized, {} stop words, {} already set",
                    message.id.as_deref().unwrap_or("<unknown>"),
                    stats.lemmatized,
                    stats.skipped_stop_words,
                    stats.skipped_existing
                );
            }
        }
        Ok(message)
    }
}

impl Default for LemmatizerPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleablePlugin for LemmatizerPlugin {
    type Config = LemmatizerConfig;
    type Operator = LemmatizeOperator;

    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn operator(&self, config: Option<LemmatizerConfig>) -> LemmatizeOperator {
        let mode = config.map(|c| c.calculate).unwrap_or_default();
        LemmatizeOperator::new(self.clone(), mode)
    }

    /// Lemmatize every non-stop-word token, overwriting existing lemmas.
    fn single_item_process(&self, message: Message) -> Result<Message> {
        self.process(message, CalculationMode::All)
    }
}
