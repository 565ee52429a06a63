//! Per-message operators.
//!
//! An operator is the transformation a host applies to every message of a
//! stream. Messages are processed one at a time; [`MessageOperator::call_batch`]
//! spreads independent messages over the rayon thread pool.

use rayon::prelude::*;

use crate::analysis::message::Message;
use crate::error::Result;
use crate::plugin::SingleablePlugin;
use crate::plugin::config::CalculationMode;
use crate::plugin::lemmatizer::LemmatizerPlugin;

/// Trait for per-message transformations.
pub trait MessageOperator: Send + Sync {
    /// Transform one message, returning it after in-place mutation.
    fn call(&self, message: Message) -> Result<Message>;

    /// Lazily transform a stream of messages.
    ///
    /// Errors are yielded in place; the stream continues after them.
    fn call_stream<'a, I>(&'a self, messages: I) -> Box<dyn Iterator<Item = Result<Message>> + 'a>
    where
        Self: Sized,
        I: IntoIterator<Item = Message>,
        I::IntoIter: 'a,
    {
        Box::new(messages.into_iter().map(move |message| self.call(message)))
    }

    /// Transform a batch of messages in parallel, preserving their order.
    ///
    /// Fails with the first error encountered.
    fn call_batch(&self, messages: Vec<Message>) -> Result<Vec<Message>>
    where
        Self: Sized,
    {
        messages
            .into_par_iter()
            .map(|message| self.call(message))
            .collect()
    }
}

/// Operator that lemmatizes the tokens of each message.
///
/// Holds a handle to the plugin that created it, so every operator of a
/// plugin shares the plugin's analyzer.
#[derive(Clone, Debug)]
pub struct LemmatizeOperator {
    plugin: LemmatizerPlugin,
    mode: CalculationMode,
}

impl LemmatizeOperator {
    /// Create an operator for the given plugin and mode.
    pub fn new(plugin: LemmatizerPlugin, mode: CalculationMode) -> Self {
        LemmatizeOperator { plugin, mode }
    }

    /// Get the calculation mode.
    pub fn mode(&self) -> CalculationMode {
        self.mode
    }

    /// Get the plugin backing this operator.
    pub fn plugin(&self) -> &LemmatizerPlugin {
        &self.plugin
    }
}

impl MessageOperator for LemmatizeOperator {
    fn call(&self, message: Message) -> Result<Message> {
        match self.mode {
            CalculationMode::All => self.plugin.single_item_process(message),
            CalculationMode::New => self.plugin.single_item_process_with_filter(message),
        }
    }
}
