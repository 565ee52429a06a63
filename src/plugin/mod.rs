//! Host plugin contract and the lemmatizer plugin.
//!
//! A host pipeline drives plugins through [`SingleablePlugin`]: it asks for
//! the plugin's name, builds its configuration from JSON, and obtains an
//! operator that transforms one message at a time.

use serde_json::Value;

use crate::analysis::message::Message;
use crate::error::Result;

pub mod config;
pub mod lemmatizer;
pub mod operator;

pub use config::{CalculationMode, LemmatizerConfig, PluginConfig};
pub use lemmatizer::{LemmatizerPlugin, PLUGIN_NAME};
pub use operator::{LemmatizeOperator, MessageOperator};

/// Trait for plugins that process messages one at a time.
pub trait SingleablePlugin: Send + Sync {
    /// Configuration type accepted by this plugin.
    type Config: PluginConfig;

    /// Operator type produced by this plugin.
    type Operator: MessageOperator;

    /// Unique name under which the host registers this plugin.
    fn name(&self) -> &'static str;

    /// Create an empty configuration.
    fn new_parameter(&self) -> Self::Config {
        Self::Config::default()
    }

    /// Build a configuration from a JSON element.
    fn build_config(&self, value: &Value) -> Result<Self::Config> {
        Self::Config::build_from_json(value)
    }

    /// Create the per-message operator for a configuration.
    ///
    /// `None` means the host supplied no configuration.
    fn operator(&self, config: Option<Self::Config>) -> Self::Operator;

    /// Process a single message with the default behavior.
    fn single_item_process(&self, message: Message) -> Result<Message>;
}
