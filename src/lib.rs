//! # Crowd Lemmatizer
//!
//! A lemmatization stage for crowd-analysis message pipelines.
//!
//! ## Features
//!
//! - Plugs into a host pipeline as the `lemmatizer-stanford` plugin
//! - Two modes: recompute every lemma, or fill in missing lemmas only
//! - Pluggable morphological analyzers behind the `Morphology` trait
//! - Built-in POS-aware English analyzer and dictionary lookup analyzer
//! - One lazily created analyzer shared safely across threads

pub mod analysis;
pub mod cli;
pub mod error;
pub mod plugin;

pub mod prelude {
    pub use crate::analysis::message::Message;
    pub use crate::analysis::morphology::Morphology;
    pub use crate::analysis::token::Token;
    pub use crate::error::{LemmatizeError, Result};
    pub use crate::plugin::{
        CalculationMode, LemmatizerConfig, LemmatizerPlugin, MessageOperator, SingleablePlugin,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
