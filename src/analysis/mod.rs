//! Message analysis module.
//!
//! This module provides the data carried through the pipeline (messages and
//! their tagged tokens), the morphological analyzers, and the token filter
//! that assigns lemmas.

pub mod message;
pub mod morphology;
pub mod token;
pub mod token_filter;

// Re-export commonly used types
pub use message::*;
pub use token::*;
pub use token_filter::*;
