//! Menu-driven terminal front end for the stockroom catalog.
//!
//! Owns everything the catalog deliberately does not: reading raw operator
//! input, turning it into typed values, and printing results and errors.

pub mod config;
pub mod menu;
pub mod prompt;
pub mod session;

pub use config::Config;
pub use prompt::{PromptError, Prompter};
pub use session::Session;
