pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;
pub mod parser;
pub mod posts;

pub use checker::dictionary::{Dictionary, DictionaryBuilder};
pub use checker::{Correction, Proofreader, Report, Suggestion};
pub use config::Config;
pub use error::{ProofreadError, Result};
pub use parser::Token;
pub use posts::{Document, FilePostRepository, PostRepository};

/// Marker printed in place of a replacement when no known word is close enough.
pub const UNRESOLVED_MARKER: &str = "???";
