//! Markup text → [`tessel_dom::Document`].
//!
//! The renderer does not care where a tree comes from; this crate is the
//! parser the CLI and tests feed it with.

mod error;
mod parse;

pub use error::MarkupError;
pub use parse::{parse, parse_file};
