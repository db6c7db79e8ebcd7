use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("unterminated comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },

    #[error("unterminated <{tag}> tag starting at byte {offset}")]
    UnterminatedTag { tag: String, offset: usize },

    #[error("unterminated quoted value for attribute `{attr}` at byte {offset}")]
    UnterminatedQuote { attr: String, offset: usize },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
