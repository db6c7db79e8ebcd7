use std::io;

use tessel_core::EvalError;
use thiserror::Error;

/// Anything that aborts a render. Output written before the failure stays
/// in the sink.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("failed to write rendered output")]
    Io(#[from] io::Error),
}

impl RenderError {
    pub fn as_eval(&self) -> Option<&EvalError> {
        match self {
            RenderError::Eval(e) => Some(e),
            RenderError::Io(_) => None,
        }
    }
}
