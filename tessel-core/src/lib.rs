//! Evaluation core for tessel templates: the values a host binds, the
//! variable context they live in, and the three directive evaluators
//! (property resolution, truthiness, iteration).

pub mod coerce;
pub mod context;
pub mod error;
pub mod path;
pub mod resolve;
pub mod truthy;
pub mod value;

pub use coerce::to_sequence;
pub use context::Context;
pub use error::EvalError;
pub use path::{EachSpec, PropertyPath};
pub use resolve::{LoopBinding, resolve, resolve_path};
pub use truthy::is_true;
pub use value::{Object, Value};
