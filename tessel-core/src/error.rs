use thiserror::Error;

/// Why a directive could not be evaluated. Every variant carries the
/// directive text it came from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("malformed expression `{expr}`")]
    MalformedExpression { expr: String },

    #[error("unresolved variable `{name}` in `{expr}`")]
    UnresolvedVariable { name: String, expr: String },

    #[error("{type_name} has no field `{field}` (in `{expr}`)")]
    UnresolvedField {
        field: String,
        type_name: String,
        expr: String,
    },

    #[error("`{expr}` resolved to {type_name}, which is not iterable")]
    NotIterable { type_name: String, expr: String },
}

impl EvalError {
    /// The directive text that failed.
    pub fn expr(&self) -> &str {
        match self {
            EvalError::MalformedExpression { expr }
            | EvalError::UnresolvedVariable { expr, .. }
            | EvalError::UnresolvedField { expr, .. }
            | EvalError::NotIterable { expr, .. } => expr,
        }
    }

    pub(crate) fn malformed(expr: &str) -> Self {
        EvalError::MalformedExpression {
            expr: expr.to_string(),
        }
    }
}
