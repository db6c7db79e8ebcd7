use crate::{Context, EvalError, PropertyPath, Value};

/// A loop variable that is in flight but not bound in the context.
#[derive(Debug, Clone, Copy)]
pub struct LoopBinding<'a> {
    pub name: &'a str,
    pub value: &'a Value,
}

/// Parse `expr` as a property path and resolve it.
///
/// The base name is looked up in `binding` first (when it names the same
/// variable), then in `ctx`. Each chain segment is a field read on the value
/// reached so far.
pub fn resolve(
    expr: &str,
    ctx: &Context,
    binding: Option<LoopBinding<'_>>,
) -> Result<Value, EvalError> {
    let path = PropertyPath::parse(expr)?;
    resolve_path(&path, expr, ctx, binding)
}

/// Resolve an already-parsed path. `expr` is only used for error reporting.
pub fn resolve_path(
    path: &PropertyPath,
    expr: &str,
    ctx: &Context,
    binding: Option<LoopBinding<'_>>,
) -> Result<Value, EvalError> {
    let base = match binding {
        Some(b) if b.name == path.base => Some(b.value),
        _ => ctx.get(&path.base),
    };
    let Some(base) = base else {
        return Err(EvalError::UnresolvedVariable {
            name: path.base.clone(),
            expr: expr.to_string(),
        });
    };

    let mut current = base.clone();
    for field in &path.chain {
        let next = match current.field(field) {
            Some(v) => v,
            None => {
                return Err(EvalError::UnresolvedField {
                    field: field.clone(),
                    type_name: current.type_name().to_string(),
                    expr: expr.to_string(),
                });
            }
        };
        current = next;
    }
    Ok(current)
}
