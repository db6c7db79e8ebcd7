use crate::{Context, EvalError, LoopBinding, Value, resolve};

const FALSE_WORDS: [&str; 3] = ["false", "off", "no"];

impl Value {
    /// Truthiness used by `t:if`:
    /// strings are false only for `false`/`off`/`no` (any case), numbers
    /// only when `<= 0`, `null` is false, everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n > 0,
            Value::Float(n) => *n > 0.0 || n.is_nan(),
            Value::Str(s) => !FALSE_WORDS.iter().any(|w| s.eq_ignore_ascii_case(w)),
            Value::Array(_) | Value::List(_) | Value::Map(_) | Value::Object(_) => true,
        }
    }
}

/// Evaluate the text of a `t:if` directive.
///
/// `true`/`false` literals short-circuit. Otherwise the text is resolved as
/// a property path; if it is not one, or names an unbound variable, the raw
/// text itself is judged as a string. A missing field is still an error.
pub fn is_true(
    text: &str,
    ctx: &Context,
    binding: Option<LoopBinding<'_>>,
) -> Result<bool, EvalError> {
    if text.eq_ignore_ascii_case("true") {
        return Ok(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Ok(false);
    }

    let value = match resolve(text, ctx, binding) {
        Ok(value) => value,
        Err(err @ (EvalError::MalformedExpression { .. } | EvalError::UnresolvedVariable { .. })) => {
            tracing::trace!(%err, "condition falls back to literal text");
            Value::Str(text.to_string())
        }
        Err(err) => return Err(err),
    };
    Ok(value.is_truthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_fast_path_ignores_context() {
        let mut ctx = Context::new();
        ctx.put("true", false);
        assert_eq!(is_true("TRUE", &ctx, None), Ok(true));
        assert_eq!(is_true("False", &ctx, None), Ok(false));
    }

    #[test]
    fn numeric_boundary() {
        let mut ctx = Context::new();
        ctx.put("neg", -13);
        ctx.put("pos", 11.5);
        ctx.put("zero", 0);
        ctx.put("fzero", 0.0);
        assert_eq!(is_true("${neg}", &ctx, None), Ok(false));
        assert_eq!(is_true("${pos}", &ctx, None), Ok(true));
        assert_eq!(is_true("${zero}", &ctx, None), Ok(false));
        assert_eq!(is_true("${fzero}", &ctx, None), Ok(false));
    }

    #[test]
    fn unresolved_falls_back_to_literal() {
        let ctx = Context::new();
        assert_eq!(is_true("${missing}", &ctx, None), Ok(true));
        assert_eq!(is_true("off", &ctx, None), Ok(false));
        assert_eq!(is_true("NO", &ctx, None), Ok(false));
        assert_eq!(is_true("yes", &ctx, None), Ok(true));
        assert_eq!(is_true("", &ctx, None), Ok(true));
    }

    #[test]
    fn missing_field_is_not_swallowed() {
        let mut ctx = Context::new();
        ctx.put("flag", true);
        assert!(matches!(
            is_true("${flag.value}", &ctx, None),
            Err(EvalError::UnresolvedField { .. })
        ));
    }

    #[test]
    fn loop_binding_is_consulted() {
        let ctx = Context::new();
        let v = Value::from("off");
        let binding = LoopBinding { name: "s", value: &v };
        assert_eq!(is_true("${s}", &ctx, Some(binding)), Ok(false));
    }

    #[test]
    fn other_types_are_true() {
        assert!(Value::from(Vec::<i32>::new()).is_truthy());
        assert!(Value::Map(Default::default()).is_truthy());
        assert!(!Value::Null.is_truthy());
    }
}
