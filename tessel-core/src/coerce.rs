use crate::{EvalError, Value};

/// Turn a resolved `t:each` value into the sequence to iterate.
///
/// Arrays and lists iterate in index order; objects iterate if they expose
/// their elements. Anything else is `NotIterable`.
pub fn to_sequence(value: Value, expr: &str) -> Result<Vec<Value>, EvalError> {
    let not_iterable = |type_name: &str| EvalError::NotIterable {
        type_name: type_name.to_string(),
        expr: expr.to_string(),
    };
    match value {
        Value::Array(items) => Ok(items.to_vec()),
        Value::List(items) => Ok(items),
        Value::Object(obj) => obj.elements().ok_or_else(|| not_iterable(obj.type_name())),
        other => Err(not_iterable(other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_and_list_keep_order() {
        assert_eq!(
            to_sequence(Value::from(["a", "b", "c"]), "${xs}"),
            Ok(vec![Value::from("a"), Value::from("b"), Value::from("c")])
        );
        assert_eq!(
            to_sequence(Value::from(vec![3, 1]), "${xs}"),
            Ok(vec![Value::Int(3), Value::Int(1)])
        );
    }

    #[test]
    fn scalars_and_maps_are_rejected() {
        for v in [Value::from("abc"), Value::Int(3), Value::Map(Default::default()), Value::Null] {
            let type_name = v.type_name().to_string();
            assert_eq!(
                to_sequence(v, "${x}"),
                Err(EvalError::NotIterable {
                    type_name,
                    expr: "${x}".into()
                })
            );
        }
    }
}
