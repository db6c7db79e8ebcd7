use std::fmt;

use serde::Serialize;
use tessel_core::{Context, EvalError, Object, Value, resolve, to_sequence};

#[derive(Debug)]
struct Student {
    id: i64,
    name: String,
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Student({}, {})", self.id, self.name)
    }
}

impl Object for Student {
    fn type_name(&self) -> &str {
        "Student"
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Roster(Vec<&'static str>);

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} names", self.0.len())
    }
}

impl Object for Roster {
    fn type_name(&self) -> &str {
        "Roster"
    }

    fn field(&self, name: &str) -> Option<Value> {
        (name == "size").then(|| self.0.len().into())
    }

    fn elements(&self) -> Option<Vec<Value>> {
        Some(self.0.iter().map(|&n| n.into()).collect())
    }
}

#[test]
fn host_object_fields() {
    let mut ctx = Context::new();
    ctx.put(
        "student",
        Value::object(Student {
            id: 2,
            name: "Maria".into(),
        }),
    );

    assert_eq!(resolve("${student.name}", &ctx, None), Ok(Value::from("Maria")));
    assert_eq!(resolve("${student.id}", &ctx, None), Ok(Value::Int(2)));
    assert_eq!(
        resolve("${student.grade}", &ctx, None),
        Err(EvalError::UnresolvedField {
            field: "grade".into(),
            type_name: "Student".into(),
            expr: "${student.grade}".into(),
        })
    );
    assert_eq!(
        resolve("${student}", &ctx, None).unwrap().to_string(),
        "Student(2, Maria)"
    );
}

#[test]
fn host_collections_iterate_through_elements() {
    let roster = Value::object(Roster(vec!["Ivan", "Nikola"]));
    assert_eq!(
        to_sequence(roster.clone(), "${roster}"),
        Ok(vec![Value::from("Ivan"), Value::from("Nikola")])
    );

    let student = Value::object(Student {
        id: 1,
        name: "Ivan".into(),
    });
    assert!(matches!(
        to_sequence(student, "${s}"),
        Err(EvalError::NotIterable { type_name, .. }) if type_name == "Student"
    ));
}

#[derive(Serialize)]
struct Welcome {
    message: String,
    visits: u32,
}

#[derive(Serialize)]
struct Page {
    welcome: Welcome,
    tags: Vec<String>,
}

#[test]
fn serializable_host_types_resolve_by_field() {
    let page = Page {
        welcome: Welcome {
            message: "hello world".into(),
            visits: 3,
        },
        tags: vec!["a".into(), "b".into()],
    };
    let mut ctx = Context::new();
    ctx.put("page", Value::from_serialize(&page).unwrap());

    assert_eq!(
        resolve("${page.welcome.message}", &ctx, None),
        Ok(Value::from("hello world"))
    );
    assert_eq!(resolve("${page.welcome.visits}", &ctx, None), Ok(Value::Int(3)));

    let tags = resolve("${page.tags}", &ctx, None).unwrap();
    assert_eq!(to_sequence(tags, "${page.tags}").unwrap().len(), 2);
}
