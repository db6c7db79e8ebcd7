use std::fs;
use std::path::PathBuf;

use tessel_core::Value;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn cli_render_writes_expected_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_file = dir.path().join("nested/students.html");

    tessel_cli::render_cmd(
        &fixture("students.html"),
        Some(fixture("students.json").as_path()),
        &[],
        Some(out_file.as_path()),
    )
    .expect("render");

    let content = fs::read_to_string(&out_file).expect("read output");
    let expected = fs::read_to_string(fixture("students.out")).expect("read expected");
    assert_eq!(content, expected);
    assert!(!content.contains("t:"), "directives must be stripped");
}

#[test]
fn cli_vars_override_context_file() {
    let vars = vec![
        ("negativeNumber".to_string(), "yes".to_string()),
        ("extra".to_string(), "1".to_string()),
    ];
    let ctx = tessel_cli::load_context(Some(fixture("students.json").as_path()), &vars).expect("context");
    assert_eq!(ctx.get("negativeNumber"), Some(&Value::from("yes")));
    assert_eq!(ctx.get("extra"), Some(&Value::from("1")));
    assert_eq!(ctx.get("positiveNumber"), Some(&Value::Float(11.5)));
}

#[test]
fn cli_rejects_non_object_context() {
    let dir = tempfile::tempdir().expect("tempdir");
    let json = dir.path().join("list.json");
    fs::write(&json, "[1, 2, 3]").unwrap();

    let err = tessel_cli::load_context(Some(json.as_path()), &[]).unwrap_err();
    assert!(err.to_string().contains("must be a JSON object"), "{err}");
}

#[test]
fn cli_render_reports_unresolved_variable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_file = dir.path().join("out.html");

    // no context: `${welcome.message}` cannot resolve
    let err = tessel_cli::render_cmd(&fixture("students.html"), None, &[], Some(out_file.as_path()))
        .unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("failed to render"), "{chain}");
    assert!(chain.contains("unresolved variable `welcome`"), "{chain}");

    // the prefix before the failing element was still written
    let partial = fs::read_to_string(&out_file).expect("read partial output");
    assert_eq!(partial, "<html>\n<body>\n");
}

#[test]
fn parse_var_splits_on_first_equals() {
    assert_eq!(
        tessel_cli::parse_var("title=a=b"),
        Ok(("title".to_string(), "a=b".to_string()))
    );
    assert_eq!(
        tessel_cli::parse_var("empty="),
        Ok(("empty".to_string(), String::new()))
    );
    assert!(tessel_cli::parse_var("novalue").is_err());
    assert!(tessel_cli::parse_var("=x").is_err());
}
