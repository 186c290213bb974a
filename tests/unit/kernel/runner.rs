use super::*;

#[test]
fn builtins_are_registered() {
    let runner = RunnerRegistry::with_builtins();
    assert_eq!(runner.languages(), vec!["json", "markdown", "plaintext"]);
    assert!(runner.supports("JSON"));
}

#[test]
fn json_runner_pretty_prints() {
    let runner = RunnerRegistry::default();
    let out = runner.execute(r#"{"a":[1,2]}"#, "json").unwrap();
    assert_eq!(out, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
}

#[test]
fn json_runner_reports_parse_errors() {
    let runner = RunnerRegistry::default();
    let err = runner.execute("{", "json").unwrap_err();
    assert!(matches!(err, RunnerError::Failed { ref language, .. } if language == "json"));
}

#[test]
fn echo_runners() {
    let runner = RunnerRegistry::default();
    assert_eq!(runner.execute("# Title", "markdown").unwrap(), "# Title");
    assert_eq!(runner.execute("hi", "PlainText").unwrap(), "hi");
}

#[test]
fn unsupported_language_lists_supported() {
    let runner = RunnerRegistry::default();
    let err = runner.execute("print(1)", "python").unwrap_err();
    assert_eq!(
        err,
        RunnerError::UnsupportedLanguage {
            language: "python".into(),
            supported: vec!["json".into(), "markdown".into(), "plaintext".into()],
        }
    );
    assert_eq!(
        err.to_string(),
        "no runner for python (supported: json, markdown, plaintext)"
    );
}

#[test]
fn custom_handlers_override() {
    let mut runner = RunnerRegistry::empty();
    runner.register("Shell", |src| Ok(format!("$ {src}")));
    assert_eq!(runner.execute("ls", "shell").unwrap(), "$ ls");
}
