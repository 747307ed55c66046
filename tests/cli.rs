//! Runs the `sierra` binary against files on disk

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn sierra() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sierra"))
}

fn write_source(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, source).unwrap();
    path
}

fn run(args: &[&str], path: &Path) -> Output {
    sierra().args(args).arg("--no-color").arg(path).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn valid_file_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "hello.sierra", "program Hello;\nuse core.io;\n");

    let output = run(&[], &path);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!("ok: {} (2 syntax units)\n", path.display())
    );
}

#[test]
fn syntax_error_goes_to_stderr_and_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(
        dir.path(),
        "broken.sierra",
        "implementation Foo\n    function bar(x self)\n    begin\n    end\n",
    );

    let output = run(&[], &path);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());

    let message = stderr(&output);
    assert!(message.starts_with("Structural Error: "), "stderr: {message}");
    assert!(message.contains("(while parsing implementation_block)"));
    assert!(message.contains(&format!("--> {}:5:1", path.display())));
    assert!(!message.contains('\u{1b}'), "--no-color output carries escapes");
}

#[test]
fn missing_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.sierra");

    let output = run(&[], &path);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read file"));
}

#[test]
fn tokens_flag_prints_the_token_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "t.sierra", "type X = 1..2;");

    let output = run(&["--tokens"], &path);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Keyword(Type)"));
    assert!(text.contains("DotDot"));
    assert!(text.ends_with("Total tokens: 8\n"));
}

#[test]
fn ast_flag_lists_units_with_positions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "a.sierra", "use a.b;\ntype T = x[i] of E;\n");

    let output = run(&["--ast"], &path);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!(
            "1:1  UseStatement(QualifiedIdentifier([a, b]))\n\
             2:1  TypeDefinition(T, ArrayTypeExpr(x, i, E))\n\
             ok: {} (2 syntax units)\n",
            path.display()
        )
    );
}

#[test]
fn rule_flag_parses_a_single_nonterminal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "p.sierra", "(mutable x self, : self)");

    let output = run(&["--rule", "parameter_list"], &path);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output)
        .starts_with("ParameterList([Parameter(mutable, x), Parameter(_, :)])\n"));

    let output = run(&["--rule", "no_such_rule"], &path);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown rule 'no_such_rule'"));
}
