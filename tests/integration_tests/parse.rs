//! `promptline parse` and `promptline explain` on canned status text.

use std::io::Write;
use std::process::Stdio;

use crate::common::{promptline_command, stdout};
use insta::assert_snapshot;

fn run_with_stdin(args: &[&str], input: &str) -> std::process::Output {
    let mut cmd = promptline_command();
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("failed to spawn command");
    child
        .stdin
        .as_mut()
        .expect("failed to get stdin")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for output")
}

fn parse(input: &str) -> String {
    let output = run_with_stdin(&["parse"], input);
    assert!(output.status.success());
    stdout(&output).escape_debug().to_string()
}

#[test]
fn test_parse_clean_branch() {
    assert_snapshot!(
        parse("On branch main\nnothing to commit, working tree clean\n"),
        @r"\u{1b}[32mmain\u{1b}[0m"
    );
}

#[test]
fn test_parse_modified_and_untracked() {
    let input = "\
On branch feature/login
Changes not staged for commit:
  (use \"git add <file>...\" to update what will be committed)
\tmodified:   src/app.rs

Untracked files:
\tnotes.txt
";
    assert_snapshot!(parse(input), @r"\u{1b}[33mfeature/login*?\u{1b}[0m");
}

#[test]
fn test_parse_detached_staged() {
    let input = "HEAD detached at a1b2c3d\nChanges to be committed:\n\tnew file:   x\n";
    assert_snapshot!(
        parse(input),
        @r"\u{1b}[2mDETACHED:\u{1b}[0m\u{1b}[35ma1b2c3d+\u{1b}[0m"
    );
}

#[test]
fn test_parse_conflict() {
    let input = "On branch main\nYou have unmerged paths.\n\nUnmerged paths:\n\tboth modified:   a.txt\n";
    assert_snapshot!(parse(input), @r"\u{1b}[31mmain!\u{1b}[0m");
}

#[test]
fn test_parse_fatal_prints_nothing() {
    assert_eq!(parse("fatal: not a git repository\n"), "");
    assert_eq!(parse(""), "");
}

#[test]
fn test_parse_honors_color_never() {
    let output = run_with_stdin(
        &["--color", "never", "parse"],
        "On branch main\nChanges to be committed:\n",
    );
    assert_eq!(stdout(&output), "main+");
}

#[test]
fn test_explain() {
    let output = run_with_stdin(
        &["explain"],
        "On branch dev\nChanges to be committed:\n\nUnmerged paths:\n",
    );
    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @r"
    reference: dev
    flags: STAGED | CONFLICT
    markers: +!
    color: red
    ");
}
