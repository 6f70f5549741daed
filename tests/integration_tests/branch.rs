//! `promptline branch` against real repositories.

use crate::common::{TestRepo, git_available, promptline_command, stdout};

fn branch(repo: &TestRepo) -> String {
    let output = repo
        .command()
        .args(["--color", "never", "branch"])
        .output()
        .expect("failed to run promptline");
    assert!(output.status.success(), "{output:?}");
    stdout(&output)
}

#[test]
fn test_clean_repository() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::new();
    assert_eq!(branch(&repo), "main");

    let output = repo.command().arg("branch").output().unwrap();
    assert_eq!(stdout(&output), "\x1b[32mmain\x1b[0m");
}

#[test]
fn test_working_tree_changes() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::new();
    repo.write("file.txt", "changed\n");
    repo.write("new.txt", "new\n");
    assert_eq!(branch(&repo), "main*?");
}

#[test]
fn test_deleted_file() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::new();
    std::fs::remove_file(repo.root_path().join("file.txt")).unwrap();
    assert_eq!(branch(&repo), "main*!");
}

#[test]
fn test_staged_changes() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::new();
    repo.write("staged.txt", "staged\n");
    repo.git(&["add", "staged.txt"]);
    assert_eq!(branch(&repo), "main+");

    let output = repo.command().arg("branch").output().unwrap();
    assert_eq!(stdout(&output), "\x1b[35mmain+\x1b[0m");
}

#[test]
fn test_detached_head() {
    if !git_available() {
        return;
    }
    let repo = TestRepo::new();
    let sha = repo.detach_head();
    assert_eq!(branch(&repo), format!("DETACHED:{sha}"));
}

#[test]
fn test_outside_repository_prints_nothing() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let output = promptline_command()
        .current_dir(dir.path())
        .env("GIT_CEILING_DIRECTORIES", dir.path().parent().unwrap())
        .arg("branch")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}
