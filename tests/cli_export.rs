use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

fn spelldrill(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("spelldrill").unwrap();
    cmd.env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME");
    cmd
}

#[test]
fn export_writes_the_saved_list() {
    let home = tempdir().unwrap();
    let out = tempdir().unwrap();

    let assert = spelldrill(home.path())
        .args(["-w", "cat", "-w", "dog", "--no-speech", "--export"])
        .arg(out.path())
        .assert()
        .success();

    let printed = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let path = std::path::PathBuf::from(printed.trim());
    assert!(path.starts_with(out.path()));
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("vocabulary_"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "cat\ndog");
}

#[test]
fn words_persist_between_runs() {
    let home = tempdir().unwrap();
    let out = tempdir().unwrap();

    spelldrill(home.path())
        .args(["-w", "sun", "--export"])
        .arg(out.path())
        .assert()
        .success();

    // second run adds nothing new but still sees the stored word
    let assert = spelldrill(home.path())
        .arg("--export")
        .arg(out.path())
        .assert()
        .success();
    let printed = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(fs::read_to_string(printed.trim()).unwrap(), "sun");
}

#[test]
fn import_file_replaces_list() {
    let home = tempdir().unwrap();
    let out = tempdir().unwrap();
    let list = out.path().join("list.txt");
    fs::write(&list, "moon\r\n\r\nstar\n").unwrap();

    let assert = spelldrill(home.path())
        .arg("-f")
        .arg(&list)
        .arg("--export")
        .arg(out.path().join("exports"))
        .assert()
        .success();
    let printed = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(fs::read_to_string(printed.trim()).unwrap(), "moon\nstar");
}

#[test]
fn export_of_empty_list_fails() {
    let home = tempdir().unwrap();
    let out = tempdir().unwrap();

    spelldrill(home.path())
        .arg("--export")
        .arg(out.path())
        .assert()
        .failure();
}

#[test]
fn missing_import_file_fails() {
    let home = tempdir().unwrap();

    spelldrill(home.path())
        .args(["-f", "/nonexistent/spelldrill-words.txt", "--export", "."])
        .assert()
        .failure();
}
