use std::io::Write;

use assert_cmd::Command;

/// Writes `source` to a fresh temp file with a `.rocks` extension and
/// returns its path. Each test derives its filename from its own name so
/// parallel test runs don't clash.
fn script(name: &str, source: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("rocks-cli-test-{name}.rocks"));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(source.as_bytes()).unwrap();
    path
}

#[test]
fn more_than_one_argument_prints_usage_and_exits_64() {
    let output = Command::cargo_bin("rocks")
        .unwrap()
        .arg("one.rocks")
        .arg("two.rocks")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(64));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "Usage: bin/run [script]\n");
}

#[test]
fn running_a_well_formed_script_exits_zero() {
    let path = script("ok", "print 1 + 2;");

    let output = Command::cargo_bin("rocks").unwrap().arg(&path).output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "3\n");
}

#[test]
fn a_syntax_error_exits_65() {
    let path = script("syntax-error", "var = 1;");

    let output = Command::cargo_bin("rocks").unwrap().arg(&path).output().unwrap();

    assert_eq!(output.status.code(), Some(65));
    assert!(String::from_utf8(output.stdout).unwrap().contains("There were syntax errors:"));
}

#[test]
fn a_compile_error_exits_65() {
    let path = script("compile-error", "{ var a = a; }");

    let output = Command::cargo_bin("rocks").unwrap().arg(&path).output().unwrap();

    assert_eq!(output.status.code(), Some(65));
    assert!(String::from_utf8(output.stdout).unwrap().contains("Compiler error"));
}

#[test]
fn a_runtime_error_exits_70() {
    let path = script("runtime-error", "print 1 + \"x\";");

    let output = Command::cargo_bin("rocks").unwrap().arg(&path).output().unwrap();

    assert_eq!(output.status.code(), Some(70));
    assert!(String::from_utf8(output.stdout).unwrap().contains("Runtime error"));
}

#[test]
fn a_missing_file_is_reported_and_exits_66() {
    let output = Command::cargo_bin("rocks")
        .unwrap()
        .arg("/nonexistent/path/does-not-exist.rocks")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(66));
    assert!(String::from_utf8(output.stderr).unwrap().contains("Could not read file"));
}
