use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const RULES: &str = r#"
[[rules]]
name = "NUMBER"
pattern = "[0-9]+"

[[rules]]
name = "PLUS"
pattern = '\+'

[[rules]]
name = "STRING"
pattern = "[a-z]+"
"#;

fn temp_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn toki() -> Command {
    Command::cargo_bin("toki").unwrap()
}

#[test]
fn scan_prints_text_tokens() {
    let rules = temp_file(RULES, ".toml");
    let input = temp_file("1  + 2+3 + happy birthday  ", ".txt");

    toki()
        .arg("scan")
        .arg(input.path())
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("NUMBER Line: 1, Column: 1, 1\n")
                .and(predicate::str::contains("STRING Line: 1, Column: 18, birthday\n"))
                .and(predicate::str::ends_with("EOF Line: 1, Column: 28, \n")),
        );
}

#[test]
fn scan_reads_stdin() {
    let rules = temp_file(RULES, ".toml");

    toki()
        .arg("scan")
        .arg("-")
        .arg("--rules")
        .arg(rules.path())
        .write_stdin("7+x")
        .assert()
        .success()
        .stdout(predicate::str::contains("PLUS Line: 1, Column: 2, +"));
}

#[test]
fn scan_json_output() {
    let rules = temp_file(RULES, ".toml");
    let input = temp_file("12 + ab", ".txt");

    let output = toki()
        .arg("scan")
        .arg(input.path())
        .arg("--rules")
        .arg(rules.path())
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 4);
    assert_eq!(parsed[2]["name"], "STRING");
    assert_eq!(parsed[2]["column"], 6);
    assert_eq!(parsed[3]["name"], "EOF");
}

#[test]
fn scan_fails_on_unrecognized_input() {
    let rules = temp_file(RULES, ".toml");
    let input = temp_file("1 # 2", ".txt");

    toki()
        .arg("scan")
        .arg(input.path())
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("ERROR Line: 1, Column: 3, "))
        .stderr(predicate::str::contains("unrecognized input at 1:3"));
}

#[test]
fn scan_allow_errors_succeeds() {
    let rules = temp_file(RULES, ".toml");
    let input = temp_file("1 # 2", ".txt");

    toki()
        .arg("scan")
        .arg(input.path())
        .arg("--rules")
        .arg(rules.path())
        .arg("--allow-errors")
        .assert()
        .success()
        .stdout(predicate::str::contains("ERROR"));
}

#[test]
fn check_lists_rules() {
    let rules = temp_file(RULES, ".toml");

    toki()
        .arg("check")
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 rule(s) compiled").and(predicate::str::contains("STRING")));
}

#[test]
fn check_reports_bad_pattern() {
    let rules = temp_file("[[rules]]\nname = \"BAD\"\npattern = \"(oops\"\n", ".toml");

    toki()
        .arg("check")
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid pattern"));
}

#[test]
fn check_reports_duplicate_token() {
    let rules = temp_file(
        "[[rules]]\nname = \"WORD\"\npattern = \"[a-z]+\"\ntoken = 2\n\n[[rules]]\nname = \"NUMBER\"\npattern = \"[0-9]+\"\n",
        ".toml",
    );

    toki()
        .arg("check")
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "token 2 is declared by both \"WORD\" and \"NUMBER\"",
        ));
}

#[test]
fn check_reports_empty_matching_pattern() {
    let rules = temp_file("[[rules]]\nname = \"SPACES\"\npattern = \" *\"\n", ".toml");

    toki()
        .arg("check")
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("can match the empty string"));
}

#[test]
fn missing_rule_file_fails() {
    toki()
        .arg("check")
        .arg("--rules")
        .arg("/definitely/not/here.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error loading rules"));
}

#[test]
fn formats_lists_all() {
    toki()
        .arg("formats")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("text")
                .and(predicate::str::contains("json"))
                .and(predicate::str::contains("yaml")),
        );
}
