use std::path::PathBuf;
use std::process::{Command, Output};

fn kindred_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_kindred"))
}

fn kindred(args: &[&str]) -> Output {
    Command::new(kindred_bin())
        .args(args)
        .env_remove("KINDRED_FACT_BASE")
        .env_remove("KINDRED_FORMAT")
        .env_remove("KINDRED_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("run kindred")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn query_prints_one_name_per_line() {
    let out = kindred(&["query", "step-father", "Alice"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(stdout_lines(&out), vec!["Dave"]);
}

#[test]
fn relation_names_are_case_and_separator_insensitive() {
    let out = kindred(&["query", "SisterInLaw", "Sue"]);
    assert!(out.status.success());
    assert_eq!(stdout_lines(&out), vec!["Alice", "Eve"]);
}

#[test]
fn fact_base_flag_selects_classic() {
    let extended = kindred(&["query", "children", "Jane"]);
    let classic = kindred(&["--fact-base", "classic", "query", "children", "Jane"]);
    assert_eq!(stdout_lines(&extended), vec!["Alice", "Jackie"]);
    assert_eq!(stdout_lines(&classic), vec!["Alice"]);
}

#[test]
fn fact_base_can_come_from_the_environment() {
    let out = Command::new(kindred_bin())
        .args(["query", "wife", "George"])
        .env("KINDRED_FACT_BASE", "classic")
        .env_remove("KINDRED_FORMAT")
        .output()
        .expect("run kindred");
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn format_can_come_from_the_environment() {
    let out = Command::new(kindred_bin())
        .args(["query", "husband", "Alice"])
        .env_remove("KINDRED_FACT_BASE")
        .env("KINDRED_FORMAT", "json")
        .output()
        .expect("run kindred");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["relation"], "husband");
    assert_eq!(value["relatives"], serde_json::json!(["Dave"]));
}

#[test]
fn unknown_person_exits_nonzero() {
    let out = kindred(&["query", "cousin", "Nobody"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown person `Nobody`"));
}

#[test]
fn unknown_relation_is_a_usage_error() {
    let out = kindred(&["query", "second-cousin", "Alice"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("second-cousin"));
}

#[test]
fn json_query_output_is_structured() {
    let out = kindred(&["--format", "json", "query", "cousin", "Jean"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["relation"], "cousin");
    assert_eq!(value["person"], "Jean");
    assert_eq!(value["relatives"], serde_json::json!(["Cindy", "Dave"]));
}

#[test]
fn explain_includes_the_trace() {
    let out = kindred(&["--format", "json", "query", "step-mother", "Alice", "--explain"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["relatives"], serde_json::json!(["Mary"]));
    assert!(value["trace"].as_array().is_some_and(|t| !t.is_empty()));
}

#[test]
fn ancestors_and_descendants_by_level() {
    let ancestors = kindred(&["--fact-base", "classic", "ancestors", "Pete", "--role", "father", "--level", "3"]);
    assert_eq!(stdout_lines(&ancestors), vec!["George"]);

    let zero = kindred(&["ancestors", "Pete", "--level", "-1"]);
    assert!(zero.status.success());
    assert!(zero.stdout.is_empty());

    let descendants = kindred(&["descendants", "Mary", "--level", "3", "--gender", "female"]);
    assert_eq!(stdout_lines(&descendants), vec!["Jackie"]);
}

#[test]
fn people_and_relations_listings() {
    let people = kindred(&["people"]);
    let lines = stdout_lines(&people);
    assert_eq!(lines.len(), 12);
    assert!(lines.contains(&"Jean\tMALE".to_string()));

    let relations = kindred(&["relations"]);
    let lines = stdout_lines(&relations);
    assert_eq!(lines.len(), 32);
    assert!(lines.contains(&"uncle-or-aunt".to_string()));
}

#[test]
fn validate_reports_json_issues() {
    let out = kindred(&["--format", "json", "validate"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert!(value.is_array());
}

#[test]
fn check_passes_for_both_fact_bases() {
    for fact_base in ["classic", "extended"] {
        let out = kindred(&["--fact-base", fact_base, "check"]);
        assert!(
            out.status.success(),
            "{fact_base}: {}",
            String::from_utf8_lossy(&out.stdout)
        );
        assert!(String::from_utf8_lossy(&out.stdout).contains("0 failed"));
    }
}
