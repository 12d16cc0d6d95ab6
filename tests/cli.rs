use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn pinyinof() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pinyinof"));
    cmd.env_remove("PINYINOF_DATA")
        .env_remove("PINYINOF_MAX_LINE")
        .env_remove("RUST_LOG");
    cmd
}

fn write_store(temp: &TempDir, content: &str) -> PathBuf {
    let path = temp.path().join("pinyin.txt");
    fs::write(&path, content).unwrap();
    path
}

fn query(data: &Path) -> Command {
    let mut cmd = pinyinof();
    cmd.arg("of").arg("--data").arg(data);
    cmd
}

#[test]
fn word_renders_all_combinations() {
    let temp = tempdir().unwrap();
    let data = write_store(&temp, "\n你ni\n的de,di\n");

    query(&data)
        .arg("你的")
        .assert()
        .success()
        .stdout("nide nidi\n");
}

#[test]
fn missing_character_is_fatal() {
    let temp = tempdir().unwrap();
    let data = write_store(&temp, "\n你ni\n");

    query(&data)
        .arg("的")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("no pinyin found for character 的"));
}

#[test]
fn non_han_argument_names_word_and_index() {
    let temp = tempdir().unwrap();
    let data = write_store(&temp, "\n你ni\n");

    query(&data)
        .arg("你")
        .arg("a")
        .assert()
        .failure()
        .stdout("ni\n")
        .stderr(predicate::str::contains("arg 1 a contains non-Han"));
}

#[test]
fn stdin_words_are_processed_in_order() {
    let temp = tempdir().unwrap();
    let data = write_store(&temp, "\n你ni\n的de,di\n");

    query(&data)
        .write_stdin("你的\n的\n你\n")
        .assert()
        .success()
        .stdout("nide nidi\nde di\nni\n");
}

#[test]
fn stdin_error_names_line_number() {
    let temp = tempdir().unwrap();
    let data = write_store(&temp, "\n你ni\n的de,di\n");

    query(&data)
        .write_stdin("你的\n你x\n的\n")
        .assert()
        .failure()
        .stdout("nide nidi\n")
        .stderr(predicate::str::contains("line 2 你x contains non-Han"));
}

#[test]
fn convert_strips_probabilities() {
    pinyinof()
        .arg("convert")
        .write_stdin("的 4886 de:99.9671% di:0.0329%\n")
        .assert()
        .success()
        .stdout("\n的de,di\n");
}

#[test]
fn convert_rejects_non_pinyin_with_line_number() {
    pinyinof()
        .arg("convert")
        .write_stdin("你 1 ni\n的 2 DE\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2 of pinyin data file has non-pinyin"));
}

#[test]
fn max_line_counts_newline() {
    pinyinof()
        .arg("max-line")
        .write_stdin("\n你ni\n的de,di\n")
        .assert()
        .success()
        .stdout("9\n");
}

#[test]
fn line_at_bound_works_and_one_over_fails() {
    let temp = tempdir().unwrap();
    // "的de,di\n" is 9 bytes.
    let data = write_store(&temp, "\n的de,di\n");

    query(&data)
        .arg("--max-line")
        .arg("9")
        .arg("的")
        .assert()
        .success()
        .stdout("de di\n");

    query(&data)
        .arg("--max-line")
        .arg("8")
        .arg("的")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("line longer than 8"));
}

#[test]
fn unframed_data_file_is_rejected() {
    let temp = tempdir().unwrap();

    let data = write_store(&temp, "你ni\n");
    query(&data)
        .arg("你")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not start with a newline"));

    let data = write_store(&temp, "\n你ni");
    query(&data)
        .arg("你")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not end with a newline"));
}

#[test]
fn missing_data_file_is_reported() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("nope.txt");

    query(&missing)
        .arg("你")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open data file"));
}

#[test]
fn data_path_from_environment() {
    let temp = tempdir().unwrap();
    let data = write_store(&temp, "\n你ni\n");

    pinyinof()
        .env("PINYINOF_DATA", &data)
        .arg("of")
        .arg("你")
        .assert()
        .success()
        .stdout("ni\n");
}

#[test]
fn zero_max_line_is_rejected() {
    let temp = tempdir().unwrap();
    let data = write_store(&temp, "\n你ni\n");

    query(&data)
        .arg("--max-line")
        .arg("0")
        .arg("你")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max-line must be at least 1"));
}

#[test]
fn huge_max_line_still_answers() {
    let temp = tempdir().unwrap();
    let data = write_store(&temp, "\n你ni\n的de,di\n");

    query(&data)
        .arg("--max-line")
        .arg(usize::MAX.to_string())
        .arg("你的")
        .assert()
        .success()
        .stdout("nide nidi\n");
}

#[test]
fn jsonl_output_has_one_object_per_word() {
    let temp = tempdir().unwrap();
    let data = write_store(&temp, "\n你ni\n的de,di\n");

    let assert = query(&data)
        .arg("--format")
        .arg("jsonl")
        .arg("你的")
        .arg("你")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let items: Vec<Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid jsonl line"))
        .collect();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["word"], "你的");
    assert_eq!(items[0]["source"], "arg 0");
    assert_eq!(items[0]["renderings"], serde_json::json!(["nide", "nidi"]));
    assert_eq!(items[1]["count"], 1);
}

#[test]
fn jsonl_reports_error_item() {
    let temp = tempdir().unwrap();
    let data = write_store(&temp, "\n你ni\n");

    let assert = query(&data)
        .arg("--format")
        .arg("jsonl")
        .arg("的")
        .assert()
        .failure();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let item: Value = serde_json::from_str(stdout.trim_end()).unwrap();
    assert_eq!(item["kind"], "error");
    assert_eq!(item["errors"][0]["code"], "LOOKUP_MISS");
}

#[test]
fn convert_then_query_through_files() {
    let temp = tempdir().unwrap();
    let raw = temp.path().join("raw.txt");
    let data = temp.path().join("pinyin.txt");
    fs::write(
        &raw,
        "的 4886 de:99.9671% di:0.0329%\n你 2100 ni\n中 3100 zhong\n国 2700 guo\n",
    )
    .unwrap();

    pinyinof()
        .arg("convert")
        .arg("--input")
        .arg(&raw)
        .arg("--output")
        .arg(&data)
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        fs::read_to_string(&data).unwrap(),
        "\n中zhong\n你ni\n国guo\n的de,di\n"
    );

    pinyinof()
        .arg("max-line")
        .arg("--input")
        .arg(&data)
        .assert()
        .success()
        .stdout("9\n");

    query(&data)
        .arg("--max-line")
        .arg("9")
        .arg("中国")
        .arg("你的")
        .assert()
        .success()
        .stdout("zhongguo\nnide nidi\n");
}
