use assert_cmd::Command;
use predicates::prelude::*;

mod common;

fn datecrawl() -> Command {
    Command::cargo_bin("datecrawl").unwrap()
}

#[test]
fn runs() {
    datecrawl().assert().success();
}

#[test]
fn outputs_tool_name() {
    datecrawl()
        .arg("-V")
        .assert()
        .success()
        .stdout(format!("datecrawl {}\n", env!("CARGO_PKG_VERSION")));
}

// Scan and list

#[test]
fn scan_writes_manifest_and_list_prints_it() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    common::build_tree(&data, &["range_0/a.jpg", "range_1/b.png", "range_1/skip.txt"]);
    let manifest = dir.path().join("out.csv");

    datecrawl()
        .arg("scan")
        .arg(&data)
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 asset(s)"));

    let text = std::fs::read_to_string(&manifest).unwrap();
    assert!(text.starts_with("absolute_path;relative_path\n"));

    datecrawl()
        .arg("list")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("\trange_0/a.jpg\n"))
        .stdout(predicate::str::contains("\trange_1/b.png\n"))
        .stdout(predicate::str::contains("skip.txt").not());
}

#[test]
fn list_directory_with_root_and_json_output() {
    let dir = tempfile::tempdir().unwrap();
    common::build_tree(dir.path(), &["range_0/a.jpg"]);

    datecrawl()
        .arg("list")
        .arg(dir.path().join("range_0"))
        .arg("--root")
        .arg(dir.path())
        .args(["--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"relative_path\": \"range_0/a.jpg\""));
}

#[test]
fn list_missing_source_fails_with_status_one() {
    datecrawl()
        .args(["list", "definitely/not/here"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid source"));
}

#[test]
fn list_image_file_is_not_read_as_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let image = common::build_tree(dir.path(), &["photo.png"]).remove(0);

    datecrawl()
        .arg("list")
        .arg(&image)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid source"));
}

// Browse

#[test]
fn browse_wraps_and_resets() {
    let dir = tempfile::tempdir().unwrap();
    common::build_tree(dir.path(), &["a.png", "b.png"]);

    let assert = datecrawl()
        .arg("browse")
        .arg(dir.path())
        .write_stdin("n\nn\nn\nr\nn\nq\n")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let rels: Vec<&str> = stdout
        .lines()
        .map(|line| line.rsplit('\t').next().unwrap())
        .collect();
    assert_eq!(rels, ["a.png", "b.png", "a.png", "a.png"]);
}

#[test]
fn browse_empty_source_fails() {
    let dir = tempfile::tempdir().unwrap();

    datecrawl()
        .arg("browse")
        .arg(dir.path())
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no assets"));
}

// Acquire: configuration errors fail before any network access

#[test]
fn acquire_rejects_cap_below_range() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");

    datecrawl()
        .arg("acquire")
        .arg("--out-dir")
        .arg(&out)
        .arg("--manifest")
        .arg(dir.path().join("out.csv"))
        .args(["--range", "2020-01-01:2020-12-31", "--per-range", "49"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid per-window cap 49"));

    assert!(!out.exists());
}

#[test]
fn acquire_rejects_cap_above_range() {
    let dir = tempfile::tempdir().unwrap();

    datecrawl()
        .arg("acquire")
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .arg("--manifest")
        .arg(dir.path().join("out.csv"))
        .args(["--range", "2020-01-01:2020-12-31", "--per-range", "1001"])
        .assert()
        .code(2);
}

#[test]
fn acquire_rejects_malformed_window() {
    let dir = tempfile::tempdir().unwrap();

    datecrawl()
        .arg("acquire")
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .arg("--manifest")
        .arg(dir.path().join("out.csv"))
        .args(["--range", "2020/01/01-2020/12/31", "--per-range", "100"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid date window"));
}

#[test]
fn acquire_requires_a_window() {
    let dir = tempfile::tempdir().unwrap();

    datecrawl()
        .arg("acquire")
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .arg("--manifest")
        .arg(dir.path().join("out.csv"))
        .args(["--per-range", "100"])
        .assert()
        .code(2);
}

#[test]
fn acquire_rejects_bad_extension() {
    let dir = tempfile::tempdir().unwrap();

    datecrawl()
        .arg("acquire")
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .arg("--manifest")
        .arg(dir.path().join("out.csv"))
        .args(["--range", "2020-01-01:2020-12-31", "--per-range", "100"])
        .args(["--extensions", "jpg,tar.gz"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid asset extension"));
}
