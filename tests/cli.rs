extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command using `dir` as its data directory, with plain output.
fn reading_plan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("reading-plan").unwrap();
    cmd.arg("--no-ansi").arg("--data-dir").arg(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn fresh_store_shows_default_plan() {
    let dir = tempfile::tempdir().unwrap();
    reading_plan(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("default plan (nasb, 3 Old Testament and 1 New Testament chapters a day)"))
        .stdout(predicate::str::contains("Progress: 0 of 310 days done"))
        .stdout(predicate::str::contains("Next reading (day 1): Genesis 1-3, Matthew 1"));
}

#[test]
fn faster_testament_starts_over() {
    let dir = tempfile::tempdir().unwrap();
    reading_plan(&dir)
        .args(&["settings", "--ot", "2", "--nt", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("the default plan is now 465 days"));

    reading_plan(&dir)
        .args(&["view", "--day", "260", "--count", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 260 [ ] Psalms 41-42, Revelation 22"))
        .stdout(predicate::str::contains("Day 261 [ ] Psalms 43-44, Matthew 1"));
}

#[test]
fn rates_outside_user_bound_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    reading_plan(&dir)
        .args(&["settings", "--ot", "101"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid Old Testament rate '101'"));

    reading_plan(&dir)
        .args(&["settings", "--nt", "lots"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid New Testament rate 'lots'"));

    // Nothing was saved
    assert!(!dir.path().join("otChapters.json").exists());
}

#[test]
fn checked_days_are_remembered() {
    let dir = tempfile::tempdir().unwrap();
    reading_plan(&dir)
        .args(&["check", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked day 1 as done"))
        .stdout(predicate::str::contains("Marked day 2 as done"));
    assert!(dir.path().join("progressMap.json").exists());

    reading_plan(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress: 2 of 310 days done"))
        .stdout(predicate::str::contains("Next reading (day 3)"));

    reading_plan(&dir)
        .arg("view")
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 3 [ ] Genesis 7-9, Matthew 3"))
        .stdout(predicate::str::contains("https://www.literalword.com/?q=Genesis%207-9%2C%20Matthew%203"));

    reading_plan(&dir)
        .args(&["uncheck", "2"])
        .assert()
        .success();
    reading_plan(&dir)
        .args(&["view", "--day", "1", "--count", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1 [x]"))
        .stdout(predicate::str::contains("Day 2 [ ]"));
}

#[test]
fn days_outside_schedule_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    reading_plan(&dir)
        .args(&["check", "311"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("day 311 is not in the schedule (days 1 to 310)"));
}

#[test]
fn clear_resets_progress() {
    let dir = tempfile::tempdir().unwrap();
    reading_plan(&dir).args(&["check", "1"]).assert().success();
    reading_plan(&dir)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared progress of the default plan"));
    reading_plan(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress: 0 of 310 days done"));
}

#[test]
fn custom_plan_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("plan.txt");
    fs::write(&plan, "gen1\n\n   \nrom8,9\n").unwrap();

    reading_plan(&dir)
        .arg("custom")
        .arg(&plan)
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded custom plan with 2 days"));

    reading_plan(&dir)
        .args(&["view", "--day", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 2 [ ] Rom 8, 9"))
        .stdout(predicate::str::contains("https://www.literalword.com/?q=Rom%208%2C%209"));

    reading_plan(&dir)
        .arg("default")
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to the default plan"));

    reading_plan(&dir)
        .arg("custom")
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to the custom plan"));
    reading_plan(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress: 0 of 2 days done"));
}

#[test]
fn empty_custom_plan_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("blank.txt");
    fs::write(&plan, "\n  \n\t\n").unwrap();

    reading_plan(&dir)
        .arg("custom")
        .arg(&plan)
        .assert()
        .failure()
        .stdout(predicate::str::contains("could not load custom plan"))
        .stdout(predicate::str::contains("custom plan has 0 passages"));
}

#[test]
fn export_writes_workbook_once() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.xlsx");
    reading_plan(&dir).args(&["check", "1"]).assert().success();

    reading_plan(&dir)
        .arg("export")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 310 days"));

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"PK"));

    reading_plan(&dir)
        .arg("export")
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stdout(predicate::str::contains("will not overwrite"));
}

#[test]
fn status_finds_next_day_by_number() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("isCustomSchedule.json"), "true").unwrap();
    fs::write(dir.path().join("customSchedule.json"),
              r#"[{"day":2,"passages":"Gen 2"},{"day":5,"passages":"Rom 8"}]"#)
        .unwrap();

    reading_plan(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Next reading (day 2): Gen 2"));

    reading_plan(&dir).args(&["check", "2"]).assert().success();
    reading_plan(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Next reading (day 5): Rom 8"));
}

#[test]
fn data_dir_can_come_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("reading-plan").unwrap();
    cmd.env("READING_PLAN_DIR", dir.path())
        .args(&["--no-ansi", "check", "5"])
        .assert()
        .success();

    assert!(dir.path().join("progressMap.json").exists());
}
