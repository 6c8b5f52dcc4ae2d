#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Runs against `data` and keeps the user's config and analyzer key out of the way.
fn adinsight(home: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("adinsight"));
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env_remove("ADINSIGHT_DATA_DIR")
        .env_remove("ADINSIGHT_ANALYZER_API_KEY")
        .env_remove("ADINSIGHT_LOG")
        .arg("--data-dir")
        .arg(home.join("data"));
    cmd
}

fn create(home: &Path, args: &[&str]) {
    adinsight(home)
        .arg("create")
        .args(args)
        .assert()
        .success();
}

fn files_in(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.to_string_lossy().ends_with(suffix))
        .collect()
}

#[test]
fn test_empty_list_is_default_command() {
    let temp = TempDir::new().unwrap();
    adinsight(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found."));
}

#[test]
fn test_create_list_view_delete() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    // 1. Create two entries
    adinsight(home)
        .args([
            "create",
            "--genre",
            "消除",
            "--attr",
            "广告类型=激励视频",
            "--game-time",
            "10-30分钟",
            "Tile",
            "Quest",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry created: Tile Quest"));
    create(home, &["Royal Match"]);

    // 2. Newest first
    let output = adinsight(home).arg("list").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let royal = stdout.find("Royal Match").unwrap();
    let tile = stdout.find("Tile Quest").unwrap();
    assert!(royal < tile, "Newest entry should be listed first:\n{}", stdout);

    // 3. View shows group details
    adinsight(home)
        .args(["view", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("广告类型: 激励视频"))
        .stdout(predicate::str::contains("10-30分钟"));

    // 4. Delete the newest
    adinsight(home)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Royal Match"));
    adinsight(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tile Quest"))
        .stdout(predicate::str::contains("Royal Match").not());
}

#[test]
fn test_create_with_flags_after_name() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    adinsight(home)
        .args(["create", "Tile", "Quest", "--genre", "RPG", "--attr", "广告类型=Banner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry created: Tile Quest"))
        .stdout(predicate::str::contains("--genre").not());

    adinsight(home)
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("类型: RPG"))
        .stdout(predicate::str::contains("广告类型: Banner"));
}

#[test]
fn test_create_without_name_fails() {
    let temp = TempDir::new().unwrap();
    adinsight(temp.path())
        .args(["create", "--genre", "RPG"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    adinsight(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found."));
}

#[test]
fn test_bad_index_fails() {
    let temp = TempDir::new().unwrap();
    create(temp.path(), &["Solo"]);
    adinsight(temp.path())
        .args(["view", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_clear_needs_confirmation() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    create(home, &["A"]);

    adinsight(home)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));
    adinsight(home)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("A"));

    adinsight(home)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 entries"));
    adinsight(home)
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("No entries found."));
}

#[test]
fn test_export_writes_xlsx() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let out = home.join("out");
    create(home, &["--attr", "广告位置=屏幕底部", "Tile Quest"]);
    create(home, &["Royal Match"]);

    // Only entry 2
    adinsight(home)
        .args(["export", "2", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("选中1条"));

    let files = files_in(&out, ".xlsx");
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("游戏广告测评_选中1条_"), "{}", name);

    let bytes = fs::read(&files[0]).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut strings = String::new();
    archive
        .by_name("xl/sharedStrings.xml")
        .unwrap()
        .read_to_string(&mut strings)
        .unwrap();
    assert!(strings.contains("Tile Quest"));
    assert!(strings.contains("屏幕底部"));
    assert!(!strings.contains("Royal Match"));
}

#[test]
fn test_export_uses_file_name_setting() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let out = home.join("out");
    create(home, &["A"]);

    adinsight(home)
        .args(["settings", "file-name", "周报"])
        .assert()
        .success();
    adinsight(home)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("file-name = 周报"));

    adinsight(home)
        .arg("export")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();
    let files = files_in(&out, ".xlsx");
    assert_eq!(files.len(), 1);
    assert!(files[0]
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("周报_全部_"));
}

#[test]
fn test_export_with_nothing_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    adinsight(temp.path())
        .arg("export")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries to export"));
    assert!(!out.exists());
}

#[test]
fn test_backup_and_restore_into_new_data_dir() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let out = source.path().join("backups");

    create(source.path(), &["--attr", "触发条件=资源不足", "Idle Miner"]);
    adinsight(source.path())
        .args(["templates", "add", "奖励", "金币"])
        .assert()
        .success();
    adinsight(source.path())
        .arg("backup")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let backups = files_in(&out, ".json");
    assert_eq!(backups.len(), 1);
    assert!(backups[0]
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("GameAdInsight_Backup_"));

    // 1. Without --yes nothing changes
    create(target.path(), &["Existing"]);
    adinsight(target.path())
        .arg("restore")
        .arg(&backups[0])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup contains 1 entries"))
        .stdout(predicate::str::contains("--yes"));
    adinsight(target.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("Existing"));

    // 2. With --yes everything is replaced
    adinsight(target.path())
        .arg("restore")
        .arg(&backups[0])
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 1 entries"));
    adinsight(target.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("Idle Miner"))
        .stdout(predicate::str::contains("Existing").not());
    adinsight(target.path())
        .arg("templates")
        .assert()
        .stdout(predicate::str::contains("奖励: 金币"));
}

#[test]
fn test_restore_rejects_malformed_backup() {
    let temp = TempDir::new().unwrap();
    let bad = temp.path().join("bad.json");
    fs::write(&bad, r#"{"version": "1.0"}"#).unwrap();

    adinsight(temp.path())
        .arg("restore")
        .arg(&bad)
        .arg("--yes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_templates_and_options() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    adinsight(home)
        .args(["templates", "add", "广告类型", "开屏广告"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Template value saved"));

    // Presets first, then saved values
    let output = adinsight(home)
        .args(["templates", "options", "广告类型"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let preset = stdout.find("激励视频").unwrap();
    let saved = stdout.find("开屏广告").unwrap();
    assert!(preset < saved);

    adinsight(home)
        .args(["templates", "remove", "广告类型", "开屏广告"])
        .assert()
        .success();
    adinsight(home)
        .args(["templates", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("开屏广告").not());
}

#[test]
fn test_copy_to_draft_and_create_from_it() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let draft = home.join("draft.json");
    create(home, &["--genre", "RPG", "--attr", "广告类型=Banner", "Original"]);

    adinsight(home)
        .args(["copy", "1", "-o"])
        .arg(&draft)
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft written to"));

    adinsight(home)
        .arg("create")
        .arg("--draft")
        .arg(&draft)
        .arg("Sequel")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry created: Sequel"));

    adinsight(home)
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequel"))
        .stdout(predicate::str::contains("广告类型: Banner"));
}

#[test]
fn test_analyze_without_key() {
    let temp = TempDir::new().unwrap();
    create(temp.path(), &["A"]);
    adinsight(temp.path())
        .args(["analyze", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API Key 未配置"));
}

#[test]
fn test_timer_prints_final_time() {
    let temp = TempDir::new().unwrap();
    Command::new(cargo_bin("adinsight"))
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("timer")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("00:00:00"));
}
