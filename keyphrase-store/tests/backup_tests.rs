//! Integration tests for backup rotation.

use chrono::NaiveDate;
use keyphrase_store::{BackupRotation, BackupTier};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let table_file = dir.path().join("phrases.json");
    std::fs::write(&table_file, "{}").unwrap();
    (dir, table_file)
}

#[test]
fn test_first_run_backs_up_all_tiers() {
    let (dir, table_file) = setup();
    let backup_dir = dir.path().join("backups");

    let mut rotation = BackupRotation::open(&backup_dir).unwrap();
    let ran = rotation.run(&table_file, date(2026, 8, 6)).unwrap();

    assert_eq!(ran.len(), 4);
    for tier in BackupTier::ALL {
        assert!(backup_dir.join(tier.file_name()).exists());
    }
    assert!(backup_dir.join("backup_dates.json").exists());
}

#[test]
fn test_same_day_run_is_a_no_op() {
    let (dir, table_file) = setup();
    let backup_dir = dir.path().join("backups");

    let mut rotation = BackupRotation::open(&backup_dir).unwrap();
    rotation.run(&table_file, date(2026, 8, 6)).unwrap();
    let ran = rotation.run(&table_file, date(2026, 8, 6)).unwrap();
    assert!(ran.is_empty());
}

#[test]
fn test_next_day_runs_daily_only() {
    let (dir, table_file) = setup();
    let backup_dir = dir.path().join("backups");

    let mut rotation = BackupRotation::open(&backup_dir).unwrap();
    rotation.run(&table_file, date(2026, 8, 6)).unwrap();
    let ran = rotation.run(&table_file, date(2026, 8, 7)).unwrap();
    assert_eq!(ran, vec![BackupTier::Daily]);
}

#[test]
fn test_week_boundary_runs_weekly() {
    let (dir, table_file) = setup();
    let backup_dir = dir.path().join("backups");

    let mut rotation = BackupRotation::open(&backup_dir).unwrap();
    rotation.run(&table_file, date(2026, 8, 6)).unwrap();

    let ran = rotation.run(&table_file, date(2026, 8, 12)).unwrap();
    assert_eq!(ran, vec![BackupTier::Daily]); // 6 days: weekly not due yet

    let ran = rotation.run(&table_file, date(2026, 8, 13)).unwrap();
    assert_eq!(ran, vec![BackupTier::Daily, BackupTier::Weekly]);
}

#[test]
fn test_dates_survive_reopen() {
    let (dir, table_file) = setup();
    let backup_dir = dir.path().join("backups");

    let mut rotation = BackupRotation::open(&backup_dir).unwrap();
    rotation.run(&table_file, date(2026, 8, 6)).unwrap();
    drop(rotation);

    let mut reopened = BackupRotation::open(&backup_dir).unwrap();
    assert_eq!(reopened.dates().day, Some(date(2026, 8, 6)));
    let ran = reopened.run(&table_file, date(2026, 8, 6)).unwrap();
    assert!(ran.is_empty());
}

#[test]
fn test_malformed_dates_file_falls_back_to_fresh() {
    let (dir, table_file) = setup();
    let backup_dir = dir.path().join("backups");
    std::fs::create_dir_all(&backup_dir).unwrap();
    std::fs::write(backup_dir.join("backup_dates.json"), "garbage").unwrap();

    let mut rotation = BackupRotation::open(&backup_dir).unwrap();
    let ran = rotation.run(&table_file, date(2026, 8, 6)).unwrap();
    assert_eq!(ran.len(), 4);
}

#[test]
fn test_backup_dir_collision_with_file() {
    let (dir, _table_file) = setup();
    let not_a_dir = dir.path().join("phrases.json");
    assert!(BackupRotation::open(&not_a_dir).is_err());
}
