//! Rotating backups of the table file.
//!
//! Keeps four copies: one from the previous day, week, month, and year.
//! Each new backup overwrites the previous one of its tier. The dates of
//! the last run per tier are persisted as JSON next to the backups.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};

const DATES_FILE: &str = "backup_dates.json";

/// Backup tiers, from most to least frequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupTier {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl BackupTier {
    pub const ALL: [BackupTier; 4] = [
        BackupTier::Daily,
        BackupTier::Weekly,
        BackupTier::Monthly,
        BackupTier::Yearly,
    ];

    /// File name for this tier's copy of the table.
    pub fn file_name(&self) -> &'static str {
        match self {
            BackupTier::Daily => "daily.json",
            BackupTier::Weekly => "weekly.json",
            BackupTier::Monthly => "monthly.json",
            BackupTier::Yearly => "yearly.json",
        }
    }

    /// Minimum number of days between two backups of this tier.
    fn period_days(&self) -> i64 {
        match self {
            BackupTier::Daily => 1,
            BackupTier::Weekly => 7,
            BackupTier::Monthly => 30,
            BackupTier::Yearly => 365,
        }
    }
}

/// Dates of the most recent backup per tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupDates {
    pub day: Option<NaiveDate>,
    pub week: Option<NaiveDate>,
    pub month: Option<NaiveDate>,
    pub year: Option<NaiveDate>,
}

impl BackupDates {
    fn get(&self, tier: BackupTier) -> Option<NaiveDate> {
        match tier {
            BackupTier::Daily => self.day,
            BackupTier::Weekly => self.week,
            BackupTier::Monthly => self.month,
            BackupTier::Yearly => self.year,
        }
    }

    fn set(&mut self, tier: BackupTier, date: NaiveDate) {
        match tier {
            BackupTier::Daily => self.day = Some(date),
            BackupTier::Weekly => self.week = Some(date),
            BackupTier::Monthly => self.month = Some(date),
            BackupTier::Yearly => self.year = Some(date),
        }
    }

    /// Whether a tier is due on `today`.
    fn is_due(&self, tier: BackupTier, today: NaiveDate) -> bool {
        match self.get(tier) {
            None => true,
            Some(last) => (today - last).num_days() >= tier.period_days(),
        }
    }
}

/// Backup directory with its persisted per-tier dates.
#[derive(Debug)]
pub struct BackupRotation {
    dir: PathBuf,
    dates: BackupDates,
}

impl BackupRotation {
    /// Open (and create if needed) a backup directory, loading saved dates.
    ///
    /// An unreadable or malformed dates file falls back to empty dates, so
    /// the worst outcome of a corrupt file is an extra backup.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if dir.is_file() {
            return Err(StoreError::BackupDir(format!(
                "{} is a file",
                dir.display()
            )));
        }
        fs::create_dir_all(&dir)?;
        let dates = match fs::read_to_string(dir.join(DATES_FILE)) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!("malformed backup dates file, starting fresh: {err}");
                BackupDates::default()
            }),
            Err(_) => BackupDates::default(),
        };
        Ok(Self { dir, dates })
    }

    /// Dates of the most recent backups.
    pub fn dates(&self) -> &BackupDates {
        &self.dates
    }

    /// Copy `table_file` into each tier that is due on `today`.
    ///
    /// Returns the tiers that ran. Dates are persisted after the copies.
    pub fn run(&mut self, table_file: &Path, today: NaiveDate) -> Result<Vec<BackupTier>> {
        let mut ran = Vec::new();
        for tier in BackupTier::ALL {
            if !self.dates.is_due(tier, today) {
                continue;
            }
            let target = self.dir.join(tier.file_name());
            debug!("{:?} backup: {:?} -> {:?}", tier, table_file, target);
            fs::copy(table_file, &target)?;
            self.dates.set(tier, today);
            ran.push(tier);
        }
        if !ran.is_empty() {
            self.save_dates()?;
        }
        Ok(ran)
    }

    fn save_dates(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.dates)?;
        fs::write(self.dir.join(DATES_FILE), content)?;
        Ok(())
    }
}
