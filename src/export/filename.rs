//! Date tokens for export file names.
//!
//! File names are `<appName>_<DD>_<MM>_<YYYY>.<ext>`, with the date taken from
//! the profile's own time range rather than the wall clock.

use super::artifact::ExportFileName;
use crate::profile::ProfileMetadata;
use chrono::{DateTime, Datelike, Utc};

/// How the month component of the date token is numbered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthNumbering {
    /// Zero-based month index (January is `00`), the historical file naming
    #[default]
    ZeroBased,
    /// Calendar month (January is `01`)
    Calendar,
}

/// Builds `DD_MM_YYYY` tokens and the file names derived from them
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameFormatter {
    month: MonthNumbering,
}

impl FilenameFormatter {
    pub fn new(month: MonthNumbering) -> Self {
        Self { month }
    }

    pub fn month_numbering(&self) -> MonthNumbering {
        self.month
    }

    /// Zero-padded `DD_MM_YYYY` token for a time range
    ///
    /// The token is taken from the start of the range, in UTC. Years outside
    /// `0..=9999` are clamped so the token always stays ten characters long.
    pub fn format(&self, start: DateTime<Utc>, _end: DateTime<Utc>) -> String {
        let month = match self.month {
            MonthNumbering::ZeroBased => start.month0(),
            MonthNumbering::Calendar => start.month(),
        };
        let year = start.year().clamp(0, 9999);
        format!("{:02}_{:02}_{:04}", start.day(), month, year)
    }

    /// `<appName>_<token>`
    pub fn file_base(&self, metadata: &ProfileMetadata) -> String {
        format!(
            "{}_{}",
            metadata.app_name,
            self.format(metadata.start_time, metadata.end_time)
        )
    }

    /// `<appName>_<token>.<extension>`
    pub fn file_name(&self, metadata: &ProfileMetadata, extension: &str) -> ExportFileName {
        ExportFileName::new(self.file_base(metadata), extension)
    }
}
