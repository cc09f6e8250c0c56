//! Billing period resolution.
//!
//! A period is the (month, year) pair a statement belongs to. Resolution is
//! pure calendar extraction: no timezone normalization happens here, callers
//! supply timestamps already in the reporting timezone.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// 1-indexed month (January = 1).
    pub month: u32,
    pub year: i32,
}

/// Map an event timestamp to its billing period. Total for any valid
/// timestamp.
pub fn resolve_period(date: DateTime<Utc>) -> Period {
    Period {
        month: date.month(),
        year: date.year(),
    }
}

/// The period immediately before `period`, rolling January back to December
/// of the prior year. Reserved for period-over-period reporting.
pub fn previous_period(period: Period) -> Period {
    if period.month == 1 {
        Period {
            month: 12,
            year: period.year - 1,
        }
    } else {
        Period {
            month: period.month - 1,
            year: period.year,
        }
    }
}
