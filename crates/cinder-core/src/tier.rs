//! Message lifetime tiers.
//!
//! A tier governs two things at once: how long the server retains the
//! ciphertext, and how long the identifier and key strings are. Longer
//! retention means a longer exposure window for guessing, so both lengths
//! scale with the tier.

use chrono::{DateTime, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Requested retention period for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifetimeTier {
    /// Retained for one day.
    Day,
    /// Retained for seven days.
    Week,
    /// Retained for one calendar month.
    Month,
    /// Retained for one calendar year.
    Year,
}

impl LifetimeTier {
    /// All tiers, shortest retention first.
    pub const ALL: [Self; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    /// Identifier length in characters for this tier.
    pub fn identifier_len(self) -> usize {
        match self {
            Self::Day => 8,
            Self::Week => 10,
            Self::Month => 12,
            Self::Year => 16,
        }
    }

    /// Key length in characters for this tier.
    pub fn key_len(self) -> usize {
        match self {
            Self::Day => 16,
            Self::Week => 24,
            Self::Month => 32,
            Self::Year => 48,
        }
    }

    /// Absolute expiry for a message created at `created_at`, in UTC.
    ///
    /// Month and year use calendar arithmetic and clamp to the last valid
    /// day (Jan 31 + 1 month = Feb 28/29). All variants saturate at the end
    /// of representable time instead of overflowing.
    pub fn expires_at(self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        let expiry = match self {
            Self::Day => created_at.checked_add_signed(TimeDelta::days(1)),
            Self::Week => created_at.checked_add_signed(TimeDelta::days(7)),
            Self::Month => created_at.checked_add_months(Months::new(1)),
            Self::Year => created_at.checked_add_months(Months::new(12)),
        };
        expiry.unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn identifier_lengths_match_table() {
        assert_eq!(LifetimeTier::Day.identifier_len(), 8);
        assert_eq!(LifetimeTier::Week.identifier_len(), 10);
        assert_eq!(LifetimeTier::Month.identifier_len(), 12);
        assert_eq!(LifetimeTier::Year.identifier_len(), 16);
    }

    #[test]
    fn key_lengths_match_table() {
        assert_eq!(LifetimeTier::Day.key_len(), 16);
        assert_eq!(LifetimeTier::Week.key_len(), 24);
        assert_eq!(LifetimeTier::Month.key_len(), 32);
        assert_eq!(LifetimeTier::Year.key_len(), 48);
    }

    #[test]
    fn day_and_week_offsets() {
        let created = utc("2025-03-10T08:30:00Z");
        assert_eq!(LifetimeTier::Day.expires_at(created), utc("2025-03-11T08:30:00Z"));
        assert_eq!(LifetimeTier::Week.expires_at(created), utc("2025-03-17T08:30:00Z"));
    }

    #[test]
    fn month_clamps_to_last_valid_day() {
        let created = utc("2025-01-31T00:00:00Z");
        assert_eq!(LifetimeTier::Month.expires_at(created), utc("2025-02-28T00:00:00Z"));

        // Leap year
        let created = utc("2024-01-31T00:00:00Z");
        assert_eq!(LifetimeTier::Month.expires_at(created), utc("2024-02-29T00:00:00Z"));
    }

    #[test]
    fn year_crosses_calendar_boundary() {
        let created = utc("2025-12-31T23:59:59Z");
        assert_eq!(LifetimeTier::Year.expires_at(created), utc("2026-12-31T23:59:59Z"));
    }

    #[test]
    fn leap_day_plus_year_clamps() {
        let created = utc("2024-02-29T12:00:00Z");
        assert_eq!(LifetimeTier::Year.expires_at(created), utc("2025-02-28T12:00:00Z"));
    }

    #[test]
    fn expiry_is_strictly_later() {
        let created = utc("2025-06-15T00:00:00Z");
        for tier in LifetimeTier::ALL {
            assert!(tier.expires_at(created) > created, "{tier:?} must extend lifetime");
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&LifetimeTier::Week).unwrap();
        assert_eq!(json, "\"week\"");

        let parsed: LifetimeTier = serde_json::from_str("\"year\"").unwrap();
        assert_eq!(parsed, LifetimeTier::Year);
    }
}
