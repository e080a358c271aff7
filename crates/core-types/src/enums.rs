use crate::range::DateRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The quick-select periods offered by the employee report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ReportPeriod {
    /// From the first of the current month up to today.
    #[default]
    ThisMonth,
    /// The whole previous calendar month.
    LastMonth,
    /// No date constraint at all.
    All,
}

impl ReportPeriod {
    /// Resolves the period into concrete bounds relative to `today`.
    pub fn range(&self, today: NaiveDate) -> DateRange {
        match self {
            ReportPeriod::ThisMonth => DateRange::month_to_date(today),
            ReportPeriod::LastMonth => DateRange::previous_month(today),
            ReportPeriod::All => DateRange::unbounded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn periods_resolve_relative_to_today() {
        let today = date(2025, 3, 14);

        assert_eq!(
            ReportPeriod::ThisMonth.range(today),
            DateRange::new(Some(date(2025, 3, 1)), Some(today))
        );
        assert_eq!(
            ReportPeriod::LastMonth.range(today),
            DateRange::new(Some(date(2025, 2, 1)), Some(date(2025, 2, 28)))
        );
        assert_eq!(ReportPeriod::All.range(today), DateRange::unbounded());
    }

    #[test]
    fn deserializes_from_kebab_case() {
        let period: ReportPeriod = serde_json::from_str("\"last-month\"").unwrap();
        assert_eq!(period, ReportPeriod::LastMonth);
        assert_eq!(ReportPeriod::default(), ReportPeriod::ThisMonth);
    }
}
