use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive window of calendar days. A `None` bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// A range with no constraint on either side.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// The `(from, to)` pair when both bounds are set and `from` is later than `to`.
    pub fn reversed_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Some((from, to)),
            _ => None,
        }
    }

    /// Fails when both bounds are set and `from` is later than `to`.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.reversed_bounds() {
            Some((from, to)) => Err(CoreError::InvalidRange { from, to }),
            None => Ok(()),
        }
    }

    /// Inclusion rule shared by sales and salary payments: a record without a
    /// date is always in range, a dated one must respect every bound that is set.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            return true;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// The whole calendar month, first to last day.
    pub fn month(year: i32, month: u32) -> Result<Self, CoreError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            CoreError::InvalidInput("month".to_string(), format!("{year:04}-{month:02}"))
        })?;
        Ok(Self::new(Some(first), Some(last_day_of_month(first))))
    }

    /// From the first of `today`'s month up to and including `today`.
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self::new(Some(first_day_of_month(today)), Some(today))
    }

    /// The whole calendar month before `today`'s month.
    pub fn previous_month(today: NaiveDate) -> Self {
        let first_of_current = first_day_of_month(today);
        match first_of_current.pred_opt() {
            Some(last_of_previous) => Self::new(
                Some(first_day_of_month(last_of_previous)),
                Some(last_of_previous),
            ),
            // Only reachable at `NaiveDate::MIN`.
            None => Self::new(Some(first_of_current), Some(first_of_current)),
        }
    }
}

/// Parses the month picker's `YYYY-MM` value.
pub fn parse_month(value: &str) -> Result<(i32, u32), CoreError> {
    let invalid = || CoreError::InvalidInput("month".to_string(), value.to_string());

    let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}
