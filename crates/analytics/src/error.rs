use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Start date cannot be later than end date ({from} > {to})")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
}
