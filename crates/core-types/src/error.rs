use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Start date cannot be later than end date ({from} > {to})")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}
