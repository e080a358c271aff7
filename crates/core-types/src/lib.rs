pub mod enums;
pub mod error;
pub mod range;
pub mod raw;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::ReportPeriod;
pub use error::CoreError;
pub use range::{parse_month, DateRange};
pub use raw::{RawEmployee, RawSalaryPayment, RawSale, RawSnapshot};
pub use structs::{Employee, SalaryPayment, Sale, Snapshot};
