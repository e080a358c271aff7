use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A harvester as known to the backend. Only the fields the reports need are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub code: Option<String>,
}

/// A completed harvesting job sold to a customer.
///
/// `employees` and `trees_harvested` are parallel: position `i` of one describes
/// the same harvester as position `i` of the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: Option<String>,
    pub sale_date: Option<NaiveDate>,
    pub employees: Vec<String>,
    pub trees_harvested: Vec<u64>,
    /// Zero when the backend did not record a total.
    pub total_trees: u64,
    pub total_amount: Decimal,
}

impl Sale {
    /// Trees attributed to the harvester at `position`; a missing entry counts as 0.
    pub fn trees_at(&self, position: usize) -> u64 {
        self.trees_harvested.get(position).copied().unwrap_or(0)
    }

    /// Sum of the per-harvester counts, saturating at `u64::MAX`.
    pub fn harvested_sum(&self) -> u64 {
        self.trees_harvested
            .iter()
            .fold(0u64, |sum, trees| sum.saturating_add(*trees))
    }

    /// The tree count a harvester's share is measured against.
    ///
    /// Uses the recorded total when positive, otherwise the per-harvester sum,
    /// and never returns zero.
    pub fn denominator(&self) -> u64 {
        if self.total_trees > 0 {
            return self.total_trees;
        }
        self.harvested_sum().max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryPayment {
    pub id: Option<String>,
    /// `None` when the payment references no recognizable employee.
    pub employee: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub amount: Decimal,
}

/// A point-in-time copy of the three collections a report is computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub employees: Vec<Employee>,
    pub sales: Vec<Sale>,
    pub salaries: Vec<SalaryPayment>,
}
