use core_types::Employee;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee's activity over the report period.
///
/// This struct is the output of the `PerformanceAggregator`. It is recomputed for
/// every query and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub id: String,
    pub name: String,
    pub code: Option<String>,

    pub total_trees_harvested: u64,
    /// The employee's proportional share of the revenue of every sale they worked on.
    pub total_sales_amount: Decimal,
    pub total_salary_paid: Decimal,
    /// `total_sales_amount - total_salary_paid`; negative when salary exceeds earnings.
    pub profit: Decimal,
}

impl EmployeeSummary {
    /// Creates a zeroed-out row for `employee`.
    pub fn new(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.name.clone(),
            code: employee.code.clone(),
            total_trees_harvested: 0,
            total_sales_amount: Decimal::ZERO,
            total_salary_paid: Decimal::ZERO,
            profit: Decimal::ZERO,
        }
    }

    /// Whether the employee did any work or received any pay in the period.
    pub fn has_activity(&self) -> bool {
        self.total_trees_harvested > 0 || self.total_salary_paid > Decimal::ZERO
    }
}

/// The grand-total row of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub employees: usize,
    pub total_trees_harvested: u64,
    pub total_sales_amount: Decimal,
    pub total_salary_paid: Decimal,
    pub profit: Decimal,
}

impl ReportTotals {
    pub fn from_summaries(summaries: &[EmployeeSummary]) -> Self {
        summaries.iter().fold(
            Self {
                employees: summaries.len(),
                ..Self::default()
            },
            |mut totals, row| {
                totals.total_trees_harvested = totals
                    .total_trees_harvested
                    .saturating_add(row.total_trees_harvested);
                totals.total_sales_amount = totals.total_sales_amount.saturating_add(row.total_sales_amount);
                totals.total_salary_paid = totals.total_salary_paid.saturating_add(row.total_salary_paid);
                totals.profit = totals.profit.saturating_add(row.profit);
                totals
            },
        )
    }
}
