use crate::error::AnalyticsError;
use crate::report::EmployeeSummary;
use core_types::{DateRange, Employee, SalaryPayment, Sale, Snapshot};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Running totals for one employee while the sales are being walked.
#[derive(Debug, Default, Clone, Copy)]
struct SalesTally {
    trees: u64,
    amount: Decimal,
}

/// A stateless calculator joining employees, sales and salary payments into
/// per-employee performance rows.
#[derive(Debug, Default)]
pub struct PerformanceAggregator {}

impl PerformanceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for building the employee report.
    ///
    /// # Arguments
    ///
    /// * `employees` - The employees to report on. Output rows keep this order.
    /// * `sales` - All sales; only those dated inside `range` (or undated) count.
    /// * `salaries` - All salary payments, filtered by `range` the same way.
    /// * `range` - Inclusive period of the report.
    ///
    /// # Returns
    ///
    /// One `EmployeeSummary` per employee that harvested trees or was paid in the
    /// period, or `AnalyticsError::InvalidRange` when `range` starts after it ends.
    pub fn aggregate(
        &self,
        employees: &[Employee],
        sales: &[Sale],
        salaries: &[SalaryPayment],
        range: &DateRange,
    ) -> Result<Vec<EmployeeSummary>, AnalyticsError> {
        if let Some((from, to)) = range.reversed_bounds() {
            return Err(AnalyticsError::InvalidRange { from, to });
        }

        let sales_by_employee = self.attribute_sales(sales, range);
        let salary_by_employee = self.sum_salaries(salaries, range);

        let summaries: Vec<EmployeeSummary> = employees
            .iter()
            .map(|employee| {
                let mut summary = EmployeeSummary::new(employee);
                if let Some(tally) = sales_by_employee.get(employee.id.as_str()) {
                    summary.total_trees_harvested = tally.trees;
                    summary.total_sales_amount = tally.amount;
                }
                if let Some(paid) = salary_by_employee.get(employee.id.as_str()) {
                    summary.total_salary_paid = *paid;
                }
                summary.profit = summary
                    .total_sales_amount
                    .saturating_sub(summary.total_salary_paid);
                summary
            })
            .filter(EmployeeSummary::has_activity)
            .collect();

        debug!(
            employees = employees.len(),
            sales = sales.len(),
            salaries = salaries.len(),
            rows = summaries.len(),
            "Aggregated employee performance."
        );

        Ok(summaries)
    }

    /// Convenience wrapper over [`Self::aggregate`] for a whole snapshot.
    pub fn aggregate_snapshot(
        &self,
        snapshot: &Snapshot,
        range: &DateRange,
    ) -> Result<Vec<EmployeeSummary>, AnalyticsError> {
        self.aggregate(&snapshot.employees, &snapshot.sales, &snapshot.salaries, range)
    }

    /// Splits each in-range sale's amount across its harvesters in proportion to
    /// the trees each of them plucked.
    fn attribute_sales<'a>(
        &self,
        sales: &'a [Sale],
        range: &DateRange,
    ) -> HashMap<&'a str, SalesTally> {
        let mut tallies: HashMap<&str, SalesTally> = HashMap::new();

        for sale in sales.iter().filter(|s| range.contains(s.sale_date)) {
            let denominator = Decimal::from(sale.denominator());
            let mut seen: HashSet<&str> = HashSet::with_capacity(sale.employees.len());

            for (position, employee_id) in sale.employees.iter().enumerate() {
                // An employee listed twice is credited once, from their first position.
                if employee_id.is_empty() || !seen.insert(employee_id.as_str()) {
                    continue;
                }

                let trees = sale.trees_at(position);
                // Divide before multiplying; amount * trees can overflow.
                let share = Decimal::from(trees) / denominator;
                let tally = tallies.entry(employee_id.as_str()).or_default();
                tally.trees = tally.trees.saturating_add(trees);
                tally.amount = tally
                    .amount
                    .saturating_add(sale.total_amount.saturating_mul(share));
            }
        }

        tallies
    }

    fn sum_salaries<'a>(
        &self,
        salaries: &'a [SalaryPayment],
        range: &DateRange,
    ) -> HashMap<&'a str, Decimal> {
        let mut paid: HashMap<&str, Decimal> = HashMap::new();

        for payment in salaries.iter().filter(|p| range.contains(p.payment_date)) {
            if let Some(employee_id) = payment.employee.as_deref() {
                let total = paid.entry(employee_id).or_default();
                *total = total.saturating_add(payment.amount);
            }
        }

        paid
    }
}
