//! Loosely-typed records as the backend sends them, and the one place where
//! they are turned into the strict types of [`crate::structs`].
//!
//! The backend is not consistent about shapes: identifiers arrive as bare
//! strings, numbers or populated reference objects (`{"_id": ...}`), dates as
//! ISO strings with or without a time part, and numeric fields are sometimes
//! strings or missing altogether. Nothing here fails; anything unusable
//! degrades to "no value" (no date, zero amount, zero trees).

use crate::structs::{Employee, SalaryPayment, Sale, Snapshot};
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawEmployee {
    pub id: Option<Value>,
    #[serde(rename = "_id")]
    pub object_id: Option<Value>,
    pub name: Option<Value>,
    pub code: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSale {
    pub id: Option<Value>,
    #[serde(rename = "_id")]
    pub object_id: Option<Value>,
    pub sale_date: Option<Value>,
    pub date: Option<Value>,
    pub employees: Option<Value>,
    pub trees_harvested: Option<Value>,
    pub total_trees: Option<Value>,
    pub total_amount: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSalaryPayment {
    pub id: Option<Value>,
    #[serde(rename = "_id")]
    pub object_id: Option<Value>,
    pub employee: Option<Value>,
    pub payment_date: Option<Value>,
    pub date: Option<Value>,
    pub amount: Option<Value>,
}

/// The three collections exactly as read from the backend or a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawSnapshot {
    pub employees: Vec<RawEmployee>,
    pub sales: Vec<RawSale>,
    pub salaries: Vec<RawSalaryPayment>,
}

impl RawEmployee {
    /// Returns `None` when the record carries no usable identifier, since such
    /// an employee could never be matched against sales or payments.
    pub fn normalize(&self) -> Option<Employee> {
        let id = first_id(&self.id, &self.object_id)?;
        Some(Employee {
            id,
            name: self.name.as_ref().and_then(text).unwrap_or_default(),
            code: self.code.as_ref().and_then(text),
        })
    }
}

impl RawSale {
    pub fn normalize(&self) -> Sale {
        // Unidentifiable assignees stay as empty ids so positions keep lining
        // up with `trees_harvested`.
        let employees = match &self.employees {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| reference_id(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        };
        let trees_harvested = match &self.trees_harvested {
            Some(Value::Array(items)) => items.iter().map(lenient_count).collect(),
            _ => Vec::new(),
        };

        Sale {
            id: first_id(&self.id, &self.object_id),
            sale_date: first_present(&self.sale_date, &self.date).and_then(lenient_date),
            employees,
            trees_harvested,
            total_trees: self.total_trees.as_ref().map(lenient_count).unwrap_or(0),
            total_amount: self.total_amount.as_ref().map(lenient_amount).unwrap_or_default(),
        }
    }
}

impl RawSalaryPayment {
    pub fn normalize(&self) -> SalaryPayment {
        SalaryPayment {
            id: first_id(&self.id, &self.object_id),
            employee: self.employee.as_ref().and_then(reference_id),
            payment_date: first_present(&self.payment_date, &self.date).and_then(lenient_date),
            amount: self.amount.as_ref().map(lenient_amount).unwrap_or_default(),
        }
    }
}

impl RawSnapshot {
    pub fn normalize(&self) -> Snapshot {
        let employees: Vec<Employee> = self
            .employees
            .iter()
            .filter_map(|raw| {
                let employee = raw.normalize();
                if employee.is_none() {
                    warn!(name = ?raw.name, "Dropping employee record without an identifier.");
                }
                employee
            })
            .collect();
        let sales: Vec<Sale> = self.sales.iter().map(RawSale::normalize).collect();
        let salaries: Vec<SalaryPayment> =
            self.salaries.iter().map(RawSalaryPayment::normalize).collect();

        debug!(
            employees = employees.len(),
            sales = sales.len(),
            salaries = salaries.len(),
            "Normalized snapshot."
        );

        Snapshot {
            employees,
            sales,
            salaries,
        }
    }
}

/// Resolves an identifier given as a bare string, a number, or a reference
/// object carrying `id` / `_id`.
pub fn reference_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map
            .get("id")
            .and_then(reference_id)
            .or_else(|| map.get("_id").and_then(reference_id)),
        _ => None,
    }
}

/// Calendar date of a string (time and zone discarded) or of epoch milliseconds.
pub fn lenient_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => {
            let day = s.trim().split(['T', ' ']).next()?;
            NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
        }
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

/// A non-negative whole count; anything unusable counts as 0.
pub fn lenient_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(truncate_count))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(truncate_count))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// A monetary amount from a number or numeric string; anything unusable is 0.
pub fn lenient_amount(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    };
    parsed.unwrap_or_default()
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn truncate_count(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 { f.trunc() as u64 } else { 0 }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_id(primary: &Option<Value>, fallback: &Option<Value>) -> Option<String> {
    primary
        .as_ref()
        .and_then(reference_id)
        .or_else(|| fallback.as_ref().and_then(reference_id))
}

/// The primary field unless it is missing, null or blank.
fn first_present<'a>(primary: &'a Option<Value>, fallback: &'a Option<Value>) -> Option<&'a Value> {
    let present = |v: &&Value| match v {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    };
    primary
        .as_ref()
        .filter(present)
        .or_else(|| fallback.as_ref().filter(present))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn employee_falls_back_to_object_id() {
        let raw: RawEmployee =
            serde_json::from_value(json!({"_id": "65f0", "name": "Ravi", "code": "EMP-7"})).unwrap();
        let employee = raw.normalize().unwrap();

        assert_eq!(employee.id, "65f0");
        assert_eq!(employee.name, "Ravi");
        assert_eq!(employee.code.as_deref(), Some("EMP-7"));
    }

    #[test]
    fn employee_without_identifier_is_dropped() {
        let raw: RawEmployee = serde_json::from_value(json!({"name": "Ghost", "id": ""})).unwrap();
        assert!(raw.normalize().is_none());
    }

    #[test]
    fn sale_accepts_bare_and_populated_assignees() {
        let raw: RawSale = serde_json::from_value(json!({
            "_id": "S1",
            "saleDate": "2025-02-10T18:30:00.000Z",
            "employees": ["E1", {"_id": "E2", "name": "B"}, {"id": "E3"}, null],
            "treesHarvested": [300, "200", 12.9],
            "totalTrees": 500,
            "totalAmount": 25000
        }))
        .unwrap();
        let sale = raw.normalize();

        assert_eq!(sale.id.as_deref(), Some("S1"));
        assert_eq!(sale.sale_date, Some(date(2025, 2, 10)));
        assert_eq!(sale.employees, vec!["E1", "E2", "E3", ""]);
        assert_eq!(sale.trees_harvested, vec![300, 200, 12]);
        assert_eq!(sale.total_trees, 500);
        assert_eq!(sale.total_amount, dec!(25000));
    }

    #[test]
    fn sale_uses_date_when_sale_date_is_blank() {
        let raw: RawSale =
            serde_json::from_value(json!({"saleDate": "", "date": "2025-03-01"})).unwrap();
        assert_eq!(raw.normalize().sale_date, Some(date(2025, 3, 1)));
    }

    #[test]
    fn malformed_fields_degrade_to_defaults() {
        let raw: RawSale = serde_json::from_value(json!({
            "saleDate": "next tuesday",
            "employees": "E1",
            "treesHarvested": null,
            "totalTrees": -4,
            "totalAmount": "n/a"
        }))
        .unwrap();
        let sale = raw.normalize();

        assert_eq!(sale.sale_date, None);
        assert!(sale.employees.is_empty());
        assert!(sale.trees_harvested.is_empty());
        assert_eq!(sale.total_trees, 0);
        assert_eq!(sale.total_amount, Decimal::ZERO);
    }

    #[test]
    fn salary_resolves_nested_employee_and_string_amount() {
        let raw: RawSalaryPayment = serde_json::from_value(json!({
            "_id": "P1",
            "employee": {"_id": "E1", "name": "A"},
            "date": "2025-02-15",
            "amount": " 5000.50 "
        }))
        .unwrap();
        let payment = raw.normalize();

        assert_eq!(payment.id.as_deref(), Some("P1"));
        assert_eq!(payment.employee.as_deref(), Some("E1"));
        assert_eq!(payment.payment_date, Some(date(2025, 2, 15)));
        assert_eq!(payment.amount, dec!(5000.50));
    }

    #[test]
    fn salary_with_missing_amount_is_zero() {
        let raw: RawSalaryPayment =
            serde_json::from_value(json!({"employee": "E1", "amount": null})).unwrap();
        let payment = raw.normalize();

        assert_eq!(payment.amount, Decimal::ZERO);
        assert_eq!(payment.payment_date, None);
    }

    #[test]
    fn dates_accept_epoch_millis_and_space_separated_times() {
        assert_eq!(lenient_date(&json!(1739145600000_i64)), Some(date(2025, 2, 10)));
        assert_eq!(lenient_date(&json!("2025-02-10 08:00")), Some(date(2025, 2, 10)));
        assert_eq!(lenient_date(&json!("2025-13-40")), None);
        assert_eq!(lenient_date(&json!(true)), None);
    }

    #[test]
    fn numeric_identifiers_are_rendered_as_text() {
        assert_eq!(reference_id(&json!(42)), Some("42".to_string()));
        assert_eq!(reference_id(&json!({"id": 7})), Some("7".to_string()));
        assert_eq!(reference_id(&json!({"name": "x"})), None);
    }

    #[test]
    fn amounts_accept_fractions_and_exponents() {
        assert_eq!(lenient_amount(&json!(0.1)), dec!(0.1));
        assert_eq!(lenient_amount(&json!("1e3")), dec!(1000));
        assert_eq!(lenient_amount(&json!(false)), Decimal::ZERO);
    }

    #[test]
    fn snapshot_skips_unidentifiable_employees() {
        let raw: RawSnapshot = serde_json::from_value(json!({
            "employees": [{"id": "E1", "name": "A"}, {"name": "nobody"}],
            "sales": [{}],
        }))
        .unwrap();
        let snapshot = raw.normalize();

        assert_eq!(snapshot.employees.len(), 1);
        assert_eq!(snapshot.sales.len(), 1);
        assert!(snapshot.salaries.is_empty());
    }
}
