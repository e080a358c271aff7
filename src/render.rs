use analytics::{EmployeeSummary, ReportTotals};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::DateRange;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

const CURRENCY: &str = "₹";
const EMPTY_REPORT: &str = "No activity records found for this period";

#[derive(Serialize)]
struct JsonReport<'a> {
    range: &'a DateRange,
    employees: &'a [EmployeeSummary],
    totals: &'a ReportTotals,
}

/// Renders the report as a table with a totals footer.
pub fn render_table(rows: &[EmployeeSummary], totals: &ReportTotals, range: &DateRange) -> String {
    let title = format!("Employee Work Report ({})", describe_range(range));
    if rows.is_empty() {
        return format!("{title}\n{EMPTY_REPORT}");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "No.",
            "Employee",
            "Trees Plucked",
            "Sales Amount",
            "Salary Paid",
            "Profit / Balance",
        ]);

    for (index, row) in rows.iter().enumerate() {
        let employee = match &row.code {
            Some(code) => format!("{}\n{}", row.name, code),
            None => row.name.clone(),
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(employee),
            Cell::new(group_thousands(&row.total_trees_harvested.to_string()))
                .set_alignment(CellAlignment::Center),
            Cell::new(format_money(round_half_up(row.total_sales_amount)))
                .set_alignment(CellAlignment::Right),
            Cell::new(format_money(row.total_salary_paid)).set_alignment(CellAlignment::Right),
            profit_cell(row.profit),
        ]);
    }

    table.add_row(vec![
        Cell::new("Totals").add_attribute(Attribute::Bold),
        Cell::new(format!("{} employees", totals.employees)),
        Cell::new(group_thousands(&totals.total_trees_harvested.to_string()))
            .set_alignment(CellAlignment::Center)
            .add_attribute(Attribute::Bold),
        Cell::new(format_money(round_half_up(totals.total_sales_amount)))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(format_money(totals.total_salary_paid))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        profit_cell(totals.profit).add_attribute(Attribute::Bold),
    ]);

    format!("{title}\n{table}")
}

/// Renders the report as pretty-printed JSON.
pub fn render_json(
    rows: &[EmployeeSummary],
    totals: &ReportTotals,
    range: &DateRange,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        range,
        employees: rows,
        totals,
    })
}

pub fn describe_range(range: &DateRange) -> String {
    match (range.from, range.to) {
        (Some(from), Some(to)) => format!("{from} to {to}"),
        (Some(from), None) => format!("from {from}"),
        (None, Some(to)) => format!("up to {to}"),
        (None, None) => "all time".to_string(),
    }
}

fn profit_cell(profit: Decimal) -> Cell {
    let color = if profit >= Decimal::ZERO { Color::Green } else { Color::Red };
    Cell::new(format_money(round_half_up(profit)))
        .set_alignment(CellAlignment::Right)
        .fg(color)
}

/// Rounds to whole units with halves going up, so -2.5 becomes -2.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.saturating_add(dec!(0.5)).floor()
}

/// Currency text with thousands separators, keeping any significant fraction.
pub fn format_money(value: Decimal) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    let text = value.abs().normalize().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    match fraction {
        Some(fraction) => format!("{sign}{CURRENCY}{}.{fraction}", group_thousands(whole)),
        None => format!("{sign}{CURRENCY}{}", group_thousands(whole)),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
