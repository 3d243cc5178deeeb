// Shared fixtures for bondx behavioral tests
use bondx_core::{Cell, Frame};

/// Required bond columns, in the order the row fixtures fill them.
pub const BOND_COLUMNS: [&str; 8] = [
    "isin",
    "company_name",
    "issue_size",
    "allotment_date",
    "maturity_date",
    "issuer_details",
    "instrument_details",
    "coupon_details",
];

/// Cashflow columns the row fixtures fill, required ones first.
pub const CASHFLOW_COLUMNS: [&str; 5] = [
    "isin",
    "cash_flow_date",
    "cash_flow_amount",
    "principal_amount",
    "interest_amount",
];

/// Company columns the row fixtures fill, required ones first.
pub const COMPANY_COLUMNS: [&str; 4] = [
    "company_name",
    "company_industry",
    "key_metrics",
    "lenders_profile",
];

/// Build a frame from columns and rows, panicking on fixture mistakes.
pub fn frame_of(columns: &[&str], rows: Vec<Vec<Cell>>) -> Frame {
    let mut frame = Frame::new(columns.iter().copied()).expect("fixture columns");
    for row in rows {
        frame.push_row(row).expect("fixture row");
    }
    frame
}

/// A bond row with plausible defaults and the given identity columns.
pub fn bond_row(isin: &str, company_name: &str) -> Vec<Cell> {
    vec![
        Cell::text(isin),
        Cell::text(company_name),
        Cell::Number(1_000_000.0),
        Cell::text("01-04-2022"),
        Cell::text("01-04-2032"),
        Cell::text(r#"{"issuer_type": "PSU"}"#),
        Cell::text(r#"{"face_value": 1000}"#),
        Cell::text(r#"{"coupon_rate": 8.4}"#),
    ]
}

/// A cashflow row with text date and amounts, as a raw file would carry them.
pub fn cashflow_row(isin: &str, date: &str, amount: &str) -> Vec<Cell> {
    vec![
        Cell::text(isin),
        Cell::text(date),
        Cell::text(amount),
        Cell::text("9500"),
        Cell::text("1000.50"),
    ]
}

/// A company row; `name` may be absent to exercise null handling.
pub fn company_row(name: Option<&str>, industry: &str) -> Vec<Cell> {
    vec![
        name.map_or(Cell::Null, Cell::text),
        Cell::text(industry),
        Cell::text(r#"{"net_worth_cr": 250.0}"#),
        Cell::text(""),
    ]
}
