use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Frame;

/// The three datasets the store manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Bond,
    Cashflow,
    Company,
}

impl Dataset {
    /// Stable lowercase name, used in error messages and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bond => "bond",
            Self::Cashflow => "cashflow",
            Self::Company => "company",
        }
    }

    /// The column schema governing loads of this dataset.
    pub fn schema(self) -> &'static TableSchema {
        match self {
            Self::Bond => &BOND,
            Self::Cashflow => &CASHFLOW,
            Self::Company => &COMPANY,
        }
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column lists controlling validation and normalization for one dataset.
///
/// `required` columns must all be present for a load to succeed. The other
/// lists name columns that are normalized when present and silently skipped
/// when not.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// Columns that must exist.
    pub required: &'static [&'static str],
    /// Columns holding JSON documents as text.
    pub json: &'static [&'static str],
    /// Columns holding day-month-year dates as text.
    pub date: &'static [&'static str],
    /// Columns holding numbers as text.
    pub numeric: &'static [&'static str],
}

impl TableSchema {
    /// Required columns absent from `frame`, in declaration order.
    pub fn missing_from(&self, frame: &Frame) -> Vec<String> {
        self.required
            .iter()
            .copied()
            .filter(|name| !frame.has_column(name))
            .map(str::to_string)
            .collect()
    }
}

static BOND: TableSchema = TableSchema {
    required: &[
        "isin",
        "company_name",
        "issue_size",
        "allotment_date",
        "maturity_date",
        "issuer_details",
        "instrument_details",
        "coupon_details",
    ],
    json: &[
        "issuer_details",
        "instrument_details",
        "coupon_details",
        "redemption_details",
        "credit_rating_details",
        "listing_details",
    ],
    date: &[],
    numeric: &[],
};

static CASHFLOW: TableSchema = TableSchema {
    required: &["isin", "cash_flow_date", "cash_flow_amount"],
    json: &[],
    date: &["cash_flow_date", "record_date"],
    numeric: &[
        "cash_flow_amount",
        "principal_amount",
        "interest_amount",
        "tds_amount",
        "remaining_principal",
    ],
};

static COMPANY: TableSchema = TableSchema {
    required: &["company_name", "company_industry"],
    json: &[
        "key_metrics",
        "income_statement",
        "balance_sheet",
        "cashflow",
        "lenders_profile",
    ],
    date: &[],
    numeric: &[],
};
