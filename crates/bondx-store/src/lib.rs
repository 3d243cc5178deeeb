//! # Bondx Store
//!
//! In-memory tabular storage for bond-market reference data.
//!
//! ## Overview
//!
//! This crate keeps three independently loaded datasets and answers simple
//! lookups against them. Loads validate required columns, parse
//! structured-text columns into JSON documents, and coerce date and numeric
//! columns, replacing the stored table wholesale on success.
//!
//! | Dataset | Key columns | Normalization |
//! |---------|-------------|---------------|
//! | bonds | `isin`, `company_name` | JSON detail columns |
//! | cashflows | `isin`, `cash_flow_date` | day-month-year dates, numeric amounts |
//! | companies | `company_name` | JSON insight columns |
//!
//! ## Quick Start
//!
//! ```rust
//! use bondx_core::{Cell, Frame};
//! use bondx_store::TabularStore;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut bonds = Frame::new([
//!         "isin",
//!         "company_name",
//!         "issue_size",
//!         "allotment_date",
//!         "maturity_date",
//!         "issuer_details",
//!         "instrument_details",
//!         "coupon_details",
//!     ])?;
//!     bonds.push_row([
//!         Cell::text("INE001A07QW1"),
//!         Cell::text("Acme Infra Ltd"),
//!         Cell::Number(500_000_000.0),
//!         Cell::text("15-06-2021"),
//!         Cell::text("15-06-2031"),
//!         Cell::text(r#"{"issuer_type": "NBFC"}"#),
//!         Cell::text("{}"),
//!         Cell::text("{}"),
//!     ])?;
//!
//!     let mut store = TabularStore::new();
//!     store.load_bond_data(bonds)?;
//!
//!     let matched = store.get_bond_details(Some("INE001A07QW1"))?;
//!     println!("matched {} bonds", matched.len());
//!     Ok(())
//! }
//! ```
//!
//! A failed load never disturbs what was stored before, and retrieval from
//! a dataset that was never loaded is an error rather than an empty result.

use bondx_core::{
    coerce_date, coerce_numeric, normalize_json_cell, Cell, Dataset, Frame, FrameView,
};
use thiserror::Error;
use tracing::{error, info};

/// Errors returned by [`TabularStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A load was given a frame without the dataset's required columns.
    #[error("{dataset} data missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        dataset: Dataset,
        columns: Vec<String>,
    },

    /// A structured-text cell did not parse as JSON.
    #[error("{dataset} data has malformed JSON in column '{column}' at row {row}: {source}")]
    MalformedJson {
        dataset: Dataset,
        column: String,
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Retrieval was attempted before the dataset was ever loaded.
    #[error("{dataset} data not loaded")]
    NotLoaded { dataset: Dataset },
}

/// In-memory store for the three bond-market datasets.
///
/// Each dataset is loaded independently and replaced wholesale on every
/// successful load. A failed load leaves the previously stored table
/// intact.
#[derive(Debug, Default)]
pub struct TabularStore {
    bonds: Option<Frame>,
    cashflows: Option<Frame>,
    companies: Option<Frame>,
}

impl TabularStore {
    /// Create a store with no datasets loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, normalize, and store bond reference data.
    ///
    /// The frame must carry the bond dataset's required columns, and its
    /// structured-text detail columns are parsed into JSON documents.
    pub fn load_bond_data(&mut self, frame: Frame) -> Result<(), StoreError> {
        self.load(Dataset::Bond, frame)
    }

    /// Validate, normalize, and store cashflow schedules.
    ///
    /// Date columns are parsed as day-month-year and amount columns as
    /// floats; cells that do not parse become null.
    pub fn load_cashflow_data(&mut self, frame: Frame) -> Result<(), StoreError> {
        self.load(Dataset::Cashflow, frame)
    }

    /// Validate, normalize, and store company insight data.
    pub fn load_company_data(&mut self, frame: Frame) -> Result<(), StoreError> {
        self.load(Dataset::Company, frame)
    }

    /// All bonds, or only those whose `isin` matches exactly.
    ///
    /// An unknown `isin` yields an empty view, not an error.
    pub fn get_bond_details(&self, isin: Option<&str>) -> Result<FrameView<'_>, StoreError> {
        let frame = self.loaded(Dataset::Bond)?;
        Ok(match isin {
            Some(isin) => frame.filter_text_eq("isin", isin),
            None => frame.view(),
        })
    }

    /// All cashflow rows, or only those whose `isin` matches exactly.
    ///
    /// An unknown `isin` yields an empty view, not an error.
    pub fn get_cashflow_details(&self, isin: Option<&str>) -> Result<FrameView<'_>, StoreError> {
        let frame = self.loaded(Dataset::Cashflow)?;
        Ok(match isin {
            Some(isin) => frame.filter_text_eq("isin", isin),
            None => frame.view(),
        })
    }

    /// All companies, or only those whose `company_name` contains the
    /// needle, compared case-insensitively.
    ///
    /// Rows with a null name never match, and no match yields an empty
    /// view, not an error.
    pub fn get_company_insights(
        &self,
        company_name: Option<&str>,
    ) -> Result<FrameView<'_>, StoreError> {
        let frame = self.loaded(Dataset::Company)?;
        Ok(match company_name {
            Some(needle) => frame.filter_text_contains("company_name", needle),
            None => frame.view(),
        })
    }

    /// Whether a dataset currently holds a table.
    pub fn is_loaded(&self, dataset: Dataset) -> bool {
        self.slot(dataset).is_some()
    }

    /// Number of stored rows for a dataset, if loaded.
    pub fn row_count(&self, dataset: Dataset) -> Option<usize> {
        self.slot(dataset).map(Frame::len)
    }

    fn load(&mut self, dataset: Dataset, frame: Frame) -> Result<(), StoreError> {
        match normalize(dataset, frame) {
            Ok(frame) => {
                info!("loaded {} {} records", frame.len(), dataset);
                *self.slot_mut(dataset) = Some(frame);
                Ok(())
            }
            Err(error) => {
                error!("error loading {} data: {}", dataset, error);
                Err(error)
            }
        }
    }

    fn loaded(&self, dataset: Dataset) -> Result<&Frame, StoreError> {
        self.slot(dataset).ok_or(StoreError::NotLoaded { dataset })
    }

    fn slot(&self, dataset: Dataset) -> Option<&Frame> {
        match dataset {
            Dataset::Bond => self.bonds.as_ref(),
            Dataset::Cashflow => self.cashflows.as_ref(),
            Dataset::Company => self.companies.as_ref(),
        }
    }

    fn slot_mut(&mut self, dataset: Dataset) -> &mut Option<Frame> {
        match dataset {
            Dataset::Bond => &mut self.bonds,
            Dataset::Cashflow => &mut self.cashflows,
            Dataset::Company => &mut self.companies,
        }
    }
}

/// Validate required columns, then run the dataset's normalization passes.
///
/// The frame is rebuilt before the caller commits it, so an error leaves
/// nothing half-normalized behind.
fn normalize(dataset: Dataset, mut frame: Frame) -> Result<Frame, StoreError> {
    let schema = dataset.schema();

    let missing = schema.missing_from(&frame);
    if !missing.is_empty() {
        return Err(StoreError::MissingColumns {
            dataset,
            columns: missing,
        });
    }

    for column in schema.json {
        normalize_json_column(dataset, &mut frame, column)?;
    }
    for column in schema.date {
        map_column(&mut frame, column, coerce_date);
    }
    for column in schema.numeric {
        map_column(&mut frame, column, coerce_numeric);
    }

    Ok(frame)
}

/// Parse one structured-text column, failing on the first malformed cell.
fn normalize_json_column(
    dataset: Dataset,
    frame: &mut Frame,
    column: &str,
) -> Result<(), StoreError> {
    let Some(position) = frame.column_index(column) else {
        return Ok(());
    };

    for (row, cells) in frame.rows_mut().enumerate() {
        let Some(cell) = cells.get_mut(position) else {
            continue;
        };
        let taken = std::mem::replace(cell, Cell::Null);
        *cell = normalize_json_cell(taken).map_err(|source| StoreError::MalformedJson {
            dataset,
            column: column.to_string(),
            row,
            source,
        })?;
    }

    Ok(())
}

/// Apply an infallible cell coercion to one column, if present.
fn map_column(frame: &mut Frame, column: &str, op: fn(Cell) -> Cell) {
    let Some(position) = frame.column_index(column) else {
        return;
    };

    for cells in frame.rows_mut() {
        if let Some(cell) = cells.get_mut(position) {
            let taken = std::mem::replace(cell, Cell::Null);
            *cell = op(taken);
        }
    }
}
