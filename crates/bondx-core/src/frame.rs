use std::collections::HashMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::{Cell, FrameError};

/// A column-ordered, row-major table of [`Cell`]s.
///
/// Column names are unique and non-empty, and every row holds exactly one
/// cell per column. Rows keep their insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl Frame {
    /// Create an empty frame with the given column names.
    pub fn new<I, S>(columns: I) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(columns.len());
        for (position, name) in columns.iter().enumerate() {
            if name.is_empty() {
                return Err(FrameError::EmptyColumnName);
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(FrameError::DuplicateColumn { name: name.clone() });
            }
        }

        Ok(Self {
            columns,
            index,
            rows: Vec::new(),
        })
    }

    /// Append a row; its arity must match the column count.
    pub fn push_row<I>(&mut self, cells: I) -> Result<(), FrameError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let cells: Vec<Cell> = cells.into_iter().collect();
        if cells.len() != self.columns.len() {
            return Err(FrameError::RowArityMismatch {
                expected: self.columns.len(),
                actual: cells.len(),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate rows as cell slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Iterate rows with their cells mutable. Row arity stays fixed.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Cell]> {
        self.rows.iter_mut().map(Vec::as_mut_slice)
    }

    /// A cell by row position and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let position = self.column_index(column)?;
        self.rows.get(row)?.get(position)
    }

    /// Borrow every row as a view.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            frame: self,
            rows: self.rows.iter().map(Vec::as_slice).collect(),
        }
    }

    /// Rows whose `column` holds text equal to `needle`.
    ///
    /// Null and non-text cells never match; a missing column matches
    /// nothing.
    pub fn filter_text_eq(&self, column: &str, needle: &str) -> FrameView<'_> {
        self.filter(column, |cell| cell.as_text() == Some(needle))
    }

    /// Rows whose `column` holds text containing `needle`, compared
    /// case-insensitively.
    ///
    /// Null and non-text cells never match; a missing column matches
    /// nothing.
    pub fn filter_text_contains(&self, column: &str, needle: &str) -> FrameView<'_> {
        let needle = needle.to_lowercase();
        self.filter(column, |cell| {
            cell.as_text()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
    }

    fn filter(&self, column: &str, predicate: impl Fn(&Cell) -> bool) -> FrameView<'_> {
        let rows = match self.column_index(column) {
            Some(position) => self
                .rows
                .iter()
                .map(Vec::as_slice)
                .filter(|row| row.get(position).is_some_and(&predicate))
                .collect(),
            None => Vec::new(),
        };

        FrameView { frame: self, rows }
    }
}

impl Serialize for Frame {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_table(
            serializer,
            "Frame",
            &self.columns,
            self.rows.iter().map(Vec::as_slice).collect(),
        )
    }
}

/// A borrowed selection of frame rows.
///
/// Views keep the parent frame's column order and resolve lookups through
/// it. They serialize like a standalone table, with a `row_count` field.
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    frame: &'a Frame,
    rows: Vec<&'a [Cell]>,
}

impl<'a> FrameView<'a> {
    /// Column names in declaration order.
    pub fn columns(&self) -> &'a [String] {
        self.frame.columns()
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.frame.column_index(name)
    }

    /// Iterate the selected rows.
    pub fn rows(&self) -> impl Iterator<Item = &'a [Cell]> + '_ {
        self.rows.iter().copied()
    }

    /// A row by position within the view.
    pub fn row(&self, row: usize) -> Option<&'a [Cell]> {
        self.rows.get(row).copied()
    }

    /// A cell by view-row position and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&'a Cell> {
        let position = self.frame.column_index(column)?;
        self.rows.get(row)?.get(position)
    }

    /// Copy the selected rows into an owned frame.
    pub fn to_frame(&self) -> Frame {
        Frame {
            columns: self.frame.columns.clone(),
            index: self.frame.index.clone(),
            rows: self.rows.iter().map(|row| row.to_vec()).collect(),
        }
    }
}

impl Serialize for FrameView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_table(serializer, "FrameView", self.frame.columns(), self.rows.clone())
    }
}

fn serialize_table<S>(
    serializer: S,
    name: &'static str,
    columns: &[String],
    rows: Vec<&[Cell]>,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut state = serializer.serialize_struct(name, 3)?;
    state.serialize_field("columns", columns)?;
    state.serialize_field("rows", &rows)?;
    state.serialize_field("row_count", &rows.len())?;
    state.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Frame {
        let mut frame = Frame::new(["isin", "company_name", "issue_size"]).expect("frame");
        frame
            .push_row([
                Cell::text("INE001A07QW1"),
                Cell::text("Acme Infra Ltd"),
                Cell::Number(500.0),
            ])
            .expect("row");
        frame
            .push_row([Cell::text("INE002B08RX2"), Cell::Null, Cell::Number(125.0)])
            .expect("row");
        frame
            .push_row([
                Cell::text("INE001A07QW1"),
                Cell::text("ACME INFRA LTD"),
                Cell::Null,
            ])
            .expect("row");
        frame
    }

    #[test]
    fn rejects_empty_and_duplicate_columns() {
        assert_eq!(Frame::new(["isin", ""]), Err(FrameError::EmptyColumnName));
        assert_eq!(
            Frame::new(["isin", "isin"]),
            Err(FrameError::DuplicateColumn {
                name: "isin".to_string()
            })
        );
    }

    #[test]
    fn rejects_row_with_wrong_arity() {
        let mut frame = Frame::new(["a", "b"]).expect("frame");
        let error = frame.push_row([Cell::Null]).expect_err("arity");
        assert_eq!(
            error,
            FrameError::RowArityMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(frame.is_empty());
    }

    #[test]
    fn looks_up_cells_by_name() {
        let frame = sample();
        assert_eq!(frame.cell(0, "company_name"), Some(&Cell::text("Acme Infra Ltd")));
        assert_eq!(frame.cell(1, "company_name"), Some(&Cell::Null));
        assert_eq!(frame.cell(0, "missing"), None);
        assert_eq!(frame.cell(9, "isin"), None);
    }

    #[test]
    fn view_covers_all_rows() {
        let frame = sample();
        let view = frame.view();
        assert_eq!(view.len(), 3);
        assert_eq!(view.columns(), frame.columns());
        assert_eq!(view.cell(2, "isin"), Some(&Cell::text("INE001A07QW1")));
    }

    #[test]
    fn filter_text_eq_matches_exact_text_only() {
        let frame = sample();
        let view = frame.filter_text_eq("isin", "INE001A07QW1");
        assert_eq!(view.len(), 2);

        // Numbers and nulls in the key column never match text.
        let view = frame.filter_text_eq("issue_size", "500");
        assert!(view.is_empty());
    }

    #[test]
    fn filter_text_contains_ignores_case_and_skips_nulls() {
        let frame = sample();
        let view = frame.filter_text_contains("company_name", "acme");
        assert_eq!(view.len(), 2);

        let view = frame.filter_text_contains("company_name", "infra ltd");
        assert_eq!(view.len(), 2);

        let view = frame.filter_text_contains("company_name", "nobody");
        assert!(view.is_empty());
    }

    #[test]
    fn missing_filter_column_matches_nothing() {
        let frame = sample();
        assert!(frame.filter_text_eq("absent", "x").is_empty());
        assert!(frame.filter_text_contains("absent", "x").is_empty());
    }

    #[test]
    fn to_frame_copies_selected_rows() {
        let frame = sample();
        let copied = frame.filter_text_eq("isin", "INE002B08RX2").to_frame();
        assert_eq!(copied.len(), 1);
        assert_eq!(copied.columns(), frame.columns());
        assert_eq!(copied.cell(0, "issue_size"), Some(&Cell::Number(125.0)));
    }

    #[test]
    fn serializes_with_row_count() {
        let mut frame = Frame::new(["isin"]).expect("frame");
        frame.push_row([Cell::text("INE001A07QW1")]).expect("row");

        let value = serde_json::to_value(frame.view()).expect("serialize");
        assert_eq!(
            value,
            json!({
                "columns": ["isin"],
                "rows": [["INE001A07QW1"]],
                "row_count": 1,
            })
        );
    }
}
