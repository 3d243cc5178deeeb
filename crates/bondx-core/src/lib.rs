//! Core table model for bondx.
//!
//! This crate contains:
//! - The [`Cell`] value union and the per-cell normalization rules
//! - The [`Frame`] column-ordered table and its borrowed [`FrameView`]
//! - Per-dataset column schemas driving validation and normalization

pub mod cell;
pub mod error;
pub mod frame;
pub mod normalize;
pub mod schema;

pub use cell::Cell;
pub use error::FrameError;
pub use frame::{Frame, FrameView};
pub use normalize::{coerce_date, coerce_numeric, normalize_json_cell, parse_date_dmy};
pub use schema::{Dataset, TableSchema};
