//! Column normalization for Census survey extracts.
//!
//! ACS tables encode missing observations as large negative sentinel
//! codes and ship every column as whatever type the reader guessed.
//! [`replace_missing`] turns the sentinel codes into proper polars nulls
//! and [`coerce`] attempts a stricter dtype, keeping the column unchanged
//! whenever the conversion cannot fully succeed.
//!
//! # Example
//!
//! ```
//! use census_normalize::{coerce, replace_missing};
//! use polars::prelude::*;
//!
//! let raw = Series::new("estimate".into(), &["1500", "-999999999", "2400"]);
//! let cleaned = replace_missing(coerce(raw, &DataType::Int64));
//!
//! assert_eq!(cleaned.dtype(), &DataType::Int64);
//! assert_eq!(cleaned.null_count(), 1);
//! ```

mod coerce;
mod missing;

pub use coerce::{can_int, coerce};
pub use missing::{ACS_MISSING, replace_missing};
