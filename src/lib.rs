//! Core library for the csv-combiner command line application.
//!
//! The library merges CSV files that share a column layout into a single
//! table. IO adapters live under [`combiner::io`], data representations inside
//! [`combiner::model`], the combination rules in [`combiner::combine`], and the
//! file-level orchestration used by the CLI under [`combiner::pipeline`].

pub mod combiner;

pub use combiner::combine::{CombineOptions, NameCheck, combine, combine_with};
pub use combiner::model::{CombinedTable, Row, TabularInput};
pub use combiner::{CombineError, Result, error, io, logging, model, pipeline};
