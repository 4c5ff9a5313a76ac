#![warn(clippy::disallowed_types)]

pub use error::{Result, TruthTableError};
pub use render::OutputFormat;
pub use symbols::*;
pub use truth_table::{assignment, Row, TruthTable, DEFAULT_MAX_VARIABLES};

pub mod error;
pub mod eval;
pub mod parser;
pub mod render;

mod truth_table;

mod symbols;
