//! Category Table Compilation
//!
//! Compacts the sparse codepoint → category map into a flat backing array
//! addressed through per-page region lists.

mod compile;
mod ranges;

pub use compile::{compile_table, DispatchTable, Page, Region, MIN_OCCUPANCY};
pub use ranges::{coalesce, Range};
