//! Index-table search: picks an ordering of the literal alphabet such that
//! repeated runs of the program text can be referenced by a short index into
//! the table instead of being spelled out.
//!
//! Stages:
//! 1. Masking: neutralize string literal contents
//! 2. Streak detection: longest table-eligible run at a position
//! 3. Search: depth-first branch over every viable streak
//! 4. Assembly: table ++ leftover alphabet ++ suffix

pub mod assemble;
pub mod context;
pub mod mask;
pub mod search;
pub mod streak;

pub use assemble::{assemble, leftover};
pub use context::SearchContext;
pub use mask::{byte_histogram, mask_literals, PLACEHOLDER};
pub use search::{scan, search, Optimum, SearchOptions, SearchOutcome, Searcher, Strategy};
pub use streak::{detect, streak_len, Streak};

/// Shortest streak worth a table entry.
pub const MIN_STREAK_LEN: usize = 4;
/// Bytes spent on every table reference.
pub const REFERENCE_COST: i64 = 2;
