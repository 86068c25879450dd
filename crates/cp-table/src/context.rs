//! Search node state.

use crate::streak::Streak;
use crate::REFERENCE_COST;
use cp_core::{ByteSet, TableConfig};

/// One node of the search tree. Children are built with [`SearchContext::branch`]
/// and never share mutable state with their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContext {
    /// Bytes that may not appear literally in the remaining output.
    pub excluded: ByteSet,
    /// Fixed prefix followed by the table built so far.
    pub prefix: Vec<u8>,
    pub suffix: Vec<u8>,
    /// Net bytes saved by the table so far.
    pub score: i64,
}

impl SearchContext {
    pub fn root(config: &TableConfig) -> Self {
        Self {
            excluded: config.excluded_bytes(),
            prefix: config.prefix.clone(),
            suffix: config.suffix.clone(),
            score: 0,
        }
    }

    /// Child context with `streak` absorbed into the table.
    ///
    /// Leading streak bytes that are already excluded are replayed from the
    /// table tail, so only the bytes from the first new one onwards are appended.
    pub fn branch(&self, input: &[u8], streak: &Streak) -> Self {
        let span = &input[streak.pos..streak.pos + streak.len];
        let mut child = self.clone();
        child.score += streak.len as i64 - REFERENCE_COST;
        if let Some(first_new) = span.iter().position(|&b| !self.excluded.contains(b)) {
            child.prefix.extend_from_slice(&span[first_new..]);
        }
        child.excluded.extend(span);
        child
    }
}
