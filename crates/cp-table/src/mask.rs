//! String literal masking and byte statistics.

use cp_core::ByteSet;
use std::collections::BTreeMap;

/// Stand-in for string literal contents.
pub const PLACEHOLDER: u8 = b'"';

/// Replace the contents of `"..."` literals with [`PLACEHOLDER`] so that
/// arbitrary string data does not produce streaks. Excluded bytes are kept
/// as-is, and `\"` does not close a literal.
pub fn mask_literals(input: &[u8], excluded: &ByteSet) -> Vec<u8> {
    let mut out = input.to_vec();
    let mut in_string = false;
    for pos in 0..out.len() {
        if out[pos] == b'"' && (pos == 0 || out[pos - 1] != b'\\') {
            in_string = !in_string;
        }
        if in_string && !excluded.contains(out[pos]) {
            out[pos] = PLACEHOLDER;
        }
    }
    out
}

/// Occurrence count per byte value.
pub fn byte_histogram(input: &[u8]) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for &b in input {
        *counts.entry(b).or_insert(0) += 1;
    }
    counts
}
