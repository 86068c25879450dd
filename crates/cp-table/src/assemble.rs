//! Final table assembly.

use crate::context::SearchContext;
use cp_core::ByteSet;

/// Alphabet bytes not yet excluded, in alphabet order.
pub fn leftover(alphabet: &[u8], excluded: &ByteSet) -> Vec<u8> {
    alphabet.iter().copied().filter(|&b| !excluded.contains(b)).collect()
}

/// `prefix ++ leftover ++ suffix`. Every alphabet byte ends up in the output
/// exactly once, so positional lookups into the table stay well defined.
pub fn assemble(ctx: &SearchContext, alphabet: &[u8]) -> Vec<u8> {
    let rest = leftover(alphabet, &ctx.excluded);
    let mut out = Vec::with_capacity(ctx.prefix.len() + rest.len() + ctx.suffix.len());
    out.extend_from_slice(&ctx.prefix);
    out.extend_from_slice(&rest);
    out.extend_from_slice(&ctx.suffix);
    out
}
