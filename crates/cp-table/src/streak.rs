//! Streak detection.

use crate::context::SearchContext;
use std::cmp::Ordering;

/// A run of input bytes that could be absorbed into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Streak {
    pub pos: usize,
    /// Leading bytes that replay the tail of the current table.
    pub replay: usize,
    /// Total length, replay included.
    pub len: usize,
}

impl Streak {
    /// Bytes this streak would add to the table.
    pub fn fresh(&self) -> usize {
        self.len - self.replay
    }

    /// Search order: longest first, then earliest.
    pub fn cmp_rank(&self, other: &Streak) -> Ordering {
        other.len.cmp(&self.len).then(self.pos.cmp(&other.pos))
    }
}

/// Longest table-eligible run starting at `pos`.
///
/// A leading run of excluded bytes is only allowed when it is exactly the tail
/// of the current table, since the decoder can then index backwards into it.
/// Anything else rejects the whole streak. After that, the run extends over
/// bytes that are neither excluded nor already used by this streak.
pub fn detect(input: &[u8], pos: usize, ctx: &SearchContext) -> Streak {
    let rejected = Streak { pos, replay: 0, len: 0 };
    if pos >= input.len() {
        return rejected;
    }

    let replay = input[pos..]
        .iter()
        .take_while(|&&b| ctx.excluded.contains(b))
        .count();
    if replay > ctx.prefix.len() || input[pos..pos + replay] != ctx.prefix[ctx.prefix.len() - replay..] {
        return rejected;
    }

    let mut seen = ctx.excluded;
    let fresh = input[pos + replay..]
        .iter()
        .take_while(|&&b| seen.insert(b))
        .count();

    Streak { pos, replay, len: replay + fresh }
}

/// Length of the streak at `pos`, 0 if rejected.
pub fn streak_len(input: &[u8], pos: usize, ctx: &SearchContext) -> usize {
    detect(input, pos, ctx).len
}
