//! Depth-first branch search over table candidates.

use crate::assemble::assemble;
use crate::context::SearchContext;
use crate::streak::{detect, Streak};
use crate::MIN_STREAK_LEN;
use cp_core::{Result, TableConfig};
use std::borrow::Cow;
use tracing::{debug, info, warn};

/// Depth up to which each branch is reported.
const PROGRESS_DEPTH: usize = 2;

/// How much of the tree to explore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Every viable streak at every node. Finds the optimum.
    #[default]
    Exhaustive,
    /// Only the top-ranked streak at each node. Single path, not optimal.
    Greedy,
}

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub strategy: Strategy,
    /// Stop after visiting this many nodes and return the best found.
    pub max_nodes: Option<u64>,
}

impl SearchOptions {
    pub fn greedy() -> Self {
        Self { strategy: Strategy::Greedy, ..Default::default() }
    }

    pub fn with_max_nodes(mut self, max: u64) -> Self {
        self.max_nodes = Some(max);
        self
    }
}

/// Result of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i64,
    pub output: Vec<u8>,
    pub nodes: u64,
    pub leaves: u64,
    /// The node budget ran out before the tree was exhausted.
    pub budget_exhausted: bool,
}

impl SearchOutcome {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}

/// Best leaf seen so far. Only ever replaced by a strictly better score.
#[derive(Debug, Clone, Default)]
pub struct Optimum {
    best: Option<(i64, Vec<u8>)>,
}

impl Optimum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> Option<i64> {
        self.best.as_ref().map(|(score, _)| *score)
    }

    pub fn output(&self) -> Option<&[u8]> {
        self.best.as_ref().map(|(_, out)| out.as_slice())
    }

    /// Record `score` if it beats the current best. `render` is only called
    /// when the record changes. Returns whether it did.
    pub fn offer(&mut self, score: i64, render: impl FnOnce() -> Vec<u8>) -> bool {
        if self.score().is_some_and(|best| score <= best) {
            return false;
        }
        self.best = Some((score, render()));
        true
    }

    pub fn into_inner(self) -> Option<(i64, Vec<u8>)> {
        self.best
    }
}

/// All viable streaks for `ctx`, in search order.
///
/// A streak is viable when it is long enough to pay for its reference and
/// adds at least one byte to the table. Pure replays would leave the child
/// identical to its parent.
pub fn scan(input: &[u8], ctx: &SearchContext) -> Vec<Streak> {
    let mut streaks: Vec<Streak> = (0..input.len())
        .map(|pos| detect(input, pos, ctx))
        .filter(|s| s.len >= MIN_STREAK_LEN && s.fresh() > 0)
        .collect();
    streaks.sort_by(Streak::cmp_rank);
    streaks
}

/// Search driver bound to one configuration.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: TableConfig,
    options: SearchOptions,
}

impl Searcher {
    pub fn new(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, options: SearchOptions::default() })
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Explore the tree rooted at the configured context.
    pub fn run(&self, input: &[u8]) -> SearchOutcome {
        let root = SearchContext::root(&self.config);
        let mut walk = Walk {
            input,
            alphabet: &self.config.alphabet,
            options: &self.options,
            optimum: Optimum::new(),
            nodes: 0,
            leaves: 0,
            exhausted: false,
        };
        walk.visit(&root, 0);

        let Walk { optimum, nodes, leaves, exhausted, .. } = walk;
        // Every walk settles at least one node, the root at the latest.
        let (score, output) = optimum
            .into_inner()
            .unwrap_or_else(|| (root.score, assemble(&root, &self.config.alphabet)));

        info!(score, nodes, leaves, budget_exhausted = exhausted, "search finished");
        SearchOutcome { score, output, nodes, leaves, budget_exhausted: exhausted }
    }
}

/// Validate `config` and run one search over `input`.
pub fn search(input: &[u8], config: &TableConfig, options: SearchOptions) -> Result<SearchOutcome> {
    Ok(Searcher::new(config.clone())?.with_options(options).run(input))
}

struct Walk<'a> {
    input: &'a [u8],
    alphabet: &'a [u8],
    options: &'a SearchOptions,
    optimum: Optimum,
    nodes: u64,
    leaves: u64,
    exhausted: bool,
}

impl Walk<'_> {
    fn visit(&mut self, ctx: &SearchContext, depth: usize) {
        self.nodes += 1;
        if self.options.max_nodes.is_some_and(|max| self.nodes > max) {
            warn!(nodes = self.nodes, "search budget exhausted, returning best found");
            self.exhausted = true;
            self.settle(ctx);
            return;
        }

        let streaks = scan(self.input, ctx);
        if streaks.is_empty() {
            self.leaves += 1;
            self.settle(ctx);
            return;
        }

        let width = match self.options.strategy {
            Strategy::Exhaustive => streaks.len(),
            Strategy::Greedy => 1,
        };
        for (n, streak) in streaks.iter().take(width).enumerate() {
            if depth < PROGRESS_DEPTH {
                debug!(
                    depth,
                    n,
                    total = streaks.len(),
                    pos = streak.pos,
                    len = streak.len,
                    run = %String::from_utf8_lossy(&self.input[streak.pos..streak.pos + streak.len]),
                    "testing streak"
                );
            }
            let child = ctx.branch(self.input, streak);
            self.visit(&child, depth + 1);
            if self.exhausted {
                break;
            }
        }
    }

    fn settle(&mut self, ctx: &SearchContext) {
        let alphabet = self.alphabet;
        if self.optimum.offer(ctx.score, || assemble(ctx, alphabet)) {
            info!(
                score = ctx.score,
                table = %String::from_utf8_lossy(self.optimum.output().unwrap_or_default()),
                "new best table"
            );
        }
    }
}
