//! Properties of assembled tables over seeded random inputs.

use cp_core::{ByteSet, TableConfig};
use cp_table::{leftover, scan, search, SearchContext, SearchOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALPHABET: &[u8] = b"abcdefgh";
const SOURCE_BYTES: &[u8] = b"abcdefghij.";

fn config() -> TableConfig {
    TableConfig::new(ALPHABET, "<", ">").unwrap()
}

fn random_input(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len)
        .map(|_| SOURCE_BYTES[rng.gen_range(0..SOURCE_BYTES.len())])
        .collect()
}

fn inputs() -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut all: Vec<Vec<u8>> = (0..40).map(|i| random_input(&mut rng, 8 + i % 17)).collect();
    all.push(b"abcdefgh.abcdefgh.hgfedcba".to_vec());
    all.push(b"abcd.efgh.abcd.efgh".to_vec());
    all.push(Vec::new());
    all
}

/// Splits an output into (table + leftover) after checking the fixed ends.
fn middle<'a>(cfg: &TableConfig, output: &'a [u8]) -> &'a [u8] {
    assert!(output.starts_with(&cfg.prefix), "missing prefix: {:?}", output);
    assert!(output.ends_with(&cfg.suffix), "missing suffix: {:?}", output);
    &output[cfg.prefix.len()..output.len() - cfg.suffix.len()]
}

#[test]
fn test_output_framed_by_prefix_and_suffix() {
    let cfg = config();
    for input in inputs() {
        let out = search(&input, &cfg, SearchOptions::default()).unwrap();
        middle(&cfg, &out.output);
    }
}

#[test]
fn test_middle_is_alphabet_permutation() {
    let cfg = config();
    for input in inputs() {
        let out = search(&input, &cfg, SearchOptions::default()).unwrap();
        let mid = middle(&cfg, &out.output);
        assert_eq!(mid.len(), ALPHABET.len());
        let set = ByteSet::from_bytes(mid);
        assert_eq!(set, ByteSet::from_bytes(ALPHABET), "input {:?}", input);
    }
}

#[test]
fn test_leftover_in_alphabet_order() {
    let cfg = config();
    for input in inputs() {
        let out = search(&input, &cfg, SearchOptions::default()).unwrap();
        let mid = middle(&cfg, &out.output);
        // Some split point must separate the table from a leftover segment
        // that lists exactly the missing alphabet bytes, in alphabet order.
        let found = (0..=mid.len()).any(|split| {
            let (table, rest) = mid.split_at(split);
            rest == leftover(ALPHABET, &ByteSet::from_bytes(table)).as_slice()
        });
        assert!(found, "no valid leftover segment in {:?}", mid);
    }
}

#[test]
fn test_deterministic() {
    let cfg = config();
    for input in inputs() {
        let a = search(&input, &cfg, SearchOptions::default()).unwrap();
        let b = search(&input, &cfg, SearchOptions::default()).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_exhaustive_at_least_greedy() {
    let cfg = config();
    for input in inputs() {
        let full = search(&input, &cfg, SearchOptions::default()).unwrap();
        let greedy = search(&input, &cfg, SearchOptions::greedy()).unwrap();
        assert!(full.score >= greedy.score, "input {:?}", input);
        assert!(full.nodes >= greedy.nodes);
    }
}

#[test]
fn test_score_grows_with_budget() {
    let cfg = config();
    for input in inputs().into_iter().take(15) {
        let mut last = i64::MIN;
        for budget in [0u64, 1, 2, 5, 20, 100] {
            let opts = SearchOptions::default().with_max_nodes(budget);
            let out = search(&input, &cfg, opts).unwrap();
            assert!(out.score >= last, "budget {} lowered score", budget);
            last = out.score;
        }
    }
}

#[test]
fn test_score_never_negative() {
    let cfg = config();
    for input in inputs() {
        let out = search(&input, &cfg, SearchOptions::default()).unwrap();
        assert!(out.score >= 0);
        if scan(&input, &SearchContext::root(&cfg)).is_empty() {
            assert_eq!(out.score, 0);
        } else {
            assert!(out.score >= 2);
        }
    }
}
