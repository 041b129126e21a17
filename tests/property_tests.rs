//! Property tests for the pipeline invariants.
//!
//! Each property mirrors an invariant of the design: signature determinism
//! and bounds, banding dimensions, union-find laws, star-vs-clique
//! equivalence, partition stability under input reordering, and the
//! `num_perm = b * r` identity across configuration paths.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use text_dedup::minhash::width::{HashWidth, U32};
use text_dedup::minhash::{optimal_param, Bander, Embedder, PermutationBank};
use text_dedup::{run_full, DedupConfig, UnionFind};

const VOCAB: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
];

/// Short documents drawn from a small vocabulary so near-duplicates occur.
fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 0..12).prop_map(|words| words.join(" "))
}

fn corpus_strategy(max_docs: usize) -> impl Strategy<Value = Vec<(u64, String)>> {
    prop::collection::vec(text_strategy(), 0..max_docs)
        .prop_map(|texts| texts.into_iter().zip(1u64..).map(|(t, i)| (i, t)).collect())
}

/// The partition of ids into clusters, independent of representatives.
fn partition(uf: &UnionFind, ids: &[u64]) -> BTreeSet<BTreeSet<u64>> {
    let mut clusters: BTreeMap<u64, BTreeSet<u64>> = BTreeMap::new();
    for &id in ids {
        clusters.entry(uf.root(id)).or_default().insert(id);
    }
    clusters.into_values().collect()
}

fn test_config() -> DedupConfig {
    DedupConfig::builder()
        .num_perm(32)
        .bands(8, 4)
        .ngram(2)
        .deterministic(true)
        .num_threads(2)
        .build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn signature_deterministic_and_bounded(text in text_strategy()) {
        let embedder: Embedder<U32> = Embedder::new(PermutationBank::deterministic(64), 2);
        let first = embedder.embed(&text);
        let second = embedder.embed(&text);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), 64);
        prop_assert!(first.iter().all(|&v| u64::from(v) <= U32::MAX_HASH));
    }

    #[test]
    fn banding_dimensions_hold(text in text_strategy()) {
        let embedder: Embedder<U32> = Embedder::new(PermutationBank::deterministic(24), 2);
        let batch = embedder.embed_batch(&[(1, text)]);
        let bander = Bander::new(6, 4);
        let records = bander.band_records(&batch).expect("matching dimensions");
        prop_assert_eq!(records.len(), 6);
        let bands: Vec<u32> = records.iter().map(|r| r.band).collect();
        prop_assert_eq!(bands, (0..6).collect::<Vec<u32>>());
    }

    #[test]
    fn union_find_laws(pairs in prop::collection::vec((0u64..50, 0u64..50), 0..100)) {
        let mut uf = UnionFind::new();
        for &(a, b) in &pairs {
            uf.union(a, b);
        }
        for x in 0..50 {
            let root = uf.find(x);
            prop_assert_eq!(uf.find(root), root, "find must be idempotent");
            prop_assert_eq!(uf.root(x), root, "root must agree with find");
        }
    }

    #[test]
    fn star_and_clique_edges_build_the_same_partition(
        groups in prop::collection::vec(prop::collection::btree_set(0u64..40, 2..6), 1..6)
    ) {
        let all_ids: Vec<u64> = (0..40).collect();

        let mut star = UnionFind::new();
        for group in &groups {
            let ids: Vec<u64> = group.iter().copied().collect();
            let root = ids[0];
            for &id in &ids[1..] {
                star.union(root, id);
            }
        }

        let mut clique = UnionFind::new();
        for group in &groups {
            let ids: Vec<u64> = group.iter().copied().collect();
            for i in 0..ids.len() {
                for j in (i + 1)..ids.len() {
                    clique.union(ids[i], ids[j]);
                }
            }
        }

        prop_assert_eq!(partition(&star, &all_ids), partition(&clique, &all_ids));
    }

    #[test]
    fn num_perm_equals_b_times_r_on_every_path(
        num_perm in 8usize..200,
        threshold in 0.2f64..0.9,
    ) {
        let config = DedupConfig {
            num_perm,
            threshold,
            ..DedupConfig::default()
        };
        let params = config.resolve_params().expect("valid config");
        prop_assert_eq!(params.num_perm, params.b * params.r);
        prop_assert!(params.num_perm <= num_perm);
    }

    #[test]
    fn optimizer_respects_the_permutation_budget(
        num_perm in 4usize..256,
        threshold in 0.1f64..0.95,
    ) {
        let (b, r) = optimal_param(threshold, num_perm, 0.5, 0.5);
        prop_assert!(b >= 1 && r >= 1);
        prop_assert!(b * r <= num_perm);
    }
}

proptest! {
    // Whole-pipeline properties run fewer cases; each case embeds a corpus.
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn partition_is_invariant_under_input_order(
        corpus in corpus_strategy(20),
        seed in any::<u64>(),
    ) {
        let ids: Vec<u64> = corpus.iter().map(|(id, _)| *id).collect();

        let mut shuffled = corpus.clone();
        // Deterministic Fisher-Yates driven by the proptest seed.
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }

        let config = test_config();
        let forward = run_full(&config, corpus).expect("run succeeds");
        let reordered = run_full(&config, shuffled).expect("run succeeds");

        prop_assert_eq!(
            partition(&forward.union_find, &ids),
            partition(&reordered.union_find, &ids)
        );
        prop_assert_eq!(forward.summary.after, reordered.summary.after);
    }

    #[test]
    fn results_are_invariant_under_thread_count(corpus in corpus_strategy(20)) {
        let single = run_full(
            &DedupConfig { num_threads: 1, ..test_config() },
            corpus.clone(),
        )
        .expect("run succeeds");
        let multi = run_full(
            &DedupConfig { num_threads: 4, ..test_config() },
            corpus,
        )
        .expect("run succeeds");

        prop_assert_eq!(single.kept, multi.kept);
        prop_assert_eq!(single.summary.edges, multi.summary.edges);
    }
}
