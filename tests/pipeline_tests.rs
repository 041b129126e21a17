//! End-to-end pipeline tests.
//!
//! These exercise the full load -> filter -> embed -> band -> group ->
//! union -> keep -> save flow on small literal corpora, plus union-find
//! persistence against a real filesystem.

use text_dedup::{run_full, DedupConfig, DedupError, UnionFind};

fn docs(texts: &[(u64, &str)]) -> Vec<(u64, String)> {
    texts.iter().map(|(id, t)| (*id, (*t).to_string())).collect()
}

/// Deterministic config matching the scenario defaults: 64 permutations in
/// 16 bands of 4 rows, token bigrams, no minimum length.
fn base_config() -> DedupConfig {
    DedupConfig::builder()
        .num_perm(64)
        .bands(16, 4)
        .ngram(2)
        .min_length(0)
        .deterministic(true)
        .num_threads(2)
        .build()
}

// ============================================================================
// Literal scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn identical_documents_collapse_to_one_cluster() {
        let corpus = docs(&[
            (1, "hello world foo bar"),
            (2, "hello world foo bar"),
            (3, "hello world foo bar"),
        ]);
        let output = run_full(&base_config(), corpus).expect("run succeeds");

        assert_eq!(output.summary.before, 3);
        assert_eq!(output.summary.after, 1);
        assert_eq!(output.summary.edges, 2);
        assert_eq!(output.kept, vec![1]);

        let root = output.union_find.root(1);
        assert_eq!(output.union_find.root(2), root);
        assert_eq!(output.union_find.root(3), root);
    }

    #[test]
    fn disjoint_documents_stay_apart() {
        let corpus = docs(&[(1, "alpha beta gamma"), (2, "one two three")]);
        let output = run_full(&base_config(), corpus).expect("run succeeds");

        assert_eq!(output.summary.before, 2);
        assert_eq!(output.summary.after, 2);
        assert_eq!(output.summary.edges, 0);
        assert_eq!(output.kept, vec![1, 2]);
    }

    #[test]
    fn near_duplicates_merge() {
        let corpus = docs(&[
            (1, "the quick brown fox jumps over the lazy dog"),
            (2, "the quick brown fox leaps over the lazy dog"),
        ]);
        let config = DedupConfig::builder()
            .num_perm(256)
            .bands(64, 4)
            .ngram(2)
            .deterministic(true)
            .build();
        let output = run_full(&config, corpus).expect("run succeeds");

        assert_eq!(output.summary.after, 1, "one-word edit should merge");
        assert_eq!(output.kept, vec![1]);
    }

    #[test]
    fn min_length_filter_drops_short_documents() {
        let corpus = docs(&[
            (1, "the quick brown fox jumps over the lazy dog"),
            (7, "a b"),
        ]);
        let config = DedupConfig {
            min_length: 5,
            ..base_config()
        };
        let output = run_full(&config, corpus).expect("run succeeds");

        // The short document never entered the pipeline.
        assert_eq!(output.summary.before, 1);
        assert_eq!(output.kept, vec![1]);
        assert!(!output.union_find.contains(7));
    }

    #[test]
    fn deterministic_runs_produce_identical_dumps() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let corpus = &[
            (1u64, "hello world foo bar"),
            (2, "hello world foo bar"),
            (5, "something else entirely different"),
        ];

        let mut dumps = Vec::new();
        for name in ["uf1.json", "uf2.json"] {
            let path = dir.path().join(name);
            let config = DedupConfig {
                uf_output: Some(path.clone()),
                ..base_config()
            };
            run_full(&config, docs(corpus)).expect("run succeeds");
            dumps.push(std::fs::read(&path).expect("read dump"));
        }
        assert_eq!(dumps[0], dumps[1], "dumps must be byte-identical");
    }

    #[test]
    fn empty_corpus_is_a_clean_no_op() {
        let output = run_full(&base_config(), Vec::new()).expect("run succeeds");
        assert_eq!(output.summary.before, 0);
        assert_eq!(output.summary.after, 0);
        assert_eq!(output.summary.edges, 0);
        assert!(output.kept.is_empty());
        assert!(output.union_find.is_empty());
    }
}

// ============================================================================
// Summary semantics
// ============================================================================

mod summary {
    use super::*;

    #[test]
    fn elapsed_phases_are_recorded_in_order() {
        let corpus = docs(&[(1, "a few words here"), (2, "a few words here")]);
        let config = DedupConfig {
            min_length: 1,
            ..base_config()
        };
        let summary = text_dedup::run(&config, corpus).expect("run succeeds");

        let keys: Vec<&str> = summary.elapsed_ms.keys().map(String::as_str).collect();
        let expected = ["load", "filter", "embed", "band", "group", "union", "keep"];
        for phase in expected {
            assert!(keys.contains(&phase), "missing phase {phase}: {keys:?}");
        }
        // Load always comes first.
        assert_eq!(keys[0], "load");
    }

    #[test]
    fn keep_set_preserves_input_order() {
        let corpus = docs(&[
            (9, "first unique document text"),
            (2, "second unique document body"),
            (5, "third unique piece of writing"),
        ]);
        let output = run_full(&base_config(), corpus).expect("run succeeds");
        assert_eq!(output.kept, vec![9, 2, 5]);
    }

    #[test]
    fn invalid_config_is_rejected_before_any_work() {
        let config = DedupConfig::builder().num_perm(64).bands(16, 5).build();
        let err = text_dedup::run(&config, docs(&[(1, "hello world")])).unwrap_err();
        assert!(matches!(err, DedupError::Config(_)), "got {err:?}");
    }
}

// ============================================================================
// Cancellation
// ============================================================================

mod cancellation {
    use super::*;
    use text_dedup::{run_with_cancellation, CancellationToken};

    #[test]
    fn pre_cancelled_token_aborts_without_output() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let uf_path = dir.path().join("uf.json");
        let config = DedupConfig {
            uf_output: Some(uf_path.clone()),
            ..base_config()
        };

        let token = CancellationToken::new();
        token.cancel();
        let err = run_with_cancellation(&config, docs(&[(1, "hello world")]), &token).unwrap_err();

        assert!(matches!(err, DedupError::Cancelled));
        assert!(!uf_path.exists(), "no partial output may be written");
    }
}

// ============================================================================
// Union-find persistence
// ============================================================================

mod persistence {
    use super::*;

    #[test]
    fn dump_then_load_preserves_all_roots() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("uf.json");

        let corpus = docs(&[
            (1, "hello world foo bar"),
            (2, "hello world foo bar"),
            (3, "completely different text body"),
            (4, "completely different text body"),
        ]);
        let config = DedupConfig {
            uf_output: Some(path.clone()),
            ..base_config()
        };
        let output = run_full(&config, corpus).expect("run succeeds");

        let loaded = UnionFind::load(&path).expect("load succeeds");
        for (id, root) in output.union_find.iter() {
            assert_eq!(loaded.root(id), root, "root mismatch for {id}");
        }
    }

    #[test]
    fn dump_uses_decimal_string_keys() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("uf.json");

        let corpus = docs(&[(10, "hello world foo bar"), (20, "hello world foo bar")]);
        let config = DedupConfig {
            uf_output: Some(path.clone()),
            ..base_config()
        };
        run_full(&config, corpus).expect("run succeeds");

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read dump"))
                .expect("valid JSON");
        let parent = value["parent"].as_object().expect("parent object");
        assert_eq!(parent["20"], 10);
    }
}
