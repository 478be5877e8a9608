use bugloc_core::types::*;
use bugloc_fusion::{combine, combine_all, normalize};
use proptest::prelude::*;

fn make_signals(raw: &[(f64, f64, f64, f64)]) -> CandidateSignals {
    let mut out = CandidateSignals::default();
    for (i, &(code, bug, stack, commit)) in raw.iter().enumerate() {
        let id = CandidateId::new(i as i64);
        out.insert(
            id,
            SignalRecord::new(
                BugId::from(1),
                id,
                SignalScores {
                    code_similarity: code,
                    bug_similarity: bug,
                    stack_trace: stack,
                    commit_log: commit,
                },
            ),
        );
    }
    out
}

fn arb_raw() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (0.0f64..50.0, 0.0f64..5.0, 0.0f64..1.0, 0.0f64..1.0)
}

fn arb_weights() -> impl Strategy<Value = FusionWeights> {
    (0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(a, b)| FusionWeights::new(a, b).unwrap())
}

// ── Normalization range ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn normalized_values_stay_in_unit_interval(raw in prop::collection::vec(arb_raw(), 2..40)) {
        let mut records = make_signals(&raw);
        normalize(&mut records);
        for r in records.values() {
            prop_assert!((0.0..=1.0).contains(&r.normalized_code));
            prop_assert!((0.0..=1.0).contains(&r.normalized_bug));
        }
    }

    #[test]
    fn extremes_map_to_zero_and_one(raw in prop::collection::vec(arb_raw(), 2..40)) {
        let mut records = make_signals(&raw);
        let bounds = normalize(&mut records);
        let code = bounds.code.unwrap();
        prop_assume!(code.max > code.min);

        for r in records.values() {
            if r.signals.code_similarity == code.max {
                prop_assert_eq!(r.normalized_code, 1.0);
            }
            if r.signals.code_similarity == code.min {
                prop_assert_eq!(r.normalized_code, 0.0);
            }
        }
    }
}

// ── Degenerate range ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn all_equal_scores_normalize_to_zero(
        code in 0.0f64..50.0,
        bug in 0.0f64..5.0,
        n in 1usize..20,
    ) {
        let raw: Vec<_> = (0..n).map(|i| (code, bug, 0.1 * i as f64, 0.5)).collect();
        let mut records = make_signals(&raw);
        let bounds = normalize(&mut records);
        prop_assert!(bounds.code_degenerate);
        prop_assert!(bounds.bug_degenerate);
        for r in records.values() {
            prop_assert_eq!(r.normalized_code, 0.0);
            prop_assert_eq!(r.normalized_bug, 0.0);
        }
    }
}

// ── Gate ─────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn no_text_relevance_means_zero_final(
        raw in prop::collection::vec(arb_raw(), 1..30),
        weights in arb_weights(),
    ) {
        let mut records = make_signals(&raw);
        normalize(&mut records);
        combine_all(&mut records, weights);
        for r in records.values() {
            if r.fused_intermediate <= 0.0 {
                prop_assert_eq!(r.fused_final, 0.0);
            }
        }
    }
}

// ── Weight boundaries ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn weight_boundaries_select_single_signals(
        nc in 0.0f64..=1.0,
        nb in 0.0f64..=1.0,
        stack in 0.0f64..1.0,
        commit in 0.0f64..1.0,
    ) {
        let mut r = SignalRecord::new(
            BugId::from(1),
            CandidateId::new(1),
            SignalScores { code_similarity: 0.0, bug_similarity: 0.0, stack_trace: stack, commit_log: commit },
        );
        r.normalized_code = nc;
        r.normalized_bug = nb;

        combine(&mut r, FusionWeights::new(0.0, 0.0).unwrap());
        prop_assert_eq!(r.fused_intermediate, nc);
        if nc > 0.0 {
            prop_assert_eq!(r.fused_final, nc + stack);
        }

        combine(&mut r, FusionWeights::new(1.0, 1.0).unwrap());
        prop_assert_eq!(r.fused_intermediate, nb);
        if nb > 0.0 {
            prop_assert_eq!(r.fused_final, commit);
        }
    }
}

// ── Idempotence ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn repeated_passes_give_identical_scores(
        raw in prop::collection::vec(arb_raw(), 1..30),
        weights in arb_weights(),
    ) {
        let mut first = make_signals(&raw);
        normalize(&mut first);
        combine_all(&mut first, weights);

        // Second pass starts from the already-derived records.
        let mut second = first.clone();
        normalize(&mut second);
        combine_all(&mut second, weights);

        for (id, r) in &first {
            let s = &second[id];
            prop_assert_eq!(r.normalized_code, s.normalized_code);
            prop_assert_eq!(r.normalized_bug, s.normalized_bug);
            prop_assert_eq!(r.fused_final, s.fused_final);
        }
    }
}
