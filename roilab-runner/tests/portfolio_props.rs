//! Property tests for portfolio invariants.
//!
//! 1. Size stays within 1..=5 under any sequence of add/remove operations
//! 2. Ranking returns a permutation of the evaluated set, ordered by the metric

use proptest::prelude::*;
use roilab_core::{GlobalContext, StrategyPreset};
use roilab_runner::{Portfolio, PortfolioError, RankingMetric, SortOrder};

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    RemoveAt(usize),
    UpdateAt(usize, usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..5).prop_map(Op::Add),
        (0usize..8).prop_map(Op::RemoveAt),
        (0usize..8, 0usize..5).prop_map(|(i, p)| Op::UpdateAt(i, p)),
    ]
}

fn arb_metric() -> impl Strategy<Value = RankingMetric> {
    (0usize..RankingMetric::ALL.len()).prop_map(|i| RankingMetric::ALL[i])
}

fn arb_order() -> impl Strategy<Value = SortOrder> {
    prop::bool::ANY.prop_map(|asc| {
        if asc {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    })
}

fn preset_key(i: usize) -> &'static str {
    StrategyPreset::ALL[i].key()
}

proptest! {
    #[test]
    fn size_stays_within_bounds(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut p = Portfolio::new(GlobalContext::default(), "balanced").unwrap();
        for op in ops {
            let before = p.len();
            match op {
                Op::Add(i) => match p.add_strategy(preset_key(i)) {
                    Ok(_) => prop_assert_eq!(p.len(), before + 1),
                    Err(e) => {
                        prop_assert_eq!(e, PortfolioError::CapacityExceeded { capacity: 5 });
                        prop_assert_eq!(before, 5);
                    }
                },
                Op::RemoveAt(i) => {
                    if let Some(id) = p.strategies().get(i).map(|s| s.id) {
                        match p.remove_strategy(id) {
                            Ok(_) => prop_assert_eq!(p.len(), before - 1),
                            Err(e) => {
                                prop_assert_eq!(e, PortfolioError::MinimumStrategyViolation);
                                prop_assert_eq!(before, 1);
                            }
                        }
                    }
                }
                Op::UpdateAt(i, preset) => {
                    if let Some(id) = p.strategies().get(i).map(|s| s.id) {
                        p.update_strategy(id, preset_key(preset)).unwrap();
                        prop_assert_eq!(p.strategies()[i].id, id);
                    }
                }
            }
            prop_assert!((1..=Portfolio::CAPACITY).contains(&p.len()));
        }
    }

    #[test]
    fn ranking_is_ordered_permutation(
        presets in prop::collection::vec(0usize..5, 1..=5),
        metric in arb_metric(),
        order in arb_order(),
    ) {
        let mut p = Portfolio::new(GlobalContext::default(), preset_key(presets[0])).unwrap();
        for &i in &presets[1..] {
            p.add_strategy(preset_key(i)).unwrap();
        }

        let ranked = p.rank_by(metric, order).unwrap();
        prop_assert_eq!(ranked.len(), p.len());

        let mut ranked_ids: Vec<_> = ranked.iter().map(|r| r.id()).collect();
        ranked_ids.sort();
        let mut ids: Vec<_> = p.strategies().iter().map(|s| s.id).collect();
        ids.sort();
        prop_assert_eq!(ranked_ids, ids);

        for w in ranked.windows(2) {
            let (a, b) = (metric.extract(&w[0]), metric.extract(&w[1]));
            match order {
                SortOrder::Ascending => prop_assert!(a <= b),
                SortOrder::Descending => prop_assert!(a >= b),
            }
        }
    }
}
