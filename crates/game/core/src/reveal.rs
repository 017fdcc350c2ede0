//! Daily pack drawing.
//!
//! A reveal is two-phase: [`draw_pack`] picks which legends today's pack
//! contains without touching any state, the runtime generates one image per
//! legend, and only then does
//! [`PlayerCollection::commit_reveal`](crate::collection::PlayerCollection::commit_reveal)
//! mutate the collection. A failed image generation therefore never
//! consumes the daily allowance.

use crate::catalog::Legend;
use crate::collection::PlayerCollection;
use crate::rng::{RngOracle, mix_seed};

/// Cards revealed per daily pack.
pub const DAILY_PACK_SIZE: usize = 3;

/// Draw context distinguishing successive picks within one pack.
const DRAW_CONTEXT_BASE: u32 = 0;

/// Pick up to [`DAILY_PACK_SIZE`] legends uniformly at random, without
/// replacement, from the owner's still-uncollected slots.
///
/// Fewer than three uncollected legends yields exactly that many; a
/// completed collection yields an empty draw. The draw is a partial
/// Fisher–Yates over the uncollected set, so one pack can never contain
/// the same legend twice.
pub fn draw_pack(
    collection: &PlayerCollection,
    rng: &dyn RngOracle,
    seed: u64,
) -> Vec<Legend> {
    let mut pool = collection.uncollected();
    let take = DAILY_PACK_SIZE.min(pool.len());

    for i in 0..take {
        let remaining = (pool.len() - i) as u32;
        let offset = rng.pick(
            mix_seed(seed, i as u64, DRAW_CONTEXT_BASE),
            remaining,
        ) as usize;
        pool.swap(i, i + offset);
    }
    pool.truncate(take);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::catalog::tests::sample_catalog;
    use crate::catalog::LegendId;
    use crate::rng::PcgRng;

    #[test]
    fn draws_three_distinct_uncollected_legends() {
        let catalog = sample_catalog(100);
        let collection = PlayerCollection::new(&catalog);

        for seed in 0..50u64 {
            let pack = draw_pack(&collection, &PcgRng, seed);
            assert_eq!(pack.len(), DAILY_PACK_SIZE);
            assert_ne!(pack[0].id, pack[1].id);
            assert_ne!(pack[0].id, pack[2].id);
            assert_ne!(pack[1].id, pack[2].id);
        }
    }

    #[test]
    fn never_draws_an_already_collected_legend() {
        let catalog = sample_catalog(10);
        let mut collection = PlayerCollection::new(&catalog);
        collection.prefill((1..=7).map(LegendId), |l| format!("mem://{}", l.id.0));

        for seed in 0..50u64 {
            let pack = draw_pack(&collection, &PcgRng, seed);
            assert_eq!(pack.len(), 3);
            for legend in &pack {
                assert!(!collection.owns(legend.id));
            }
        }
    }

    #[test]
    fn short_draw_when_fewer_than_three_remain() {
        let catalog = sample_catalog(10);
        let mut collection = PlayerCollection::new(&catalog);
        collection.prefill((1..=8).map(LegendId), |l| format!("mem://{}", l.id.0));

        let pack = draw_pack(&collection, &PcgRng, 1);
        assert_eq!(pack.len(), 2);
    }

    #[test]
    fn completed_collection_draws_nothing() {
        let catalog = sample_catalog(4);
        let mut collection = PlayerCollection::new(&catalog);
        collection.prefill((1..=4).map(LegendId), |l| format!("mem://{}", l.id.0));

        assert!(draw_pack(&collection, &PcgRng, 1).is_empty());
    }

    #[test]
    fn same_seed_replays_the_same_pack() {
        let catalog = sample_catalog(100);
        let collection = PlayerCollection::new(&catalog);

        let a = draw_pack(&collection, &PcgRng, 99);
        let b = draw_pack(&collection, &PcgRng, 99);
        assert_eq!(a, b);
    }

    #[test]
    fn all_legends_reachable_over_many_seeds() {
        let catalog = sample_catalog(10);
        let collection = PlayerCollection::new(&catalog);

        let mut seen = std::collections::BTreeSet::new();
        for seed in 0..200u64 {
            for legend in draw_pack(&collection, &PcgRng, seed) {
                seen.insert(legend.id);
            }
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn committed_pack_matches_scenario_of_a_fresh_album() {
        // Fresh collection over a 100-legend catalog: the first committed
        // pack fills three distinct slots and logs three cards.
        let catalog = sample_catalog(100);
        let mut collection = PlayerCollection::new(&catalog);
        let today = "2024-01-01".parse().unwrap();

        let pack = draw_pack(&collection, &PcgRng, 7);
        let cards: Vec<Card> = pack
            .into_iter()
            .map(|legend| {
                let url = format!("mem://gen/{}", legend.id.0);
                Card::new(legend, url)
            })
            .collect();
        collection.commit_reveal(cards, today);

        assert_eq!(collection.filled_count(), 3);
        assert_eq!(collection.inventory.len(), 3);
        assert!(!collection.can_reveal(today));
    }
}
