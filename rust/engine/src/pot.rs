//! Pot layering and payout.
//!
//! Pots are rebuilt from each seat's cumulative hand contribution. Every
//! distinct contribution level of a player still in the hand closes a layer;
//! a layer holds what every seat put in between the previous level and this
//! one, and only in-hand seats that reached the level may win it. The first
//! layer is the main pot, the rest are side pots.

use serde::{Deserialize, Serialize};

use crate::hand::HandRank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotLayer {
    pub amount: u32,
    /// Seats that may win this layer, ascending
    pub eligible: Vec<usize>,
}

/// Outcome of one layer at settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub amount: u32,
    pub eligible: Vec<usize>,
    /// (seat, chips won) in payout order
    pub winners: Vec<(usize, u32)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PotManager {
    layers: Vec<PotLayer>,
}

impl PotManager {
    /// Builds layers from per-seat contributions where `in_hand[seat]` says
    /// whether the seat can still win chips (not folded).
    pub fn from_table(contributions: &[u32], in_hand: &[bool]) -> Self {
        debug_assert_eq!(contributions.len(), in_hand.len());
        let mut levels: Vec<u32> = contributions
            .iter()
            .zip(in_hand)
            .filter(|&(&c, &live)| live && c > 0)
            .map(|(&c, _)| c)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut layers = Vec::with_capacity(levels.len());
        let mut prev = 0u32;
        for &level in &levels {
            let amount: u32 = contributions
                .iter()
                .map(|&c| c.min(level) - c.min(prev))
                .sum();
            let eligible: Vec<usize> = (0..contributions.len())
                .filter(|&s| in_hand[s] && contributions[s] >= level)
                .collect();
            layers.push(PotLayer { amount, eligible });
            prev = level;
        }

        // Chips a folded seat put in above every live level still belong to the pot
        let dead_above: u32 = contributions.iter().map(|&c| c.saturating_sub(prev)).sum();
        if dead_above > 0 {
            match layers.last_mut() {
                Some(top) => top.amount += dead_above,
                None => layers.push(PotLayer {
                    amount: dead_above,
                    eligible: (0..in_hand.len()).filter(|&s| in_hand[s]).collect(),
                }),
            }
        }

        Self { layers }
    }

    /// Convenience for tests and tools: every contributor is still in the hand.
    pub fn from_contributions<I: IntoIterator<Item = u32>>(contributions: I) -> Self {
        let contributions: Vec<u32> = contributions.into_iter().collect();
        let in_hand = vec![true; contributions.len()];
        Self::from_table(&contributions, &in_hand)
    }

    pub fn layers(&self) -> &[PotLayer] {
        &self.layers
    }

    pub fn main_pot(&self) -> u32 {
        self.layers.first().map(|l| l.amount).unwrap_or(0)
    }

    pub fn side_pots(&self) -> Vec<u32> {
        self.layers.iter().skip(1).map(|l| l.amount).collect()
    }

    pub fn total(&self) -> u32 {
        self.layers.iter().map(|l| l.amount).sum()
    }

    /// Awards every layer.
    ///
    /// `ranks[seat]` is the seat's showdown hand (ignored for uncontested
    /// layers). `seat_order` lists seats starting left of the button; tied
    /// winners are paid in that order and the first one takes the odd chips.
    pub fn distribute(&self, ranks: &[Option<HandRank>], seat_order: &[usize]) -> Vec<PotAward> {
        self.layers
            .iter()
            .map(|layer| {
                let winners = layer_winners(layer, ranks, seat_order);
                let n = winners.len() as u32;
                let share = layer.amount / n;
                let remainder = layer.amount % n;
                let winners = winners
                    .iter()
                    .enumerate()
                    .map(|(i, &seat)| (seat, if i == 0 { share + remainder } else { share }))
                    .collect();
                PotAward {
                    amount: layer.amount,
                    eligible: layer.eligible.clone(),
                    winners,
                }
            })
            .collect()
    }
}

fn layer_winners(layer: &PotLayer, ranks: &[Option<HandRank>], seat_order: &[usize]) -> Vec<usize> {
    let ordered: Vec<usize> = seat_order
        .iter()
        .copied()
        .filter(|s| layer.eligible.contains(s))
        .collect();
    if ordered.len() <= 1 {
        return ordered;
    }
    let best = ordered.iter().filter_map(|&s| ranks.get(s).copied().flatten()).max();
    ordered
        .into_iter()
        .filter(|&s| ranks.get(s).copied().flatten() == best)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Category;

    fn rank(category: Category, top: u8) -> Option<HandRank> {
        Some(HandRank {
            category,
            kickers: [top, 0, 0, 0, 0],
        })
    }

    #[test]
    fn folded_chips_stay_in_the_layers() {
        // seat 1 folded after putting in 50
        let pm = PotManager::from_table(&[100, 50, 100], &[true, false, true]);
        assert_eq!(pm.layers().len(), 1);
        assert_eq!(pm.main_pot(), 250);
        assert_eq!(pm.layers()[0].eligible, vec![0, 2]);
    }

    #[test]
    fn folded_overbet_goes_to_top_layer() {
        let pm = PotManager::from_table(&[40, 200, 40], &[true, false, true]);
        assert_eq!(pm.total(), 280);
        assert_eq!(pm.layers().len(), 1);
    }

    #[test]
    fn odd_chip_goes_to_first_winner_in_seat_order() {
        let pm = PotManager::from_contributions([35, 35, 35]);
        let ranks = vec![
            rank(Category::Straight, 9),
            rank(Category::Straight, 9),
            rank(Category::Pair, 4),
        ];
        // seat 1 sits left of the button
        let awards = pm.distribute(&ranks, &[1, 2, 0]);
        assert_eq!(awards[0].winners, vec![(1, 53), (0, 52)]);
    }

    #[test]
    fn uncalled_excess_returns_to_bettor() {
        let pm = PotManager::from_contributions([300, 100]);
        let ranks = vec![rank(Category::HighCard, 9), rank(Category::Flush, 14)];
        let awards = pm.distribute(&ranks, &[0, 1]);
        assert_eq!(awards[0].winners, vec![(1, 200)]);
        assert_eq!(awards[1].winners, vec![(0, 200)]);
    }
}
