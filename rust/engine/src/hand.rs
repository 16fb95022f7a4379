use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};
use crate::errors::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        };
        f.write_str(name)
    }
}

/// Strength of the best five-card hand.
///
/// Field order matters: the derived `Ord` compares the category first and then
/// the tie-break ranks lexicographically, which is exactly showdown order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks, unused slots are 0
    pub kickers: [u8; 5],
}

/// Evaluates 5 to 7 distinct cards and returns the rank of the best 5-card hand.
///
/// # Errors
///
/// [`GameError::NotEnoughCards`], [`GameError::TooManyCards`] or
/// [`GameError::DuplicateCard`] when the input is not a valid hand.
///
/// # Examples
///
/// ```
/// use arena_engine::cards::parse_cards;
/// use arena_engine::hand::{evaluate, Category};
///
/// let cards = parse_cards("AS KS QS JS TS 2H 3D").unwrap();
/// assert_eq!(evaluate(&cards).unwrap().category, Category::RoyalFlush);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandRank, GameError> {
    if cards.len() < 5 {
        return Err(GameError::NotEnoughCards(cards.len()));
    }
    if cards.len() > 7 {
        return Err(GameError::TooManyCards(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    for c in cards {
        if !seen.insert(*c) {
            return Err(GameError::DuplicateCard(c.to_string()));
        }
    }
    Ok(evaluate_unchecked(cards))
}

pub fn compare_hands(a: &HandRank, b: &HandRank) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Returns the five cards that make up the best hand, strongest first.
pub fn best_five(cards: &[Card]) -> Result<Vec<Card>, GameError> {
    let best = evaluate(cards)?;
    let n = cards.len();
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        if evaluate_unchecked(&five) == best {
                            let mut v = five.to_vec();
                            v.sort_unstable_by(|x, y| y.cmp(x));
                            return Ok(v);
                        }
                    }
                }
            }
        }
    }
    // a 5..=7 card input always contains its own best five
    unreachable!("best hand not found among subsets")
}

fn evaluate_unchecked(cards: &[Card]) -> HandRank {
    // Count ranks and suits
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut by_suit_mask: [u16; 4] = [0; 4];
    let mut suit_counts = [0u8; 4];
    let mut rank_mask: u16 = 0;
    for &c in cards.iter() {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit_mask[s] |= 1u16 << r;
    }

    let flush_suit = suit_counts.iter().position(|&count| count >= 5);

    // Straight flush only counts when the straight lives inside the flush suit
    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(by_suit_mask[s]) {
            let category = if high == 14 {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
            return HandRank {
                category,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandRank {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandRank {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    if let Some(s) = flush_suit {
        let ranks = ranks_desc_from_mask(by_suit_mask[s]);
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks[..5]);
        return HandRank {
            category: Category::Flush,
            kickers: k,
        };
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return HandRank {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    let (trips, pairs, singles) = classify_multiples(&rank_counts);
    if let Some(&t) = trips.first() {
        let k = with_kickers(&[t], &singles, 2);
        return HandRank {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }
    if pairs.len() >= 2 {
        // a third pair can still play as the kicker
        let mut rest: Vec<u8> = pairs[2..].to_vec();
        rest.extend_from_slice(&singles);
        rest.sort_unstable_by(|a, b| b.cmp(a));
        let k = with_kickers(&[pairs[0], pairs[1]], &rest, 1);
        return HandRank {
            category: Category::TwoPair,
            kickers: k,
        };
    }
    if let Some(&p) = pairs.first() {
        let k = with_kickers(&[p], &singles, 3);
        return HandRank {
            category: Category::Pair,
            kickers: k,
        };
    }

    HandRank {
        category: Category::HighCard,
        kickers: with_kickers(&[], &singles, 5),
    }
}

fn with_kickers(made: &[u8], rest_desc: &[u8], take: usize) -> [u8; 5] {
    let mut k = [0u8; 5];
    for (slot, &r) in k.iter_mut().zip(made.iter().chain(rest_desc.iter().take(take))) {
        *slot = r;
    }
    k
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn ranks_desc_from_mask(mask: u16) -> Vec<u8> {
    (2..=14u8).rev().filter(|r| mask & (1 << r) != 0).collect()
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low for the wheel
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u16).rev() {
        let window = 0b11111u16 << (high - 4);
        if (m & window) == window {
            return Some(high as u8);
        }
    }
    None
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    let &t = trips.first()?;
    // the pair part is the best of: a second set of trips, or the top pair
    let pair = trips.get(1).copied().into_iter().chain(pairs.first().copied()).max()?;
    Some((t, pair))
}

/// Splits ranks into (trips, pairs, singles), each ordered high -> low.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn rank_of(text: &str) -> HandRank {
        evaluate(&parse_cards(text).unwrap()).unwrap()
    }

    #[test]
    fn wheel_is_five_high() {
        let r = rank_of("AS 2D 3C 4H 5S KD 9C");
        assert_eq!(r.category, Category::Straight);
        assert_eq!(r.kickers[0], 5);
    }

    #[test]
    fn steel_wheel_is_straight_flush_not_royal() {
        let r = rank_of("AH 2H 3H 4H 5H KD 9C");
        assert_eq!(r.category, Category::StraightFlush);
        assert_eq!(r.kickers[0], 5);
    }

    #[test]
    fn flush_plus_offsuit_straight_is_only_a_flush() {
        // straight 5-9 uses the offsuit 9, flush is hearts
        let r = rank_of("5H 6H 7H 8H 9C 2H KD");
        assert_eq!(r.category, Category::Flush);
        assert_eq!(r.kickers, [8, 7, 6, 5, 2]);
    }

    #[test]
    fn two_trips_make_a_full_house() {
        let r = rank_of("KS KD KC 9S 9D 9C 2H");
        assert_eq!(r.category, Category::FullHouse);
        assert_eq!(&r.kickers[..2], &[13, 9]);
    }

    #[test]
    fn third_pair_can_be_the_kicker() {
        let r = rank_of("AS AD KC KS QD QC 2H");
        assert_eq!(r.category, Category::TwoPair);
        assert_eq!(&r.kickers[..3], &[14, 13, 12]);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            evaluate(&parse_cards("AS KS QS JS").unwrap()),
            Err(GameError::NotEnoughCards(4))
        );
        assert!(matches!(
            evaluate(&parse_cards("AS AS QS JS TS").unwrap()),
            Err(GameError::DuplicateCard(_))
        ));
    }

    #[test]
    fn best_five_picks_the_flush_cards() {
        let cards = parse_cards("5H 6H 7H 8H 9C 2H KD").unwrap();
        let five = best_five(&cards).unwrap();
        assert_eq!(five.len(), 5);
        assert!(five.iter().all(|c| c.suit == Suit::Hearts));
    }
}
