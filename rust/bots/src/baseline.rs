//! Deterministic rule-based bot.
//!
//! Preflop it rates the starting hand, postflop it rates the made hand, and
//! facing a bet it weighs the rating against pot odds. No randomness, so it is
//! a stable yardstick for other strategies.

use arena_engine::bot::{Bot, BotError};
use arena_engine::cards::Card;
use arena_engine::game::{GameState, HandResult};
use arena_engine::player::{Action, ActionKind};

use crate::info::{made_hand_strength, position_info, pot_odds};

/// Reference strategy.
///
/// **Preflop:** premium hands raise, medium hands call cheap bets (and open
/// from late position), weak hands fold to a raise and check when free.
///
/// **Postflop:** two pair or better bets and calls, one pair checks or calls
/// small bets, everything else leans on pot odds.
///
/// # Example
///
/// ```rust
/// use arena_bots::baseline::BaselineBot;
/// use arena_engine::bot::Bot;
///
/// let bot = BaselineBot::new("base");
/// assert_eq!(bot.name(), "base");
/// ```
#[derive(Debug, Clone)]
pub struct BaselineBot {
    name: String,
}

impl BaselineBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Preflop hand strength on a 0-10 scale.
    ///
    /// - 9-10: premium (AA-JJ, AKs)
    /// - 7-8: strong (TT-99, AK, AQ, KQs)
    /// - 5-6: medium (88-77, AJ, suited connectors)
    /// - 3-4: marginal (66-22, Ax, suited cards)
    /// - 0-2: weak offsuit cards
    pub(crate) fn preflop_strength(hole: &[Card; 2]) -> u8 {
        let r1 = hole[0].rank.value();
        let r2 = hole[1].rank.value();
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = hole[0].suit == hole[1].suit;
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    5
                } else {
                    4
                }
            }
            // broadway
            _ if high >= 11 && low >= 9 => 4,
            _ => 2,
        }
    }

    fn decide(
        strength: u8,
        late: bool,
        state: &GameState,
        to_call: u32,
        legal: &[ActionKind],
        min_bet: u32,
        max_bet: u32,
    ) -> Action {
        let can = |k: ActionKind| legal.contains(&k);
        let pot = state.pot;

        if to_call == 0 {
            let target = match strength {
                9..=10 => Some(state.current_bet + pot * 2 / 3),
                7..=8 => Some(state.current_bet + pot / 2),
                5..=6 if late => Some(state.current_bet + pot / 3),
                _ => None,
            };
            return match target {
                Some(t) if can(ActionKind::Raise) => Action::Raise(t.clamp(min_bet, max_bet)),
                _ => Action::Check,
            };
        }

        if !can(ActionKind::Call) {
            // not enough behind to call
            return if strength >= 7 && can(ActionKind::AllIn) {
                Action::AllIn
            } else {
                Action::Fold
            };
        }

        let odds = pot_odds(pot, to_call);
        match strength {
            9..=10 if can(ActionKind::Raise) => {
                Action::Raise((state.current_bet + pot / 2).clamp(min_bet, max_bet))
            }
            7..=10 => Action::Call,
            5..=6 if odds >= 0.3 || to_call <= pot / 4 => Action::Call,
            3..=4 if odds >= 0.4 || to_call <= pot / 6 => Action::Call,
            _ => Action::Fold,
        }
    }
}

impl Bot for BaselineBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_action(
        &mut self,
        state: &GameState,
        hole_cards: &[Card; 2],
        legal: &[ActionKind],
        min_bet: u32,
        max_bet: u32,
    ) -> Result<Action, BotError> {
        let strength = made_hand_strength(hole_cards, &state.community_cards)
            .unwrap_or_else(|| Self::preflop_strength(hole_cards));
        let late = position_info(state, &self.name).is_some_and(|p| p.is_late());
        let to_call = state.to_call(&self.name);
        Ok(Self::decide(strength, late, state, to_call, legal, min_bet, max_bet))
    }

    fn hand_complete(&mut self, _state: &GameState, _result: &HandResult) -> Result<(), BotError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::cards::parse_cards;

    fn hole(text: &str) -> [Card; 2] {
        let cards = parse_cards(text).unwrap();
        [cards[0], cards[1]]
    }

    #[test]
    fn preflop_strength_premium_pairs() {
        assert_eq!(BaselineBot::preflop_strength(&hole("AH AS")), 10);
        assert_eq!(BaselineBot::preflop_strength(&hole("KH KS")), 10);
    }

    #[test]
    fn preflop_strength_ace_king() {
        assert_eq!(BaselineBot::preflop_strength(&hole("AH KH")), 10);
        assert_eq!(BaselineBot::preflop_strength(&hole("AH KS")), 8);
    }

    #[test]
    fn preflop_strength_weak_hands() {
        assert!(BaselineBot::preflop_strength(&hole("7H 2S")) <= 3);
    }

    fn state(pot: u32, current_bet: u32) -> GameState {
        GameState {
            hand_number: 1,
            round: arena_engine::game::Round::Preflop,
            pot,
            community_cards: Vec::new(),
            current_bet,
            min_raise: current_bet * 2,
            player_chips: Default::default(),
            player_bets: Default::default(),
            active_players: vec!["a".into(), "b".into(), "c".into()],
            current_player: Some("c".into()),
            dealer: "c".into(),
            small_blind: 10,
            big_blind: 20,
        }
    }

    #[test]
    fn medium_hand_opens_only_from_late_position() {
        let legal = [ActionKind::Check, ActionKind::Raise, ActionKind::AllIn];
        let s = state(60, 0);
        assert_eq!(BaselineBot::decide(5, false, &s, 0, &legal, 20, 1000), Action::Check);
        assert_eq!(BaselineBot::decide(5, true, &s, 0, &legal, 20, 1000), Action::Raise(20));
    }

    #[test]
    fn weak_hand_folds_to_a_big_bet() {
        let legal = [ActionKind::Fold, ActionKind::Call, ActionKind::Raise];
        let s = state(60, 200);
        assert_eq!(BaselineBot::decide(1, false, &s, 200, &legal, 400, 1000), Action::Fold);
    }

    #[test]
    fn suited_connectors() {
        let strength = BaselineBot::preflop_strength(&hole("9H 8H"));
        assert!((4..=6).contains(&strength));
    }
}
