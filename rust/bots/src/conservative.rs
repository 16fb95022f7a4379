use tracing::debug;

use arena_engine::bot::{Bot, BotError};
use arena_engine::cards::{Card, Rank};
use arena_engine::game::{GameState, HandResult};
use arena_engine::player::{Action, ActionKind};

use crate::info::pot_fraction_raise;

/// Unpaired starting hands worth playing.
const PREMIUM: [(Rank, Rank); 6] = [
    (Rank::Ace, Rank::King),
    (Rank::Ace, Rank::Queen),
    (Rank::Ace, Rank::Jack),
    (Rank::King, Rank::Queen),
    (Rank::King, Rank::Jack),
    (Rank::Queen, Rank::Jack),
];

/// Tight bot: plays nines or better and a handful of big unpaired hands,
/// folds everything else.
#[derive(Debug)]
pub struct ConservativeBot {
    name: String,
    hands_played: u64,
    hands_won: u64,
}

impl ConservativeBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hands_played: 0,
            hands_won: 0,
        }
    }

    pub fn is_playable(hole: &[Card; 2]) -> bool {
        let (a, b) = (hole[0].rank, hole[1].rank);
        if a == b {
            return a >= Rank::Nine;
        }
        let (high, low) = if a > b { (a, b) } else { (b, a) };
        PREMIUM.contains(&(high, low))
    }
}

impl Bot for ConservativeBot {
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
        let can = |k: ActionKind| legal.contains(&k);
        if !Self::is_playable(hole_cards) {
            return Ok(if can(ActionKind::Check) {
                Action::Check
            } else {
                Action::Fold
            });
        }
        let action = if can(ActionKind::Raise) {
            Action::Raise(pot_fraction_raise(state, 1, 3, min_bet, max_bet))
        } else if can(ActionKind::Call) {
            Action::Call
        } else if can(ActionKind::Check) {
            Action::Check
        } else if can(ActionKind::AllIn) {
            Action::AllIn
        } else {
            Action::Fold
        };
        Ok(action)
    }

    fn hand_complete(&mut self, _state: &GameState, result: &HandResult) -> Result<(), BotError> {
        self.hands_played += 1;
        if result.winnings.contains_key(&self.name) {
            self.hands_won += 1;
        }
        if self.hands_played % 25 == 0 {
            debug!(
                bot = %self.name,
                won = self.hands_won,
                played = self.hands_played,
                "Conservative play"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::cards::parse_cards;

    fn hole(text: &str) -> [Card; 2] {
        let c = parse_cards(text).unwrap();
        [c[0], c[1]]
    }

    #[test]
    fn plays_only_strong_starting_hands() {
        assert!(ConservativeBot::is_playable(&hole("9C 9D")));
        assert!(ConservativeBot::is_playable(&hole("JH AS")));
        assert!(!ConservativeBot::is_playable(&hole("8C 8D")));
        assert!(!ConservativeBot::is_playable(&hole("AH 9H")));
    }
}
