use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use arena_engine::bot::{Bot, BotError};
use arena_engine::cards::Card;
use arena_engine::game::{GameState, HandResult};
use arena_engine::player::{Action, ActionKind};

/// Picks a uniformly random legal action; raises to a random legal size.
#[derive(Debug)]
pub struct RandomBot {
    name: String,
    rng: ChaCha20Rng,
    hands_played: u64,
}

impl RandomBot {
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha20Rng::seed_from_u64(s),
            None => ChaCha20Rng::seed_from_u64(rand::random()),
        };
        Self {
            name: name.into(),
            rng,
            hands_played: 0,
        }
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_action(
        &mut self,
        _state: &GameState,
        _hole_cards: &[Card; 2],
        legal: &[ActionKind],
        min_bet: u32,
        max_bet: u32,
    ) -> Result<Action, BotError> {
        let kind = legal
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| BotError::msg("no legal actions offered"))?;
        Ok(match kind {
            ActionKind::Fold => Action::Fold,
            ActionKind::Check => Action::Check,
            ActionKind::Call => Action::Call,
            ActionKind::Raise => Action::Raise(self.rng.random_range(min_bet..=max_bet)),
            ActionKind::AllIn => Action::AllIn,
        })
    }

    fn hand_complete(&mut self, _state: &GameState, _result: &HandResult) -> Result<(), BotError> {
        self.hands_played += 1;
        if self.hands_played % 20 == 0 {
            debug!(bot = %self.name, hands = self.hands_played, "Played hands randomly");
        }
        Ok(())
    }
}
