use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use arena_engine::bot::{Bot, BotError};
use arena_engine::cards::Card;
use arena_engine::game::{GameState, HandResult};
use arena_engine::player::{Action, ActionKind};

use crate::info::{active_opponents, pot_fraction_raise, pot_odds};

/// Loose-aggressive bot: plays most hands and raises often, sizing raises by
/// hand strength. Adapts its raise frequency to results.
#[derive(Debug)]
pub struct AggressiveBot {
    name: String,
    rng: ChaCha20Rng,
    raise_frequency: f64,
    play_frequency: f64,
    hands_played: u64,
}

impl AggressiveBot {
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha20Rng::seed_from_u64(s),
            None => ChaCha20Rng::seed_from_u64(rand::random()),
        };
        Self {
            name: name.into(),
            rng,
            raise_frequency: 0.4,
            play_frequency: 0.7,
            hands_played: 0,
        }
    }

    pub fn raise_frequency(&self) -> f64 {
        self.raise_frequency
    }

    /// Lenient starting-hand rating in `0.0..=1.0`.
    pub fn hand_strength(hole: &[Card; 2]) -> f64 {
        let (a, b) = (hole[0].rank.value(), hole[1].rank.value());
        if a == b {
            return if a >= 7 { 0.9 } else { 0.6 };
        }
        let (high, low) = (a.max(b), a.min(b));
        let suited = if hole[0].suit == hole[1].suit { 0.15 } else { 0.0 };
        let connected = if high - low <= 2 { 0.1 } else { 0.0 };

        let mut base = match high {
            12.. => 0.7,
            10..=11 => 0.5,
            8..=9 => 0.4,
            _ => 0.2,
        };
        base += match low {
            8.. => 0.2,
            6..=7 => 0.1,
            _ => 0.0,
        };
        if low >= 11 {
            base += 0.1;
        }
        f64::min(1.0, base + suited + connected)
    }
}

impl Bot for AggressiveBot {
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
        let strength = Self::hand_strength(hole_cards);
        let free = can(ActionKind::Check);

        if strength < 0.3 && self.rng.random_bool(1.0 - self.play_frequency) {
            return Ok(if free { Action::Check } else { Action::Fold });
        }

        let heads_up_ish = active_opponents(state, &self.name).len() <= 2;
        let multiplier = if heads_up_ish { 1.5 } else { 1.0 };
        let raise_freq = f64::min(0.6, self.raise_frequency * multiplier);

        if can(ActionKind::Raise) && self.rng.random_bool(raise_freq) {
            let (num, den) = match strength {
                s if s >= 0.8 => (1, 1),
                s if s >= 0.6 => (1, 2),
                // bluff
                _ => (1, 4),
            };
            return Ok(Action::Raise(pot_fraction_raise(state, num, den, min_bet, max_bet)));
        }

        if can(ActionKind::Call) {
            let to_call = state.to_call(&self.name);
            if strength >= 0.4 || pot_odds(state.pot, to_call) > 0.65 {
                return Ok(Action::Call);
            }
        }
        Ok(if free { Action::Check } else { Action::Fold })
    }

    fn hand_complete(&mut self, _state: &GameState, result: &HandResult) -> Result<(), BotError> {
        self.hands_played += 1;
        if result.winnings.contains_key(&self.name) {
            self.raise_frequency = f64::min(0.6, self.raise_frequency + 0.01);
        } else {
            self.raise_frequency = f64::max(0.2, self.raise_frequency - 0.005);
        }
        if self.hands_played % 20 == 0 {
            debug!(
                bot = %self.name,
                hands = self.hands_played,
                raise_frequency = self.raise_frequency,
                "Aggression adjusted"
            );
        }
        Ok(())
    }
}
