//! Freeze-out tournament orchestration.
//!
//! [`Tournament`] owns the table (every [`Player`]) and the bot handles. Each
//! hand it lends the table to a fresh [`Engine`], asks the [`Sandbox`] for
//! every decision, settles, and removes busted players. Nothing here is
//! global, so independent tournaments can run side by side in one process.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::bot::BotHandle;
use crate::deck::Deck;
use crate::engine::Engine;
use crate::errors::GameError;
use crate::game::Blinds;
use crate::logger::{FaultRecord, HandLogger, HandSummary};
use crate::player::{Player, Reliability};
use crate::sandbox::{DecisionOutcome, Sandbox};

#[derive(Debug, Error)]
pub enum TournamentError {
    /// The betting engine hit an invariant violation; the run cannot continue
    #[error("Engine invariant violated: {0}")]
    Engine(#[from] GameError),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("Invalid roster: {0}")]
    Roster(String),
}

/// Tournament configuration. Missing fields deserialize to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentSettings {
    pub starting_chips: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Hands per blind level
    pub blind_increase_interval: u32,
    pub blind_increase_factor: f64,
    pub time_limit_ms: u64,
    pub min_players: usize,
    pub max_players: usize,
    /// Faults a bot may commit before the next one disqualifies it
    pub max_faults: u32,
    pub max_hands: Option<u64>,
    /// Hand summaries kept in memory
    pub history_size: usize,
    pub seed: Option<u64>,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            starting_chips: 1000,
            small_blind: 10,
            big_blind: 20,
            blind_increase_interval: 10,
            blind_increase_factor: 1.5,
            time_limit_ms: 10_000,
            min_players: 2,
            max_players: 10,
            max_faults: 3,
            max_hands: None,
            history_size: 50,
            seed: None,
        }
    }
}

impl TournamentSettings {
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    pub fn validate(&self) -> Result<(), TournamentError> {
        let fail = |msg: &str| Err(TournamentError::InvalidSettings(msg.to_string()));
        if self.starting_chips == 0 {
            return fail("starting_chips must be positive");
        }
        // every pot and ledger sum is a u32
        if u64::from(self.starting_chips) * self.max_players as u64 > u64::from(u32::MAX) {
            return fail("starting_chips * max_players must fit in 32 bits");
        }
        if self.small_blind == 0 || self.big_blind == 0 {
            return fail("blinds must be positive");
        }
        if self.big_blind < self.small_blind {
            return fail("big_blind must be at least small_blind");
        }
        if self.blind_increase_interval == 0 {
            return fail("blind_increase_interval must be at least 1");
        }
        if !self.blind_increase_factor.is_finite() || self.blind_increase_factor < 1.0 {
            return fail("blind_increase_factor must be a finite number >= 1.0");
        }
        if self.time_limit_ms == 0 {
            return fail("time_limit_ms must be positive");
        }
        if self.min_players < 2 {
            return fail("min_players must be at least 2");
        }
        if self.max_players < self.min_players {
            return fail("max_players must be at least min_players");
        }
        if self.history_size == 0 {
            return fail("history_size must be at least 1");
        }
        Ok(())
    }

    pub fn blind_schedule(&self) -> BlindSchedule {
        BlindSchedule::new(
            Blinds {
                small: self.small_blind,
                big: self.big_blind,
            },
            self.blind_increase_interval,
            self.blind_increase_factor,
        )
    }
}

/// Blind levels on a hand-count schedule.
///
/// Level `n` covers hands `n * interval .. (n + 1) * interval` (counting
/// completed hands). Every level multiplies the previous level's blinds by
/// the factor, rounding half away from zero; with a factor above 1 each blind
/// grows by at least one chip, and the big blind never drops below the small.
///
/// # Examples
///
/// ```
/// use arena_engine::game::Blinds;
/// use arena_engine::tournament::BlindSchedule;
///
/// let schedule = BlindSchedule::new(Blinds { small: 10, big: 20 }, 10, 1.5);
/// assert_eq!(schedule.blinds_for(9), Blinds { small: 10, big: 20 });
/// assert_eq!(schedule.blinds_for(10), Blinds { small: 15, big: 30 });
/// assert_eq!(schedule.blinds_for(20), Blinds { small: 23, big: 45 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlindSchedule {
    base: Blinds,
    interval: u32,
    factor: f64,
}

impl BlindSchedule {
    pub fn new(base: Blinds, interval: u32, factor: f64) -> Self {
        Self {
            base,
            interval: interval.max(1),
            factor,
        }
    }

    pub fn level_for(&self, hands_completed: u64) -> u64 {
        hands_completed / u64::from(self.interval)
    }

    /// Blinds for the hand played after `hands_completed` hands.
    pub fn blinds_for(&self, hands_completed: u64) -> Blinds {
        self.blinds_at_level(self.level_for(hands_completed))
    }

    pub fn blinds_at_level(&self, level: u64) -> Blinds {
        let mut blinds = self.base;
        for _ in 0..level {
            let small = self.scale(blinds.small);
            let big = self.scale(blinds.big).max(small);
            if small == blinds.small && big == blinds.big {
                break;
            }
            blinds = Blinds { small, big };
        }
        blinds
    }

    fn scale(&self, chips: u32) -> u32 {
        // `as` saturates at u32::MAX
        let scaled = (f64::from(chips) * self.factor).round() as u32;
        if self.factor > 1.0 {
            scaled.max(chips.saturating_add(1))
        } else {
            scaled
        }
    }
}

/// Final (or current) placing of one entrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub place: usize,
    pub name: String,
    pub chips: u32,
    pub hands_played: u64,
    /// Hand number the player busted or was removed in
    pub eliminated_at: Option<u64>,
    pub reliability: Reliability,
    pub disqualified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResult {
    pub standings: Vec<Standing>,
    pub hands_played: u64,
    /// Most recent hands, oldest first
    pub history: Vec<HandSummary>,
    /// Stopped by the caller before a natural finish
    #[serde(default)]
    pub interrupted: bool,
}

impl TournamentResult {
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }
}

#[derive(Debug, Clone, Copy)]
struct Elimination {
    seat: usize,
    hand: u64,
}

pub struct Tournament {
    settings: TournamentSettings,
    schedule: BlindSchedule,
    sandbox: Sandbox,
    players: Vec<Player>,
    bots: Vec<BotHandle>,
    hands_dealt: Vec<u64>,
    button: Option<usize>,
    hands_played: u64,
    rng: ChaCha20Rng,
    /// In elimination order
    eliminated: Vec<Elimination>,
    history: VecDeque<HandSummary>,
    logger: Option<HandLogger>,
}

impl Tournament {
    /// Seats the entrants in roster order.
    pub fn new(
        settings: TournamentSettings,
        entrants: Vec<BotHandle>,
    ) -> Result<Self, TournamentError> {
        settings.validate()?;
        if entrants.len() < settings.min_players {
            return Err(TournamentError::Roster(format!(
                "need at least {} players, got {}",
                settings.min_players,
                entrants.len()
            )));
        }
        if entrants.len() > settings.max_players {
            return Err(TournamentError::Roster(format!(
                "at most {} players fit at the table, got {}",
                settings.max_players,
                entrants.len()
            )));
        }
        let mut seen = HashSet::new();
        for bot in &entrants {
            if !seen.insert(bot.name()) {
                return Err(TournamentError::Roster(format!(
                    "duplicate player name {:?}",
                    bot.name()
                )));
            }
        }

        let players = entrants
            .iter()
            .map(|b| Player::new(b.name(), settings.starting_chips))
            .collect();
        let rng = match settings.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::seed_from_u64(rand::random()),
        };
        Ok(Self {
            schedule: settings.blind_schedule(),
            sandbox: Sandbox::new(settings.time_limit(), settings.max_faults),
            hands_dealt: vec![0; entrants.len()],
            history: VecDeque::with_capacity(settings.history_size),
            settings,
            players,
            bots: entrants,
            button: None,
            hands_played: 0,
            rng,
            eliminated: Vec::new(),
            logger: None,
        })
    }

    /// Writes every hand summary to `logger` as well.
    pub fn with_logger(mut self, logger: HandLogger) -> Self {
        self.logger = Some(logger.with_seed(self.settings.seed));
        self
    }

    pub fn settings(&self) -> &TournamentSettings {
        &self.settings
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }
    pub fn history(&self) -> impl Iterator<Item = &HandSummary> {
        self.history.iter()
    }

    /// Blinds for the next hand.
    pub fn current_blinds(&self) -> Blinds {
        self.schedule.blinds_for(self.hands_played)
    }

    fn contenders(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_seated() && p.stack() > 0)
    }

    pub fn is_finished(&self) -> bool {
        if self.contenders().count() <= 1 {
            return true;
        }
        if self
            .settings
            .max_hands
            .is_some_and(|cap| self.hands_played >= cap)
        {
            return true;
        }
        self.contenders().all(Player::is_disqualified)
    }

    /// Plays hands until one player holds every chip, the hand cap is hit
    /// or nobody left at the table can still make decisions.
    pub fn run(&mut self) -> Result<TournamentResult, TournamentError> {
        self.run_while(|| true)
    }

    /// Like [`run`](Self::run), but checks `keep_going` before every hand
    /// and stops early once it returns false. Bots are still told the
    /// tournament ended.
    pub fn run_while<F>(&mut self, mut keep_going: F) -> Result<TournamentResult, TournamentError>
    where
        F: FnMut() -> bool,
    {
        let names: Vec<String> = self.bots.iter().map(|b| b.name().to_string()).collect();
        info!(
            players = names.len(),
            starting_chips = self.settings.starting_chips,
            "Tournament started"
        );
        for (bot, player) in self.bots.iter().zip(&self.players) {
            self.sandbox.notify_tournament_start(
                bot,
                &player.reliability,
                &names,
                self.settings.starting_chips,
            );
        }

        let mut interrupted = false;
        while !self.is_finished() {
            if !keep_going() {
                interrupted = true;
                warn!(hands = self.hands_played, "Tournament stopped early");
                break;
            }
            self.play_hand()?;
        }

        let standings = self.standings();
        for (bot, player) in self.bots.iter().zip(&self.players) {
            self.sandbox
                .notify_tournament_end(bot, &player.reliability, &standings);
        }
        if let Some(winner) = standings.first() {
            info!(
                winner = %winner.name,
                chips = winner.chips,
                hands = self.hands_played,
                "Tournament finished"
            );
        }
        Ok(TournamentResult {
            standings,
            hands_played: self.hands_played,
            history: self.history.iter().cloned().collect(),
            interrupted,
        })
    }

    /// Plays one complete hand.
    ///
    /// # Errors
    ///
    /// Only engine invariant violations, or fewer than two players with chips.
    pub fn play_hand(&mut self) -> Result<HandSummary, TournamentError> {
        let button = self.next_button()?;
        let blinds = self.current_blinds();
        let hand_number = self.hands_played + 1;
        let stacks_before: Vec<u32> = self.players.iter().map(Player::stack).collect();
        let deck = Deck::new_with_seed(self.rng.random());
        let deck_seed = deck.seed();

        let mut engine = Engine::start_hand(&mut self.players, button, blinds, deck, hand_number)?;
        for &seat in engine.seat_order() {
            self.hands_dealt[seat] += 1;
        }
        info!(
            hand = hand_number,
            dealer = %self.players[button].name(),
            small_blind = blinds.small,
            big_blind = blinds.big,
            deck_seed,
            "Hand started"
        );

        let mut faults = Vec::new();
        while let Some(seat) = engine.current_player() {
            let legal = engine
                .legal_actions(&self.players)
                .ok_or(GameError::NoHandInProgress)?;
            let state = engine.game_state(&self.players);
            let hole = match self.players[seat].hole_cards() {
                [Some(a), Some(b)] => [a, b],
                _ => return Err(GameError::NoHandInProgress.into()),
            };
            let decision = self.sandbox.request_action(
                &self.bots[seat],
                &mut self.players[seat].reliability,
                &state,
                hole,
                &legal,
            );
            if decision.outcome != DecisionOutcome::Acted {
                faults.push(FaultRecord {
                    player: self.players[seat].name().to_string(),
                    round: engine.round(),
                    outcome: decision.outcome,
                    detail: decision.detail.clone(),
                });
            }
            engine.apply(&mut self.players, seat, decision.action)?;
        }

        let result = engine.settle(&mut self.players)?;
        self.hands_played = hand_number;

        // smaller starting stack busts first
        let mut busted: Vec<usize> = engine
            .seat_order()
            .iter()
            .copied()
            .filter(|&s| self.players[s].stack() == 0)
            .collect();
        busted.sort_by_key(|&s| (stacks_before[s], s));
        let mut eliminated = Vec::with_capacity(busted.len());
        for seat in busted {
            self.players[seat].leave_table();
            self.eliminated.push(Elimination {
                seat,
                hand: hand_number,
            });
            info!(hand = hand_number, player = %self.players[seat].name(), "Player eliminated");
            eliminated.push(self.players[seat].name().to_string());
        }

        let final_state = engine.game_state(&self.players);
        for &seat in engine.seat_order() {
            self.sandbox.notify_hand_complete(
                &self.bots[seat],
                &self.players[seat].reliability,
                &final_state,
                &result,
            );
        }

        let chips_after: BTreeMap<String, u32> = engine
            .seat_order()
            .iter()
            .map(|&s| (self.players[s].name().to_string(), self.players[s].stack()))
            .collect();
        let summary = HandSummary {
            hand_number,
            dealer: self.players[button].name().to_string(),
            blinds,
            board: result.board.clone(),
            pot_total: result.pot_total,
            pots: result.pots.clone(),
            winnings: result.winnings.clone(),
            showdown: result.showdown.clone(),
            actions: engine.actions().to_vec(),
            faults,
            chips_after,
            eliminated,
        };
        info!(
            hand = hand_number,
            pot = summary.pot_total,
            winners = ?result.winners(),
            showdown = result.went_to_showdown(),
            "Hand complete"
        );

        if let Some(logger) = &mut self.logger {
            if let Err(e) = logger.write(&summary) {
                warn!(hand = hand_number, error = %e, "Failed to write hand record");
            }
        }
        if self.history.len() == self.settings.history_size {
            self.history.pop_front();
        }
        self.history.push_back(summary.clone());
        Ok(summary)
    }

    /// Next seat with chips clockwise from the previous button; seat 0 (or
    /// the first seat with chips after it) on the first hand.
    fn next_button(&mut self) -> Result<usize, GameError> {
        let n = self.players.len();
        let start = self.button.map_or(0, |b| b + 1);
        let seat = (0..n)
            .map(|i| (start + i) % n)
            .find(|&s| self.players[s].is_seated() && self.players[s].stack() > 0)
            .ok_or(GameError::NotEnoughPlayers(0))?;
        debug!(seat, "Button moved");
        self.button = Some(seat);
        Ok(seat)
    }

    /// Takes a player out of the tournament between hands. They keep their
    /// chips for the record but are never dealt in again.
    pub fn remove_player(&mut self, name: &str) -> Result<(), TournamentError> {
        let seat = self
            .players
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| TournamentError::Roster(format!("unknown player {name:?}")))?;
        if !self.players[seat].is_seated() {
            return Ok(());
        }
        self.players[seat].leave_table();
        self.eliminated.push(Elimination {
            seat,
            hand: self.hands_played,
        });
        info!(player = name, hand = self.hands_played, "Player removed");
        Ok(())
    }

    /// Players still in by chips, then everyone else from the latest
    /// elimination back.
    pub fn standings(&self) -> Vec<Standing> {
        let mut alive: Vec<usize> = (0..self.players.len())
            .filter(|&s| self.players[s].is_seated())
            .collect();
        alive.sort_by(|&a, &b| {
            self.players[b]
                .stack()
                .cmp(&self.players[a].stack())
                .then(a.cmp(&b))
        });

        let order = alive
            .into_iter()
            .map(|s| (s, None))
            .chain(self.eliminated.iter().rev().map(|e| (e.seat, Some(e.hand))));
        order
            .enumerate()
            .map(|(i, (seat, eliminated_at))| {
                let p = &self.players[seat];
                Standing {
                    place: i + 1,
                    name: p.name().to_string(),
                    chips: p.stack(),
                    hands_played: self.hands_dealt[seat],
                    eliminated_at,
                    reliability: p.reliability,
                    disqualified: p.is_disqualified(),
                }
            })
            .collect()
    }
}
