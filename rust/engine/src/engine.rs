use std::collections::BTreeMap;

use tracing::debug;

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{Blinds, GameState, HandResult, PotSummary, Round, ShowdownHand};
use crate::hand::{best_five, evaluate, HandRank};
use crate::logger::ActionRecord;
use crate::player::{Action, Player, PlayerStatus};
use crate::pot::PotManager;
use crate::rules::{legal_actions, validate_action, LegalActions};

/// Per-hand betting state machine.
///
/// The engine never owns the players: the tournament keeps the table and
/// lends it to every call, so chip stacks live in exactly one place. Seats
/// are indexes into that slice and must not be reordered during a hand.
///
/// # Examples
///
/// ```
/// use arena_engine::deck::Deck;
/// use arena_engine::engine::Engine;
/// use arena_engine::game::{Blinds, Round};
/// use arena_engine::player::{Action, Player};
///
/// let mut table = vec![Player::new("alice", 1000), Player::new("bob", 1000)];
/// let blinds = Blinds { small: 10, big: 20 };
/// let mut engine = Engine::start_hand(&mut table, 0, blinds, Deck::new_with_seed(7), 1).unwrap();
///
/// // heads-up: the button posts the small blind and acts first
/// assert_eq!(engine.current_player(), Some(0));
/// engine.apply(&mut table, 0, Action::Fold).unwrap();
/// assert_eq!(engine.round(), Round::HandOver);
///
/// let result = engine.settle(&mut table).unwrap();
/// assert_eq!(result.winnings["bob"], 30);
/// assert_eq!(table[1].stack(), 1010);
/// ```
#[derive(Debug)]
pub struct Engine {
    hand_number: u64,
    deck: Deck,
    button: usize,
    blinds: Blinds,
    round: Round,
    board: Vec<Card>,
    current_bet: u32,
    /// Size of the last full raise this round
    last_raise: u32,
    /// Seats that still owe a decision this round
    pending: Vec<bool>,
    /// Dealt-in seats, starting left of the button
    seat_order: Vec<usize>,
    to_act: Option<usize>,
    chips_at_start: u64,
    actions: Vec<ActionRecord>,
    settled: bool,
}

impl Engine {
    /// Deals a new hand: resets per-hand player state, shuffles, deals hole
    /// cards and posts the blinds.
    ///
    /// Every seated player with chips is dealt in. `button` is a seat index.
    pub fn start_hand(
        players: &mut [Player],
        button: usize,
        blinds: Blinds,
        deck: Deck,
        hand_number: u64,
    ) -> Result<Self, GameError> {
        for p in players.iter_mut() {
            p.reset_for_hand();
        }
        let chips_at_start = table_chips(players);
        let n = players.len();
        let seat_order: Vec<usize> = (1..=n)
            .map(|i| (button + i) % n)
            .filter(|&s| players[s].status() == PlayerStatus::Active)
            .collect();
        if seat_order.len() < 2 {
            return Err(GameError::NotEnoughPlayers(seat_order.len()));
        }

        let mut engine = Self {
            hand_number,
            deck,
            button,
            blinds,
            round: Round::Preflop,
            board: Vec::with_capacity(5),
            current_bet: 0,
            last_raise: blinds.big,
            pending: vec![false; n],
            seat_order,
            to_act: None,
            chips_at_start,
            actions: Vec::new(),
            settled: false,
        };
        engine.deck.shuffle();

        // one card at a time around the table, twice
        let mut first = Vec::with_capacity(engine.seat_order.len());
        for _ in &engine.seat_order {
            first.push(engine.deck.draw()?);
        }
        for (i, &seat) in engine.seat_order.iter().enumerate() {
            let second = engine.deck.draw()?;
            players[seat].set_hole([first[i], second]);
        }

        let (sb_pos, bb_pos) = if engine.seat_order.len() == 2 { (1, 0) } else { (0, 1) };
        let sb_seat = engine.seat_order[sb_pos];
        let bb_seat = engine.seat_order[bb_pos];
        players[sb_seat].commit(blinds.small);
        players[bb_seat].commit(blinds.big);
        engine.current_bet = players[sb_seat].round_bet().max(players[bb_seat].round_bet());
        debug!(
            hand = hand_number,
            small_blind = %players[sb_seat].name(),
            big_blind = %players[bb_seat].name(),
            "Blinds posted"
        );

        engine.open_round(players);
        engine.advance(players, bb_pos)?;
        Ok(engine)
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }
    pub fn round(&self) -> Round {
        self.round
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn button(&self) -> usize {
        self.button
    }
    pub fn blinds(&self) -> Blinds {
        self.blinds
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }
    /// Dealt-in seats in acting order, starting left of the button.
    pub fn seat_order(&self) -> &[usize] {
        &self.seat_order
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Seat whose decision the hand is waiting on.
    pub fn current_player(&self) -> Option<usize> {
        self.to_act
    }

    pub fn is_complete(&self) -> bool {
        !self.round.is_betting()
    }

    pub fn pot(&self, players: &[Player]) -> u32 {
        self.seat_order.iter().map(|&s| players[s].hand_bet()).sum()
    }

    /// Legal options for the player to act, if any.
    pub fn legal_actions(&self, players: &[Player]) -> Option<LegalActions> {
        self.to_act.map(|seat| self.legal_for(players, seat))
    }

    fn legal_for(&self, players: &[Player], seat: usize) -> LegalActions {
        let p = &players[seat];
        legal_actions(p.stack(), p.round_bet(), self.current_bet, self.min_increment())
    }

    fn min_increment(&self) -> u32 {
        self.last_raise.max(self.blinds.big)
    }

    /// Applies an already validated decision for `seat`.
    ///
    /// # Errors
    ///
    /// Acting in a finished hand, out of turn, or with an action outside the
    /// legal set. All three mean the caller broke the state machine.
    pub fn apply(
        &mut self,
        players: &mut [Player],
        seat: usize,
        action: Action,
    ) -> Result<(), GameError> {
        if !self.round.is_betting() {
            return Err(GameError::HandAlreadyComplete);
        }
        match self.to_act {
            Some(expected) if expected == seat => {}
            Some(expected) => {
                return Err(GameError::NotPlayersTurn {
                    expected,
                    actual: seat,
                })
            }
            None => return Err(GameError::NoHandInProgress),
        }
        if !players[seat].can_act() {
            return Err(GameError::PlayerAlreadyFolded);
        }
        let legal = self.legal_for(players, seat);
        let action = validate_action(&legal, action)?;

        let player = &mut players[seat];
        let (bet, stack) = (player.round_bet(), player.stack());
        let paid = match action {
            Action::Fold => {
                player.fold();
                0
            }
            Action::Check => 0,
            Action::Call => player.commit(legal.to_call),
            Action::Raise(total) => player.commit(total - bet),
            Action::AllIn => player.commit(stack),
        };

        let new_bet = players[seat].round_bet();
        if new_bet > self.current_bet {
            let increment = new_bet - self.current_bet;
            // a short all-in moves the bet without resetting the raise size
            if increment >= self.min_increment() {
                self.last_raise = increment;
            }
            self.current_bet = new_bet;
            for &s in &self.seat_order {
                if s != seat && players[s].can_act() {
                    self.pending[s] = true;
                }
            }
        }
        self.pending[seat] = false;

        debug!(
            hand = self.hand_number,
            player = %players[seat].name(),
            round = %self.round,
            action = ?action,
            paid,
            "Action applied"
        );
        self.actions.push(ActionRecord {
            seat,
            player: players[seat].name().to_string(),
            round: self.round,
            action,
            amount: paid,
        });

        let pos = self
            .seat_order
            .iter()
            .position(|&s| s == seat)
            .unwrap_or(0);
        self.advance(players, pos)
    }

    /// Moves to the next decision, dealing streets (or running the board out)
    /// as rounds close.
    fn advance(&mut self, players: &mut [Player], mut from: usize) -> Result<(), GameError> {
        loop {
            let live = self
                .seat_order
                .iter()
                .filter(|&&s| players[s].in_hand())
                .count();
            if live <= 1 {
                self.round = Round::HandOver;
                self.to_act = None;
                return Ok(());
            }
            if let Some(seat) = self.next_pending(players, from) {
                self.to_act = Some(seat);
                return Ok(());
            }
            if self.round == Round::River {
                self.round = Round::Showdown;
                self.to_act = None;
                return Ok(());
            }

            self.round = self.round.next();
            for _ in 0..self.round.cards_to_deal() {
                let card = self.deck.draw()?;
                self.board.push(card);
            }
            for &s in &self.seat_order {
                players[s].reset_round();
            }
            self.current_bet = 0;
            self.last_raise = self.blinds.big;
            self.open_round(players);
            // post-flop action starts left of the button
            from = self.seat_order.len() - 1;
        }
    }

    fn next_pending(&self, players: &[Player], from: usize) -> Option<usize> {
        let n = self.seat_order.len();
        (1..=n)
            .map(|i| self.seat_order[(from + i) % n])
            .find(|&s| self.pending[s] && players[s].can_act())
    }

    fn open_round(&mut self, players: &[Player]) {
        let actors = self
            .seat_order
            .iter()
            .filter(|&&s| players[s].can_act())
            .count();
        for &s in &self.seat_order {
            let p = &players[s];
            self.pending[s] = p.can_act() && (actors >= 2 || p.round_bet() < self.current_bet);
        }
    }

    /// Read-only snapshot for the player to act (or the table at hand end).
    pub fn game_state(&self, players: &[Player]) -> GameState {
        let mut player_chips = BTreeMap::new();
        let mut player_bets = BTreeMap::new();
        for &s in &self.seat_order {
            let p = &players[s];
            player_chips.insert(p.name().to_string(), p.stack());
            player_bets.insert(p.name().to_string(), p.round_bet());
        }
        let mut live: Vec<usize> = self
            .seat_order
            .iter()
            .copied()
            .filter(|&s| players[s].in_hand())
            .collect();
        live.sort_unstable();

        GameState {
            hand_number: self.hand_number,
            round: self.round,
            pot: self.pot(players),
            community_cards: self.board.clone(),
            current_bet: self.current_bet,
            min_raise: self.current_bet.saturating_add(self.min_increment()),
            player_chips,
            player_bets,
            active_players: live.iter().map(|&s| players[s].name().to_string()).collect(),
            current_player: self.to_act.map(|s| players[s].name().to_string()),
            dealer: players[self.button].name().to_string(),
            small_blind: self.blinds.small,
            big_blind: self.blinds.big,
        }
    }

    /// Resolves the pots and pays the winners.
    ///
    /// # Errors
    ///
    /// [`GameError::HandNotFinished`] while betting is still open,
    /// [`GameError::HandAlreadyComplete`] on a second call and
    /// [`GameError::ChipLedgerMismatch`] if chips were created or lost.
    pub fn settle(&mut self, players: &mut [Player]) -> Result<HandResult, GameError> {
        if self.settled {
            return Err(GameError::HandAlreadyComplete);
        }
        if self.round.is_betting() {
            return Err(GameError::HandNotFinished);
        }

        let contributions: Vec<u32> = players.iter().map(Player::hand_bet).collect();
        let in_hand: Vec<bool> = players.iter().map(Player::in_hand).collect();
        let pots = PotManager::from_table(&contributions, &in_hand);

        let mut ranks: Vec<Option<HandRank>> = vec![None; players.len()];
        let mut showdown = Vec::new();
        if self.round == Round::Showdown {
            for &s in &self.seat_order {
                let p = &players[s];
                let [Some(a), Some(b)] = p.hole_cards() else {
                    continue;
                };
                if !p.in_hand() {
                    continue;
                }
                let mut seven = vec![a, b];
                seven.extend_from_slice(&self.board);
                let rank = evaluate(&seven)?;
                ranks[s] = Some(rank);
                showdown.push(ShowdownHand {
                    player: p.name().to_string(),
                    hole_cards: [a, b],
                    category: rank.category,
                    best_five: best_five(&seven)?,
                });
            }
        }

        let awards = pots.distribute(&ranks, &self.seat_order);
        let mut winnings: BTreeMap<String, u32> = BTreeMap::new();
        let mut summaries = Vec::with_capacity(awards.len());
        for award in &awards {
            for &(seat, amount) in &award.winners {
                players[seat].add_chips(amount);
                *winnings.entry(players[seat].name().to_string()).or_default() += amount;
            }
            summaries.push(PotSummary {
                amount: award.amount,
                eligible: award
                    .eligible
                    .iter()
                    .map(|&s| players[s].name().to_string())
                    .collect(),
                winners: award
                    .winners
                    .iter()
                    .map(|&(s, amount)| (players[s].name().to_string(), amount))
                    .collect(),
            });
        }
        for p in players.iter_mut() {
            p.reset_round();
        }

        let after = table_chips(players);
        if after != self.chips_at_start {
            return Err(GameError::ChipLedgerMismatch {
                before: self.chips_at_start,
                after,
            });
        }
        self.settled = true;

        Ok(HandResult {
            hand_number: self.hand_number,
            pot_total: pots.total(),
            board: self.board.clone(),
            pots: summaries,
            winnings,
            showdown,
        })
    }
}

/// Chips in stacks. Only meaningful between hands, when no bet is live.
fn table_chips(players: &[Player]) -> u64 {
    players.iter().map(|p| u64::from(p.stack())).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ActionKind;

    fn table(stacks: &[u32]) -> Vec<Player> {
        let names = ["alice", "bob", "carol", "dave", "erin", "frank"];
        stacks
            .iter()
            .zip(names)
            .map(|(&stack, name)| Player::new(name, stack))
            .collect()
    }

    const BLINDS: Blinds = Blinds { small: 10, big: 20 };

    /// Checks when possible, calls otherwise.
    fn check_down(engine: &mut Engine, players: &mut [Player]) {
        while let Some(seat) = engine.current_player() {
            let legal = engine.legal_actions(players).unwrap();
            let action = if legal.contains(ActionKind::Check) {
                Action::Check
            } else {
                Action::Call
            };
            engine.apply(players, seat, action).unwrap();
        }
    }

    #[test]
    fn heads_up_button_acts_first_preflop_and_last_after() {
        let mut players = table(&[1000, 1000]);
        let mut engine =
            Engine::start_hand(&mut players, 1, BLINDS, Deck::new_with_seed(3), 1).unwrap();
        assert_eq!(players[1].round_bet(), 10);
        assert_eq!(players[0].round_bet(), 20);
        assert_eq!(engine.current_player(), Some(1));

        engine.apply(&mut players, 1, Action::Call).unwrap();
        // big blind keeps the option
        assert_eq!(engine.current_player(), Some(0));
        engine.apply(&mut players, 0, Action::Check).unwrap();

        assert_eq!(engine.round(), Round::Flop);
        assert_eq!(engine.board().len(), 3);
        assert_eq!(engine.current_player(), Some(0));
    }

    #[test]
    fn three_handed_preflop_starts_after_big_blind() {
        let mut players = table(&[1000, 1000, 1000]);
        let engine =
            Engine::start_hand(&mut players, 0, BLINDS, Deck::new_with_seed(3), 1).unwrap();
        assert_eq!(engine.seat_order(), &[1, 2, 0]);
        assert_eq!(players[1].round_bet(), 10);
        assert_eq!(players[2].round_bet(), 20);
        assert_eq!(engine.current_player(), Some(0));
    }

    #[test]
    fn checked_down_hand_leaves_expected_deck() {
        let mut players = table(&[1000, 1000, 1000]);
        let mut engine =
            Engine::start_hand(&mut players, 0, BLINDS, Deck::new_with_seed(11), 1).unwrap();
        check_down(&mut engine, &mut players);
        assert_eq!(engine.round(), Round::Showdown);
        assert_eq!(engine.board().len(), 5);
        assert_eq!(engine.deck_remaining(), 52 - 2 * 3 - 5);

        let result = engine.settle(&mut players).unwrap();
        assert_eq!(result.pot_total, 60);
        assert_eq!(result.showdown.len(), 3);
        let total: u32 = players.iter().map(Player::stack).sum();
        assert_eq!(total, 3000);
    }

    #[test]
    fn raise_reopens_action() {
        let mut players = table(&[1000, 1000, 1000]);
        let mut engine =
            Engine::start_hand(&mut players, 0, BLINDS, Deck::new_with_seed(5), 1).unwrap();
        engine.apply(&mut players, 0, Action::Call).unwrap();
        engine.apply(&mut players, 1, Action::Call).unwrap();
        engine.apply(&mut players, 2, Action::Raise(80)).unwrap();
        assert_eq!(engine.current_player(), Some(0));
        let legal = engine.legal_actions(&players).unwrap();
        assert_eq!(legal.to_call, 60);
        assert_eq!(legal.min_bet, 140);
    }

    #[test]
    fn out_of_turn_and_illegal_actions_are_rejected() {
        let mut players = table(&[1000, 1000, 1000]);
        let mut engine =
            Engine::start_hand(&mut players, 0, BLINDS, Deck::new_with_seed(5), 1).unwrap();
        assert_eq!(
            engine.apply(&mut players, 1, Action::Call),
            Err(GameError::NotPlayersTurn {
                expected: 0,
                actual: 1
            })
        );
        assert_eq!(
            engine.apply(&mut players, 0, Action::Check),
            Err(GameError::IllegalAction(ActionKind::Check))
        );
        // nothing moved
        assert_eq!(players[0].stack(), 1000);
        assert_eq!(engine.current_player(), Some(0));
    }

    #[test]
    fn settle_requires_finished_hand_and_runs_once() {
        let mut players = table(&[1000, 1000]);
        let mut engine =
            Engine::start_hand(&mut players, 0, BLINDS, Deck::new_with_seed(1), 1).unwrap();
        assert_eq!(engine.settle(&mut players), Err(GameError::HandNotFinished));
        engine.apply(&mut players, 0, Action::Fold).unwrap();
        assert!(engine.settle(&mut players).is_ok());
        assert_eq!(engine.settle(&mut players), Err(GameError::HandAlreadyComplete));
        assert_eq!(
            engine.apply(&mut players, 0, Action::Check),
            Err(GameError::HandAlreadyComplete)
        );
    }

    #[test]
    fn consecutive_hands_on_one_table_settle_cleanly() {
        let mut players = table(&[1000, 1000, 1000]);
        for (hand, button) in [(1, 0), (2, 1), (3, 2)] {
            let mut engine =
                Engine::start_hand(&mut players, button, BLINDS, Deck::new_with_seed(hand), hand)
                    .unwrap();
            check_down(&mut engine, &mut players);
            let result = engine.settle(&mut players).unwrap();
            assert_eq!(result.pot_total, 60, "hand {hand}");
            let total: u32 = players.iter().map(Player::stack).sum();
            assert_eq!(total, 3000, "hand {hand}");
        }
    }

    #[test]
    fn settle_reports_chips_appearing_mid_hand() {
        let mut players = table(&[1000, 1000]);
        let mut engine =
            Engine::start_hand(&mut players, 0, BLINDS, Deck::new_with_seed(2), 1).unwrap();
        engine.apply(&mut players, 0, Action::Fold).unwrap();
        players[1].add_chips(5);
        assert_eq!(
            engine.settle(&mut players),
            Err(GameError::ChipLedgerMismatch {
                before: 2000,
                after: 2005
            })
        );
    }

    #[test]
    fn all_in_players_run_the_board_out() {
        let mut players = table(&[300, 500]);
        let mut engine =
            Engine::start_hand(&mut players, 0, BLINDS, Deck::new_with_seed(9), 1).unwrap();
        engine.apply(&mut players, 0, Action::AllIn).unwrap();
        engine.apply(&mut players, 1, Action::Call).unwrap();
        assert_eq!(engine.round(), Round::Showdown);
        assert_eq!(engine.board().len(), 5);

        let result = engine.settle(&mut players).unwrap();
        assert_eq!(result.pot_total, 600);
        assert_eq!(players[0].stack() + players[1].stack(), 800);
        assert!(players[1].stack() >= 200);
    }

    #[test]
    fn short_big_blind_is_all_in() {
        let mut players = table(&[1000, 1000, 5]);
        let engine =
            Engine::start_hand(&mut players, 0, BLINDS, Deck::new_with_seed(2), 1).unwrap();
        assert_eq!(players[2].status(), PlayerStatus::AllIn);
        assert_eq!(engine.pot(&players), 15);
    }

    #[test]
    fn busted_and_removed_players_are_skipped() {
        let mut players = table(&[1000, 0, 1000, 1000]);
        players[3].leave_table();
        let engine =
            Engine::start_hand(&mut players, 0, BLINDS, Deck::new_with_seed(2), 1).unwrap();
        assert_eq!(engine.seat_order(), &[2, 0]);
        assert_eq!(engine.deck_remaining(), 48);

        let mut lonely = table(&[1000, 0]);
        assert!(matches!(
            Engine::start_hand(&mut lonely, 0, BLINDS, Deck::new_with_seed(2), 1),
            Err(GameError::NotEnoughPlayers(1))
        ));
    }

    #[test]
    fn snapshot_reflects_table() {
        let mut players = table(&[1000, 1000, 1000]);
        let engine =
            Engine::start_hand(&mut players, 0, BLINDS, Deck::new_with_seed(2), 4).unwrap();
        let state = engine.game_state(&players);
        assert_eq!(state.hand_number, 4);
        assert_eq!(state.pot, 30);
        assert_eq!(state.current_bet, 20);
        assert_eq!(state.min_raise, 40);
        assert_eq!(state.dealer, "alice");
        assert_eq!(state.current_player.as_deref(), Some("alice"));
        assert_eq!(state.to_call("alice"), 20);
        assert_eq!(state.active_players, vec!["alice", "bob", "carol"]);
    }
}
