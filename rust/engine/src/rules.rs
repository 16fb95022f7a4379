use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Action, ActionKind};

/// The options a player has at a decision point.
///
/// `min_bet` and `max_bet` bound the **total** round bet a `Raise` may name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    pub actions: Vec<ActionKind>,
    pub to_call: u32,
    pub min_bet: u32,
    pub max_bet: u32,
}

impl LegalActions {
    pub fn contains(&self, kind: ActionKind) -> bool {
        self.actions.contains(&kind)
    }
}

/// Computes the legal action set for a no-limit decision.
///
/// # Arguments
///
/// * `stack` - Chips the player still has behind
/// * `player_bet` - What the player already put in this round
/// * `current_bet` - Highest round bet at the table
/// * `min_increment` - Smallest allowed raise step (last full raise, at least the big blind)
///
/// # Examples
///
/// ```
/// use arena_engine::player::ActionKind;
/// use arena_engine::rules::legal_actions;
///
/// // facing a 20 chip big blind with 1000 behind
/// let legal = legal_actions(1000, 0, 20, 20);
/// assert!(legal.contains(ActionKind::Call));
/// assert!(!legal.contains(ActionKind::Check));
/// assert_eq!((legal.min_bet, legal.max_bet), (40, 1000));
/// ```
pub fn legal_actions(
    stack: u32,
    player_bet: u32,
    current_bet: u32,
    min_increment: u32,
) -> LegalActions {
    let to_call = current_bet.saturating_sub(player_bet);
    let min_bet = current_bet.saturating_add(min_increment.max(1));
    let max_bet = player_bet.saturating_add(stack);

    let mut actions = vec![ActionKind::Fold];
    if to_call == 0 {
        actions.push(ActionKind::Check);
    }
    if to_call > 0 && stack >= to_call {
        actions.push(ActionKind::Call);
    }
    if stack > to_call && min_bet <= max_bet {
        actions.push(ActionKind::Raise);
    }
    if stack > 0 {
        actions.push(ActionKind::AllIn);
    }

    LegalActions {
        actions,
        to_call,
        min_bet,
        max_bet,
    }
}

/// Checks an action against a legal set.
///
/// # Errors
///
/// - [`GameError::IllegalAction`] - the action kind is not offered
/// - [`GameError::InvalidBetAmount`] - a raise target outside `[min_bet, max_bet]`
///
/// # Examples
///
/// ```
/// use arena_engine::errors::GameError;
/// use arena_engine::player::Action;
/// use arena_engine::rules::{legal_actions, validate_action};
///
/// let legal = legal_actions(1000, 0, 10, 20);
/// assert!(validate_action(&legal, Action::Raise(40)).is_ok());
/// assert!(matches!(
///     validate_action(&legal, Action::Raise(5)),
///     Err(GameError::InvalidBetAmount { .. })
/// ));
/// ```
pub fn validate_action(legal: &LegalActions, action: Action) -> Result<Action, GameError> {
    let kind = action.kind();
    if !legal.contains(kind) {
        return Err(GameError::IllegalAction(kind));
    }
    if let Action::Raise(amount) = action {
        if amount < legal.min_bet || amount > legal.max_bet {
            return Err(GameError::InvalidBetAmount {
                amount,
                minimum: legal.min_bet,
                maximum: legal.max_bet,
            });
        }
    }
    Ok(action)
}
