//! Rule-based opponent: win if possible, otherwise block, otherwise random.
//!
//! This is a one-ply lookahead, not a search. Each candidate is simulated
//! once for the mover and once for the opponent; nothing beyond a single
//! simulated reply is considered.

use rand::{Rng, SeedableRng, random, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    game::{Board, GameRules, Player},
    types::Action,
};

/// Why the heuristic picked a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tactic {
    /// The move completes a line for the mover
    Win,
    /// The move occupies the opponent's completing cell
    Block,
    /// No tactical move existed
    Random,
}

/// Greedy win/block move selector
#[derive(Debug, Clone)]
pub struct HeuristicPolicy {
    rng: StdRng,
}

impl HeuristicPolicy {
    /// Create a heuristic policy with a non-deterministic RNG
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a heuristic policy with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// First winning action for `player`, else the first action that blocks
    /// an opponent win. Ties go to the lowest action.
    pub fn tactical_move(rules: &GameRules, board: &Board, player: Player) -> Option<(Action, Tactic)> {
        let legal = rules.legal_actions(board);
        let completes = |action: Action, who: Player| {
            rules
                .apply_move(board, action, who)
                .is_ok_and(|next| rules.has_win(&next, who))
        };

        if let Some(&action) = legal.iter().find(|&&a| completes(a, player)) {
            return Some((action, Tactic::Win));
        }

        let opponent = player.opponent();
        legal
            .iter()
            .find(|&&a| completes(a, opponent))
            .map(|&action| (action, Tactic::Block))
    }

    /// Choose a move and report the tactic behind it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] on a full board.
    pub fn choose(&mut self, rules: &GameRules, board: &Board, player: Player) -> Result<(Action, Tactic)> {
        if let Some(choice) = Self::tactical_move(rules, board, player) {
            return Ok(choice);
        }

        let legal = rules.legal_actions(board);
        if legal.is_empty() {
            return Err(Error::NoLegalActions);
        }
        let index = self.rng.random_range(0..legal.len());
        Ok((legal[index], Tactic::Random))
    }

    /// Choose a move for `player`.
    pub fn choose_move(&mut self, rules: &GameRules, board: &Board, player: Player) -> Result<Action> {
        let (action, tactic) = self.choose(rules, board, player)?;
        debug!(%player, action, ?tactic, "heuristic move");
        Ok(action)
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_win_over_block() {
        // X can win at 2, O threatens 5
        let rules = GameRules::tic_tac_toe();
        let board = rules.parse_board("XX.|OO.|...").unwrap();
        let mut policy = HeuristicPolicy::with_seed(1);
        assert_eq!(
            policy.choose(&rules, &board, Player::X).unwrap(),
            (2, Tactic::Win)
        );
    }

    #[test]
    fn test_blocks_when_no_win() {
        let rules = GameRules::tic_tac_toe();
        let board = rules.parse_board("OO.|X..|X..").unwrap();
        // X's column 0 is blocked by O at 0; O threatens 2
        let mut policy = HeuristicPolicy::with_seed(1);
        assert_eq!(
            policy.choose(&rules, &board, Player::X).unwrap(),
            (2, Tactic::Block)
        );
    }

    #[test]
    fn test_first_winning_action_in_ascending_order() {
        let rules = GameRules::tic_tac_toe();
        // X wins at 2 (top row) and at 6 (left column)
        let board = rules.parse_board("XX.|XO.|.O.").unwrap();
        assert_eq!(
            HeuristicPolicy::tactical_move(&rules, &board, Player::X),
            Some((2, Tactic::Win))
        );
    }

    #[test]
    fn test_random_fallback_is_legal() {
        let rules = GameRules::connect_four();
        let board = rules
            .parse_board("O.....|X.....|O.....|X.....|O.....|X.....")
            .unwrap();
        let mut policy = HeuristicPolicy::with_seed(7);
        for _ in 0..50 {
            let (action, tactic) = policy.choose(&rules, &board, Player::X).unwrap();
            assert_eq!(tactic, Tactic::Random);
            assert!((1..6).contains(&action));
        }
    }

    #[test]
    fn test_full_board_reports_no_legal_actions() {
        let rules = GameRules::tic_tac_toe();
        let board = rules.parse_board("XOX|XOO|OXX").unwrap();
        let mut policy = HeuristicPolicy::with_seed(3);
        assert!(matches!(
            policy.choose_move(&rules, &board, Player::O),
            Err(Error::NoLegalActions)
        ));
    }
}
