//! Golden scenarios for the rule-based opponent and the move rules.

mod common;

use common::{c4, ttt};
use gridmind::{
    Error, GameRules, Player,
    agents::HeuristicAgent,
    game::Cell,
    heuristic::{HeuristicPolicy, Tactic},
    ports::Agent,
};

#[test]
fn completes_column_on_tic_tac_toe() {
    let rules = GameRules::tic_tac_toe();
    let board = ttt("X..|X..|...");
    let mut policy = HeuristicPolicy::with_seed(7);
    assert_eq!(
        policy.choose(&rules, &board, Player::X).unwrap(),
        (6, Tactic::Win)
    );
}

#[test]
fn blocks_open_row_on_gravity_board() {
    let rules = GameRules::connect_four();
    let board = c4("......|......|......|......|......|OOO.X.");
    let mut policy = HeuristicPolicy::with_seed(7);
    assert_eq!(
        policy.choose(&rules, &board, Player::X).unwrap(),
        (3, Tactic::Block)
    );
}

#[test]
fn prefers_win_over_block() {
    let rules = GameRules::connect_four();
    let board = c4("......|......|......|O.....|O.....|OXXX..");
    assert_eq!(
        HeuristicPolicy::tactical_move(&rules, &board, Player::X),
        Some((4, Tactic::Win))
    );
    assert_eq!(
        HeuristicPolicy::tactical_move(&rules, &board, Player::O),
        Some((0, Tactic::Win))
    );
}

#[test]
fn random_fallback_is_legal_and_reproducible() {
    let rules = GameRules::connect_four();
    let board = c4("......|......|......|......|......|X.O...");
    let mut a = HeuristicPolicy::with_seed(99);
    let mut b = HeuristicPolicy::with_seed(99);
    for _ in 0..20 {
        let (action, tactic) = a.choose(&rules, &board, Player::X).unwrap();
        assert_eq!(tactic, Tactic::Random);
        assert!(rules.is_legal(&board, action));
        assert_eq!(b.choose(&rules, &board, Player::X).unwrap().0, action);
    }
}

#[test]
fn empty_gravity_board_lands_on_bottom_row() {
    let rules = GameRules::connect_four();
    let board = rules.empty_board();
    assert_eq!(rules.landing(&board, 0), Some((5, 0)));

    let next = rules.apply_move(&board, 0, Player::X).unwrap();
    assert_eq!(next.get(5, 0), Cell::X);
    assert_eq!(next.occupied_count(), 1);
}

#[test]
fn every_illegal_action_is_rejected() {
    let rules = GameRules::tic_tac_toe();
    let board = ttt("XO.|...|..X");
    for action in [0, 1, 8, 9, 100] {
        assert!(matches!(
            rules.apply_move(&board, action, Player::O),
            Err(Error::IllegalMove { .. })
        ));
    }

    let rules = GameRules::connect_four();
    let board = c4("X.....|O.....|X.....|O.....|X.....|O.....");
    assert!(!rules.legal_actions(&board).contains(&0));
    assert!(rules.apply_move(&board, 0, Player::X).is_err());
    assert!(rules.apply_move(&board, 6, Player::X).is_err());
}

#[test]
fn legal_moves_add_exactly_one_piece() {
    let rules = GameRules::connect_four();
    let board = c4("......|......|......|..X...|..O...|.XOX..");
    for action in rules.legal_actions(&board) {
        let next = rules.apply_move(&board, action, Player::O).unwrap();
        assert_eq!(next.occupied_count(), board.occupied_count() + 1);
        rules.validate(&next).unwrap();
    }
}

#[test]
fn heuristic_agent_on_full_board() {
    let mut agent = HeuristicAgent::with_seed(GameRules::tic_tac_toe(), 1);
    let board = ttt("XOX|XOO|OXO");
    assert!(matches!(
        agent.select_move(&board, Player::X),
        Err(Error::NoLegalActions)
    ));
}
