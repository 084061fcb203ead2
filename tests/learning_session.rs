//! Learning sessions driven through the app container.

mod common;

use std::{path::Path, sync::Arc, thread};

use common::c4;
use gridmind::{
    GameKind, GameRules, Player, StateKey,
    adapters::InMemoryRepository,
    agents::LearningAgent,
    app::{App, LearningConfig},
    ports::{Agent, SessionRepository},
    q_learning::{LearningSession, Outcome, Selection, SharedSession},
};

fn app(repo: &InMemoryRepository) -> App {
    App::for_testing()
        .with_repository(repo.clone())
        .with_state_dir("mem")
        .with_default_seed(42)
        .build()
}

#[test]
fn winning_move_is_learned_from_one_request() {
    let rules = GameRules::connect_four();
    // Greedy with ε = 0 and an empty table picks column 0, which wins.
    let config = LearningConfig::for_game(GameKind::ConnectFour)
        .with_epsilon(0.0)
        .with_min_epsilon(0.0)
        .with_seed(1);
    let mut session = LearningSession::new(rules.clone(), &config).unwrap();
    let board = c4("......|......|......|X.....|X.....|X.....");

    let decision = session.decide(&board, Player::X).unwrap();
    assert_eq!(decision.action, 0);
    assert_eq!(decision.selection, Selection::Exploit);
    assert_eq!(decision.outcome, Outcome::Win);
    assert!(decision.done);
    assert_eq!(decision.reward, 1.0);
    // 0 + 0.5 * (1 + 0.9 * 0 - 0)
    assert_eq!(decision.q_value, 0.5);
    assert_eq!(session.q_table().value(&StateKey::from(&board), 0), 0.5);
}

#[test]
fn same_seed_gives_same_trajectory() {
    let rules = GameRules::connect_four();
    let config = LearningConfig::for_game(GameKind::ConnectFour).with_seed(2024);
    let mut a = LearningSession::new(rules.clone(), &config).unwrap();
    let mut b = LearningSession::new(rules.clone(), &config).unwrap();

    let mut board = rules.empty_board();
    let mut player = Player::X;
    while !rules.is_terminal(&board) {
        let da = a.decide(&board, player).unwrap();
        let db = b.decide(&board, player).unwrap();
        assert_eq!(da, db);
        board = rules.apply_move(&board, da.action, player).unwrap();
        player = player.opponent();
    }
    assert_eq!(a.to_saved(), b.to_saved());
}

#[test]
fn agent_persists_and_resumes_through_container() {
    let repo = InMemoryRepository::new();
    let app = app(&repo);
    let config = LearningConfig::for_game(GameKind::TicTacToe);
    let rules = GameRules::tic_tac_toe();

    let mut agent = app.learning_agent(GameKind::TicTacToe, &config).unwrap();
    let mut board = rules.empty_board();
    let mut player = Player::X;
    let mut moves = 0;
    while !rules.is_terminal(&board) {
        let choice = agent.select_move(&board, player).unwrap();
        assert!(choice.learning.unwrap().persisted);
        board = rules.apply_move(&board, choice.action, player).unwrap();
        player = player.opponent();
        moves += 1;
    }

    let path = Path::new("mem/tictactoe_session.msgpack");
    let saved = repo.load(path).unwrap();
    assert_eq!(saved.reward_log.len(), moves);
    assert_eq!(saved.game, GameKind::TicTacToe);

    let resumed = app.open_session(GameKind::TicTacToe, &config).unwrap();
    assert_eq!(resumed.reward_log().len(), moves);
    assert_eq!(resumed.epsilon(), saved.epsilon);
}

#[test]
fn concurrent_agents_share_one_session() {
    let repo = InMemoryRepository::new();
    let config = LearningConfig::for_game(GameKind::ConnectFour).with_seed(8);
    let session = LearningSession::new(GameRules::connect_four(), &config).unwrap();
    let shared = SharedSession::new(session);
    let repository: Arc<dyn SessionRepository + Send + Sync> = Arc::new(repo.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let mut agent = LearningAgent::new(shared.clone(), Arc::clone(&repository), "shared");
            thread::spawn(move || {
                let board = GameRules::connect_four().empty_board();
                let player = if i % 2 == 0 { Player::X } else { Player::O };
                (0..10)
                    .map(|_| agent.select_move(&board, player).unwrap().learning.unwrap().episode)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut episodes: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    episodes.sort_unstable();
    assert_eq!(episodes, (0..80).collect::<Vec<u64>>());

    // The last save holds every update.
    let saved = repo.load(Path::new("shared")).unwrap();
    assert_eq!(saved, shared.to_saved());
    assert_eq!(saved.reward_log.len(), 80);
}

#[test]
fn q_values_stay_bounded_over_many_games() {
    let rules = GameRules::tic_tac_toe();
    let config = LearningConfig::for_game(GameKind::TicTacToe).with_seed(3);
    let mut session = LearningSession::new(rules.clone(), &config).unwrap();

    for _ in 0..200 {
        let mut board = rules.empty_board();
        let mut player = Player::X;
        while !rules.is_terminal(&board) {
            let d = session.decide(&board, player).unwrap();
            board = rules.apply_move(&board, d.action, player).unwrap();
            player = player.opponent();
        }
    }

    // |r| <= 1 and γ = 0.9 bound every value by 1 / (1 - 0.9).
    for (_, values) in session.q_table().sorted_entries() {
        for v in values {
            assert!(v.abs() <= 10.0 + 1e-9);
        }
    }
    assert_eq!(session.epsilon(), 0.1);
}
