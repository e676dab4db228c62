//! Search behaviour of the MCTS driver on the bundled games.

use mcts::games::connect4::{Connect4Move, Connect4State};
use mcts::games::quoridor::{Direction, QuoridorMove, QuoridorState};
use mcts::games::tictactoe::{TicTacToeMove, TicTacToeState};
use mcts::{GameState, MctsConfig, SearchError, MCTS};

/// X on 0 and 1, O on 3 and 4, X to move: only cell 2 wins at once.
fn tictactoe_threat() -> TicTacToeState {
    let mut state = TicTacToeState::new();
    for cell in [0, 3, 1, 4] {
        state.make_move(&TicTacToeMove(cell));
    }
    state
}

#[test]
fn test_takes_immediate_win_for_any_exploration_constant() {
    for c in [0.0, std::f64::consts::SQRT_2, 10.0] {
        for seed in [1, 2, 3] {
            let config = MctsConfig::default()
                .with_iterations(2000)
                .with_exploration_constant(c)
                .with_seed(seed);
            let mut search = MCTS::new(config);
            assert_eq!(search.search(&tictactoe_threat()).unwrap(), TicTacToeMove(2), "c = {c}, seed = {seed}");
        }
    }
}

#[test]
fn test_connect4_completes_column() {
    let mut state = Connect4State::default();
    for col in [0, 1, 0, 1, 0, 1] {
        state.make_move(&Connect4Move(col));
    }
    let mut search = MCTS::new(MctsConfig::for_testing().with_iterations(3000));
    assert_eq!(search.search(&state).unwrap(), Connect4Move(0));
}

#[test]
fn test_quoridor_steps_onto_goal_row() {
    let mut state = QuoridorState::with_config(3, 0).unwrap();
    state.make_move(&QuoridorMove::Step(Direction::North));
    state.make_move(&QuoridorMove::Step(Direction::East));

    let mut search = MCTS::new(MctsConfig::for_testing());
    assert_eq!(search.search(&state).unwrap(), QuoridorMove::Step(Direction::North));
}

#[test]
fn test_quoridor_search_returns_legal_move() {
    let state = QuoridorState::with_config(5, 2).unwrap();
    let mut search = MCTS::new(MctsConfig::for_testing().with_iterations(300));
    let mv = search.search(&state).unwrap();
    assert!(state.is_legal(&mv));
}

#[test]
fn test_same_seed_same_search() {
    let state = TicTacToeState::new();
    let mut a = MCTS::new(MctsConfig::for_testing());
    let mut b = MCTS::new(MctsConfig::for_testing());
    assert_eq!(a.search(&state).unwrap(), b.search(&state).unwrap());
    assert_eq!(a.get_root_children_stats(), b.get_root_children_stats());
}

#[test]
fn test_statistics_account_for_every_iteration() {
    let mut search = MCTS::new(MctsConfig::for_testing().with_iterations(500));
    search.search(&TicTacToeState::new()).unwrap();

    let stats = search.last_statistics().unwrap();
    assert_eq!(stats.iterations, 500);
    assert_eq!(stats.root_visits, 500);
    assert!(stats.total_nodes > 9);

    let child_visits: u32 = search.get_root_children_stats().iter().map(|(_, _, n)| n).sum();
    assert_eq!(child_visits, 500);
    assert_eq!(search.get_root_children_stats().len(), 9);
    assert_eq!(search.last_tree().map(|t| t.len()), Some(stats.total_nodes));
}

#[test]
fn test_parallel_search_merges_workers() {
    let mut search = MCTS::new(MctsConfig::for_testing().with_iterations(2000).with_threads(4));
    assert_eq!(search.search_parallel(&tictactoe_threat()).unwrap(), TicTacToeMove(2));

    let stats = search.last_statistics().unwrap();
    assert_eq!(stats.root_visits, 2000);
    assert!(search.last_tree().is_none());
}

#[test]
fn test_refuses_finished_game() {
    let mut state = tictactoe_threat();
    state.make_move(&TicTacToeMove(2));
    let mut search = MCTS::new(MctsConfig::for_testing());
    assert_eq!(search.search(&state), Err(SearchError::TerminalState(1)));
    assert_eq!(search.search_parallel(&state), Err(SearchError::TerminalState(1)));
}
