//! Rule scenarios for the Quoridor engine, driven through the public API.

use mcts::games::quoridor::{CellGraph, Direction, Orientation, QuoridorMove, QuoridorState, VisitOrder};
use mcts::GameState;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

fn h(vertex: usize) -> QuoridorMove {
    QuoridorMove::Wall(Orientation::Horizontal, vertex)
}

fn v(vertex: usize) -> QuoridorMove {
    QuoridorMove::Wall(Orientation::Vertical, vertex)
}

/// Graph implied by the player walls currently on the board.
fn rebuild_graph(state: &QuoridorState) -> CellGraph {
    let mut graph = CellGraph::new(state.board_size());
    for (vertex, flags) in state.walls().iter().enumerate() {
        if let (Some(orientation), Some(_)) = (flags.orientation(), flags.placer()) {
            for (a, b) in state.lattice().severed_pairs(vertex, orientation) {
                graph.disconnect(a, b);
            }
        }
    }
    graph
}

fn both_players_reach_goal(state: &QuoridorState) -> bool {
    let graph = state.cell_graph();
    [1u8, 2]
        .into_iter()
        .all(|p| graph.reaches(state.player_position(p), graph.goal(p), VisitOrder::for_player(p)))
}

#[test]
fn test_opening_position_offers_131_moves() {
    let state = QuoridorState::new();
    let moves = state.get_possible_moves();
    assert_eq!(moves.len(), 131);
    assert!(moves.contains(&QuoridorMove::Step(Direction::North)));
    assert!(!moves.contains(&QuoridorMove::Step(Direction::South)));
}

#[test]
fn test_sealed_row_rejects_closing_walls() {
    let mut state = QuoridorState::new();
    for mv in ["h41", "h43", "h45", "h47", "v48"] {
        let mv = state.parse_move(mv).unwrap();
        assert!(state.is_legal(&mv));
        state.make_move(&mv);
        assert!(both_players_reach_goal(&state));
    }
    let moves = state.get_possible_moves();
    assert!(!moves.contains(&h(38)));
    assert!(!moves.contains(&h(58)));
    assert!(!state.is_wall_legal(38, Orientation::Horizontal));
    assert!(!state.is_wall_legal(58, Orientation::Horizontal));
}

#[test]
fn test_wall_closing_gap_in_straight_row_is_refused() {
    let mut state = QuoridorState::new();
    for mv in ["h41", "h45", "h47", "v48", "h58"] {
        let mv = state.parse_move(mv).unwrap();
        assert!(state.is_legal(&mv), "{mv} should be legal");
        state.make_move(&mv);
        assert!(both_players_reach_goal(&state));
    }
    assert!(!state.get_possible_moves().contains(&h(43)));
    assert!(!state.is_wall_legal(43, Orientation::Horizontal));
    assert!(!state.is_legal(&h(43)));

    // The same gap is fine to close while the far end is still open.
    let mut open_end = QuoridorState::new();
    for mv in [h(41), h(45), h(47)] {
        open_end.make_move(&mv);
    }
    assert!(open_end.is_legal(&h(43)));
}

#[test]
fn test_scripted_game_keeps_paths_open() {
    let mut state = QuoridorState::new();
    let script = [h(73), h(13), v(75), v(16), h(62), QuoridorMove::Step(Direction::South), h(66)];
    for mv in script {
        assert!(state.is_legal(&mv), "{mv} should be legal");
        state.make_move(&mv);
        assert!(both_players_reach_goal(&state));
        assert_eq!(state.cell_graph(), &rebuild_graph(&state));
    }
}

#[test]
fn test_place_then_undo_is_identity() {
    let mut state = QuoridorState::new();
    state.make_move(&h(23));
    state.make_move(&QuoridorMove::Step(Direction::South));

    let before = state.clone();
    for mv in before.get_possible_moves().into_iter().filter(|m| m.is_wall()).take(40) {
        let QuoridorMove::Wall(_, vertex) = mv else { unreachable!() };
        state.make_move(&mv);
        state.undo_wall(vertex).unwrap();
        assert_eq!(state, before);
    }
}

#[test]
fn test_walls_run_out() {
    let mut state = QuoridorState::with_config(5, 1).unwrap();
    state.make_move(&h(7));
    state.make_move(&h(27));
    assert_eq!(state.walls_remaining(1), 0);
    assert_eq!(state.walls_remaining(2), 0);
    assert!(state.get_possible_moves().iter().all(|m| !m.is_wall()));
}

fn random_playout(rng: &mut Xoshiro256PlusPlus, board_size: usize, walls: u8, plies: usize) {
    let mut state = QuoridorState::with_config(board_size, walls).unwrap();
    for _ in 0..plies {
        if state.is_terminal() {
            break;
        }
        let moves = state.get_possible_moves();
        assert!(!moves.is_empty());
        let mv = moves[rng.random_range(0..moves.len())];
        state.make_move(&mv);
        assert_eq!(state.cell_graph(), &rebuild_graph(&state));
        assert!(both_players_reach_goal(&state), "{mv} cut a pawn off from its goal");
    }
    let placed = state.walls().iter().filter(|f| f.placer().is_some()).count();
    assert_eq!(
        placed + usize::from(state.walls_remaining(1) + state.walls_remaining(2)),
        2 * usize::from(walls)
    );
}

#[test]
fn test_random_playout_keeps_graph_and_paths() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
    for _ in 0..5 {
        random_playout(&mut rng, 5, 3, 300);
    }
}

#[test]
fn test_random_wall_storm_keeps_paths() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(23);
    for _ in 0..20 {
        random_playout(&mut rng, 9, 10, 120);
    }
}

#[test]
fn test_copy_shares_no_state() {
    let mut original = QuoridorState::new();
    original.make_move(&v(44));
    let snapshot = original.clone();

    let mut copy = original.clone();
    copy.make_move(&h(23));
    copy.make_move(&QuoridorMove::Step(Direction::North));
    copy.undo_wall(44).unwrap();

    assert_eq!(original, snapshot);
    assert_eq!(original.cell_graph(), &rebuild_graph(&original));
}
