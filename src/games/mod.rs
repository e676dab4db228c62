//! # Game Implementations Module
//!
//! Each game implements the `GameState` trait so the search driver can play it
//! without knowing its rules.
//!
//! ## Supported Games
//! - **Tic-tac-toe**: N-in-a-row on a square board, 3×3 by default; full board is a draw
//! - **Connect 4**: Gravity-based connection game on a 7×6 grid; full board is a draw
//! - **Quoridor**: Race to the far row on a 9×9 grid while placing walls; never a draw
//!
//! ## Adding New Games
//! To add a new game, create a new module and implement:
//! 1. A move type with `Display` and `FromStr`
//! 2. A game state type with the GameState trait
//! 3. Game-specific rules and win conditions, setting the winner inside `make_move`

pub mod connect4;
pub mod quoridor;
pub mod tictactoe;
