#![no_std]

//! Line detection for grid games stored as flat, row-major boards of player ids.
//!
//! Cells hold `0` for empty and a player id (`1` or `2`) otherwise.

/// The four line directions as (row, column) steps: horizontal, vertical and
/// both diagonals. The opposite directions are covered by walking backwards.
pub const LINE_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Checks the whole board for `line_size` consecutive cells owned by `player`.
///
/// # Arguments
/// * `board` - The board data as a flat slice
/// * `width` - Board width
/// * `height` - Board height
/// * `player` - The player id to check for
/// * `line_size` - Number of consecutive pieces needed to win
pub fn check_line_win(board: &[u8], width: usize, height: usize, player: u8, line_size: usize) -> bool {
    (0..height).any(|row| {
        (0..width).any(|col| {
            board[row * width + col] == player
                && LINE_DIRECTIONS.iter().any(|&(dr, dc)| {
                    run_length(board, width, height, (row, col), (dr, dc), player) + 1 >= line_size
                })
        })
    })
}

/// Checks only the lines passing through `(row, col)`.
///
/// This is the cheap check after a move: a new line can only appear through
/// the cell that was just filled.
pub fn line_through(board: &[u8], width: usize, height: usize, row: usize, col: usize, line_size: usize) -> bool {
    let player = board[row * width + col];
    if player == 0 {
        return false;
    }
    LINE_DIRECTIONS.iter().any(|&(dr, dc)| {
        let forward = run_length(board, width, height, (row, col), (dr, dc), player);
        let backward = run_length(board, width, height, (row, col), (-dr, -dc), player);
        forward + backward + 1 >= line_size
    })
}

/// Counts consecutive `player` cells starting one step away from `origin`.
fn run_length(
    board: &[u8],
    width: usize,
    height: usize,
    origin: (usize, usize),
    step: (i32, i32),
    player: u8,
) -> usize {
    let mut count = 0;
    let mut r = origin.0 as i32 + step.0;
    let mut c = origin.1 as i32 + step.1;
    while r >= 0 && c >= 0 && (r as usize) < height && (c as usize) < width {
        if board[r as usize * width + c as usize] != player {
            break;
        }
        count += 1;
        r += step.0;
        c += step.1;
    }
    count
}
