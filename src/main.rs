//! # play
//!
//! Terminal front end for the MCTS engine. Runs AI-vs-AI self-play, or lets a
//! human take one side, in tic-tac-toe, connect four or Quoridor.
//!
//! ## Usage
//! ```text
//! play --game quoridor --iterations 2000 --human 1
//! play --game connect4 --threads 0 --seed 7
//! ```
//! `--threads 1` (the default) runs the sequential search; any other value
//! runs the root-parallel search, with 0 meaning one worker per CPU.
//! `RUST_LOG` overrides `--log-level`.

mod game_controller;
mod game_wrapper;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use game_controller::{GameController, GameStatus, MoveResult};
use game_wrapper::{GameWrapper, MoveWrapper};
use mcts::games::connect4::Connect4State;
use mcts::games::quoridor::QuoridorState;
use mcts::games::tictactoe::TicTacToeState;
use mcts::{MctsConfig, QuoridorError, SearchError, MCTS};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum GameKind {
    #[value(name = "tictactoe")]
    TicTacToe,
    #[value(name = "connect4")]
    Connect4,
    #[value(name = "quoridor")]
    Quoridor,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play board games against a Monte Carlo Tree Search engine", long_about = None)]
struct Args {
    #[arg(short, long, value_enum, default_value_t = GameKind::Quoridor)]
    game: GameKind,

    /// Search iterations per AI move
    #[arg(short, long, default_value_t = 1000)]
    iterations: u32,

    /// UCT exploration constant
    #[arg(short, long, default_value_t = std::f64::consts::SQRT_2)]
    exploration: f64,

    /// Fixed seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Search threads: 1 is sequential, 0 uses every CPU
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Quoridor board size (odd)
    #[arg(short, long, default_value_t = 9)]
    board_size: usize,

    /// Quoridor walls per player
    #[arg(short, long, default_value_t = 10)]
    walls: u8,

    /// Let a human play as player 1 or 2
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    human: Option<u8>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn initial_state(&self) -> Result<GameWrapper, PlayError> {
        Ok(match self.game {
            GameKind::TicTacToe => GameWrapper::TicTacToe(TicTacToeState::new()),
            GameKind::Connect4 => GameWrapper::Connect4(Connect4State::default()),
            GameKind::Quoridor => {
                GameWrapper::Quoridor(QuoridorState::with_config(self.board_size, self.walls)?)
            }
        })
    }

    fn mcts_config(&self) -> MctsConfig {
        let config = MctsConfig::default()
            .with_iterations(self.iterations)
            .with_exploration_constant(self.exploration)
            .with_threads(self.threads);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

#[derive(Debug, Error)]
enum PlayError {
    #[error(transparent)]
    Setup(#[from] QuoridorError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("failed to read move: {0}")]
    Io(#[from] io::Error),
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn colored_player(game: &GameWrapper, player: u8) -> String {
    let name = game.player_name(player);
    if player == 1 {
        name.red().bold().to_string()
    } else {
        name.blue().bold().to_string()
    }
}

fn ai_move(engine: &mut MCTS<GameWrapper>, controller: &GameController, threads: usize) -> Result<MoveWrapper, PlayError> {
    let state = controller.get_state_for_search();
    let mv = if threads == 1 {
        engine.search(&state)?
    } else {
        engine.search_parallel(&state)?
    };

    if let Some(stats) = engine.last_statistics() {
        debug!(
            nodes = stats.total_nodes,
            root_visits = stats.root_visits,
            best_value = stats.best_value,
            "search statistics"
        );
    }
    Ok(mv)
}

fn announce(game: &GameWrapper, result: &MoveResult) {
    if let MoveResult::Success { move_made, player, game_over, winner } = result {
        println!("{} plays {}", colored_player(game, *player), move_made);
        if *game_over {
            debug!(?winner, "final move");
        }
    }
}

/// Prompts until the human enters a legal move. `None` when input ends.
fn human_move<I>(controller: &mut GameController, lines: &mut I) -> Result<Option<MoveResult>, PlayError>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        let game = controller.get_render_state();
        print!("{} ({}) > ", colored_player(game, controller.get_current_player()), game.move_hint());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        match controller.try_make_move_str(line?.trim()) {
            MoveResult::Invalid { reason } => println!("{}", reason.to_string().yellow()),
            result => return Ok(Some(result)),
        }
    }
}

fn main() -> Result<(), PlayError> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut controller = GameController::new(args.initial_state()?);
    let config = args.mcts_config();
    info!(
        game = controller.get_render_state().name(),
        iterations = config.iterations,
        threads = config.effective_threads(),
        human = ?args.human,
        "starting game"
    );
    let mut engine: MCTS<GameWrapper> = MCTS::new(config);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}\n", controller.get_render_state());
    while !controller.is_game_over() {
        let player = controller.get_current_player();
        let result = if args.human == Some(player) {
            match human_move(&mut controller, &mut lines)? {
                Some(result) => result,
                None => {
                    info!("input closed, leaving game");
                    return Ok(());
                }
            }
        } else {
            let mv = ai_move(&mut engine, &controller, args.threads)?;
            controller.apply_trusted_move(mv)
        };
        announce(controller.get_render_state(), &result);
        println!("{}\n", controller.get_render_state());
    }

    let game = controller.get_render_state();
    match controller.get_status() {
        GameStatus::Win(winner) => println!("{} wins!", colored_player(game, winner)),
        GameStatus::Draw => println!("{}", "Draw".bold()),
        GameStatus::InProgress => {}
    }
    info!(moves = controller.move_count(), "game over");
    println!("\n{}", controller.format_history());
    Ok(())
}
