//! Tengen: console runner for the Go engine.
//!
//! ## Usage
//!
//! - `tengen` - Run a short engine-vs-engine demo
//! - `tengen demo` - Same as above
//! - `tengen play` - Play on the console (human vs engine by default)
//!
//! `play` takes `--black`/`--white` player kinds, `--size`, `--sims` and an
//! optional `--seed` for reproducible engine games.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use tengen::board::{Board, Color, DEFAULT_BOARD_SIZE};
use tengen::game::GameState;
use tengen::mcts::{MctsPlayer, DEFAULT_ITERATIONS};
use tengen::player::{HumanPlayer, Player, RandomPlayer};

/// Tengen: a Go engine with MCTS move selection
#[derive(Parser)]
#[command(name = "tengen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the console
    Play {
        /// Who plays Black
        #[arg(long, value_enum, default_value = "human")]
        black: PlayerKind,
        /// Who plays White
        #[arg(long, value_enum, default_value = "mcts")]
        white: PlayerKind,
        /// Board size (3 to 9)
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        /// MCTS simulations per move
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        sims: usize,
        /// RNG seed for the computer players
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a short engine-vs-engine demo
    Demo,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PlayerKind {
    Human,
    Random,
    Mcts,
}

fn make_player(kind: PlayerKind, color: Color, sims: usize, seed: Option<u64>) -> Box<dyn Player> {
    match kind {
        PlayerKind::Human => Box::new(HumanPlayer::new(color)),
        PlayerKind::Random => Box::new(match seed {
            Some(seed) => RandomPlayer::with_seed(color, seed ^ color.index() as u64),
            None => RandomPlayer::new(color),
        }),
        PlayerKind::Mcts => {
            let engine = MctsPlayer::with_iterations(color, sims);
            Box::new(match seed {
                Some(seed) => engine.with_seed(seed ^ color.index() as u64),
                None => engine,
            })
        }
    }
}

fn main() -> Result<()> {
    // The handle keeps the logger alive for the whole run.
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .context("invalid log specification")?
        .start()
        .context("failed to start logger")?;

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Play {
            black,
            white,
            size,
            sims,
            seed,
        }) => {
            let players = vec![
                make_player(black, Color::Black, sims, seed),
                make_player(white, Color::White, sims, seed),
            ];
            run_game(players, size)
        }
        Some(Commands::Demo) | None => {
            println!("Tengen: engine vs engine on a small board\n");
            let players: Vec<Box<dyn Player>> = vec![
                Box::new(MctsPlayer::with_iterations(Color::Black, 300)),
                Box::new(MctsPlayer::with_iterations(Color::White, 300)),
            ];
            run_game(players, 5)
        }
    }
}

/// Drive a game to completion: ask the player on turn for a move, apply it,
/// stop after two consecutive passes, then clean up dead groups and report
/// the score.
fn run_game(mut players: Vec<Box<dyn Player>>, size: usize) -> Result<()> {
    let rotation: Vec<Color> = players.iter().map(|p| p.color()).collect();
    let mut game = GameState::new(size, rotation);
    let mut passes = 0;

    while passes < 2 {
        let color = game.next_to_move();
        print_board(game.board());
        let player = players
            .iter_mut()
            .find(|p| p.color() == color)
            .context("no player registered for the color on turn")?;
        let mv = loop {
            let mv = player.get_move(&game);
            if game.is_legal_move(mv, color) {
                break mv;
            }
            println!("{mv} is not legal here, try again");
        };
        if mv.is_pass() {
            passes += 1;
            println!("{color} passes");
        } else {
            passes = 0;
            println!("{color} plays {mv}");
        }
        let captured = game.add_move(mv).context("move application failed")?;
        if !captured.is_empty() {
            log::info!("{color} captured {} stone(s)", captured.len());
        }
    }

    game.capture_dead_groups();
    let score = game.score();
    println!("\nGame over:");
    print_board(game.board());
    println!(
        "Black {} - White {}",
        score.get(Color::Black),
        score.get(Color::White)
    );
    match score.get(Color::Black).cmp(&score.get(Color::White)) {
        std::cmp::Ordering::Greater => println!("Black wins"),
        std::cmp::Ordering::Less => println!("White wins"),
        std::cmp::Ordering::Equal => println!("Jigo (draw)"),
    }
    Ok(())
}

/// Print the board with coordinate gutters around the bare `B`/`W`/`+` form.
fn print_board(board: &Board) {
    let mut header = String::from("  ");
    for x in 0..board.size() {
        header.push(' ');
        header.push_str(&x.to_string());
    }
    println!("{header}");
    for (y, row) in board.to_string().lines().enumerate() {
        let mut line = format!("{y:>2}");
        for ch in row.chars() {
            line.push(' ');
            line.push(ch);
        }
        println!("{line}");
    }
    println!();
}
