use anyhow::Result;
use clap::Parser;

use std::io::{stdin, stdout, Write};
use std::time::Duration;

use connectn_ai::{
    rules::{is_board_full, winner},
    Board, BoardConfig, Bot, Counter, EngineConfig, InvalidMove, Player,
};

mod display;
use display::*;

/// Play Connect-N in the terminal against a time-limited engine
#[derive(Parser, Debug)]
#[command(name = "connectn", version)]
struct Args {
    /// Number of columns
    #[arg(long, default_value_t = 7)]
    width: usize,

    /// Number of rows
    #[arg(long, default_value_t = 6)]
    height: usize,

    /// Counters in a row needed to win
    #[arg(long, default_value_t = 4)]
    win_condition: usize,

    /// Time budget per engine move in milliseconds
    #[arg(long, default_value_t = 9_500)]
    time_ms: u64,

    /// Deepest search iteration
    #[arg(long, default_value_t = 50)]
    max_depth: u32,

    /// Let the engine make the first move
    #[arg(long)]
    engine_first: bool,

    /// Let the engine play both sides
    #[arg(long)]
    self_play: bool,

    /// Search root moves on a single thread
    #[arg(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let board_config = BoardConfig::new(args.width, args.height)?;
    let engine_config = EngineConfig::default()
        .with_win_condition(args.win_condition)
        .with_max_depth(args.max_depth)
        .with_time_limit(Duration::from_millis(args.time_ms))
        .with_parallel(!args.sequential);

    // the first player is always O
    let engine_side = if args.engine_first { Counter::O } else { Counter::X };
    let mut engines: Vec<Bot> = Vec::new();
    for &counter in [Counter::O, Counter::X].iter() {
        if args.self_play || counter == engine_side {
            engines.push(Bot::with_config(counter, engine_config.clone())?);
        }
    }

    let stdin = stdin();
    let mut board = Board::new(board_config);
    let mut to_move = Counter::O;

    println!("Welcome to Connect {}\n", args.win_condition);

    // game loop
    loop {
        display(&board)?;

        if let Some(counter) = winner(&board, args.win_condition) {
            println!("{} wins!", colour_name(counter));
            break;
        }
        if is_board_full(&board) {
            println!("Draw!");
            break;
        }

        let column = match engines.iter_mut().find(|bot| bot.counter() == to_move) {
            // AI player
            Some(bot) => {
                println!("{} is thinking...", bot.name());
                stdout().flush()?;
                let column = bot.make_move(&board);
                println!("{} plays {}", colour_name(to_move), column + 1);
                column
            }

            // human player
            None => {
                print!("{} move input > ", colour_name(to_move));
                stdout().flush()?;
                let mut input_str = String::new();
                if stdin.read_line(&mut input_str)? == 0 {
                    // stdin closed
                    break;
                }

                match input_str.trim().parse::<usize>() {
                    Ok(column) if column >= 1 => column - 1,
                    _ => {
                        println!("Invalid number: {}", input_str.trim());
                        continue;
                    }
                }
            }
        };

        match board.with_move(column, to_move) {
            Ok(next) => {
                board = next;
                to_move = to_move.other();
            }
            Err(InvalidMove::ColumnFull(column)) => {
                println!("Invalid move, column {} full", column + 1);
                // try the move again
                continue;
            }
            Err(InvalidMove::ColumnOutOfRange { column, width }) => {
                println!(
                    "Invalid move, column {} out of range. Columns must be between 1 and {}",
                    column + 1,
                    width
                );
                continue;
            }
        }
    }
    Ok(())
}
