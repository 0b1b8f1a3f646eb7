mod command;
mod render;

use std::io::{self, BufRead, Write};

use clap::Parser;
use colored::Colorize;
use common::game::Game;
use common::{GameError, MAX_RINGS};

use crate::command::Command;

/// Interactive Tower of Hanoi for the terminal.
#[derive(Parser, Debug)]
#[command(name = "hanoi")]
struct Args {
    /// Start a game with this many rings right away
    #[arg(short, long)]
    rings: Option<u8>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut game = Game::new();
    println!("Tower of Hanoi. Type help for the command list.");

    if let Some(rings) = args.rings {
        run(&mut game, Command::Start { rings });
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("hanoi> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // stdin closed
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match command::parse(input) {
            Ok(Command::Quit) => break,
            Ok(command) => run(&mut game, command),
            Err(err) => println!("{}", err.to_string().red()),
        }
    }

    Ok(())
}

fn run(game: &mut Game, command: Command) {
    match command {
        Command::Start { rings } => match game.start(rings) {
            Ok(board) => {
                log::info!("new game with {rings} rings");
                print!("{}", render::render_board(board, rings));
            }
            Err(err) => report(err),
        },
        Command::Move(mv) => match game.move_ring(mv) {
            Ok(()) => {
                show_board(game);

                let solved = game
                    .is_solved()
                    .expect("a move just succeeded, so the game is running");
                if solved {
                    let moves = game.history().expect("game is running").len() - 1;
                    println!("{}", format!("solved in {moves} moves!").green());
                }
            }
            Err(err) => report(err),
        },
        Command::Undo => match game.undo() {
            Ok(()) => show_board(game),
            Err(err) => report(err),
        },
        Command::Solve => match game.solve() {
            Ok(trace) => {
                let rings = game.rings().expect("solve succeeded, so the game is running");
                for (step, board) in trace.iter().enumerate() {
                    println!("step {step}:");
                    print!("{}", render::render_board(board, rings));
                }
                println!("{} moves in total. Your game is unchanged.", trace.len() - 1);
            }
            Err(err) => report(err),
        },
        Command::Show => show_board(game),
        Command::Help => print_help(),
        Command::Quit => unreachable!("quit is handled by the input loop"),
    }
}

fn show_board(game: &Game) {
    match (game.board(), game.rings()) {
        (Ok(board), Ok(rings)) => print!("{}", render::render_board(board, rings)),
        (Err(err), _) | (_, Err(err)) => report(err),
    }
}

fn report(err: GameError) {
    println!("{}", err.to_string().red());
}

fn print_help() {
    println!("commands:");
    println!("  start <rings>     begin a new game (1 to {MAX_RINGS} rings)");
    println!("  move <src> <dst>  move the top ring between pegs 0..2  (alias: m)");
    println!("  undo              take back the last move              (alias: u)");
    println!("  solve             print the optimal solution step by step");
    println!("  show              print the current board");
    println!("  quit              leave");
}
