//! Watch command - watch the computer play against itself.

use std::thread;
use std::time::Duration;

use chess::Color;
use chess_opponent::game::{Engine, EngineConfig};
use chess_opponent::position::{Position, STARTING_POSITION_FEN};
use chess_opponent::strategy::{Difficulty, SearchConfig};
use structopt::StructOpt;

use super::util::{format_stats, print_game};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(long, default_value = "easy")]
    pub white: Difficulty,
    #[structopt(long, default_value = "easy")]
    pub black: Difficulty,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Position,
    #[structopt(
        long = "delay-ms",
        default_value = "500",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
    #[structopt(long = "max-moves", help = "Stop after this many moves")]
    pub max_moves: Option<usize>,
}

impl Command for WatchArgs {
    fn execute(self) {
        let white = SearchConfig::from(self.white);
        let black = SearchConfig::from(self.black);
        let mut engine = Engine::with_config(EngineConfig {
            search: white,
            starting_position: self.starting_position,
        });

        let mut played = 0;
        print_game(&engine);

        while !engine.is_game_over() && self.max_moves.map_or(true, |max| played < max) {
            let mover = engine.position().side_to_move();
            engine.set_search_config(match mover {
                Color::White => white,
                Color::Black => black,
            });

            match engine.make_best_move() {
                Ok(Some(chess_move)) => {
                    played += 1;
                    println!("{:?} plays {}", mover, chess_move);
                    if let Some(stats) = engine.last_search_stats() {
                        println!("{}", format_stats(stats));
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    eprintln!("The computer failed to move: {}", err);
                    std::process::exit(1);
                }
            }

            print_game(&engine);
            thread::sleep(Duration::from_millis(self.delay_ms));
        }

        if !engine.is_game_over() {
            println!("Stopped after {} moves.", played);
        }
    }
}
