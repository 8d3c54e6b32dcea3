//! Choose move command - pick a move for the side to move in a given position.

use chess_opponent::game::{Engine, EngineConfig};
use chess_opponent::position::Position;
use log::info;
use structopt::StructOpt;

use super::util::{format_stats, SearchOptions};
use super::Command;

#[derive(StructOpt)]
pub struct ChooseMoveArgs {
    #[structopt(long = "fen")]
    pub starting_position: Position,
    #[structopt(flatten)]
    pub search: SearchOptions,
}

impl Command for ChooseMoveArgs {
    fn execute(self) {
        let config = EngineConfig {
            search: self.search.search_config(),
            starting_position: self.starting_position,
        };
        let mut engine = Engine::with_config(config);

        match engine.choose_move() {
            Ok(Some(chess_move)) => {
                if let Some(stats) = engine.last_search_stats() {
                    info!("{}", format_stats(stats));
                }
                println!("{}", chess_move);
            }
            Ok(None) => eprintln!(
                "There are no valid moves in the given position ({}).",
                engine.status()
            ),
            Err(err) => {
                eprintln!("Failed to choose a move: {}", err);
                std::process::exit(1);
            }
        }
    }
}
