//! Play command - play a game against the computer.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use chess::Color;
use chess_opponent::game::{Engine, EngineConfig};
use chess_opponent::input_handler::{read_player_input, InputError, PlayerInput};
use chess_opponent::position::{Position, STARTING_POSITION_FEN};
use chess_opponent::strategy::{Difficulty, SearchConfig};
use log::warn;
use structopt::StructOpt;

use super::util::print_game;
use super::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HumanColor {
    White,
    Black,
    Random,
}

#[derive(Debug)]
pub struct UnknownColor(String);

impl fmt::Display for UnknownColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color `{}`, expected white, black or random", self.0)
    }
}

impl FromStr for HumanColor {
    type Err = UnknownColor;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "white" | "w" => Ok(HumanColor::White),
            "black" | "b" => Ok(HumanColor::Black),
            "random" => Ok(HumanColor::Random),
            _ => Err(UnknownColor(input.to_string())),
        }
    }
}

impl HumanColor {
    fn resolve(self) -> Color {
        match self {
            HumanColor::White => Color::White,
            HumanColor::Black => Color::Black,
            HumanColor::Random => {
                if rand::random() {
                    Color::White
                } else {
                    Color::Black
                }
            }
        }
    }
}

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(long, default_value = "easy")]
    pub difficulty: Difficulty,
    #[structopt(short = "c", long = "color", default_value = "random")]
    pub color: HumanColor,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Position,
}

enum Flow {
    Continue,
    Quit,
}

impl Command for PlayArgs {
    fn execute(self) {
        let human = self.color.resolve();
        let mut engine = Engine::with_config(EngineConfig {
            search: SearchConfig::from(self.difficulty),
            starting_position: self.starting_position,
        });

        println!(
            "You play {:?} against the {} computer.",
            human, self.difficulty
        );

        let stdin = io::stdin();
        let mut input = stdin.lock();

        loop {
            print_game(&engine);

            let flow = if engine.is_game_over() {
                prompt("Enter `new` to play again, `undo` to take back, or `quit`: ");
                handle_player_input(&mut engine, &mut input, human)
            } else if engine.position().side_to_move() == human {
                prompt("Your move: ");
                handle_player_input(&mut engine, &mut input, human)
            } else {
                match engine.make_best_move() {
                    Ok(Some(chess_move)) => {
                        println!("Computer plays {}", chess_move);
                        Flow::Continue
                    }
                    Ok(None) => Flow::Continue,
                    Err(err) => {
                        eprintln!("The computer failed to move: {}", err);
                        std::process::exit(1);
                    }
                }
            };

            if let Flow::Quit = flow {
                break;
            }
        }
    }
}

fn prompt(text: &str) {
    print!("{}", text);
    if let Err(err) = io::stdout().flush() {
        warn!("failed to flush stdout: {}", err);
    }
}

fn handle_player_input<R: io::BufRead>(engine: &mut Engine, input: &mut R, human: Color) -> Flow {
    match read_player_input(input) {
        Ok(PlayerInput::Move { notation }) => {
            if engine.is_game_over() {
                println!("The game is over.");
            } else if let Err(err) = engine.make_move_from_input(&notation) {
                println!("{}", err);
            }
            Flow::Continue
        }
        Ok(PlayerInput::Undo) => {
            undo_to_human_turn(engine, human);
            Flow::Continue
        }
        Ok(PlayerInput::NewGame) => {
            engine.reset();
            Flow::Continue
        }
        Ok(PlayerInput::Quit) | Err(InputError::EndOfInput) => Flow::Quit,
        Err(err) => {
            println!("{}", err);
            Flow::Continue
        }
    }
}

/// Takes back moves until it is the human's turn again.
fn undo_to_human_turn(engine: &mut Engine, human: Color) {
    if let Err(err) = engine.undo_move() {
        println!("{}", err);
        return;
    }

    while engine.position().side_to_move() != human && !engine.position().moves().is_empty() {
        if let Err(err) = engine.undo_move() {
            println!("{}", err);
            return;
        }
    }
}
