//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{choose_move::ChooseMoveArgs, play::PlayArgs, watch::WatchArgs};

#[derive(StructOpt)]
#[structopt(
    name = "chess-opponent",
    about = "A computer chess opponent: random moves or a fixed-depth alpha-beta search ♛"
)]
pub enum Chess {
    #[structopt(
        name = "choose-move",
        about = "Choose a move for the side to move in the position given with `--fen` (required). The policy comes from `--difficulty` (default: easy) unless `--policy` or `--depth` is given. `--time-ms` and `--nodes` bound the search."
    )]
    ChooseMove(ChooseMoveArgs),
    #[structopt(
        name = "play",
        about = "Play a game against the computer at the given `--difficulty` (default: easy). Your color is chosen at random unless you specify it with `--color`. Enter moves in coordinate notation (e2e4, e7e8q); `undo`, `new` and `quit` are also understood."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "watch",
        about = "Watch the computer play against itself. Each side has its own difficulty (`--white`, `--black`)."
    )]
    Watch(WatchArgs),
}

impl crate::cli::commands::Command for Chess {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            ChooseMove(cmd),
            Play(cmd),
            Watch(cmd),
        }
    }
}
