pub mod alpha_beta_searcher;
pub mod chess_search;
pub mod evaluate;
pub mod game;
pub mod input_handler;
pub mod position;
pub mod strategy;
