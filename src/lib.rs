// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod game_state;
pub mod gallows;
pub mod logging;
pub mod provider;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use difficulty::Difficulty;
pub use error::{FetchError, HangmanError};
pub use game_state::{
    GameInterface, GamePhase, GameSession, HighScores, RoundState, Transition, UserAction,
    game_loop, round_score,
};
pub use provider::{
    Definition, DefinitionService, FetchStatus, FetchedWord, RandomWordService, WordEntry,
    WordProvider, WordSource,
};
pub use wordbank::{WordBank, load_wordbank_from_file, load_wordbank_from_str};
