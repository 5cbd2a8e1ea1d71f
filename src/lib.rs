// Library interface for lexiguess
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{GameError, ParseLanguageError};
pub use game_state::{
    DEFAULT_MAX_ROUNDS, Game, GameInterface, GameSettings, GameStatus, GuessOutcome, Placement,
    UserAction, WordRange, game_loop,
};
pub use wordbank::{Language, WordBank, load_wordbank_from_file, load_wordbank_from_str};
