use crate::debug_log;
use crate::error::GameError;
use crate::game_state::{
    DEFAULT_MAX_ROUNDS, Game, GameInterface, GameStatus, GuessOutcome, Placement, UserAction,
};
use crate::wordbank::Language;
use clap::Parser;
use clap::builder::TypedValueParser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Guess the hidden word; every miss narrows its alphabetical range
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Word list language (english, italian)
    #[arg(short, long, env = "LEXIGUESS_LANGUAGE", default_value_t = Language::English)]
    pub language: Language,

    /// Number of wrong guesses allowed before the game is lost
    #[arg(
        short = 'r',
        long = "rounds",
        env = "LEXIGUESS_ROUNDS",
        default_value_t = DEFAULT_MAX_ROUNDS,
        value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize)
    )]
    pub max_rounds: usize,

    /// Newline-delimited English word list (replaces the built-in one)
    #[arg(long = "english-words")]
    pub english_words: Option<PathBuf>,

    /// Newline-delimited Italian word list (replaces the built-in one)
    #[arg(long = "italian-words")]
    pub italian_words: Option<PathBuf>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Explicit word list path for `language`, if one was given.
    #[must_use]
    pub fn wordbank_path(&self, language: Language) -> Option<&PathBuf> {
        match language {
            Language::English => self.english_words.as_ref(),
            Language::Italian => self.italian_words.as_ref(),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// Prefix that marks a line as a command. Any other line is a guess, so
/// words like `next` or `exit` stay guessable.
pub const COMMAND_PREFIX: char = ':';

/// Turn one line of input into an action.
pub fn parse_line(line: &str) -> Result<UserAction, String> {
    let trimmed = line.trim();
    let Some(command_line) = trimmed.strip_prefix(COMMAND_PREFIX) else {
        return Ok(UserAction::Guess(trimmed.to_string()));
    };

    let mut parts = command_line.split_whitespace();
    let command = parts.next().unwrap_or_default().to_lowercase();
    let argument = parts.next();

    match (command.as_str(), argument) {
        ("exit" | "quit", None) => Ok(UserAction::Exit),
        ("new" | "next", None) => Ok(UserAction::NewGame),
        ("clear", None) => Ok(UserAction::ClearInput),
        ("lang" | "language", Some(name)) => name
            .parse::<Language>()
            .map(UserAction::SetLanguage)
            .map_err(|e| e.to_string()),
        ("rounds", Some(n)) => match n.parse::<usize>() {
            Ok(rounds) if rounds >= 1 => Ok(UserAction::SetMaxRounds(rounds)),
            _ => Err(format!("'{n}' is not a positive number of rounds")),
        },
        ("lang" | "language" | "rounds", None) => Err(format!(":{command} needs a value")),
        _ => Err(format!("Unknown command ':{command}'")),
    }
}

fn guess_count(n: usize) -> String {
    if n == 1 {
        "1 guess".to_string()
    } else {
        format!("{n} guesses")
    }
}

fn placement_hint(placement: Placement) -> &'static str {
    match placement {
        Placement::Before => "comes before",
        Placement::After => "comes after",
    }
}

/// Line-based implementation of `GameInterface` over any reader and writer.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            log::warn!("Failed to write to output: {e}");
        }
    }

    fn display_status(&mut self, game: &Game) {
        let range = game.range();
        self.say(&format!(
            "Range: {} .. {} | Round {}/{} ({} left)",
            range.start,
            range.end,
            game.current_round(),
            game.max_rounds(),
            game.remaining_rounds()
        ));
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn read_action(&mut self, game: &Game) -> Option<UserAction> {
        let prompt = if game.is_game_over() {
            "\nGame over. Type ':new' to play again or ':exit' to quit:"
        } else {
            "\nEnter your guess (commands: ':new', ':lang <name>', ':rounds <n>', ':clear', ':exit'):"
        };
        self.say(prompt);

        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => return Some(UserAction::Exit),
            Ok(_) => {}
            Err(e) => {
                log::error!("Failed to read input: {e}");
                return Some(UserAction::Exit);
            }
        }
        debug_log!("read_action() - line: {:?}", input);

        if input.trim().is_empty() {
            return None;
        }
        match parse_line(&input) {
            Ok(UserAction::Guess(_)) if game.is_game_over() => {
                self.say("The game is over. Type ':new' to start again.");
                None
            }
            Ok(action) => Some(action),
            Err(message) => {
                self.say(&message);
                None
            }
        }
    }

    fn display_outcome(&mut self, game: &Game, outcome: GuessOutcome) {
        let guess = game.guesses().last().cloned().unwrap_or_default();
        match outcome {
            GuessOutcome::Won => {
                self.say(&format!(
                    "Correct! The word was '{guess}' ({}).",
                    guess_count(game.guesses().len())
                ));
            }
            GuessOutcome::Narrowed(placement) => {
                self.say(&format!("The word {} '{guess}'.", placement_hint(placement)));
                self.display_status(game);
            }
            GuessOutcome::OutOfRounds(placement) => {
                self.say(&format!("The word {} '{guess}'.", placement_hint(placement)));
                let target = game.revealed_target().unwrap_or_default();
                self.say(&format!("Out of rounds! The word was '{target}'."));
            }
        }
    }

    fn display_new_game(&mut self, game: &Game) {
        self.say(&format!(
            "New {} game: {} words in play, {} rounds.",
            game.language(),
            game.active_word_list().len(),
            game.max_rounds()
        ));
        self.display_status(game);
    }

    fn display_error(&mut self, error: &GameError) {
        self.say(&format!("Error: {error}"));
    }

    fn display_exit_message(&mut self) {
        self.say("Exiting.");
    }
}

/// Status word used by front ends.
#[must_use]
pub fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Playing => "playing",
        GameStatus::Won => "won",
        GameStatus::Lost => "lost",
    }
}
