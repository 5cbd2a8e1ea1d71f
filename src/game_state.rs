//! Game engine for the lexicographic guessing game.
//!
//! A [`Game`] owns one session at a time: a hidden target word, the guesses
//! made so far and the tightest alphabetical range known to contain the
//! target. All mutation goes through the named operations; a new session
//! replaces the old one wholesale.

use crate::error::GameError;
use crate::wordbank::{LOWER_SENTINEL, Language, WordBank};
use crate::{debug_log, info_log};
use rand::prelude::IndexedRandom;

pub const DEFAULT_MAX_ROUNDS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub language: Language,
    pub max_rounds: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Alphabetical bounds known to contain the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRange {
    pub start: String,
    pub end: String,
}

impl WordRange {
    fn for_language(language: Language) -> Self {
        Self {
            start: LOWER_SENTINEL.to_string(),
            end: language.upper_sentinel().to_string(),
        }
    }
}

/// Which side of the target a wrong guess landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Sorts before the target; raised `range.start`.
    Before,
    /// Sorts after the target; lowered `range.end`.
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Won,
    Narrowed(Placement),
    /// The guess narrowed the range but used up the last round.
    OutOfRounds(Placement),
}

#[derive(Debug, Clone)]
struct Session {
    target_word: String,
    language: Language,
    current_round: usize,
    max_rounds: usize,
    guesses: Vec<String>,
    range: WordRange,
    status: GameStatus,
    pending_input: String,
}

pub struct Game {
    wordbank: WordBank,
    session: Session,
}

impl Game {
    /// Build the engine around `wordbank` and start the first session.
    pub fn new(wordbank: WordBank, settings: GameSettings) -> Result<Self, GameError> {
        let session = Self::fresh_session(&wordbank, settings.language, settings.max_rounds)?;
        Ok(Self { wordbank, session })
    }

    fn fresh_session(
        wordbank: &WordBank,
        language: Language,
        max_rounds: usize,
    ) -> Result<Session, GameError> {
        let target_word = wordbank
            .words(language)
            .choose(&mut rand::rng())
            .ok_or(GameError::EmptyWordList { language })?
            .clone();

        debug_log!("Picked target '{}' for a new {} game", target_word, language);

        Ok(Session {
            target_word,
            language,
            current_round: 0,
            max_rounds: max_rounds.max(1),
            guesses: Vec::new(),
            range: WordRange::for_language(language),
            status: GameStatus::Playing,
            pending_input: String::new(),
        })
    }

    /// Replace the current session with a fresh one.
    ///
    /// On error the previous session is left untouched.
    pub fn start_new_game(&mut self, language: Language, max_rounds: usize) -> Result<(), GameError> {
        self.session = Self::fresh_session(&self.wordbank, language, max_rounds)?;
        info_log!(
            "New game started: language={}, max_rounds={}",
            language,
            self.session.max_rounds
        );
        Ok(())
    }

    pub fn reset_game(&mut self) -> Result<(), GameError> {
        self.start_new_game(self.session.language, self.session.max_rounds)
    }

    /// Switch language. This always restarts the game.
    pub fn set_language(&mut self, language: Language) -> Result<(), GameError> {
        self.start_new_game(language, self.session.max_rounds)
    }

    /// Change the round budget in place. The new limit is only checked on
    /// the next submitted guess, so a lost game stays lost.
    pub fn set_max_rounds(&mut self, rounds: usize) {
        self.session.max_rounds = rounds.max(1);
        debug_log!("Max rounds set to {}", self.session.max_rounds);
    }

    /// Submit the pending input as a guess.
    ///
    /// Returns `None` without touching any state when the input is blank or
    /// the game is already over.
    pub fn submit_guess(&mut self) -> Option<GuessOutcome> {
        if self.session.pending_input.trim().is_empty() || self.is_game_over() {
            return None;
        }

        let guess = self.session.pending_input.trim().to_lowercase();
        let session = &mut self.session;
        session.pending_input.clear();

        if guess == session.target_word {
            info_log!("Guess '{}' is the target after {} rounds", guess, session.current_round);
            session.guesses.push(guess);
            session.status = GameStatus::Won;
            return Some(GuessOutcome::Won);
        }

        let placement = if guess < session.target_word {
            Placement::Before
        } else {
            Placement::After
        };
        match placement {
            Placement::Before => session.range.start.clone_from(&guess),
            Placement::After => session.range.end.clone_from(&guess),
        }
        session.guesses.push(guess);
        session.current_round += 1;

        debug_log!(
            "Round {}/{}: range now '{}'..'{}'",
            session.current_round,
            session.max_rounds,
            session.range.start,
            session.range.end
        );

        if session.current_round >= session.max_rounds {
            session.status = GameStatus::Lost;
            info_log!("Out of rounds; target was '{}'", session.target_word);
            return Some(GuessOutcome::OutOfRounds(placement));
        }
        Some(GuessOutcome::Narrowed(placement))
    }

    pub fn append_letter(&mut self, letter: char) {
        if self.is_game_over() {
            return;
        }
        self.session.pending_input.push(letter);
    }

    pub fn delete_last_letter(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.session.pending_input.pop();
    }

    /// Clears the pending input, even after the game has ended.
    pub fn clear_pending_input(&mut self) {
        self.session.pending_input.clear();
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.session.language
    }

    #[must_use]
    pub fn max_rounds(&self) -> usize {
        self.session.max_rounds
    }

    #[must_use]
    pub fn current_round(&self) -> usize {
        self.session.current_round
    }

    #[must_use]
    pub fn guesses(&self) -> &[String] {
        &self.session.guesses
    }

    #[must_use]
    pub fn range(&self) -> &WordRange {
        &self.session.range
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    #[must_use]
    pub fn pending_input(&self) -> &str {
        &self.session.pending_input
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session.status != GameStatus::Playing
    }

    /// Rounds left before the game is lost; zero if the limit was lowered
    /// below the rounds already played.
    #[must_use]
    pub fn remaining_rounds(&self) -> usize {
        self.session.max_rounds.saturating_sub(self.session.current_round)
    }

    #[must_use]
    pub fn active_word_list(&self) -> &[String] {
        self.wordbank.words(self.session.language)
    }

    /// The target, but only once the game is over.
    #[must_use]
    pub fn revealed_target(&self) -> Option<&str> {
        self.is_game_over().then_some(self.session.target_word.as_str())
    }

    /// Give up the secret unconditionally.
    #[must_use]
    pub fn reveal_target(&self) -> &str {
        &self.session.target_word
    }
}

/// Everything a front end can ask the engine to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Letter(char),
    DeleteLetter,
    ClearInput,
    Submit,
    /// A whole word typed at once; replaces any pending input.
    Guess(String),
    NewGame,
    SetLanguage(Language),
    SetMaxRounds(usize),
    Exit,
}

/// A front end the game loop can drive (line-based CLI or full-screen TUI).
pub trait GameInterface {
    /// Next action, or `None` if nothing actionable was entered.
    fn read_action(&mut self, game: &Game) -> Option<UserAction>;
    fn display_outcome(&mut self, game: &Game, outcome: GuessOutcome);
    fn display_new_game(&mut self, game: &Game);
    fn display_error(&mut self, error: &GameError);
    fn display_exit_message(&mut self);
}

pub fn game_loop<I: GameInterface>(game: &mut Game, interface: &mut I) {
    interface.display_new_game(game);

    loop {
        let Some(action) = interface.read_action(game) else {
            continue;
        };
        debug_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Letter(c) => game.append_letter(c),
            UserAction::DeleteLetter => game.delete_last_letter(),
            UserAction::ClearInput => game.clear_pending_input(),
            UserAction::Submit => submit(game, interface),
            UserAction::Guess(word) => {
                game.clear_pending_input();
                for c in word.chars() {
                    game.append_letter(c);
                }
                submit(game, interface);
            }
            UserAction::NewGame => restart(game.reset_game(), game, interface),
            UserAction::SetLanguage(language) => {
                restart(game.set_language(language), game, interface);
            }
            UserAction::SetMaxRounds(rounds) => game.set_max_rounds(rounds),
        }
    }
}

fn submit<I: GameInterface>(game: &mut Game, interface: &mut I) {
    if let Some(outcome) = game.submit_guess() {
        interface.display_outcome(game, outcome);
    }
}

fn restart<I: GameInterface>(result: Result<(), GameError>, game: &Game, interface: &mut I) {
    match result {
        Ok(()) => interface.display_new_game(game),
        Err(e) => {
            log::error!("Could not start a new game: {e}");
            interface.display_error(&e);
        }
    }
}
