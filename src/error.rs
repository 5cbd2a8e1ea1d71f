use crate::wordbank::Language;
use thiserror::Error;

/// Failures surfaced by the game engine.
///
/// Bad player input (empty guesses, typing after the game ended) is never an
/// error; those calls are silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("word list for {language} is empty; cannot pick a target word")]
    EmptyWordList { language: Language },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language '{0}' (expected english or italian)")]
pub struct ParseLanguageError(pub String);
