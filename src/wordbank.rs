use crate::error::ParseLanguageError;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const EMBEDDED_ENGLISH: &str = include_str!("resources/english.txt");
pub const EMBEDDED_ITALIAN: &str = include_str!("resources/italian.txt");

/// Lower bound of every fresh range. Sorts before any real word.
pub const LOWER_SENTINEL: &str = "a";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Italian,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Italian];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Italian => "italian",
        }
    }

    /// Upper bound of a fresh range, chosen to sort after every word in the
    /// language's list.
    #[must_use]
    pub fn upper_sentinel(self) -> &'static str {
        match self {
            Self::English => "zyzzyva",
            Self::Italian => "zona",
        }
    }

    fn embedded_words(self) -> &'static str {
        match self {
            Self::English => EMBEDDED_ENGLISH,
            Self::Italian => EMBEDDED_ITALIAN,
        }
    }

    /// `<config_dir>/lexiguess/<language>.txt`
    #[must_use]
    pub fn user_wordbank_path(self, config_dir: &Path) -> PathBuf {
        config_dir
            .join("lexiguess")
            .join(format!("{}.txt", self.as_str()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "italian" | "it" => Ok(Self::Italian),
            other => Err(ParseLanguageError(other.to_string())),
        }
    }
}

fn normalize_word(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    (!word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())).then_some(word)
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize_word).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_word(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Word lists per language, handed to the engine at construction.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    lists: HashMap<Language, Vec<String>>,
}

impl WordBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Both languages, backed by the lists compiled into the binary.
    #[must_use]
    pub fn embedded() -> Self {
        let mut bank = Self::new();
        for language in Language::ALL {
            bank.insert(language, load_wordbank_from_str(language.embedded_words()));
        }
        bank
    }

    #[must_use]
    pub fn with_list(mut self, language: Language, words: Vec<String>) -> Self {
        self.insert(language, words);
        self
    }

    pub fn insert(&mut self, language: Language, words: Vec<String>) {
        let sentinel = language.upper_sentinel();
        let outside = words.iter().filter(|w| w.as_str() >= sentinel).count();
        if outside > 0 {
            log::warn!(
                "{outside} {language} word(s) sort at or after the range sentinel '{sentinel}'"
            );
        }
        log::debug!("Loaded {} {language} words", words.len());
        self.lists.insert(language, words);
    }

    /// Words for `language`; empty when none were registered.
    #[must_use]
    pub fn words(&self, language: Language) -> &[String] {
        self.lists
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Assemble the word bank for a run.
///
/// Per language, an explicit path wins and must load. Otherwise the user's
/// `<config_dir>/lexiguess/<language>.txt` is used when it exists, and the
/// embedded list is the fallback.
pub fn build_wordbank<F>(explicit_path: F, config_dir: Option<&Path>) -> io::Result<WordBank>
where
    F: Fn(Language) -> Option<PathBuf>,
{
    let mut bank = WordBank::embedded();
    for language in Language::ALL {
        let path = explicit_path(language).or_else(|| {
            config_dir
                .map(|dir| language.user_wordbank_path(dir))
                .filter(|p| p.is_file())
        });
        if let Some(path) = path {
            let words = load_wordbank_from_file(&path)
                .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
            log::info!("Using {} word list from {}", language, path.display());
            bank.insert(language, words);
        }
    }
    Ok(bank)
}
