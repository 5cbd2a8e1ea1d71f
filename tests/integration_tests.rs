// Integration tests for the lexiguess application
// These tests verify that all modules work together correctly

use lexiguess::cli::CliInterface;
use lexiguess::*;
use std::io::Cursor;

fn fixture_bank(english: &[&str], italian: &[&str]) -> WordBank {
    let to_vec = |words: &[&str]| words.iter().map(|w| (*w).to_string()).collect();
    WordBank::new()
        .with_list(Language::English, to_vec(english))
        .with_list(Language::Italian, to_vec(italian))
}

fn play(game: &mut Game, input: &str) -> String {
    let mut interface = CliInterface::new(Cursor::new(input.to_string()), Vec::new());
    game_loop(game, &mut interface);
    String::from_utf8(interface.into_writer()).unwrap()
}

#[test]
fn test_end_to_end_narrowing_then_loss() {
    // maxRounds=3, target "cat": dog -> ant -> bee loses
    let mut game = Game::new(
        fixture_bank(&["cat"], &["gatto"]),
        GameSettings {
            language: Language::English,
            max_rounds: 3,
        },
    )
    .unwrap();

    let output = play(&mut game, "dog\nant\nbee\n");

    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.current_round(), 3);
    assert_eq!(game.range().start, "bee");
    assert_eq!(game.range().end, "dog");
    assert_eq!(game.guesses(), ["dog", "ant", "bee"].map(String::from));
    assert!(output.contains("Out of rounds! The word was 'cat'."));
    assert!(output.contains("Exiting."));
}

#[test]
fn test_end_to_end_win_first_try() {
    let mut game = Game::new(fixture_bank(&["cat"], &["gatto"]), GameSettings::default()).unwrap();

    play(&mut game, "  Cat  \n");

    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.guesses(), ["cat".to_string()]);
    assert_eq!(game.current_round(), 0);
    assert_eq!(game.remaining_rounds(), 20);
}

#[test]
fn test_multiple_games_in_one_session() {
    let mut game = Game::new(fixture_bank(&["cat"], &["gatto"]), GameSettings::default()).unwrap();

    let output = play(&mut game, "cat\n:new\ndog\n:exit\n");

    assert_eq!(output.matches("New english game").count(), 2);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.guesses(), ["dog".to_string()]);
}

#[test]
fn test_switching_language_restarts() {
    let mut game = Game::new(fixture_bank(&["cat"], &["gatto"]), GameSettings::default()).unwrap();

    let output = play(&mut game, "dog\n:lang italian\nzaino\n:exit\n");

    assert!(output.contains("New italian game: 1 words in play, 20 rounds."));
    assert_eq!(game.language(), Language::Italian);
    assert_eq!(game.guesses(), ["zaino".to_string()]);
    assert_eq!(game.range().end, "zaino");
    assert_eq!(game.range().start, "a");
}

#[test]
fn test_lowering_rounds_mid_game() {
    let mut game = Game::new(fixture_bank(&["cat"], &["gatto"]), GameSettings::default()).unwrap();

    play(&mut game, "ant\nbee\n:rounds 3\ndog\n");

    assert_eq!(game.max_rounds(), 3);
    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.current_round(), 3);
}

#[test]
fn test_raising_rounds_after_loss_keeps_game_lost() {
    let mut game = Game::new(
        fixture_bank(&["cat"], &["gatto"]),
        GameSettings {
            language: Language::English,
            max_rounds: 1,
        },
    )
    .unwrap();

    play(&mut game, "dog\n:rounds 5\ncat\n:exit\n");

    assert_eq!(game.max_rounds(), 5);
    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.guesses(), ["dog".to_string()]);
}

#[test]
fn test_custom_wordbank_file_to_game() {
    // Integration test: Load custom wordbank file -> play game
    use std::fs::File;
    use std::io::Write;

    let wordbank_path = std::env::temp_dir().join("lexiguess_custom_wordbank.txt");
    {
        let mut file = File::create(&wordbank_path).unwrap();
        writeln!(file, "Mango").unwrap();
        writeln!(file, "  mango  ").unwrap();
        writeln!(file, "no-go").unwrap();
    }

    let words = load_wordbank_from_file(&wordbank_path).unwrap();
    assert_eq!(words, vec!["mango", "mango"]);

    let bank = WordBank::embedded().with_list(Language::English, words);
    let mut game = Game::new(bank, GameSettings::default()).unwrap();
    assert_eq!(game.active_word_list().len(), 2);

    play(&mut game, "kiwi\nmango\n");
    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.range().start, "kiwi");

    std::fs::remove_file(&wordbank_path).unwrap();
}

#[test]
fn test_embedded_game_range_stays_around_target() {
    // Whatever target is drawn, every wrong guess must land on its own side
    let mut game = Game::new(WordBank::embedded(), GameSettings::default()).unwrap();
    let target = game.reveal_target().to_string();

    for word in ["banana", "orbit", "kettle", "dragon"] {
        if word == target {
            continue;
        }
        for c in word.chars() {
            game.append_letter(c);
        }
        game.submit_guess();
        assert!(game.range().start.as_str() < target.as_str());
        assert!(target.as_str() < game.range().end.as_str());
    }
}

#[test]
fn test_empty_language_list_fails_to_start() {
    let bank = fixture_bank(&["cat"], &[]);
    let result = Game::new(
        bank,
        GameSettings {
            language: Language::Italian,
            max_rounds: 20,
        },
    );
    assert!(matches!(
        result,
        Err(GameError::EmptyWordList {
            language: Language::Italian
        })
    ));
}

#[test]
fn test_target_named_like_a_command_is_guessable() {
    let mut game = Game::new(fixture_bank(&["next"], &["gatto"]), GameSettings::default()).unwrap();

    let output = play(&mut game, "clear\nnext\n");

    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.guesses(), ["clear", "next"].map(String::from));
    assert!(output.contains("Correct! The word was 'next' (2 guesses)."));
}
