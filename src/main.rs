use lexiguess::cli::{Cli, CliInterface, parse_cli};
use lexiguess::logging::{LogTarget, default_log_path, init_logging};
use lexiguess::tui::TuiInterface;
use lexiguess::wordbank::build_wordbank;
use lexiguess::{Game, GameSettings, game_loop};
use std::io;
use std::process::ExitCode;

fn log_target(cli: &Cli) -> LogTarget {
    match (&cli.log_file, cli.tui) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => default_log_path().map_or(LogTarget::Stderr, LogTarget::File),
        (None, false) => LogTarget::Stderr,
    }
}

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Err(e) = init_logging(log_target(&cli)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let config_dir = dirs::config_dir();
    let explicit_path = |language| cli.wordbank_path(language).cloned();
    let wordbank = match build_wordbank(explicit_path, config_dir.as_deref()) {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Failed to load word list: {e}");
            return ExitCode::FAILURE;
        }
    };

    let settings = GameSettings {
        language: cli.language,
        max_rounds: cli.max_rounds,
    };
    let mut game = match Game::new(wordbank, settings) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Failed to start game: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to initialize terminal: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut game, &mut interface);
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        game_loop(&mut game, &mut interface);
    }

    ExitCode::SUCCESS
}
