//! TUI (Terminal User Interface) module for lexiguess
//!
//! Full-screen interface built on Ratatui. `TuiInterface` implements
//! `GameInterface`, so the same `game_loop` drives it as the line-based CLI.
//! Every keystroke becomes a `UserAction`; the engine owns all game state and
//! this module only keeps what it needs for display (placement of each guess,
//! the last message).

use crate::cli::status_label;
use crate::error::GameError;
use crate::game_state::{Game, GameInterface, GameStatus, GuessOutcome, Placement, UserAction};
use crate::wordbank::Language;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
const KEY_ACTIVE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);

/// How a past guess relates to the target, as shown in the history panel.
#[derive(Debug, Clone, Copy, PartialEq)]
enum GuessMark {
    Before,
    After,
    Hit,
}

impl GuessMark {
    fn from_outcome(outcome: GuessOutcome) -> Self {
        match outcome {
            GuessOutcome::Won => Self::Hit,
            GuessOutcome::Narrowed(p) | GuessOutcome::OutOfRounds(p) => match p {
                Placement::Before => Self::Before,
                Placement::After => Self::After,
            },
        }
    }

    fn label(self) -> (&'static str, Style) {
        match self {
            Self::Before => ("target is later", INFO_STYLE),
            Self::After => ("target is earlier", INFO_STYLE),
            Self::Hit => ("correct!", SUCCESS_STYLE),
        }
    }
}

fn next_language(language: Language) -> Language {
    match language {
        Language::English => Language::Italian,
        Language::Italian => Language::English,
    }
}

/// Map a key press to an action. Pure, so it can be tested without a terminal.
fn key_to_action(key: KeyEvent, game: &Game) -> Option<UserAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('u') => Some(UserAction::ClearInput),
            KeyCode::Char('c') => Some(UserAction::Exit),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Tab => Some(UserAction::SetLanguage(next_language(game.language()))),
        KeyCode::Char('+') => Some(UserAction::SetMaxRounds(game.max_rounds() + 1)),
        KeyCode::Char('-') => Some(UserAction::SetMaxRounds(
            game.max_rounds().saturating_sub(1).max(1),
        )),
        KeyCode::F(2) => Some(UserAction::NewGame),
        KeyCode::Char('n' | 'N') if game.is_game_over() => Some(UserAction::NewGame),
        _ if game.is_game_over() => None,
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            Some(UserAction::Letter(c.to_ascii_lowercase()))
        }
        KeyCode::Backspace => Some(UserAction::DeleteLetter),
        KeyCode::Enter => Some(UserAction::Submit),
        _ => None,
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    game: &'a Game,
    history: &'a [(String, GuessMark)],
    message: &'a str,
    error_message: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering and turns key presses into `UserAction`s.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    history: Vec<(String, GuessMark)>,
    message: String,
    error_message: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            history: Vec::new(),
            message: String::new(),
            error_message: String::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self, game: &Game) -> Result<(), io::Error> {
        let ctx = RenderContext {
            game,
            history: &self.history,
            message: &self.message,
            error_message: &self.error_message,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self, game: &Game) {
        if let Err(e) = self.draw(game) {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Range + input
                Constraint::Min(6),    // Guess history
                Constraint::Length(5), // Keyboard
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.game);
        Self::render_range(f, chunks[1], ctx.game);
        Self::render_history(f, chunks[2], ctx);
        Self::render_keyboard(f, chunks[3], ctx.game.pending_input());
        Self::render_status(f, chunks[4], ctx.game);
        Self::render_instructions(f, chunks[5], ctx.game.is_game_over());
    }

    fn render_title(f: &mut Frame, area: Rect, game: &Game) {
        let title = Paragraph::new(format!("LEXIGUESS ({})", game.language()))
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_range(f: &mut Frame, area: Rect, game: &Game) {
        let range = game.range();
        let middle = match game.revealed_target() {
            Some(target) => Span::styled(format!(" {target} "), SUCCESS_STYLE),
            None => Span::styled(" ??? ", INFO_STYLE),
        };
        let lines = vec![
            Line::from(vec![
                Span::raw(format!("  {}  <  ", range.start)),
                middle,
                Span::raw(format!("  <  {}", range.end)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::raw("  Guess: "),
                Span::styled(format!("{}_", game.pending_input()), KEY_STYLE),
            ]),
        ];

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Range").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_history(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let visible = block.inner(area).height as usize;

        // Most recent guesses win when the panel is too short
        let skip = ctx.history.len().saturating_sub(visible);
        let mut lines: Vec<Line> = ctx
            .history
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, (guess, mark))| {
                let (label, style) = mark.label();
                Line::from(vec![
                    Span::raw(format!("  {:>3}. {guess:<16}", i + 1)),
                    Span::styled(label, style),
                ])
            })
            .collect();

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                ctx.error_message,
                ERROR_STYLE,
            )]));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_keyboard(f: &mut Frame, area: Rect, pending_input: &str) {
        let lines: Vec<Line> = KEYBOARD_ROWS
            .iter()
            .enumerate()
            .map(|(indent, row)| {
                let mut spans = vec![Span::raw(" ".repeat(2 + indent * 2))];
                for key in row.chars() {
                    let style = if pending_input.contains(key) {
                        KEY_ACTIVE_STYLE
                    } else {
                        KEY_STYLE
                    };
                    spans.push(Span::styled(format!(" {key} "), style));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Keyboard").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, game: &Game) {
        let text = format!(
            "Round {}/{} | {} left | {}",
            game.current_round(),
            game.max_rounds(),
            game.remaining_rounds(),
            status_label(game.status())
        );
        let style = match game.status() {
            GameStatus::Playing => HEADER_STYLE,
            GameStatus::Won => SUCCESS_STYLE,
            GameStatus::Lost => ERROR_STYLE,
        };
        let paragraph = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, game_over: bool) {
        let text = if game_over {
            "N: New Game | TAB: Language | +/-: Rounds | ESC: Quit"
        } else {
            "Type a word | ENTER: Submit | CTRL-U: Clear | TAB: Language | +/-: Rounds | F2: New | ESC: Quit"
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self, game: &Game) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let event = event::read()?;
        debug_log!("handle_input() - Event received: {:?}", event);

        let Event::Key(key) = event else {
            // Mouse, focus, paste and resize events carry no action
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Alt-tabbing can leak replacement and control characters
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }

        self.error_message.clear();
        let action = key_to_action(key, game);
        if action.is_none()
            && !game.is_game_over()
            && let KeyCode::Char(c) = key.code
        {
            self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
        }
        Ok(action)
    }
}

impl GameInterface for TuiInterface {
    fn read_action(&mut self, game: &Game) -> Option<UserAction> {
        if self.draw(game).is_err() {
            info_log!("read_action() - Draw failed, returning Exit");
            return Some(UserAction::Exit);
        }

        match self.handle_input(game) {
            Ok(action) => action,
            Err(e) => {
                info_log!("read_action() - Error handling input: {}", e);
                Some(UserAction::Exit)
            }
        }
    }

    fn display_outcome(&mut self, game: &Game, outcome: GuessOutcome) {
        let guess = game.guesses().last().cloned().unwrap_or_default();
        self.history.push((guess.clone(), GuessMark::from_outcome(outcome)));
        self.message = match outcome {
            GuessOutcome::Won => format!("✓ '{guess}' is the word! Press N for a new game."),
            GuessOutcome::Narrowed(_) => String::new(),
            GuessOutcome::OutOfRounds(_) => format!(
                "Out of rounds. The word was '{}'. Press N for a new game.",
                game.revealed_target().unwrap_or_default()
            ),
        };
        self.draw_or_log(game);
    }

    fn display_new_game(&mut self, game: &Game) {
        self.history.clear();
        self.error_message.clear();
        self.message = format!(
            "New {} game: {} words in play.",
            game.language(),
            game.active_word_list().len()
        );
        self.draw_or_log(game);
    }

    fn display_error(&mut self, error: &GameError) {
        self.error_message = error.to_string();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameSettings;
    use crate::wordbank::WordBank;

    fn cat_game() -> Game {
        let bank = WordBank::new().with_list(Language::English, vec!["cat".to_string()]);
        Game::new(bank, GameSettings::default()).unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letters_are_lowercased() {
        let game = cat_game();
        assert_eq!(
            key_to_action(press(KeyCode::Char('Q')), &game),
            Some(UserAction::Letter('q'))
        );
    }

    #[test]
    fn test_editing_keys() {
        let game = cat_game();
        assert_eq!(
            key_to_action(press(KeyCode::Backspace), &game),
            Some(UserAction::DeleteLetter)
        );
        assert_eq!(
            key_to_action(press(KeyCode::Enter), &game),
            Some(UserAction::Submit)
        );
        assert_eq!(
            key_to_action(
                KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
                &game
            ),
            Some(UserAction::ClearInput)
        );
        assert_eq!(key_to_action(press(KeyCode::Char('3')), &game), None);
    }

    #[test]
    fn test_alt_modified_letters_are_ignored() {
        let game = cat_game();
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT), &game),
            None
        );
    }

    #[test]
    fn test_settings_keys() {
        let game = cat_game();
        assert_eq!(
            key_to_action(press(KeyCode::Tab), &game),
            Some(UserAction::SetLanguage(Language::Italian))
        );
        assert_eq!(
            key_to_action(press(KeyCode::Char('+')), &game),
            Some(UserAction::SetMaxRounds(21))
        );
        assert_eq!(
            key_to_action(press(KeyCode::Char('-')), &game),
            Some(UserAction::SetMaxRounds(19))
        );
        assert_eq!(
            key_to_action(press(KeyCode::Esc), &game),
            Some(UserAction::Exit)
        );
    }

    #[test]
    fn test_rounds_never_drop_below_one() {
        let mut game = cat_game();
        game.set_max_rounds(1);
        assert_eq!(
            key_to_action(press(KeyCode::Char('-')), &game),
            Some(UserAction::SetMaxRounds(1))
        );
    }

    #[test]
    fn test_game_over_keys() {
        let mut game = cat_game();
        for c in "cat".chars() {
            game.append_letter(c);
        }
        game.submit_guess();
        assert!(game.is_game_over());

        assert_eq!(
            key_to_action(press(KeyCode::Char('n')), &game),
            Some(UserAction::NewGame)
        );
        assert_eq!(key_to_action(press(KeyCode::Char('a')), &game), None);
        assert_eq!(key_to_action(press(KeyCode::Enter), &game), None);
    }

    #[test]
    fn test_guess_marks() {
        assert_eq!(GuessMark::from_outcome(GuessOutcome::Won), GuessMark::Hit);
        assert_eq!(
            GuessMark::from_outcome(GuessOutcome::Narrowed(Placement::Before)),
            GuessMark::Before
        );
        assert_eq!(
            GuessMark::from_outcome(GuessOutcome::OutOfRounds(Placement::After)),
            GuessMark::After
        );
    }

    #[test]
    fn test_next_language_cycles() {
        assert_eq!(next_language(Language::English), Language::Italian);
        assert_eq!(next_language(Language::Italian), Language::English);
    }
}
