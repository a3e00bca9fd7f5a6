//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Layout
//! - Title bar with the session score
//! - High score bar, one entry per difficulty
//! - Main panel, drawn from the session phase
//! - Status line and key help
//!
//! Key handling is a pure mapping from (`GamePhase`, key) to `UserAction`; all
//! game rules stay in `GameSession`.

use crate::difficulty::Difficulty;
use crate::game_state::{GameInterface, GamePhase, GameSession, LetterState, UserAction};
use crate::gallows::{MAX_WRONG_GUESSES, gallows_lines};
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
const KEYBOARD_ROWS: [&str; 3] = ["ABCDEFGHI", "JKLMNOPQR", "STUVWXYZ"];

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

fn tier_color(tier: Difficulty) -> Color {
    match tier {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

fn letter_colors(state: LetterState) -> (Color, Color) {
    match state {
        LetterState::Unguessed => (Color::DarkGray, Color::White),
        LetterState::Hit => (Color::Green, Color::Black),
        LetterState::Miss => (Color::Red, Color::White),
    }
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Translate a key press into a trigger for the given phase.
#[must_use]
pub fn key_to_action(phase: GamePhase, key: KeyEvent) -> Option<UserAction> {
    if has_modifier_keys(&key) {
        return None;
    }

    match phase {
        GamePhase::Menu => match key.code {
            KeyCode::Enter | KeyCode::Char('s' | 'S') => Some(UserAction::Start),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(UserAction::Quit),
            _ => None,
        },
        GamePhase::DifficultySelect => match key.code {
            KeyCode::Char(c @ ('1' | '2' | '3' | 'e' | 'E' | 'm' | 'M' | 'h' | 'H')) => {
                c.to_string().parse().ok().map(UserAction::Choose)
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b' | 'B') => Some(UserAction::Back),
            _ => None,
        },
        GamePhase::Playing => match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => Some(UserAction::Guess(c)),
            KeyCode::Esc => Some(UserAction::MainMenu),
            _ => None,
        },
        GamePhase::Won { .. } | GamePhase::Lost => match key.code {
            KeyCode::Enter | KeyCode::Char('n' | 'N') => Some(UserAction::PlayAgain),
            KeyCode::Char('d' | 'D') => Some(UserAction::ChangeDifficulty),
            KeyCode::Char('m' | 'M') => Some(UserAction::MainMenu),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(UserAction::Quit),
            _ => None,
        },
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering and input handling; restores the terminal on drop.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
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

    fn draw(&mut self, session: &GameSession) -> Result<(), io::Error> {
        let error_message = self.error_message.as_str();
        self.terminal.draw(|f| {
            render_session(f, session, error_message);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self, session: &GameSession) {
        if let Err(e) = self.draw(session) {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Wait for the next key press, ignoring everything that is not one.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }
                // Garbage from escape sequences when alt-tabbing
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring invalid character {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event {:?}", other);
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn render(&mut self, session: &GameSession) {
        self.draw_or_log(session);
    }

    fn read_action(&mut self, session: &GameSession) -> Option<UserAction> {
        loop {
            let key = match self.next_key() {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(e) => {
                    info_log!("read_action() - Input error {}, returning Quit", e);
                    return Some(UserAction::Quit);
                }
            };

            self.error_message.clear();
            let phase = session.phase();
            if let Some(action) = key_to_action(phase, key) {
                debug_log!("read_action() - {:?} -> {:?}", key.code, action);
                return Some(action);
            }

            if phase == GamePhase::Playing
                && let KeyCode::Char(c) = key.code
                && !c.is_ascii_alphabetic()
            {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            self.draw_or_log(session);
        }
    }

    fn display_exit_message(&mut self) {
        info_log!("Exiting application");
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn render_session(f: &mut Frame, session: &GameSession, error_message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // High scores
            Constraint::Min(14),   // Game panel
            Constraint::Length(3), // Status line
            Constraint::Length(3), // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0], session);
    render_high_scores(f, chunks[1], session);
    match session.phase() {
        GamePhase::Menu => render_menu(f, chunks[2]),
        GamePhase::DifficultySelect => render_difficulties(f, chunks[2], session),
        GamePhase::Playing => render_round(f, chunks[2], session, error_message),
        GamePhase::Won { .. } | GamePhase::Lost => render_result(f, chunks[2], session),
    }
    render_status(f, chunks[3], &status_text(session));
    render_instructions(f, chunks[4], session);
}

fn render_title(f: &mut Frame, area: Rect, session: &GameSession) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled("HANGMAN", HEADER_STYLE),
        Span::raw(format!("    Score: {}", session.score())),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_high_scores(f: &mut Frame, area: Rect, session: &GameSession) {
    let mut spans = Vec::new();
    for tier in Difficulty::ALL {
        spans.push(Span::styled(
            format!(" {}: {} ", tier, session.high_scores().get(tier)),
            Style::default().fg(tier_color(tier)),
        ));
    }
    let paragraph =
        Paragraph::new(Line::from(spans)).block(Block::default().title("Best").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_menu(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Welcome to Hangman!", HEADER_STYLE)),
        Line::from(""),
        Line::from("Guess the word letter by letter."),
        Line::from("Choose your difficulty level to start!"),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_difficulties(f: &mut Frame, area: Rect, session: &GameSession) {
    let mut lines = vec![
        Line::from(Span::styled("Choose Difficulty", HEADER_STYLE)),
        Line::from(""),
    ];
    for tier in Difficulty::ALL {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}. {:<7}", tier.index() + 1, tier.label()),
                Style::default()
                    .fg(tier_color(tier))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {}", tier.description())),
        ]));
        lines.push(Line::from(format!(
            "      Best: {}",
            session.high_scores().get(tier)
        )));
        lines.push(Line::from(""));
    }
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn keyboard_lines(session: &GameSession) -> Vec<Line<'static>> {
    let Some(round) = session.round() else {
        return Vec::new();
    };
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let mut spans = vec![Span::raw("  ")];
            for c in row.chars() {
                let (bg, fg) = letter_colors(round.letter_state(c));
                spans.push(Span::styled(format!(" {c} "), Style::default().fg(fg).bg(bg)));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect()
}

fn render_round(f: &mut Frame, area: Rect, session: &GameSession, error_message: &str) {
    let block = Block::default().borders(Borders::ALL);
    let mut lines = Vec::new();

    if session.is_loading() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Loading a new {} word...", session.tier()),
            INFO_STYLE,
        )));
        f.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    let Some(round) = session.round() else {
        f.render_widget(block, area);
        return;
    };

    if let Some(notice) = session.notice() {
        lines.push(Line::from(Span::styled(notice.to_string(), ERROR_STYLE)));
    }
    lines.push(Line::from(vec![
        Span::styled(
            round.tier().label().to_uppercase(),
            Style::default()
                .fg(tier_color(round.tier()))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   Wrong: {}/{}",
            round.wrong_count(),
            MAX_WRONG_GUESSES
        )),
    ]));
    for part in gallows_lines(round.wrong_count()) {
        lines.push(Line::from(part));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(round.spaced_display(), SUCCESS_STYLE),
        Span::raw(format!("   ({} letters)", round.word().word.len())),
    ]));
    lines.push(Line::from(""));
    lines.extend(keyboard_lines(session));

    if !error_message.is_empty() {
        lines.push(Line::from(Span::styled(error_message.to_string(), ERROR_STYLE)));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_result(f: &mut Frame, area: Rect, session: &GameSession) {
    let mut lines = Vec::new();
    match session.phase() {
        GamePhase::Won { points } => {
            lines.push(Line::from(Span::styled("Congratulations!", SUCCESS_STYLE)));
            lines.push(Line::from(format!("You earned {points} points!")));
        }
        _ => {
            lines.push(Line::from(Span::styled("Game Over!", ERROR_STYLE)));
            if let Some(round) = session.round() {
                for part in gallows_lines(round.wrong_count()) {
                    lines.push(Line::from(part));
                }
            }
        }
    }

    if let Some(round) = session.round() {
        let entry = round.word();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("The word was: "),
            Span::styled(entry.word.clone(), INFO_STYLE),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Meaning: ", HEADER_STYLE),
            Span::raw(entry.meaning.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Example: ", HEADER_STYLE),
            Span::styled(format!("\"{}\"", entry.usage), MESSAGE_STYLE),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn status_text(session: &GameSession) -> String {
    match session.phase() {
        GamePhase::Menu => "Ready".to_string(),
        GamePhase::DifficultySelect => "Pick a difficulty".to_string(),
        GamePhase::Playing if session.is_loading() => "Fetching word...".to_string(),
        GamePhase::Playing => session.round().map_or_else(String::new, |round| {
            format!("{} guesses left", round.remaining_guesses())
        }),
        GamePhase::Won { points } => format!("Round won (+{points})"),
        GamePhase::Lost => "Round lost".to_string(),
    }
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let paragraph = Paragraph::new(status)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, session: &GameSession) {
    let text = match session.phase() {
        GamePhase::Menu => "ENTER: Start Game | ESC: Quit",
        GamePhase::DifficultySelect => "1/E: Easy | 2/M: Medium | 3/H: Hard | ESC: Back to Menu",
        GamePhase::Playing if session.is_loading() => "Please wait...",
        GamePhase::Playing => "Type a letter to guess | ESC: Menu",
        GamePhase::Won { .. } => "ENTER: Next Word | D: Change Difficulty | M: Main Menu | ESC: Quit",
        GamePhase::Lost => "ENTER: Try Again | D: Change Difficulty | M: Main Menu | ESC: Quit",
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{FetchStatus, FetchedWord, WordEntry};
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session_with_word(word: &str) -> GameSession {
        let mut session = GameSession::new();
        session.handle(UserAction::Start);
        session.handle(UserAction::Choose(Difficulty::Easy));
        session.start_round(FetchedWord {
            entry: WordEntry {
                word: word.to_string(),
                meaning: "A small feline".to_string(),
                usage: "The cat naps.".to_string(),
            },
            status: FetchStatus::Offline("Using offline words".to_string()),
        });
        session
    }

    fn buffer_text(session: &GameSession) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal
            .draw(|f| render_session(f, session, ""))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(key_to_action(GamePhase::Menu, press(KeyCode::Enter)), Some(UserAction::Start));
        assert_eq!(key_to_action(GamePhase::Menu, press(KeyCode::Esc)), Some(UserAction::Quit));
        assert_eq!(key_to_action(GamePhase::Menu, press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_difficulty_keys() {
        let phase = GamePhase::DifficultySelect;
        assert_eq!(
            key_to_action(phase, press(KeyCode::Char('1'))),
            Some(UserAction::Choose(Difficulty::Easy))
        );
        assert_eq!(
            key_to_action(phase, press(KeyCode::Char('M'))),
            Some(UserAction::Choose(Difficulty::Medium))
        );
        assert_eq!(
            key_to_action(phase, press(KeyCode::Char('h'))),
            Some(UserAction::Choose(Difficulty::Hard))
        );
        assert_eq!(key_to_action(phase, press(KeyCode::Esc)), Some(UserAction::Back));
        assert_eq!(key_to_action(phase, press(KeyCode::Char('4'))), None);
    }

    #[test]
    fn test_playing_keys() {
        let phase = GamePhase::Playing;
        assert_eq!(
            key_to_action(phase, press(KeyCode::Char('q'))),
            Some(UserAction::Guess('q'))
        );
        assert_eq!(key_to_action(phase, press(KeyCode::Esc)), Some(UserAction::MainMenu));
        assert_eq!(key_to_action(phase, press(KeyCode::Char('5'))), None);
    }

    #[test]
    fn test_modifiers_are_ignored() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(GamePhase::Playing, key), None);
        let key = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(key_to_action(GamePhase::Playing, key), Some(UserAction::Guess('A')));
    }

    #[test]
    fn test_round_over_keys() {
        for phase in [GamePhase::Won { points: 36 }, GamePhase::Lost] {
            assert_eq!(key_to_action(phase, press(KeyCode::Enter)), Some(UserAction::PlayAgain));
            assert_eq!(
                key_to_action(phase, press(KeyCode::Char('d'))),
                Some(UserAction::ChangeDifficulty)
            );
            assert_eq!(key_to_action(phase, press(KeyCode::Char('m'))), Some(UserAction::MainMenu));
            assert_eq!(key_to_action(phase, press(KeyCode::Esc)), Some(UserAction::Quit));
        }
    }

    #[test]
    fn test_render_playing_screen() {
        let mut session = session_with_word("CAT");
        session.handle(UserAction::Guess('A'));
        session.handle(UserAction::Guess('Z'));
        let text = buffer_text(&session);
        assert!(text.contains("HANGMAN"));
        assert!(text.contains("_ A _"));
        assert!(text.contains("Wrong: 1/6"));
        assert!(text.contains("Using offline words"));
    }

    #[test]
    fn test_render_won_screen_shows_captured_points() {
        let mut session = session_with_word("CAT");
        for c in ['C', 'A', 'T'] {
            session.handle(UserAction::Guess(c));
        }
        let text = buffer_text(&session);
        assert!(text.contains("You earned 36 points!"));
        assert!(text.contains("A small feline"));
    }

    #[test]
    fn test_render_loading_screen() {
        let mut session = GameSession::new();
        session.handle(UserAction::Start);
        session.handle(UserAction::Choose(Difficulty::Hard));
        let text = buffer_text(&session);
        assert!(text.contains("Loading a new Hard word..."));
    }

    #[test]
    fn test_status_text() {
        let session = session_with_word("CAT");
        assert_eq!(status_text(&session), "6 guesses left");
        assert_eq!(status_text(&GameSession::new()), "Ready");
    }
}
