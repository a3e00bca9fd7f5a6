use crate::config::{DEFAULT_DEFINITION_API, DEFAULT_TIMEOUT_SECS, DEFAULT_WORD_API, ServiceConfig};
use crate::difficulty::Difficulty;
use crate::game_state::{GameInterface, GamePhase, GameSession, UserAction};
use crate::gallows::{MAX_WRONG_GUESSES, gallows};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

/// Hangman with difficulty tiers and online word definitions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use the line-oriented text interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Never contact the word services; play from the offline word list
    #[arg(long)]
    pub offline: bool,

    /// Newline-delimited word list replacing the built-in offline words
    #[arg(short = 'w', long = "words")]
    pub wordbank_path: Option<PathBuf>,

    /// Random word endpoint (Wordnik-compatible)
    #[arg(long, default_value = DEFAULT_WORD_API)]
    pub word_api: String,

    /// Dictionary endpoint (dictionaryapi.dev-compatible)
    #[arg(long, default_value = DEFAULT_DEFINITION_API)]
    pub definition_api: String,

    /// API key for the random word endpoint
    #[arg(long, env = "WORDNIK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Log file (defaults to the user cache directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            word_api_url: self.word_api.clone(),
            definition_api_url: self.definition_api.clone(),
            api_key: self.api_key.clone().filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map a line of input to a trigger for the given phase.
#[must_use]
pub fn parse_action(phase: GamePhase, input: &str) -> Option<UserAction> {
    let input = input.trim().to_uppercase();
    if matches!(input.as_str(), "QUIT" | "EXIT") {
        return Some(UserAction::Quit);
    }

    match phase {
        GamePhase::Menu => match input.as_str() {
            "" | "S" | "START" => Some(UserAction::Start),
            _ => None,
        },
        GamePhase::DifficultySelect => match input.as_str() {
            "B" | "BACK" => Some(UserAction::Back),
            other => other.parse::<Difficulty>().ok().map(UserAction::Choose),
        },
        GamePhase::Playing => {
            if input == "MENU" {
                return Some(UserAction::MainMenu);
            }
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Some(UserAction::Guess(c)),
                _ => None,
            }
        }
        GamePhase::Won { .. } | GamePhase::Lost => match input.as_str() {
            "" | "N" | "NEXT" | "AGAIN" => Some(UserAction::PlayAgain),
            "D" | "DIFFICULTY" => Some(UserAction::ChangeDifficulty),
            "M" | "MENU" => Some(UserAction::MainMenu),
            _ => None,
        },
    }
}

fn prompt(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Menu => "Press ENTER to start (or 'quit'):",
        GamePhase::DifficultySelect => "Choose difficulty: 1) easy 2) medium 3) hard, 'back' or 'quit':",
        GamePhase::Playing => "Guess a letter ('menu' to abandon, 'quit' to exit):",
        GamePhase::Won { .. } | GamePhase::Lost => {
            "ENTER: next word | 'd': change difficulty | 'm': main menu | 'quit':"
        }
    }
}

fn invalid_input_message(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Playing => "Invalid guess. Please enter a single letter.",
        _ => "Unrecognized choice.",
    }
}

fn display_scores(session: &GameSession) {
    let highs: Vec<String> = Difficulty::ALL
        .iter()
        .map(|tier| format!("{}: {}", tier, session.high_scores().get(*tier)))
        .collect();
    println!("Score: {} | Best - {}", session.score(), highs.join(" | "));
}

fn display_word_details(session: &GameSession) {
    if let Some(round) = session.round() {
        let entry = round.word();
        println!("The word was: {}", entry.word);
        println!("Meaning: {}", entry.meaning);
        println!("Example: \"{}\"", entry.usage);
    }
}

/// Line-oriented front end over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn render(&mut self, session: &GameSession) {
        println!();
        display_scores(session);
        match session.phase() {
            GamePhase::Menu => {
                println!("HANGMAN - guess the word letter by letter.");
            }
            GamePhase::DifficultySelect => {
                for tier in Difficulty::ALL {
                    println!(
                        "{}. {} ({}) - best {}",
                        tier.index() + 1,
                        tier,
                        tier.description(),
                        session.high_scores().get(tier)
                    );
                }
            }
            GamePhase::Playing if session.is_loading() => {
                println!("Loading a new {} word...", session.tier());
            }
            GamePhase::Playing => {
                if let Some(notice) = session.notice() {
                    println!("({notice})");
                }
                if let Some(round) = session.round() {
                    println!(
                        "[{}] Wrong: {}/{}",
                        round.tier(),
                        round.wrong_count(),
                        MAX_WRONG_GUESSES
                    );
                    println!("{}", gallows(round.wrong_count()));
                    println!(
                        "{}  ({} letters)",
                        round.spaced_display(),
                        round.word().word.len()
                    );
                    let guessed: String = round.guesses().iter().collect();
                    if !guessed.is_empty() {
                        println!("Guessed: {guessed}");
                    }
                }
            }
            GamePhase::Won { points } => {
                println!("You won! You earned {points} points.");
                display_word_details(session);
            }
            GamePhase::Lost => {
                if let Some(round) = session.round() {
                    println!("{}", gallows(round.wrong_count()));
                }
                println!("Game over!");
                display_word_details(session);
            }
        }
    }

    fn read_action(&mut self, session: &GameSession) -> Option<UserAction> {
        let phase = session.phase();
        println!("{}", prompt(phase));
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) | Err(_) => return Some(UserAction::Quit),
            Ok(_) => {}
        }

        let action = parse_action(phase, &input);
        if action.is_none() {
            println!("{}", invalid_input_message(phase));
        }
        action
    }

    fn display_exit_message(&mut self) {
        println!("Thanks for playing. Exiting.");
    }
}
