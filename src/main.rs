use hangman::cli::{CliInterface, parse_cli};
use hangman::error::Result;
use hangman::logging::{default_log_path, init_logging};
use hangman::tui::TuiInterface;
use hangman::{HangmanError, WordBank, WordProvider, game_loop, load_wordbank_from_file};
use log::{info, warn};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hangman: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = parse_cli();

    if let Some(path) = cli.log_file.clone().or_else(default_log_path)
        && let Err(e) = init_logging(&path)
    {
        eprintln!("Logging disabled, cannot open '{}': {e}", path.display());
    }

    let bank = match &cli.wordbank_path {
        Some(path) => {
            let words = load_wordbank_from_file(path)?;
            info!("Loaded {} words from {}", words.len(), path.display());
            WordBank::from_words(&words)
        }
        None => WordBank::default(),
    };

    let mut provider = if cli.offline {
        info!("Offline mode: remote word services disabled");
        WordProvider::offline(bank)
    } else {
        match WordProvider::from_config(&cli.service_config(), bank.clone()) {
            Ok(provider) => provider,
            Err(e) => {
                warn!("{}", HangmanError::from(e));
                WordProvider::offline(bank)
            }
        }
    };

    let session = if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut provider, &mut interface)
    } else {
        let mut interface = TuiInterface::new()?;
        game_loop(&mut provider, &mut interface)
    };

    info!("Session ended with score {}", session.score());
    Ok(())
}
