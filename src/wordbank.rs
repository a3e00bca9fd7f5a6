use crate::difficulty::Difficulty;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const EASY_WORDS: [&str; 10] = [
    "CAT", "DOG", "SUN", "BOOK", "TREE", "HOUSE", "WATER", "HAPPY", "MUSIC", "SMILE",
];

const MEDIUM_WORDS: [&str; 10] = [
    "ELEPHANT", "COMPUTER", "RAINBOW", "BICYCLE", "KITCHEN", "JOURNEY", "MYSTERY", "FREEDOM",
    "COURAGE", "SYMPHONY",
];

const HARD_WORDS: [&str; 10] = [
    "QUIZZICAL",
    "BYZANTINE",
    "EPHEMERAL",
    "SERENDIPITY",
    "PERSPICACIOUS",
    "OBFUSCATE",
    "MELLIFLUOUS",
    "QUINTESSENTIAL",
    "SURREPTITIOUS",
    "MAGNANIMOUS",
];

/// Curated offline pool for a tier.
#[must_use]
pub fn curated_words(tier: Difficulty) -> &'static [&'static str] {
    match tier {
        Difficulty::Easy => &EASY_WORDS,
        Difficulty::Medium => &MEDIUM_WORDS,
        Difficulty::Hard => &HARD_WORDS,
    }
}

fn is_playable(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Parse a newline-delimited word list, keeping alphabetic words only.
pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines()
        .map(|line| line.trim().to_uppercase())
        .filter(|word| is_playable(word))
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_uppercase();
        if is_playable(&word) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Offline word pools, one per difficulty tier.
#[derive(Clone, Debug)]
pub struct WordBank {
    pools: [Vec<String>; 3],
}

impl Default for WordBank {
    fn default() -> Self {
        Self {
            pools: Difficulty::ALL.map(|tier| {
                curated_words(tier)
                    .iter()
                    .map(|w| (*w).to_string())
                    .collect()
            }),
        }
    }
}

impl WordBank {
    /// Bucket `words` into every tier whose length range contains them.
    ///
    /// A tier that receives no word keeps its curated pool, so `pick` always has a candidate.
    #[must_use]
    pub fn from_words(words: &[String]) -> Self {
        let mut bank = Self::default();
        for tier in Difficulty::ALL {
            let pool: Vec<String> = words
                .iter()
                .filter(|w| tier.accepts_length(w.len()))
                .cloned()
                .collect();
            if !pool.is_empty() {
                bank.pools[tier.index()] = pool;
            }
        }
        bank
    }

    #[must_use]
    pub fn pool(&self, tier: Difficulty) -> &[String] {
        &self.pools[tier.index()]
    }

    /// Uniformly random word from the tier's pool.
    pub fn pick<R: Rng + ?Sized>(&self, tier: Difficulty, rng: &mut R) -> String {
        self.pool(tier)
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| curated_words(tier)[0].to_string())
    }
}
