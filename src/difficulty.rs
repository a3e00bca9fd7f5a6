use std::fmt;
use std::str::FromStr;

/// Difficulty tier chosen on the difficulty screen.
///
/// Each tier fixes the accepted word length range and the base score of a won round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub const fn min_length(self) -> usize {
        match self {
            Self::Easy => 3,
            Self::Medium => 6,
            Self::Hard => 8,
        }
    }

    #[must_use]
    pub const fn max_length(self) -> usize {
        match self {
            Self::Easy => 5,
            Self::Medium => 8,
            Self::Hard => 15,
        }
    }

    #[must_use]
    pub const fn base_score(self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Medium => 20,
            Self::Hard => 40,
        }
    }

    #[must_use]
    pub fn accepts_length(self, len: usize) -> bool {
        (self.min_length()..=self.max_length()).contains(&len)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Easy => "3-5 letters • Simple words",
            Self::Medium => "6-8 letters • Common words",
            Self::Hard => "8+ letters • Advanced vocabulary",
        }
    }

    /// Position of the tier in `ALL`, used by the menus' numeric shortcuts.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" | "1" => Ok(Self::Easy),
            "medium" | "m" | "2" => Ok(Self::Medium),
            "hard" | "h" | "3" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}
