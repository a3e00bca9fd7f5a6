use crate::difficulty::Difficulty;
use crate::gallows::MAX_WRONG_GUESSES;
use crate::provider::{FetchStatus, FetchedWord, WordEntry, WordSource};
use crate::{debug_log, info_log};
use std::collections::BTreeSet;

/// Screen the session is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    DifficultySelect,
    Playing,
    /// Round won; `points` is the award captured at the moment of victory.
    Won {
        points: u32,
    },
    Lost,
}

/// Trigger coming from a front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    Start,
    Choose(Difficulty),
    Back,
    Guess(char),
    PlayAgain,
    ChangeDifficulty,
    MainMenu,
    Quit,
}

/// What the driver has to do after `GameSession::handle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    None,
    BeginRound(Difficulty),
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Invalid,
    Repeated,
    Hit,
    Miss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterState {
    Unguessed,
    Hit,
    Miss,
}

/// Letters attempted in the current round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuessSet(BTreeSet<char>);

impl GuessSet {
    /// Insert an ASCII letter, normalized to uppercase. Returns false for non-letters and repeats.
    pub fn insert(&mut self, letter: char) -> bool {
        if !letter.is_ascii_alphabetic() {
            return false;
        }
        self.0.insert(letter.to_ascii_uppercase())
    }

    #[must_use]
    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(&letter.to_ascii_uppercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    word: WordEntry,
    guesses: GuessSet,
    wrong_count: u8,
    tier: Difficulty,
}

impl RoundState {
    #[must_use]
    pub fn new(word: WordEntry, tier: Difficulty) -> Self {
        Self {
            word,
            guesses: GuessSet::default(),
            wrong_count: 0,
            tier,
        }
    }

    #[must_use]
    pub fn word(&self) -> &WordEntry {
        &self.word
    }

    #[must_use]
    pub fn guesses(&self) -> &GuessSet {
        &self.guesses
    }

    #[must_use]
    pub fn wrong_count(&self) -> u8 {
        self.wrong_count
    }

    #[must_use]
    pub fn tier(&self) -> Difficulty {
        self.tier
    }

    #[must_use]
    pub fn remaining_guesses(&self) -> u8 {
        MAX_WRONG_GUESSES.saturating_sub(self.wrong_count)
    }

    fn guess(&mut self, letter: char) -> GuessOutcome {
        if !letter.is_ascii_alphabetic() {
            return GuessOutcome::Invalid;
        }
        let letter = letter.to_ascii_uppercase();
        if !self.guesses.insert(letter) {
            return GuessOutcome::Repeated;
        }
        if self.word.word.contains(letter) {
            GuessOutcome::Hit
        } else {
            self.wrong_count += 1;
            GuessOutcome::Miss
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.word.word.chars().all(|c| self.guesses.contains(c))
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.wrong_count >= MAX_WRONG_GUESSES
    }

    /// Each letter of the word if guessed, `None` otherwise.
    pub fn revealed(&self) -> impl Iterator<Item = Option<char>> + '_ {
        self.word
            .word
            .chars()
            .map(|c| self.guesses.contains(c).then_some(c))
    }

    /// The word with unguessed letters replaced by `_`.
    #[must_use]
    pub fn display_word(&self) -> String {
        self.revealed().map(|c| c.unwrap_or('_')).collect()
    }

    /// `display_word` with a space between letters.
    #[must_use]
    pub fn spaced_display(&self) -> String {
        self.revealed()
            .map(|c| c.unwrap_or('_').to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn letter_state(&self, letter: char) -> LetterState {
        if !self.guesses.contains(letter) {
            LetterState::Unguessed
        } else if self.word.word.contains(letter.to_ascii_uppercase()) {
            LetterState::Hit
        } else {
            LetterState::Miss
        }
    }
}

/// Best cumulative session score reached on each tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighScores([u32; 3]);

impl HighScores {
    #[must_use]
    pub fn get(&self, tier: Difficulty) -> u32 {
        self.0[tier.index()]
    }

    /// Raise the tier's high score to `score` if higher. Returns true on a new record.
    pub fn record(&mut self, tier: Difficulty, score: u32) -> bool {
        let slot = &mut self.0[tier.index()];
        if score > *slot {
            *slot = score;
            true
        } else {
            false
        }
    }
}

/// Points for a won round.
#[must_use]
pub fn round_score(tier: Difficulty, word_len: usize, wrong: u8) -> u32 {
    let wrong = i64::from(wrong);
    let len = i64::try_from(word_len).unwrap_or(i64::MAX / 4);
    let bonus = (20 - 2 * wrong).max(0);
    let raw = i64::from(tier.base_score()) + 2 * len - 5 * wrong + bonus;
    u32::try_from(raw.max(5)).unwrap_or(u32::MAX)
}

/// Whole-session game state, mutated only through `handle` and `start_round`.
#[derive(Clone, Debug)]
pub struct GameSession {
    phase: GamePhase,
    tier: Difficulty,
    round: Option<RoundState>,
    score: u32,
    high_scores: HighScores,
    loading: bool,
    fetch_status: Option<FetchStatus>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            tier: Difficulty::Easy,
            round: None,
            score: 0,
            high_scores: HighScores::default(),
            loading: false,
            fetch_status: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn tier(&self) -> Difficulty {
        self.tier
    }

    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// True between a new-round trigger and `start_round`.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn fetch_status(&self) -> Option<&FetchStatus> {
        self.fetch_status.as_ref()
    }

    /// Offline advisory of the current round, if the fallback pool was used.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        match &self.fetch_status {
            Some(FetchStatus::Offline(msg)) => Some(msg),
            _ => None,
        }
    }

    /// Apply a user trigger. Triggers that make no sense in the current phase are ignored.
    pub fn handle(&mut self, action: UserAction) -> Transition {
        if action == UserAction::Quit {
            return Transition::Exit;
        }
        if self.loading {
            debug_log!("Ignoring {:?} while a word is loading", action);
            return Transition::None;
        }

        match (self.phase, action) {
            (GamePhase::Menu, UserAction::Start) => self.phase = GamePhase::DifficultySelect,
            (GamePhase::DifficultySelect, UserAction::Choose(tier)) => {
                return self.begin_loading(tier);
            }
            (GamePhase::DifficultySelect, UserAction::Back | UserAction::MainMenu) => {
                self.phase = GamePhase::Menu;
            }
            (GamePhase::Playing, UserAction::Guess(letter)) => self.apply_guess(letter),
            (GamePhase::Playing, UserAction::MainMenu | UserAction::Back) => {
                info_log!("Abandoning round");
                self.round = None;
                self.fetch_status = None;
                self.phase = GamePhase::Menu;
            }
            (GamePhase::Won { .. } | GamePhase::Lost, UserAction::PlayAgain) => {
                return self.begin_loading(self.tier);
            }
            (GamePhase::Won { .. } | GamePhase::Lost, UserAction::ChangeDifficulty) => {
                self.phase = GamePhase::DifficultySelect;
            }
            (GamePhase::Won { .. } | GamePhase::Lost, UserAction::MainMenu) => {
                self.phase = GamePhase::Menu;
            }
            (phase, action) => {
                debug_log!("No transition for {:?} in {:?}", action, phase);
            }
        }
        Transition::None
    }

    fn begin_loading(&mut self, tier: Difficulty) -> Transition {
        self.tier = tier;
        self.round = None;
        self.fetch_status = None;
        self.loading = true;
        self.phase = GamePhase::Playing;
        Transition::BeginRound(tier)
    }

    /// Install the fetched word as the new round. Ignored unless a round is loading.
    pub fn start_round(&mut self, fetched: FetchedWord) {
        if !self.loading {
            debug_log!("start_round() called without a pending round");
            return;
        }
        info_log!("Starting {} round ({} letters)", self.tier, fetched.entry.word.len());
        self.round = Some(RoundState::new(fetched.entry, self.tier));
        self.fetch_status = Some(fetched.status);
        self.loading = false;
    }

    /// Fetch a word from `source` and start a `tier` round in one step.
    ///
    /// Only valid where a front end could start a round: on the difficulty
    /// screen, or after a round has ended. Returns false and changes nothing
    /// in any other phase.
    pub fn begin_round<S>(&mut self, tier: Difficulty, source: &mut S) -> bool
    where
        S: WordSource + ?Sized,
    {
        let transition = match self.phase {
            GamePhase::DifficultySelect => self.handle(UserAction::Choose(tier)),
            GamePhase::Won { .. } | GamePhase::Lost if tier == self.tier => {
                self.handle(UserAction::PlayAgain)
            }
            GamePhase::Won { .. } | GamePhase::Lost => {
                self.handle(UserAction::ChangeDifficulty);
                self.handle(UserAction::Choose(tier))
            }
            GamePhase::Menu | GamePhase::Playing => Transition::None,
        };

        match transition {
            Transition::BeginRound(tier) => {
                let fetched = source.fetch_word(tier);
                self.start_round(fetched);
                true
            }
            _ => {
                debug_log!("begin_round() ignored in {:?}", self.phase);
                false
            }
        }
    }

    fn apply_guess(&mut self, letter: char) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        match round.guess(letter) {
            GuessOutcome::Invalid | GuessOutcome::Repeated => return,
            GuessOutcome::Hit | GuessOutcome::Miss => {}
        }

        if round.is_lost() {
            info_log!("Round lost on {}", round.word.word);
            self.phase = GamePhase::Lost;
        } else if round.is_solved() {
            let points = round_score(round.tier, round.word.word.len(), round.wrong_count);
            self.score += points;
            self.high_scores.record(round.tier, self.score);
            info_log!("Round won: +{} points, session score {}", points, self.score);
            self.phase = GamePhase::Won { points };
        }
    }
}

/// Front end driven by `game_loop`.
pub trait GameInterface {
    fn render(&mut self, session: &GameSession);
    /// Next user trigger; `None` when the input was not a trigger.
    fn read_action(&mut self, session: &GameSession) -> Option<UserAction>;
    fn display_exit_message(&mut self);
}

/// Run a session until the user quits, returning the final state.
pub fn game_loop<S, I>(source: &mut S, interface: &mut I) -> GameSession
where
    S: WordSource + ?Sized,
    I: GameInterface + ?Sized,
{
    let mut session = GameSession::new();
    loop {
        interface.render(&session);
        let Some(action) = interface.read_action(&session) else {
            continue;
        };

        match session.handle(action) {
            Transition::None => {}
            Transition::BeginRound(tier) => {
                interface.render(&session);
                let fetched = source.fetch_word(tier);
                session.start_round(fetched);
            }
            Transition::Exit => {
                interface.display_exit_message();
                break;
            }
        }
    }
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct FixedSource {
        words: VecDeque<&'static str>,
        offline: bool,
    }

    impl FixedSource {
        fn new(words: &[&'static str]) -> Self {
            Self {
                words: words.iter().copied().collect(),
                offline: false,
            }
        }
    }

    impl WordSource for FixedSource {
        fn fetch_word(&mut self, _tier: Difficulty) -> FetchedWord {
            let word = self.words.pop_front().unwrap_or("CAT");
            FetchedWord {
                entry: WordEntry {
                    word: word.to_string(),
                    meaning: "meaning".to_string(),
                    usage: "usage".to_string(),
                },
                status: if self.offline {
                    FetchStatus::Offline("offline".to_string())
                } else {
                    FetchStatus::Online
                },
            }
        }
    }

    fn playing(word: &'static str, tier: Difficulty) -> GameSession {
        let mut session = GameSession::new();
        session.handle(UserAction::Start);
        session.begin_round(tier, &mut FixedSource::new(&[word]));
        session
    }

    fn guess_all(session: &mut GameSession, letters: &str) {
        for c in letters.chars() {
            session.handle(UserAction::Guess(c));
        }
    }

    #[test]
    fn test_initial_state() {
        let session = GameSession::new();
        assert_eq!(session.phase(), GamePhase::Menu);
        assert_eq!(session.score(), 0);
        assert!(session.round().is_none());
        for tier in Difficulty::ALL {
            assert_eq!(session.high_scores().get(tier), 0);
        }
    }

    #[test]
    fn test_menu_transitions() {
        let mut session = GameSession::new();
        assert_eq!(session.handle(UserAction::Start), Transition::None);
        assert_eq!(session.phase(), GamePhase::DifficultySelect);
        session.handle(UserAction::Back);
        assert_eq!(session.phase(), GamePhase::Menu);
        session.handle(UserAction::Start);
        assert_eq!(
            session.handle(UserAction::Choose(Difficulty::Hard)),
            Transition::BeginRound(Difficulty::Hard)
        );
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.is_loading());
        assert_eq!(session.tier(), Difficulty::Hard);
    }

    #[test]
    fn test_quit_from_any_phase() {
        let mut session = GameSession::new();
        assert_eq!(session.handle(UserAction::Quit), Transition::Exit);
        let mut session = playing("CAT", Difficulty::Easy);
        assert_eq!(session.handle(UserAction::Quit), Transition::Exit);
    }

    #[test]
    fn test_guesses_ignored_while_loading() {
        let mut session = GameSession::new();
        session.handle(UserAction::Start);
        session.handle(UserAction::Choose(Difficulty::Easy));
        assert_eq!(session.handle(UserAction::Guess('C')), Transition::None);
        assert_eq!(session.handle(UserAction::MainMenu), Transition::None);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.round().is_none());
    }

    #[test]
    fn test_start_round_without_pending_is_ignored() {
        let mut session = GameSession::new();
        session.start_round(FixedSource::new(&["DOG"]).fetch_word(Difficulty::Easy));
        assert!(session.round().is_none());
        assert_eq!(session.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_scenario_a_clean_win() {
        let mut session = playing("CAT", Difficulty::Easy);
        guess_all(&mut session, "CAT");
        let round = session.round().unwrap();
        assert_eq!(round.wrong_count(), 0);
        assert_eq!(session.phase(), GamePhase::Won { points: 36 });
        assert_eq!(session.score(), 36);
        assert_eq!(session.high_scores().get(Difficulty::Easy), 36);
    }

    #[test]
    fn test_scenario_b_six_misses() {
        let mut session = playing("CAT", Difficulty::Easy);
        guess_all(&mut session, "XYZQW");
        assert_eq!(session.phase(), GamePhase::Playing);
        session.handle(UserAction::Guess('V'));
        assert_eq!(session.phase(), GamePhase::Lost);
        assert_eq!(session.round().unwrap().wrong_count(), 6);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_scenario_c_repeated_guess() {
        let mut session = playing("CAT", Difficulty::Easy);
        session.handle(UserAction::Guess('C'));
        session.handle(UserAction::Guess('X'));
        let before = session.round().unwrap().clone();
        session.handle(UserAction::Guess('C'));
        session.handle(UserAction::Guess('x'));
        assert_eq!(session.round().unwrap(), &before);
    }

    #[test]
    fn test_scenario_d_high_score_is_monotonic() {
        let mut scores = HighScores::default();
        assert!(scores.record(Difficulty::Easy, 36));
        assert!(!scores.record(Difficulty::Easy, 20));
        assert_eq!(scores.get(Difficulty::Easy), 36);
        assert_eq!(scores.get(Difficulty::Medium), 0);
    }

    #[test]
    fn test_session_score_accumulates_across_rounds() {
        let mut source = FixedSource::new(&["CAT", "DOG"]);
        let mut session = GameSession::new();
        session.handle(UserAction::Start);
        session.begin_round(Difficulty::Easy, &mut source);
        guess_all(&mut session, "CAT");
        assert_eq!(session.handle(UserAction::PlayAgain), Transition::BeginRound(Difficulty::Easy));
        session.start_round(source.fetch_word(Difficulty::Easy));
        guess_all(&mut session, "XDOG");
        // DOG with one miss: 10 + 6 - 5 + 18
        assert_eq!(session.phase(), GamePhase::Won { points: 29 });
        assert_eq!(session.score(), 65);
        assert_eq!(session.high_scores().get(Difficulty::Easy), 65);
    }

    #[test]
    fn test_won_points_use_wrong_count_at_victory() {
        let mut session = playing("CAT", Difficulty::Easy);
        guess_all(&mut session, "QWEC");
        assert_eq!(session.round().unwrap().wrong_count(), 3);
        guess_all(&mut session, "AT");
        // 10 + 6 - 15 + 14
        assert_eq!(session.phase(), GamePhase::Won { points: 15 });
        session.handle(UserAction::Guess('Z'));
        assert_eq!(session.round().unwrap().wrong_count(), 3);
        assert_eq!(session.phase(), GamePhase::Won { points: 15 });
    }

    #[test]
    fn test_round_score_floor() {
        assert_eq!(round_score(Difficulty::Easy, 3, 0), 36);
        assert_eq!(round_score(Difficulty::Easy, 3, 5), 5);
        assert_eq!(round_score(Difficulty::Hard, 14, 0), 88);
        assert_eq!(round_score(Difficulty::Medium, 8, 2), 42);
        for tier in Difficulty::ALL {
            for len in tier.min_length()..=tier.max_length() {
                for wrong in 0..MAX_WRONG_GUESSES {
                    assert!(round_score(tier, len, wrong) >= 5);
                }
            }
        }
    }

    #[test]
    fn test_any_word_won_with_few_misses_scores_at_least_five() {
        let words = ["SUN", "BOOK", "MYSTERY", "QUINTESSENTIAL", "SERENDIPITY"];
        for word in words {
            for misses in 0..MAX_WRONG_GUESSES {
                let mut session = playing(word, Difficulty::Hard);
                let wrong: String = "JKVXWBZ"
                    .chars()
                    .filter(|c| !word.contains(*c))
                    .take(usize::from(misses))
                    .collect();
                guess_all(&mut session, &wrong);
                guess_all(&mut session, word);
                match session.phase() {
                    GamePhase::Won { points } => assert!(points >= 5),
                    other => panic!("{word} with {misses} misses ended in {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_display_word_round_trip() {
        let mut session = playing("MISSISSIPPI", Difficulty::Hard);
        assert_eq!(session.round().unwrap().display_word(), "___________");
        session.handle(UserAction::Guess('S'));
        assert_eq!(session.round().unwrap().display_word(), "__SS_SS____");
        guess_all(&mut session, "MIP");
        assert_eq!(session.round().unwrap().display_word(), "MISSISSIPPI");
    }

    #[test]
    fn test_letter_states() {
        let mut session = playing("CAT", Difficulty::Easy);
        guess_all(&mut session, "CZ");
        let round = session.round().unwrap();
        assert_eq!(round.letter_state('C'), LetterState::Hit);
        assert_eq!(round.letter_state('Z'), LetterState::Miss);
        assert_eq!(round.letter_state('A'), LetterState::Unguessed);
        assert_eq!(round.remaining_guesses(), 5);
    }

    #[test]
    fn test_non_letters_are_ignored() {
        let mut session = playing("CAT", Difficulty::Easy);
        guess_all(&mut session, "1 ?");
        let round = session.round().unwrap();
        assert!(round.guesses().is_empty());
        assert_eq!(round.wrong_count(), 0);
    }

    #[test]
    fn test_lowercase_guess_is_normalized() {
        let mut session = playing("CAT", Difficulty::Easy);
        guess_all(&mut session, "cat");
        assert_eq!(session.phase(), GamePhase::Won { points: 36 });
    }

    #[test]
    fn test_abandon_round_returns_to_menu() {
        let mut session = playing("CAT", Difficulty::Easy);
        session.handle(UserAction::Guess('C'));
        session.handle(UserAction::MainMenu);
        assert_eq!(session.phase(), GamePhase::Menu);
        assert!(session.round().is_none());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_end_of_round_transitions() {
        let mut session = playing("CAT", Difficulty::Medium);
        guess_all(&mut session, "CAT");
        session.handle(UserAction::ChangeDifficulty);
        assert_eq!(session.phase(), GamePhase::DifficultySelect);

        let mut session = playing("CAT", Difficulty::Medium);
        guess_all(&mut session, "QWERUY");
        assert_eq!(session.phase(), GamePhase::Lost);
        session.handle(UserAction::MainMenu);
        assert_eq!(session.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_guess_outside_playing_is_noop() {
        let mut session = playing("CAT", Difficulty::Easy);
        guess_all(&mut session, "CAT");
        let before = session.round().unwrap().clone();
        session.handle(UserAction::Guess('Q'));
        assert_eq!(session.round().unwrap(), &before);

        let mut menu = GameSession::new();
        menu.handle(UserAction::Guess('A'));
        assert_eq!(menu.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_offline_notice_is_exposed() {
        let mut source = FixedSource::new(&["CAT"]);
        source.offline = true;
        let mut session = GameSession::new();
        session.handle(UserAction::Start);
        assert!(session.begin_round(Difficulty::Easy, &mut source));
        assert_eq!(session.notice(), Some("offline"));
        session.handle(UserAction::MainMenu);
        assert_eq!(session.notice(), None);
    }

    #[test]
    fn test_begin_round_rejected_outside_round_boundaries() {
        let mut source = FixedSource::new(&["MUSIC", "PERSPICACIOUS"]);
        let mut session = GameSession::new();
        assert!(!session.begin_round(Difficulty::Easy, &mut source));
        assert_eq!(session.phase(), GamePhase::Menu);
        assert!(session.round().is_none());

        session.handle(UserAction::Start);
        assert!(session.begin_round(Difficulty::Medium, &mut source));
        session.handle(UserAction::Guess('Q'));
        let before = session.round().unwrap().clone();

        assert!(!session.begin_round(Difficulty::Hard, &mut source));
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.tier(), Difficulty::Medium);
        assert_eq!(session.round().unwrap(), &before);
        assert_eq!(before.word().word, "MUSIC");
        assert_eq!(before.wrong_count(), 1);
    }

    #[test]
    fn test_begin_round_after_round_end() {
        let mut source = FixedSource::new(&["CAT", "DOG", "PLANETS"]);
        let mut session = playing("SUN", Difficulty::Easy);
        guess_all(&mut session, "SUN");

        assert!(session.begin_round(Difficulty::Easy, &mut source));
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.round().unwrap().word().word, "CAT");
        assert_eq!(session.score(), 36);

        guess_all(&mut session, "QWERUY");
        assert_eq!(session.phase(), GamePhase::Lost);
        assert!(session.begin_round(Difficulty::Medium, &mut source));
        assert_eq!(session.tier(), Difficulty::Medium);
        assert_eq!(session.round().unwrap().word().word, "DOG");
        assert_eq!(session.round().unwrap().wrong_count(), 0);
    }

    struct ScriptedInterface {
        actions: VecDeque<UserAction>,
        renders: Vec<(GamePhase, bool)>,
        exited: bool,
    }

    impl GameInterface for ScriptedInterface {
        fn render(&mut self, session: &GameSession) {
            self.renders.push((session.phase(), session.is_loading()));
        }

        fn read_action(&mut self, _session: &GameSession) -> Option<UserAction> {
            Some(self.actions.pop_front().unwrap_or(UserAction::Quit))
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    #[test]
    fn test_game_loop_renders_loading_then_round() {
        let mut interface = ScriptedInterface {
            actions: [
                UserAction::Start,
                UserAction::Choose(Difficulty::Easy),
                UserAction::Guess('C'),
                UserAction::Guess('A'),
                UserAction::Guess('T'),
            ]
            .into_iter()
            .collect(),
            renders: Vec::new(),
            exited: false,
        };
        let session = game_loop(&mut FixedSource::new(&["CAT"]), &mut interface);
        assert!(interface.exited);
        assert!(interface.renders.contains(&(GamePhase::Playing, true)));
        assert_eq!(session.phase(), GamePhase::Won { points: 36 });
    }
}
