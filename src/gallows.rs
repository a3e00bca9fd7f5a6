/// Wrong guesses that end a round.
pub const MAX_WRONG_GUESSES: u8 = 6;

/// ASCII gallows for the given number of wrong guesses.
///
/// Head appears at 1, the body at 2, arms at 3 and legs at 5.
#[must_use]
pub fn gallows_lines(wrong: u8) -> [&'static str; 7] {
    [
        "  +---+",
        "  |   |",
        if wrong > 0 { "  |   O" } else { "  |    " },
        if wrong > 2 {
            "  |  /|\\"
        } else if wrong > 1 {
            "  |   |"
        } else {
            "  |    "
        },
        if wrong > 4 { "  |  / \\" } else { "  |    " },
        "  |",
        "=========",
    ]
}

#[must_use]
pub fn gallows(wrong: u8) -> String {
    gallows_lines(wrong).join("\n")
}
