//! Parsing of the player's typed lines

/// What the player asked for at the guess prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessInput {
    /// A single letter, already lowercased
    Letter(u8),
    /// Blank line: leave the game
    Quit,
    /// Anything other than exactly one ASCII letter
    Invalid,
}

pub fn parse_guess(line: &str) -> GuessInput {
    let line = strip_line_ending(line);

    match line.as_bytes() {
        [] => GuessInput::Quit,
        [letter] if letter.is_ascii_alphabetic() => {
            GuessInput::Letter(letter.to_ascii_lowercase())
        }
        _ => GuessInput::Invalid,
    }
}

/// Answer to the "ready to start" prompt
pub fn wants_to_start(line: &str) -> bool {
    matches!(line.as_bytes().first(), Some(b'y' | b'Y'))
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letter() {
        assert_eq!(parse_guess("a"), GuessInput::Letter(b'a'));
        assert_eq!(parse_guess("Q\n"), GuessInput::Letter(b'q'));
        assert_eq!(parse_guess("z\r\n"), GuessInput::Letter(b'z'));
    }

    #[test]
    fn test_blank_line_quits() {
        assert_eq!(parse_guess(""), GuessInput::Quit);
        assert_eq!(parse_guess("\n"), GuessInput::Quit);
    }

    #[test]
    fn test_invalid_guesses() {
        assert_eq!(parse_guess("ab"), GuessInput::Invalid);
        assert_eq!(parse_guess("1"), GuessInput::Invalid);
        assert_eq!(parse_guess(" "), GuessInput::Invalid);
        assert_eq!(parse_guess("\u{e9}"), GuessInput::Invalid);
    }

    #[test]
    fn test_start_prompt() {
        assert!(wants_to_start("y"));
        assert!(wants_to_start("Yes please"));
        assert!(!wants_to_start("n"));
        assert!(!wants_to_start(""));
        assert!(!wants_to_start(" y"));
    }
}
