//! Per-session hangman rules: the secret, the revealed mask and the wrong guesses.

use shared::{BoardState, MAX_INCORRECT, PLACEHOLDER};

/// Lifecycle of one connection's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingStart,
    InProgress,
    Won,
    Lost,
    Terminated,
}

/// How a guess was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
    /// The letter was already revealed or already recorded as wrong.
    AlreadyGuessed,
    /// Not an ASCII lowercase letter; the board is left untouched.
    Invalid,
}

#[derive(Debug, Clone)]
pub struct Game {
    secret: Vec<u8>,
    revealed: Vec<u8>,
    incorrect: Vec<u8>,
}

impl Game {
    /// Starts a game for `secret`, which the word source guarantees to be a
    /// non-empty lowercase word no longer than the protocol allows.
    pub fn start(secret: &str) -> Self {
        let secret = secret.as_bytes().to_vec();
        let revealed = vec![PLACEHOLDER; secret.len()];

        Self {
            secret,
            revealed,
            incorrect: Vec::with_capacity(MAX_INCORRECT),
        }
    }

    /// Applies an already-lowercased guess.
    ///
    /// Repeating a classified letter is a no-op. A correct letter reveals every
    /// position it occupies; a wrong one is recorded once, up to the loss limit.
    pub fn apply_guess(&mut self, letter: u8) -> GuessOutcome {
        if !letter.is_ascii_lowercase() {
            return GuessOutcome::Invalid;
        }
        if self.revealed.contains(&letter) || self.incorrect.contains(&letter) {
            return GuessOutcome::AlreadyGuessed;
        }

        let mut found = false;
        for (slot, &actual) in self.revealed.iter_mut().zip(&self.secret) {
            if actual == letter {
                *slot = letter;
                found = true;
            }
        }

        if found {
            return GuessOutcome::Correct;
        }

        if self.incorrect.len() < MAX_INCORRECT {
            self.incorrect.push(letter);
        }
        GuessOutcome::Incorrect
    }

    pub fn is_won(&self) -> bool {
        !self.revealed.contains(&PLACEHOLDER)
    }

    pub fn is_lost(&self) -> bool {
        self.incorrect.len() >= MAX_INCORRECT
    }

    /// Win is checked before loss; a correct guess never adds a wrong letter,
    /// so the two cannot both become true on the same guess.
    pub fn state(&self) -> SessionState {
        if self.is_won() {
            SessionState::Won
        } else if self.is_lost() {
            SessionState::Lost
        } else {
            SessionState::InProgress
        }
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn revealed(&self) -> &[u8] {
        &self.revealed
    }

    pub fn incorrect(&self) -> &[u8] {
        &self.incorrect
    }

    pub fn board(&self) -> BoardState {
        BoardState::new(self.revealed.clone(), self.incorrect.clone())
    }

    /// `"The word was c a t"`
    pub fn reveal_message(&self) -> String {
        let mut message = String::from("The word was");
        for &letter in &self.secret {
            message.push(' ');
            message.push(letter as char);
        }
        message
    }
}
