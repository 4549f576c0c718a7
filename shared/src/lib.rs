//! Wire protocol shared by the hangman server and client.
//!
//! Every packet starts with a single discriminant byte. A non-zero value is the
//! length of a text [`Packet::Message`] that follows; zero introduces a
//! [`Packet::GameControl`] board update. The client speaks an even smaller
//! dialect: a lone zero byte asks the server to start the game, and a
//! length-prefixed one-byte payload carries a guessed letter.
//!
//! ```text
//! Message      [L > 0][L bytes of text]
//! GameControl  [0][word_len][num_incorrect][mask][incorrect letters]
//! StartSignal  [0]
//! Guess        [1][letter]
//! ```

pub mod codec;
pub mod error;

pub use codec::{
    read_guess, read_packet, read_start_signal, write_guess, write_packet, write_start_signal,
};
pub use error::ProtocolError;

/// Longest text a message packet can carry (one-byte length prefix).
pub const MAX_MESSAGE_LEN: usize = 255;
/// Longest secret word a board update can describe.
pub const MAX_WORD_LEN: usize = 8;
/// Incorrect guesses that end the game.
pub const MAX_INCORRECT: usize = 8;
/// Receive-buffer bound for the mask plus incorrect letters of one board update.
pub const MAX_CONTROL_PAYLOAD: usize = MAX_WORD_LEN + MAX_INCORRECT;
/// Length prefix of a well-formed guess.
pub const GUESS_LEN: u8 = 1;
/// Mask byte for a letter that has not been revealed yet.
pub const PLACEHOLDER: u8 = b'_';

pub const WELCOME: &str = "Welcome to Hangman";
pub const OVERLOADED: &str = "server-overloaded";
pub const GAME_OVER: &str = "Game Over!";
pub const YOU_WIN: &str = "You Win!";
pub const YOU_LOSE: &str = "You Lose.";

/// Packets sent from the server to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// Raw text bytes, printed verbatim by the client.
    Message(Vec<u8>),
    /// Current board for the session.
    GameControl(BoardState),
}

impl Packet {
    pub fn message(text: impl Into<Vec<u8>>) -> Self {
        Packet::Message(text.into())
    }

    /// True for the rejection sent when the admission cap is reached.
    pub fn is_overloaded(&self) -> bool {
        matches!(self, Packet::Message(text) if text.as_slice() == OVERLOADED.as_bytes())
    }

    /// True for the final message of a concluded session.
    pub fn is_game_over(&self) -> bool {
        matches!(self, Packet::Message(text) if text.as_slice() == GAME_OVER.as_bytes())
    }

    /// Serializes the packet into its wire form.
    ///
    /// Fails if a message is empty (its length byte would collide with the
    /// game-control discriminant) or if any length exceeds the protocol maxima.
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        match self {
            Packet::Message(bytes) => {
                if bytes.is_empty() {
                    return Err(ProtocolError::EmptyMessage);
                }
                if bytes.len() > MAX_MESSAGE_LEN {
                    return Err(ProtocolError::MessageTooLong(bytes.len()));
                }

                let mut out = Vec::with_capacity(1 + bytes.len());
                out.push(bytes.len() as u8);
                out.extend_from_slice(bytes);
                Ok(out)
            }
            Packet::GameControl(board) => {
                board.validate()?;

                let mut out = Vec::with_capacity(3 + board.payload_len());
                out.push(0);
                out.push(board.word.len() as u8);
                out.push(board.incorrect.len() as u8);
                out.extend_from_slice(&board.word);
                out.extend_from_slice(&board.incorrect);
                Ok(out)
            }
        }
    }
}

/// Snapshot of a session's board as carried by a game-control packet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    /// Masked word: a revealed letter or [`PLACEHOLDER`] per position.
    pub word: Vec<u8>,
    /// Incorrect letters in the order they were guessed.
    pub incorrect: Vec<u8>,
}

impl BoardState {
    pub fn new(word: impl Into<Vec<u8>>, incorrect: impl Into<Vec<u8>>) -> Self {
        Self {
            word: word.into(),
            incorrect: incorrect.into(),
        }
    }

    pub fn payload_len(&self) -> usize {
        self.word.len() + self.incorrect.len()
    }

    /// Checks the board against the limits a receiver will enforce.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.word.len() > MAX_WORD_LEN {
            return Err(ProtocolError::WordTooLong(self.word.len()));
        }
        if self.payload_len() > MAX_CONTROL_PAYLOAD {
            return Err(ProtocolError::PayloadTooLarge(self.payload_len()));
        }
        Ok(())
    }
}

/// A guess packet as seen by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessFrame {
    /// Well-formed single-byte guess, not yet normalized.
    Letter(u8),
    /// Length prefix other than [`GUESS_LEN`]; `len` bytes were drained.
    Malformed { len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_encoding() {
        let bytes = Packet::message("You Win!").encode().unwrap();
        assert_eq!(bytes[0], 8);
        assert_eq!(&bytes[1..], b"You Win!");
    }

    #[test]
    fn test_empty_message_rejected() {
        let err = Packet::message("").encode().unwrap_err();
        assert!(matches!(err, ProtocolError::EmptyMessage));
    }

    #[test]
    fn test_long_message_rejected() {
        let text = "x".repeat(MAX_MESSAGE_LEN + 1);
        let err = Packet::message(text).encode().unwrap_err();
        assert!(matches!(err, ProtocolError::MessageTooLong(256)));

        let text = "x".repeat(MAX_MESSAGE_LEN);
        assert_eq!(Packet::message(text).encode().unwrap().len(), 256);
    }

    #[test]
    fn test_game_control_encoding() {
        let board = BoardState::new(b"_a_".to_vec(), b"xz".to_vec());
        let bytes = Packet::GameControl(board).encode().unwrap();
        assert_eq!(bytes, vec![0, 3, 2, b'_', b'a', b'_', b'x', b'z']);
    }

    #[test]
    fn test_game_control_limits() {
        let board = BoardState::new(vec![PLACEHOLDER; 9], Vec::new());
        assert!(matches!(
            board.validate(),
            Err(ProtocolError::WordTooLong(9))
        ));

        let board = BoardState::new(vec![PLACEHOLDER; 8], vec![b'q'; 9]);
        assert!(matches!(
            board.validate(),
            Err(ProtocolError::PayloadTooLarge(17))
        ));

        let board = BoardState::new(vec![PLACEHOLDER; 8], vec![b'q'; 8]);
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_message_bytes_are_kept_verbatim() {
        let bytes = Packet::message(vec![0xff, 0xfe]).encode().unwrap();
        assert_eq!(bytes, vec![2, 0xff, 0xfe]);
    }

    #[test]
    fn test_control_message_detection() {
        assert!(Packet::message(OVERLOADED).is_overloaded());
        assert!(Packet::message(GAME_OVER).is_game_over());
        assert!(!Packet::message("game over!").is_game_over());
        assert!(!Packet::GameControl(BoardState::default()).is_overloaded());
    }
}
