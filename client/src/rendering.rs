//! Text rendering of server packets for the terminal

use shared::{BoardState, Packet};

/// Prefix on every line the client prints on behalf of the server
pub const LINE_PREFIX: &str = ">>>";

/// Formats a packet as the lines shown to the player, without a trailing newline.
///
/// Message bytes are passed through untouched. A board renders as three lines:
/// the spaced-out mask, the incorrect guesses, and an empty separator line.
pub fn render_packet(packet: &Packet) -> Vec<u8> {
    match packet {
        Packet::Message(text) => {
            let mut line = Vec::with_capacity(LINE_PREFIX.len() + text.len());
            line.extend_from_slice(LINE_PREFIX.as_bytes());
            line.extend_from_slice(text);
            line
        }
        Packet::GameControl(board) => render_board(board).into_bytes(),
    }
}

pub fn render_board(board: &BoardState) -> String {
    let mut incorrect = String::from("Incorrect Guesses:");
    if !board.incorrect.is_empty() {
        incorrect.push(' ');
        incorrect.push_str(&spaced(&board.incorrect));
    }

    format!(
        "{LINE_PREFIX}{}\n{LINE_PREFIX}{}\n{LINE_PREFIX}",
        spaced(&board.word),
        incorrect
    )
}

fn spaced(letters: &[u8]) -> String {
    let mut out = String::with_capacity(letters.len() * 2);
    for (i, &letter) in letters.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(letter as char);
    }
    out
}
