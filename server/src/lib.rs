//! # Hangman Server Library
//!
//! This library implements the server side of a networked hangman game. Each
//! accepted TCP connection gets its own session with a randomly chosen secret
//! word and plays a single game over the binary protocol defined in `shared`.
//!
//! ## Session Lifecycle
//!
//! 1. The server sends `"Welcome to Hangman"`.
//! 2. The client sends a one-byte start signal.
//! 3. The server picks a word and sends the all-placeholder board.
//! 4. Each one-letter guess is answered with an updated board, or with
//!    `"The word was ..."`, `"You Win!"`/`"You Lose."` and `"Game Over!"`
//!    once the word is complete or eight wrong letters have been guessed.
//!
//! ## Module Organization
//!
//! ### Game Module (`game`)
//! Pure game rules: secret word, revealed mask, wrong guesses, win/loss.
//!
//! ### Words Module (`words`)
//! The read-only word list every session draws its secret from.
//!
//! ### Session Module (`session`)
//! Drives a single connection through the protocol using the game rules.
//!
//! ### Admission Module (`admission`)
//! Caps the number of concurrently active sessions.
//!
//! ### Network Module (`network`)
//! The accept loop: admits or rejects each connection and spawns session tasks.
//!
//! ## Concurrency
//!
//! Sessions run as independent tokio tasks that share nothing mutable except
//! the admission counter. Connections beyond the cap receive a single
//! `"server-overloaded"` message and are closed.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network::{Server, ServerConfig};
//! use server::words::WordList;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let words = WordList::load("hangman_words.txt")?;
//!     let mut server = Server::bind("0.0.0.0:8080", words, ServerConfig::default()).await?;
//!     server.run().await;
//!     Ok(())
//! }
//! ```

pub mod admission;
pub mod game;
pub mod network;
pub mod session;
pub mod words;
