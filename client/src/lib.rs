//! # Hangman Client Library
//!
//! Terminal client for the hangman server. It connects over TCP, prints every
//! packet the server sends, and turns the player's typed lines into protocol
//! packets.
//!
//! ## Module Organization
//!
//! ### Input Module (`input`)
//! Validates typed lines: a guess must be exactly one ASCII letter, a blank
//! line leaves the game.
//!
//! ### Rendering Module (`rendering`)
//! Formats messages and board updates as `>>>`-prefixed terminal lines.
//!
//! ### Network Module (`network`)
//! Drives the protocol: waits for the welcome (or the overload rejection),
//! sends the start signal, then alternates guesses and server replies until
//! `"Game Over!"` arrives.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::Client;
//! use tokio::io::BufReader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::connect("127.0.0.1", 8080).await?;
//!     let stdin = BufReader::new(tokio::io::stdin());
//!     client.run(stdin, &mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

pub mod input;
pub mod network;
pub mod rendering;
