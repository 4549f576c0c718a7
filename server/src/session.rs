//! Drives one connection through a single game.
//!
//! ```text
//! connected ──welcome──▶ AwaitingStart ──start──▶ InProgress ──▶ Won / Lost
//!                             │                       │
//!                             └──── disconnect ───────┴──▶ Terminated
//! ```
//!
//! Every guess that is framed correctly gets exactly one response: either a
//! board update or the three closing messages. Guesses with the wrong length
//! prefix are drained and get no response at all. Transport failures end the
//! session quietly since the peer is already gone.

use crate::game::{Game, GuessOutcome, SessionState};
use crate::words::WordList;
use log::debug;
use shared::{
    read_guess, read_start_signal, write_packet, GuessFrame, Packet, ProtocolError, GAME_OVER,
    WELCOME, YOU_LOSE, YOU_WIN,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

pub struct Session<S> {
    id: u64,
    stream: S,
    words: Arc<WordList>,
    idle_timeout: Option<Duration>,
    state: SessionState,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(id: u64, stream: S, words: Arc<WordList>) -> Self {
        Self {
            id,
            stream,
            words,
            idle_timeout: None,
            state: SessionState::AwaitingStart,
        }
    }

    /// Ends the session if the client stays silent for longer than `limit`.
    pub fn with_idle_timeout(mut self, limit: Option<Duration>) -> Self {
        self.idle_timeout = limit;
        self
    }

    /// Runs the session to completion and returns the last state it reached
    /// before the transport was released: `Won`, `Lost` or `Terminated`.
    pub async fn run(mut self) -> SessionState {
        let outcome = match self.play().await {
            Ok(()) => self.state,
            Err(e) if e.is_disconnect() => {
                debug!("Session {}: peer disconnected in {:?}", self.id, self.state);
                SessionState::Terminated
            }
            Err(e) => {
                debug!("Session {}: {} in {:?}", self.id, e, self.state);
                SessionState::Terminated
            }
        };

        let _ = self.stream.shutdown().await;
        outcome
    }

    async fn play(&mut self) -> Result<(), ProtocolError> {
        self.send(&Packet::message(WELCOME)).await?;

        let limit = self.idle_timeout;
        with_limit(limit, read_start_signal(&mut self.stream)).await?;
        self.state = SessionState::InProgress;

        let mut game = Game::start(self.words.pick_random());
        debug!(
            "Session {}: started with a {}-letter word",
            self.id,
            game.secret().len()
        );
        self.send(&Packet::GameControl(game.board())).await?;

        loop {
            let letter = match with_limit(limit, read_guess(&mut self.stream)).await? {
                GuessFrame::Letter(letter) => letter.to_ascii_lowercase(),
                GuessFrame::Malformed { len } => {
                    debug!("Session {}: ignored {}-byte guess", self.id, len);
                    continue;
                }
            };

            let outcome = game.apply_guess(letter);
            debug!(
                "Session {}: guess {:?} -> {:?}",
                self.id, letter as char, outcome
            );
            if outcome == GuessOutcome::Invalid {
                self.send(&Packet::GameControl(game.board())).await?;
                continue;
            }

            match game.state() {
                SessionState::Won => {
                    self.conclude(&game, YOU_WIN).await?;
                    self.state = SessionState::Won;
                    return Ok(());
                }
                SessionState::Lost => {
                    self.conclude(&game, YOU_LOSE).await?;
                    self.state = SessionState::Lost;
                    return Ok(());
                }
                _ => self.send(&Packet::GameControl(game.board())).await?,
            }
        }
    }

    async fn conclude(&mut self, game: &Game, verdict: &str) -> Result<(), ProtocolError> {
        self.send(&Packet::message(game.reveal_message())).await?;
        self.send(&Packet::message(verdict)).await?;
        self.send(&Packet::message(GAME_OVER)).await
    }

    async fn send(&mut self, packet: &Packet) -> Result<(), ProtocolError> {
        write_packet(&mut self.stream, packet).await
    }
}

async fn with_limit<T, F>(limit: Option<Duration>, read: F) -> Result<T, ProtocolError>
where
    F: Future<Output = Result<T, ProtocolError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, read)
            .await
            .map_err(|_| ProtocolError::TimedOut)?,
        None => read.await,
    }
}
