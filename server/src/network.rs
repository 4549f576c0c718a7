//! Connection acceptor: admission control and per-connection session tasks

use crate::admission::{AdmissionController, MAX_CLIENTS};
use crate::game::SessionState;
use crate::session::Session;
use crate::words::WordList;
use log::{debug, error, info, warn};
use shared::{write_packet, Packet, OVERLOADED};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;

/// Tunables for the acceptor and its sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Sessions allowed to be active at once
    pub max_clients: usize,
    /// Per-read idle limit for sessions; `None` waits forever
    pub idle_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_clients: MAX_CLIENTS,
            idle_timeout: None,
        }
    }
}

/// Accepts connections and runs one isolated session task per admitted client
pub struct Server {
    listener: TcpListener,
    words: Arc<WordList>,
    admission: AdmissionController,
    config: ServerConfig,
    sessions: JoinSet<SessionState>,
    next_session_id: u64,
}

impl Server {
    pub async fn bind(
        addr: &str,
        words: WordList,
        config: ServerConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        Ok(Server {
            listener,
            words: Arc::new(words),
            admission: AdmissionController::new(config.max_clients),
            config,
            sessions: JoinSet::new(),
            next_session_id: 1,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Number of sessions currently holding an admission slot
    pub fn active_sessions(&self) -> usize {
        self.admission.active()
    }

    /// Accept loop. Runs until the future is dropped; accept failures are
    /// logged and never end the loop.
    pub async fn run(&mut self) {
        info!(
            "Server started with {} words, at most {} concurrent sessions",
            self.words.len(),
            self.admission.max_sessions()
        );

        loop {
            self.reap_finished();

            let accepted = self.listener.accept().await;

            self.reap_finished();

            match accepted {
                Ok((stream, addr)) => self.handle_connection(stream, addr).await,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            }
        }
    }

    async fn handle_connection(&mut self, stream: TcpStream, addr: SocketAddr) {
        let Some(permit) = self.admission.try_admit() else {
            reject(stream, addr).await;
            info!(
                "Rejected client {} (server busy), active sessions = {}",
                addr,
                self.admission.active()
            );
            return;
        };

        let id = self.next_session_id;
        self.next_session_id += 1;

        let session = Session::new(id, stream, Arc::clone(&self.words))
            .with_idle_timeout(self.config.idle_timeout);

        self.sessions.spawn(async move {
            let _permit = permit;
            session.run().await
        });

        info!(
            "Accepted client {} as session {}, active sessions = {}",
            addr,
            id,
            self.admission.active()
        );
    }

    /// Collects finished session tasks without waiting on running ones
    fn reap_finished(&mut self) {
        while let Some(result) = self.sessions.try_join_next() {
            match result {
                Ok(state) => debug!(
                    "Session ended ({:?}), active sessions = {}",
                    state,
                    self.admission.active()
                ),
                Err(e) => warn!("Session task failed: {}", e),
            }
        }
    }
}

async fn reject(mut stream: TcpStream, addr: SocketAddr) {
    if let Err(e) = write_packet(&mut stream, &Packet::message(OVERLOADED)).await {
        debug!("Failed to notify {} of overload: {}", addr, e);
    }
    let _ = stream.shutdown().await;
}
