//! Errors raised while framing or transporting packets.

use crate::{MAX_CONTROL_PAYLOAD, MAX_MESSAGE_LEN, MAX_WORD_LEN};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The peer closed the connection before a full packet arrived.
    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("transport error: {0}")]
    Io(#[source] io::Error),

    #[error("word length {0} exceeds maximum {max}", max = MAX_WORD_LEN)]
    WordTooLong(usize),

    #[error("game-control payload of {0} bytes exceeds maximum {max}", max = MAX_CONTROL_PAYLOAD)]
    PayloadTooLarge(usize),

    /// A zero length byte is reserved for game-control packets.
    #[error("message packets must carry at least one byte")]
    EmptyMessage,

    #[error("message length {0} exceeds maximum {max}", max = MAX_MESSAGE_LEN)]
    MessageTooLong(usize),

    #[error("peer was idle for too long")]
    TimedOut,
}

impl ProtocolError {
    /// True when the failure means the peer is gone rather than misbehaving.
    pub fn is_disconnect(&self) -> bool {
        match self {
            ProtocolError::ConnectionClosed => true,
            ProtocolError::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}

impl From<io::Error> for ProtocolError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            ProtocolError::ConnectionClosed
        } else {
            ProtocolError::Io(e)
        }
    }
}
