//! Async readers and writers for the hangman wire format.
//!
//! Reads are all-or-nothing from the caller's point of view: a packet is
//! returned only once its discriminant and full payload have arrived, and a
//! stream that ends part-way through yields [`ProtocolError::ConnectionClosed`].
//! Length fields are checked against the protocol maxima before any payload
//! byte is read.

use crate::error::ProtocolError;
use crate::{
    BoardState, GuessFrame, Packet, GUESS_LEN, MAX_CONTROL_PAYLOAD, MAX_MESSAGE_LEN, MAX_WORD_LEN,
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Writes one server packet and flushes it.
pub async fn write_packet<W>(writer: &mut W, packet: &Packet) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let bytes = packet.encode()?;
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads one server packet.
pub async fn read_packet<R>(reader: &mut R) -> Result<Packet, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let flag = reader.read_u8().await?;

    if flag > 0 {
        let mut text = [0u8; MAX_MESSAGE_LEN];
        let text = &mut text[..flag as usize];
        reader.read_exact(text).await?;
        return Ok(Packet::Message(text.to_vec()));
    }

    let mut header = [0u8; 2];
    reader.read_exact(&mut header).await?;
    let word_len = header[0] as usize;
    let num_incorrect = header[1] as usize;

    if word_len > MAX_WORD_LEN {
        return Err(ProtocolError::WordTooLong(word_len));
    }
    let total = word_len + num_incorrect;
    if total > MAX_CONTROL_PAYLOAD {
        return Err(ProtocolError::PayloadTooLarge(total));
    }

    let mut data = [0u8; MAX_CONTROL_PAYLOAD];
    reader.read_exact(&mut data[..total]).await?;

    Ok(Packet::GameControl(BoardState::new(
        &data[..word_len],
        &data[word_len..total],
    )))
}

/// Asks the server to begin the game.
pub async fn write_start_signal<W>(writer: &mut W) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&[0]).await?;
    writer.flush().await?;
    Ok(())
}

/// Waits for the client's start signal. The byte's value is not inspected.
pub async fn read_start_signal<R>(reader: &mut R) -> Result<u8, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    Ok(reader.read_u8().await?)
}

/// Sends a single-letter guess.
pub async fn write_guess<W>(writer: &mut W, letter: u8) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&[GUESS_LEN, letter]).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads one guess packet.
///
/// A length prefix other than [`GUESS_LEN`] has its payload drained so the
/// next packet starts on a clean boundary.
pub async fn read_guess<R>(reader: &mut R) -> Result<GuessFrame, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let len = reader.read_u8().await?;

    if len != GUESS_LEN {
        let mut scratch = [0u8; u8::MAX as usize];
        reader.read_exact(&mut scratch[..len as usize]).await?;
        return Ok(GuessFrame::Malformed { len: len as usize });
    }

    Ok(GuessFrame::Letter(reader.read_u8().await?))
}
