use crate::input::{parse_guess, wants_to_start, GuessInput};
use crate::rendering::render_packet;
use log::{debug, info};
use shared::{read_packet, write_guess, write_start_signal, Packet, ProtocolError};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, Lines};
use tokio::net::TcpStream;

/// How a packet from the server steers the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerEvent {
    Overloaded,
    GameOver,
    Board,
    Message,
}

impl ServerEvent {
    fn of(packet: &Packet) -> Self {
        if packet.is_overloaded() {
            ServerEvent::Overloaded
        } else if packet.is_game_over() {
            ServerEvent::GameOver
        } else if matches!(packet, Packet::GameControl(_)) {
            ServerEvent::Board
        } else {
            ServerEvent::Message
        }
    }
}

/// Why the client stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The server was at capacity
    Overloaded,
    /// The player did not want to start
    Declined,
    /// The server concluded the game
    Finished,
    /// The player left with a blank line or closed input mid-game
    Quit,
}

pub struct Client<S> {
    stream: S,
}

impl Client<TcpStream> {
    pub async fn connect(host: &str, port: u16) -> Result<Self, Box<dyn std::error::Error>> {
        let stream = TcpStream::connect((host, port)).await?;
        info!("Connected to {}", stream.peer_addr()?);
        Ok(Client::new(stream))
    }
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Plays one game, reading the player's lines from `input` and printing
    /// everything the server sends to `out`.
    pub async fn run<I, O>(
        &mut self,
        input: I,
        out: &mut O,
    ) -> Result<SessionEnd, Box<dyn std::error::Error>>
    where
        I: AsyncBufRead + Unpin,
        O: Write,
    {
        let mut lines = input.lines();

        match self.receive(out).await? {
            ServerEvent::Overloaded => return Ok(SessionEnd::Overloaded),
            ServerEvent::GameOver => return Ok(SessionEnd::Finished),
            _ => {}
        }

        let Some(answer) = prompt(&mut lines, out, ">>> Ready to start game? (y/n): ").await?
        else {
            return Err("input closed before the game started".into());
        };
        if !wants_to_start(&answer) {
            return Ok(SessionEnd::Declined);
        }

        write_start_signal(&mut self.stream).await?;
        if self.receive_until_board(out).await? == ServerEvent::GameOver {
            return Ok(SessionEnd::Finished);
        }

        loop {
            let Some(line) = prompt(&mut lines, out, ">>>Letter to guess: ").await? else {
                return Ok(SessionEnd::Quit);
            };

            let letter = match parse_guess(&line) {
                GuessInput::Letter(letter) => letter,
                GuessInput::Quit => return Ok(SessionEnd::Quit),
                GuessInput::Invalid => {
                    writeln!(out, ">>>Error! Please guess one letter.")?;
                    continue;
                }
            };

            write_guess(&mut self.stream, letter).await?;
            if self.receive_until_board(out).await? == ServerEvent::GameOver {
                return Ok(SessionEnd::Finished);
            }
        }
    }

    /// Closes the write half so the server sees a clean disconnect.
    pub async fn close(&mut self) {
        let _ = self.stream.shutdown().await;
    }

    async fn receive_until_board<O: Write>(
        &mut self,
        out: &mut O,
    ) -> Result<ServerEvent, ProtocolError> {
        loop {
            match self.receive(out).await? {
                event @ (ServerEvent::Board | ServerEvent::GameOver) => return Ok(event),
                _ => {}
            }
        }
    }

    async fn receive<O: Write>(&mut self, out: &mut O) -> Result<ServerEvent, ProtocolError> {
        let packet = read_packet(&mut self.stream).await?;
        debug!("Received {:?}", packet);

        out.write_all(&render_packet(&packet))?;
        writeln!(out)?;
        Ok(ServerEvent::of(&packet))
    }
}

async fn prompt<I, O>(
    lines: &mut Lines<I>,
    out: &mut O,
    text: &str,
) -> std::io::Result<Option<String>>
where
    I: AsyncBufRead + Unpin,
    O: Write,
{
    write!(out, "{text}")?;
    out.flush()?;
    lines.next_line().await
}
