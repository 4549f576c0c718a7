//! Scripted client for smoke-testing a running server: starts a game and
//! guesses letters in English frequency order until the server says it is over.

use clap::Parser;
use log::{info, warn};
use shared::{read_packet, write_guess, write_start_signal, Packet};
use tokio::net::TcpStream;

const LETTERS_BY_FREQUENCY: &[u8] = b"etaoinshrdlcumwfgypbvkjxqz";

#[derive(Parser, Debug)]
#[command(author, version, about = "Plays one hangman game automatically")]
struct Args {
    /// Server host
    #[arg(default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut stream = TcpStream::connect((args.host.as_str(), args.port)).await?;
    info!("Connected to {}", stream.peer_addr()?);

    let welcome = read_packet(&mut stream).await?;
    log_message(&welcome);
    if welcome.is_overloaded() {
        warn!("Server is full");
        return Ok(());
    }

    write_start_signal(&mut stream).await?;

    let mut guesses = LETTERS_BY_FREQUENCY.iter();
    loop {
        match read_packet(&mut stream).await? {
            Packet::GameControl(board) => {
                info!(
                    "Board: {} | wrong: {}",
                    String::from_utf8_lossy(&board.word),
                    String::from_utf8_lossy(&board.incorrect)
                );

                let Some(&letter) = guesses.next() else {
                    warn!("Ran out of letters");
                    return Ok(());
                };
                info!("Guessing {:?}", letter as char);
                write_guess(&mut stream, letter).await?;
            }
            packet => {
                log_message(&packet);
                if packet.is_game_over() {
                    break;
                }
            }
        }
    }

    info!("Autoplay finished");
    Ok(())
}

fn log_message(packet: &Packet) {
    if let Packet::Message(text) = packet {
        info!("Received: {}", String::from_utf8_lossy(text));
    }
}
