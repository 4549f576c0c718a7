//! End-to-end tests running the real server on a loopback TCP port.

use client::network::{Client, SessionEnd};
use server::network::{Server, ServerConfig};
use server::words::WordList;
use shared::{
    read_packet, write_guess, write_start_signal, BoardState, Packet, ProtocolError, GAME_OVER,
    OVERLOADED, WELCOME, YOU_LOSE, YOU_WIN,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};

const READ_LIMIT: Duration = Duration::from_secs(5);

async fn start_server(word: &str, config: ServerConfig) -> SocketAddr {
    let words = WordList::from_words([word]).unwrap();
    let mut server = Server::bind("127.0.0.1:0", words, config).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(async move { server.run().await });
    addr
}

async fn next_packet(stream: &mut TcpStream) -> Result<Packet, ProtocolError> {
    timeout(READ_LIMIT, read_packet(stream))
        .await
        .expect("server did not answer in time")
}

async fn expect_packet(stream: &mut TcpStream, expected: Packet) {
    assert_eq!(next_packet(stream).await.unwrap(), expected);
}

fn board(word: &[u8], incorrect: &[u8]) -> Packet {
    Packet::GameControl(BoardState::new(word, incorrect))
}

async fn join_game(addr: SocketAddr, word_len: usize) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    expect_packet(&mut stream, Packet::message(WELCOME)).await;
    write_start_signal(&mut stream).await.unwrap();
    expect_packet(&mut stream, board(&vec![b'_'; word_len], b"")).await;
    stream
}

/// GAMEPLAY OVER TCP
mod gameplay_tests {
    use super::*;

    #[tokio::test]
    async fn win_reveals_word_and_ends_game() {
        let addr = start_server("cat", ServerConfig::default()).await;
        let mut stream = join_game(addr, 3).await;

        write_guess(&mut stream, b'a').await.unwrap();
        expect_packet(&mut stream, board(b"_a_", b"")).await;
        write_guess(&mut stream, b't').await.unwrap();
        expect_packet(&mut stream, board(b"_at", b"")).await;
        write_guess(&mut stream, b'c').await.unwrap();

        expect_packet(&mut stream, Packet::message("The word was c a t")).await;
        expect_packet(&mut stream, Packet::message(YOU_WIN)).await;
        expect_packet(&mut stream, Packet::message(GAME_OVER)).await;
        assert!(next_packet(&mut stream).await.is_err());
    }

    #[tokio::test]
    async fn eight_wrong_letters_lose() {
        let addr = start_server("dog", ServerConfig::default()).await;
        let mut stream = join_game(addr, 3).await;

        let wrong = b"xyzqwert";
        for i in 0..7 {
            write_guess(&mut stream, wrong[i]).await.unwrap();
            expect_packet(&mut stream, board(b"___", &wrong[..=i])).await;
        }
        write_guess(&mut stream, wrong[7]).await.unwrap();

        expect_packet(&mut stream, Packet::message("The word was d o g")).await;
        expect_packet(&mut stream, Packet::message(YOU_LOSE)).await;
        expect_packet(&mut stream, Packet::message(GAME_OVER)).await;
    }

    #[tokio::test]
    async fn malformed_guess_keeps_framing() {
        let addr = start_server("cat", ServerConfig::default()).await;
        let mut stream = join_game(addr, 3).await;

        stream.write_all(&[3, b'x', b'y', b'z']).await.unwrap();
        write_guess(&mut stream, b't').await.unwrap();

        expect_packet(&mut stream, board(b"__t", b"")).await;
    }

    #[tokio::test]
    async fn terminal_client_plays_full_game() {
        let addr = start_server("cat", ServerConfig::default()).await;

        let mut client = Client::connect("127.0.0.1", addr.port()).await.unwrap();
        let mut out = Vec::new();
        let end = timeout(READ_LIMIT, client.run(&b"y\nc\nz\na\nt\n"[..], &mut out))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(end, SessionEnd::Finished);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(">>>c _ _\n>>>Incorrect Guesses:\n>>>\n"));
        assert!(out.contains(">>>c _ _\n>>>Incorrect Guesses: z\n>>>\n"));
        assert!(out.ends_with(">>>The word was c a t\n>>>You Win!\n>>>Game Over!\n"));
    }

    #[tokio::test]
    async fn concurrent_games_do_not_share_boards() {
        let addr = start_server("cat", ServerConfig::default()).await;
        let mut first = join_game(addr, 3).await;
        let mut second = join_game(addr, 3).await;

        write_guess(&mut first, b'a').await.unwrap();
        expect_packet(&mut first, board(b"_a_", b"")).await;

        write_guess(&mut second, b'z').await.unwrap();
        expect_packet(&mut second, board(b"___", b"z")).await;

        write_guess(&mut first, b't').await.unwrap();
        expect_packet(&mut first, board(b"_at", b"")).await;

        write_guess(&mut second, b'c').await.unwrap();
        expect_packet(&mut second, board(b"c__", b"z")).await;

        write_guess(&mut first, b'c').await.unwrap();
        expect_packet(&mut first, Packet::message("The word was c a t")).await;
        expect_packet(&mut first, Packet::message(YOU_WIN)).await;
        expect_packet(&mut first, Packet::message(GAME_OVER)).await;

        // The finished game leaves the other one where it was.
        write_guess(&mut second, b'q').await.unwrap();
        expect_packet(&mut second, board(b"c__", b"zq")).await;
    }

    #[tokio::test]
    async fn idle_client_is_disconnected() {
        let config = ServerConfig {
            idle_timeout: Some(Duration::from_millis(200)),
            ..ServerConfig::default()
        };
        let addr = start_server("cat", config).await;
        let mut stream = TcpStream::connect(addr).await.unwrap();
        expect_packet(&mut stream, Packet::message(WELCOME)).await;

        assert!(matches!(
            next_packet(&mut stream).await,
            Err(ProtocolError::ConnectionClosed)
        ));
    }
}

/// ADMISSION CONTROL
mod admission_tests {
    use super::*;

    async fn connect_and_greet(addr: SocketAddr) -> (TcpStream, Packet) {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let first = next_packet(&mut stream).await.unwrap();
        (stream, first)
    }

    #[tokio::test]
    async fn fourth_client_is_rejected() {
        let addr = start_server("cat", ServerConfig::default()).await;

        let mut admitted = Vec::new();
        for _ in 0..3 {
            let (stream, first) = connect_and_greet(addr).await;
            assert_eq!(first, Packet::message(WELCOME));
            admitted.push(stream);
        }

        let (mut rejected, first) = connect_and_greet(addr).await;
        assert_eq!(first, Packet::message(OVERLOADED));
        assert!(matches!(
            next_packet(&mut rejected).await,
            Err(ProtocolError::ConnectionClosed)
        ));

        // Admitted sessions are unaffected.
        write_start_signal(&mut admitted[0]).await.unwrap();
        expect_packet(&mut admitted[0], board(b"___", b"")).await;
    }

    #[tokio::test]
    async fn slot_is_freed_when_a_client_leaves() {
        let config = ServerConfig {
            max_clients: 1,
            ..ServerConfig::default()
        };
        let addr = start_server("cat", config).await;

        let (first, greeting) = connect_and_greet(addr).await;
        assert_eq!(greeting, Packet::message(WELCOME));
        let (_, greeting) = connect_and_greet(addr).await;
        assert_eq!(greeting, Packet::message(OVERLOADED));

        drop(first);

        let mut admitted = false;
        for _ in 0..100 {
            let (_, greeting) = connect_and_greet(addr).await;
            if greeting == Packet::message(WELCOME) {
                admitted = true;
                break;
            }
            sleep(Duration::from_millis(20)).await;
        }
        assert!(admitted, "slot was never released");
    }

    #[tokio::test]
    async fn finished_game_frees_slot() {
        let config = ServerConfig {
            max_clients: 1,
            ..ServerConfig::default()
        };
        let addr = start_server("a", config).await;

        let mut stream = join_game(addr, 1).await;
        write_guess(&mut stream, b'a').await.unwrap();
        expect_packet(&mut stream, Packet::message("The word was a")).await;
        expect_packet(&mut stream, Packet::message(YOU_WIN)).await;
        expect_packet(&mut stream, Packet::message(GAME_OVER)).await;
        assert!(next_packet(&mut stream).await.is_err());

        let mut admitted = false;
        for _ in 0..100 {
            let (_, greeting) = connect_and_greet(addr).await;
            if greeting == Packet::message(WELCOME) {
                admitted = true;
                break;
            }
            sleep(Duration::from_millis(20)).await;
        }
        assert!(admitted, "slot was never released");
    }
}
