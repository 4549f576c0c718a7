use clap::Parser;
use log::{error, info};
use server::admission::MAX_CLIENTS;
use server::network::{Server, ServerConfig};
use server::words::WordList;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hangman game server", long_about = None)]
struct Args {
    /// Port to listen on
    port: u16,

    /// Address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Word list, one word per line
    #[arg(short, long, default_value = "hangman_words.txt")]
    words: PathBuf,

    /// Maximum number of concurrent games
    #[arg(short, long, default_value_t = MAX_CLIENTS)]
    max_clients: usize,

    /// Close sessions whose client stays silent this many seconds
    #[arg(long)]
    idle_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let words = WordList::load(&args.words).map_err(|e| {
        error!("{}", e);
        e
    })?;
    info!("Loaded {} words from {}", words.len(), args.words.display());

    let config = ServerConfig {
        max_clients: args.max_clients,
        idle_timeout: args.idle_timeout.map(Duration::from_secs),
    };

    let address = format!("{}:{}", args.host, args.port);
    let mut server = Server::bind(&address, words, config).await?;

    tokio::select! {
        _ = server.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
