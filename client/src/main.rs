use clap::Parser;
use client::network::{Client, SessionEnd};
use log::info;
use tokio::io::BufReader;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hangman terminal client", long_about = None)]
struct Args {
    /// Server host name or IP address
    host: String,

    /// Server port
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut client = Client::connect(&args.host, args.port).await?;
    let stdin = BufReader::new(tokio::io::stdin());
    let end = client.run(stdin, &mut std::io::stdout()).await?;
    client.close().await;

    match end {
        SessionEnd::Overloaded => info!("Server is full, try again later"),
        other => info!("Session ended: {:?}", other),
    }

    Ok(())
}
