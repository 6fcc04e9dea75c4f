//! Plays battles over stdin and stdout
//!
//! Server frames arrive on stdin separated by blank lines; commands go to
//! stdout one per line, ready for whatever owns the websocket. Logs go to
//! stderr, filtered by `RUST_LOG` (default `info`).
//!
//! ```text
//! tactician settings/client.json
//! ```

use anyhow::{Context, Result};
use tactician_client::{Client, ClientSettings};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const CHANNEL_CAPACITY: usize = 64;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("Usage: tactician SETTINGS.json")?;
    let settings = ClientSettings::load(&path)?;
    let mut client = Client::new(settings)?;

    let (frames, incoming) = mpsc::channel(CHANNEL_CAPACITY);
    let (outgoing, commands) = mpsc::channel(CHANNEL_CAPACITY);
    let reader = tokio::spawn(read_frames(frames));
    let writer = tokio::spawn(write_commands(commands));

    client.run(incoming, outgoing).await?;
    reader.await.context("Reader task failed")??;
    writer.await.context("Writer task failed")??;
    tracing::info!("Input closed");
    Ok(())
}

async fn read_frames(frames: mpsc::Sender<String>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut frame = String::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            if !frame.is_empty() {
                frames.send(std::mem::take(&mut frame)).await?;
            }
            continue;
        }
        frame.push_str(&line);
        frame.push('\n');
    }
    if !frame.is_empty() {
        frames.send(frame).await?;
    }
    Ok(())
}

async fn write_commands(mut commands: mpsc::Receiver<String>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    while let Some(command) = commands.recv().await {
        stdout.write_all(command.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }
    Ok(())
}
