//! Interactive line client for battleship-server.
//!
//! Every line typed is sent as one request; the reply is printed up to
//! its `END`. After `EVENTS` the client prints frames until the server
//! closes the stream.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

#[derive(Debug, Parser)]
#[command(name = "play_client", about = "Talk to a battleship-server by hand")]
struct Args {
    /// Server address
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    println!("Connecting to {}...", args.addr);
    let stream = TcpStream::connect(&args.addr)
        .await
        .with_context(|| format!("connecting to {}", args.addr))?;
    println!("Connected.");
    println!("Type requests like:");
    println!("  START username=alice&btlship=00,01,02,03,04&cruiser=10,11,12,13&frigate=20,21,22&destroyer=30,31,32&patrolboat=40,41");
    println!("  JOIN <game> username=bobby&btlship=...");
    println!("  VIEW <game>");
    println!("  FIRE <game> target_pos=47");
    println!("  EVENTS");
    println!("Type 'quit' or 'exit' to leave.\n");

    let (read_half, mut write_half) = stream.into_split();
    let mut server = BufReader::new(read_half).lines();
    let stdin = io::stdin();

    loop {
        print!(">> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            println!("\nEOF on stdin, exiting client.");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            write_half.write_all(b"QUIT\n").await?;
            println!("Exiting client.");
            break;
        }

        write_half.write_all(format!("{}\n", trimmed).as_bytes()).await?;

        let streaming = trimmed.eq_ignore_ascii_case("events");
        loop {
            match server.next_line().await? {
                None => {
                    println!("Server closed the connection.");
                    return Ok(());
                }
                Some(reply) if reply == "END" && !streaming => break,
                Some(reply) if reply.is_empty() => continue,
                Some(reply) => println!("<< {}", reply),
            }
        }
    }

    Ok(())
}
