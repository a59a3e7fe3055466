use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use chatrelay::participant::{callback_bind_addr, callback_router};
use chatrelay::{Config, RelayClient};

/// Chat participant: joins the relay and prints delivered messages.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Participant id.
    id: String,
    /// Callback address the coordinator pushes to (e.g. ":9001").
    callback: String,
    /// Coordinator address. Defaults to the configured server address.
    #[arg(long)]
    server: Option<String>,
    /// Configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config = Config::load_with_env(&args.config).unwrap_or_default();
    chatrelay::logging::init_console_only(&config.logging.level);

    if let Err(e) = run(args, config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args, config: Config) -> chatrelay::Result<()> {
    let timezone = config.display.timezone.clone();

    // Callback listener
    let listener = TcpListener::bind(callback_bind_addr(&args.callback)).await?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, callback_router(tx)).await {
            tracing::error!("Callback listener error: {}", e);
        }
    });

    let server = args
        .server
        .clone()
        .unwrap_or_else(|| config.server.connect_addr());
    let client = RelayClient::new(&server)?;

    let history = client.join(&args.id, &args.callback).await?;
    println!("=== Chat History ===");
    for event in &history {
        println!("{}", event.format_line(&timezone));
    }
    println!("====================");

    {
        let timezone = timezone.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                println!("{}", event.format_line(&timezone));
            }
        });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let text = line.trim();
                if text == "/leave" {
                    client.leave(&args.id).await?;
                    break;
                }
                if text.is_empty() {
                    continue;
                }
                if let Err(e) = client.send(&args.id, text).await {
                    tracing::warn!("Send failed: {}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                client.leave(&args.id).await?;
                break;
            }
        }
    }

    Ok(())
}
