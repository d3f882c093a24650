use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::GameEngine;
use shared::protocol::CommandOutcome;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod command;
mod config;
mod render;

use command::{Command, HELP};
use config::load_settings;
use render::Renderer;

#[derive(Parser, Debug)]
#[command(about = "Stop the clock exactly on a whole second")]
struct Args {
    /// TOML file with engine settings (defaults to ./stopwatch.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    max_attempts: Option<u32>,
    #[arg(long)]
    tick_interval_ms: Option<u64>,
    #[arg(long)]
    auto_reset_delay_ms: Option<u64>,
    /// Emit snapshots and events as JSON lines.
    #[arg(long)]
    json: bool,
    /// Print the clock on every tick.
    #[arg(long)]
    follow: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(v) = args.max_attempts {
        settings.max_attempts = v;
    }
    if let Some(v) = args.tick_interval_ms {
        settings.tick_interval_ms = v;
    }
    if let Some(v) = args.auto_reset_delay_ms {
        settings.auto_reset_delay_ms = v;
    }

    let engine = GameEngine::with_interval_scheduler(settings).context("invalid settings")?;
    let renderer = Renderer {
        json: args.json,
        follow_ticks: args.follow,
    };
    info!(
        max_attempts = settings.max_attempts,
        tick_interval_ms = settings.tick_interval_ms,
        "stopwatch ready"
    );

    let mut events = engine.subscribe_events();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Some(line) = renderer.event(&event) {
                        println!("{line}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "display fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    if !args.json {
        println!("{HELP}");
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            Command::Start => {
                let outcome = engine.start().await;
                if !args.json {
                    match outcome {
                        CommandOutcome::Applied => {}
                        CommandOutcome::AlreadyRunning => println!("already running"),
                        CommandOutcome::Exhausted => {
                            println!("no attempts left; reset to play again")
                        }
                    }
                }
            }
            Command::Stop => {
                engine.stop().await;
            }
            Command::Reset => engine.reset().await,
            Command::Status => println!("{}", renderer.status(&engine.status())),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    printer.abort();
    println!("{}", renderer.status(&engine.status()));
    Ok(())
}
