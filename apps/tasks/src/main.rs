use std::{
    io::{self, Stdout},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{Outcome, RestTaskStore, SkipReason, ViewController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod terminal;

use config::load_settings;
use input::{parse_command, UserCommand, USAGE};
use terminal::TerminalSurface;

type Controller = ViewController<TerminalSurface<Stdout>>;

#[derive(Parser, Debug)]
#[command(about = "Task list backed by a hosted REST table")]
struct Args {
    #[arg(long, default_value = "tasks.toml")]
    config: PathBuf,
    #[arg(long)]
    store_url: Option<String>,
    #[arg(long)]
    anon_key: Option<String>,
    #[arg(long)]
    table: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(v) = args.store_url {
        settings.store_url = v;
    }
    if let Some(v) = args.anon_key {
        settings.anon_key = v;
    }
    if let Some(v) = args.table {
        settings.table = v;
    }

    let surface = TerminalSurface::new(io::stdout());
    let controller = match settings.store_config() {
        Ok(store_config) => {
            info!(url = %store_config.collection_url(), "using task store");
            ViewController::new(Arc::new(RestTaskStore::new(store_config)), surface)
        }
        Err(err) => {
            warn!(error = %err, "task store disabled for this session");
            ViewController::unconfigured(
                surface,
                &format!(
                    "{err}; set SUPABASE_URL and SUPABASE_ANON_KEY or edit {}",
                    args.config.display()
                ),
            )
        }
    };

    controller.load_all().await;
    controller
        .with_surface(|surface| surface.print("type 'help' for commands"))
        .await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read command")?
    {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(input::CommandParseError::Empty) => continue,
            Err(err) => {
                say(&controller, &format!("{err}; type 'help' for commands")).await;
                continue;
            }
        };
        if command == UserCommand::Quit {
            break;
        }
        run(&controller, command).await;
    }

    Ok(())
}

async fn run(controller: &Controller, command: UserCommand) {
    let outcome = match command {
        UserCommand::Add(title) => controller.add(&title).await,
        UserCommand::Toggle(position) => {
            let Some(row) = controller.view().await.row(position).cloned() else {
                return say(controller, &format!("no task at row {position}")).await;
            };
            controller.toggle(&row.id, !row.completed).await
        }
        UserCommand::Delete(position) => {
            let Some(row) = controller.view().await.row(position).cloned() else {
                return say(controller, &format!("no task at row {position}")).await;
            };
            controller.delete(&row.id).await
        }
        UserCommand::ClearCompleted => controller.clear_completed().await,
        UserCommand::SetFilter(filter) => {
            controller.set_filter(filter).await;
            return;
        }
        UserCommand::Redraw => {
            let filter = controller.active_filter().await;
            controller.set_filter(filter).await;
            return;
        }
        UserCommand::Help => return say(controller, USAGE).await,
        UserCommand::Quit => return,
    };

    if let Outcome::Skipped(reason) = outcome {
        if let Some(text) = skip_message(reason) {
            say(controller, text).await;
        }
    }
}

// Unconfigured sessions stay quiet; the standing notice already covers them.
fn skip_message(reason: SkipReason) -> Option<&'static str> {
    match reason {
        SkipReason::EmptyTitle => Some("task title cannot be empty"),
        SkipReason::NothingToClear => Some("no completed tasks to clear"),
        SkipReason::Unconfigured => None,
    }
}

async fn say(controller: &Controller, text: &str) {
    controller.with_surface(|surface| surface.print(text)).await;
}
