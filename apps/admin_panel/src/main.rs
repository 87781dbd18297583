use std::{path::PathBuf, sync::Arc};

use admin_panel::{
    config::{load_settings, DEFAULT_CONFIG_PATH},
    controller::{
        orchestration::{dispatch, parse_command, CommandError, PanelCommand, USAGE},
        ViewController,
    },
    ui::{OutputFormat, TerminalSink},
};
use anyhow::{Context, Result};
use clap::Parser;
use directory_client::DirectoryClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "admin_panel", about = "Terminal admin panel for the employee directory")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    page_size: Option<u32>,
    /// Print rendered regions as HTML instead of plain text.
    #[arg(long)]
    html: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args.config)?.with_overrides(args.base_url, args.page_size)?;

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();
    info!(
        base_url = %settings.base_url,
        page_size = settings.page_size,
        stale_loads = %settings.stale_loads,
        "starting admin panel"
    );

    let client = Arc::new(DirectoryClient::new(settings.base_url.clone()));
    let format = if args.html {
        OutputFormat::Html
    } else {
        OutputFormat::Text
    };
    let sink = Arc::new(TerminalSink::new(format));
    let controller = ViewController::new(client, sink, settings.controller_options());

    controller.check_health().await;
    controller.init().await;
    println!("{USAGE}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(PanelCommand::Quit) => break,
            Ok(PanelCommand::Help) => println!("{USAGE}"),
            Ok(PanelCommand::Action(action)) => dispatch(&controller, action).await,
            Err(err @ CommandError::Unknown(_)) => eprintln!("{err}\n{USAGE}"),
            Err(err) => eprintln!("{err}"),
        }
    }

    controller.cancel_pending_search();
    info!("admin panel closed");
    Ok(())
}
