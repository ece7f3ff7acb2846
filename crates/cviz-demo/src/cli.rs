use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::config::DemoConfig;
use crate::error::{DemoError, Result};
use crate::keys::parse_script;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(
    name = "cviz-demo",
    about = "Render chat visualization tool calls in the terminal",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a tool payload, optionally after replaying scripted input.
    Render(RenderArgs),

    /// Print every tool's name, description and input schema as JSON.
    Schemas,
}

#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// JSON file holding the tool input.
    pub payload: PathBuf,

    /// Tool name, e.g. createCarousel.
    #[arg(long)]
    pub tool: String,

    /// Frame width in cells [env: CVIZ_WIDTH].
    #[arg(long)]
    pub width: Option<u16>,

    /// Frame height in rows; defaults to the card height [env: CVIZ_HEIGHT].
    #[arg(long)]
    pub height: Option<u16>,

    /// Input script, e.g. "click:5:4, right, tick, esc".
    #[arg(long, default_value = "")]
    pub keys: String,

    /// Reference time for relative timestamps (RFC 3339).
    #[arg(long)]
    pub now: Option<String>,
}

pub fn parse_now(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| DemoError::invalid(format!("--now {raw:?}: {err}")))
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render(args) => {
            for line in render(&args)? {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Schemas => {
            println!("{}", schemas()?);
            Ok(())
        }
    }
}

/// Lines of the final frame.
pub fn render(args: &RenderArgs) -> Result<Vec<String>> {
    let config = DemoConfig::resolve(args.width, args.height)?;
    let raw = std::fs::read_to_string(&args.payload).map_err(|source| DemoError::Payload {
        path: args.payload.clone(),
        source,
    })?;
    let input: Value = serde_json::from_str(&raw)?;
    let script = parse_script(&args.keys)?;
    let now = args.now.as_deref().map(parse_now).transpose()?;

    tracing::info!(message = "demo.render", tool = %args.tool, width = config.width, steps = script.len());

    let mut session = Session::new(&args.tool, input, config, now)?;
    session.run(&script);
    Ok(session.lines())
}

pub fn schemas() -> Result<String> {
    Ok(serde_json::to_string_pretty(&cviz_tools::specs())?)
}
