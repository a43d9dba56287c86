mod script;

use std::fs;
use std::io::{self, Read};

use clap::Parser;
use surface::config::{ConfigError, EditorConfig};
use surface::engine::EditorCore;
use surface::input::Tool;
use surface::scene::BodyStore;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum SandboxError {
    #[error("failed to read script {path}: {source}")]
    ReadScript { path: String, source: io::Error },
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("invalid editor config: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Parser, Debug)]
#[command(name = "sandbox", about = "Replay a recorded pointer script through the editor core")]
struct Cli {
    #[arg(long, env = "SANDBOX_SCRIPT", default_value = "-", help = "Script file path, or - for stdin")]
    script: String,

    #[arg(long, env = "SANDBOX_TOOL", value_parser = script::parse_tool, help = "Tool active before the first frame")]
    tool: Option<Tool>,

    #[arg(long, help = "Pretty-print the trace")]
    pretty: bool,
}

fn main() -> Result<(), SandboxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EditorConfig::from_env()?;
    let frames = script::parse(&read_script(&cli.script)?)?;

    let mut core = EditorCore::new(BodyStore::new(), &config);
    if let Some(tool) = cli.tool {
        core.set_tool(tool);
    }
    tracing::info!(frames = frames.len(), tool = core.ui_state().tool.name(), "replaying script");

    let trace = script::run(&mut core, &frames);
    let rendered = if cli.pretty { serde_json::to_string_pretty(&trace)? } else { serde_json::to_string(&trace)? };
    println!("{rendered}");
    Ok(())
}

fn read_script(path: &str) -> Result<String, SandboxError> {
    let read = if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    };
    read.map_err(|source| SandboxError::ReadScript { path: path.to_owned(), source })
}
