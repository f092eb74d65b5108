use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rhai::Engine;
use serde_json::{json, Value};
use showroom_core::scripting::{register_rhai_api, PageHandle};
use showroom_core::{PageConfig, PageDirector};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the Rhai scenario script
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// JSON page configuration used by `new_page`
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the final scene snapshot here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn init_logging(level: LogLevel, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.to_string().parse()?)
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }
    Ok(())
}

/// Final page state: scroll, navbar and every element's style.
fn snapshot(page: &PageDirector) -> Value {
    let elements: Vec<Value> = page
        .scene
        .node_ids()
        .filter_map(|id| page.scene.get_node(id))
        .map(|node| {
            json!({
                "tag": node.element.tag,
                "id": node.element.id,
                "classes": node.element.classes,
                "style": node.style,
            })
        })
        .collect();

    json!({
        "frame": page.clock().frame(),
        "time": page.clock().elapsed(),
        "scroll": page.scroll_state().position,
        "navbar_hidden": page.navbar_hidden(),
        "elements": elements,
    })
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PageConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PageConfig::default(),
    };

    info!("Script: {:?}", cli.script);
    let script = fs::read_to_string(&cli.script)
        .with_context(|| format!("failed to read script {}", cli.script.display()))?;

    let mut engine = Engine::new();
    register_rhai_api(&mut engine, config);

    let page = engine
        .eval::<PageHandle>(&script)
        .map_err(|e| anyhow::anyhow!("script error: {}", e))?;
    info!("Script evaluated successfully.");

    let report = serde_json::to_string_pretty(&snapshot(&page.lock()))?;
    match &cli.output {
        Some(path) => {
            fs::write(path, report).with_context(|| format!("failed to write {}", path.display()))?;
            info!("Snapshot written to {:?}", path);
        }
        None => println!("{}", report),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log_level, cli.log_format) {
        eprintln!("failed to initialize logging: {e}");
    }

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
