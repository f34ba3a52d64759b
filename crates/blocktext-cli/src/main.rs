use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use blocktext_config::{Config, MissingComponentMode, NestMode};
use blocktext_engine::{
    ComponentOverrides, Document, HardBreak, ListNestMode, MissingComponent,
    MissingComponentHandler, RenderOptions, Renderer, ensure_keys, snapshot, to_plain_text,
};
use clap::{Parser, ValueEnum};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "blocktext")]
#[command(about = "Render block-structured rich text documents", long_about = None)]
struct Cli {
    /// JSON document to render; falls back to the configured default, then stdin
    input: Option<PathBuf>,

    #[arg(long, short, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Config file to use instead of ~/.config/blocktext/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail when any component had to fall back
    #[arg(long)]
    strict: bool,

    #[arg(long, value_enum)]
    nest_mode: Option<NestArg>,

    /// Keep newlines inside text instead of emitting hard breaks
    #[arg(long)]
    no_hard_breaks: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// HTML from the default components
    Html,
    /// Plain text with blocks separated by blank lines
    Text,
    /// Nested list and mark trees as JSON
    Tree,
    /// Input with generated keys filled in
    Keys,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum NestArg {
    Html,
    Direct,
}

impl From<NestArg> for NestMode {
    fn from(arg: NestArg) -> Self {
        match arg {
            NestArg::Html => NestMode::Html,
            NestArg::Direct => NestMode::Direct,
        }
    }
}

type Misses = Arc<Mutex<Vec<MissingComponent>>>;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    apply_flags(&mut config, &cli);

    let raw = read_input(cli.input.as_deref().or(config.default_input.as_deref()))?;
    let misses: Misses = Arc::default();
    let options = render_options(&config, &misses)?;

    let output = match cli.format {
        Format::Html => {
            let document = Document::from_json(&raw).context("Failed to parse document")?;
            Renderer::new(options).render_document(document)
        }
        Format::Text => {
            let document = Document::from_json(&raw).context("Failed to parse document")?;
            to_plain_text(&document.nodes)
        }
        Format::Tree => {
            let document = Document::from_json(&raw).context("Failed to parse document")?;
            let nodes = document.into_nested(options.list_nest_mode);
            serde_json::to_string_pretty(&snapshot::normalize(&nodes))?
        }
        Format::Keys => {
            let value: Value = serde_json::from_str(&raw).context("Failed to parse document")?;
            serde_json::to_string_pretty(&ensure_keys(&value))?
        }
    };
    println!("{output}");

    let misses = misses
        .lock()
        .map_err(|_| anyhow::anyhow!("missing component log was poisoned"))?;
    if !misses.is_empty() {
        for missing in misses.iter() {
            log::error!("{}", missing.message());
        }
        bail!("{} component(s) fell back to defaults", misses.len());
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    if loaded.is_none() {
        log::debug!("no config file found, using defaults");
    }
    Ok(loaded.unwrap_or_default())
}

fn apply_flags(config: &mut Config, cli: &Cli) {
    if cli.strict {
        config.missing_components = MissingComponentMode::Strict;
    }
    if let Some(mode) = cli.nest_mode {
        config.list_nest_mode = mode.into();
    }
    if cli.no_hard_breaks {
        config.hard_breaks = false;
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

/// Builds render options from the merged config, routing strict-mode
/// fallbacks into `misses`.
fn render_options(config: &Config, misses: &Misses) -> Result<RenderOptions> {
    let mut components = ComponentOverrides::new();
    if !config.hard_breaks {
        components = components.hard_break(HardBreak::Disabled);
    }

    let on_missing_component = match config.missing_components {
        MissingComponentMode::Log => MissingComponentHandler::Log,
        MissingComponentMode::Ignore => MissingComponentHandler::Disabled,
        MissingComponentMode::Strict => {
            let sink = Arc::clone(misses);
            MissingComponentHandler::callback(move |_, missing| {
                if let Ok(mut seen) = sink.lock() {
                    seen.push(missing.clone());
                }
            })
        }
    };

    let list_nest_mode = match config.list_nest_mode {
        NestMode::Html => ListNestMode::Html,
        NestMode::Direct => ListNestMode::Direct,
    };

    Ok(RenderOptions {
        components,
        context: serde_json::to_value(&config.context).context("Invalid render context")?,
        on_missing_component,
        list_nest_mode,
    })
}
