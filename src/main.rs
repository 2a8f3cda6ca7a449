use anyhow::{Context, Result};
use clap::Parser;
use memeverse::app::{App, AppEvent};
use memeverse::config::{Config, SourceKind};
use memeverse::meme::{FixtureSource, MemeSource, RemoteSource};
use memeverse::route::Route;
use memeverse::store::MemeStore;
use memeverse::theme::ThemeVariant;
use memeverse::ui;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Get the default config file path (~/.config/memeverse/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("memeverse")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "memeverse", about = "Browse, like, upload and rank memes in the terminal")]
struct Args {
    /// Config file (default: ~/.config/memeverse/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Use the built-in demo collection instead of the network
    #[arg(long)]
    demo: bool,

    /// Meme endpoint URL (overrides config)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Start in "dark" or "light" mode (overrides config)
    #[arg(long, value_name = "THEME")]
    theme: Option<String>,

    /// Initial route, e.g. /explore or /meme/42
    #[arg(long, value_name = "PATH", default_value = "/")]
    route: String,
}

fn build_source(config: &Config, args: &Args) -> Result<Arc<dyn MemeSource>> {
    if args.demo || config.source == SourceKind::Demo {
        tracing::info!("Using demo meme collection");
        return Ok(Arc::new(FixtureSource::default()));
    }

    let endpoint = args.endpoint.as_deref().unwrap_or(&config.endpoint);
    let client = RemoteSource::build_client(config.request_timeout())
        .context("Failed to build HTTP client")?;
    let source = RemoteSource::new(client, endpoint)
        .with_context(|| format!("Invalid meme endpoint '{}'", endpoint))?;
    tracing::info!(endpoint = %source.endpoint(), "Using remote meme source");
    Ok(Arc::new(source))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never land on the TUI's alternate screen
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let theme_name = args.theme.as_deref().unwrap_or(&config.theme);
    let theme = ThemeVariant::from_str_name(theme_name).unwrap_or_else(|| {
        tracing::warn!(theme = %theme_name, "Unknown theme, falling back to dark");
        ThemeVariant::Dark
    });

    let source = build_source(&config, &args)?;
    let store = MemeStore::new(config.trending_size);

    let mut app = App::new(store, source, theme);
    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
    }

    let route = Route::parse(&args.route);
    if route != Route::Home {
        app.navigate(route);
    }

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::start_fetch(&mut app, &event_tx);
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
