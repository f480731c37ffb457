mod app;
mod catalog;
mod config;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use catalog::resources::{resolve_image_or_placeholder, resolve_text_or_placeholder, ResourceTable};
use catalog::{BuiltinCatalog, CatalogProvider};
use config::AppConfig;
use theme::{Theme, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "heroes")]
#[command(version)]
#[command(about = "A terminal catalog of superheroes")]
struct Args {
    /// Use the dark palette
    #[arg(long, conflicts_with = "light")]
    dark: bool,

    /// Use the light palette
    #[arg(long)]
    light: bool,

    /// List the built-in catalog this many times
    #[arg(short, long)]
    repeat: Option<usize>,

    /// Print the catalog as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = effective_config(&args);

    let provider = BuiltinCatalog::repeated(config.repeat);
    let resources = ResourceTable::builtin();

    // Handle CLI-only commands
    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if args.dump {
        return print_catalog(&provider, &resources);
    }

    let theme = Theme::for_mode(config.theme).with_overrides(&config.palette);
    tracing::info!(
        "Starting with {} heroes, theme {:?}",
        provider.catalog().len(),
        config.theme
    );

    let app = App::new(
        provider.catalog().clone(),
        Box::new(resources),
        theme,
        config.layout,
        config.insets,
    );

    // Run TUI
    run_tui(app)
}

/// Config file, then command line flags on top
fn effective_config(args: &Args) -> AppConfig {
    let mut config = AppConfig::load().unwrap_or_default();

    if args.dark {
        config.theme = ThemeMode::Dark;
    } else if args.light {
        config.theme = ThemeMode::Light;
    }
    if let Some(repeat) = args.repeat {
        config.repeat = repeat.max(1);
    }

    config
}

fn print_catalog(provider: &impl CatalogProvider, resources: &ResourceTable) -> Result<()> {
    let entries: Vec<serde_json::Value> = provider
        .catalog()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let image = resolve_image_or_placeholder(resources, item.image);
            serde_json::json!({
                "index": index,
                "refs": item,
                "name": resolve_text_or_placeholder(resources, item.name),
                "description": resolve_text_or_placeholder(resources, item.description),
                "image": {
                    "monogram": image.monogram,
                    "tint": image.tint.to_string(),
                },
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let size = terminal.size()?;
        app.resize(size.width, size.height);
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                _ => app.handle_key(key),
            },
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize(width, height) => app.resize(width, height),
            _ => {}
        }
    }
}
