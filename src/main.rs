//! An interactive, collapsible file/folder tree in the terminal.
//!
//! Run the binary to browse the built-in demo tree, or pass `--fixture` to
//! load a JSON forest of `{ "type", "name", "children" }` records.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr, Stderr};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::{AppConfig, IconStyle};
use crate::core::{icons::IconTable, model, tree::Forest};
use crate::ui::{
    layout::{tree_block, AppLayout},
    popup::{ConfirmDialog, ContextMenu},
    theme::Theme,
    tree_widget::TreeWidget,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Interactive file/folder tree")]
struct Cli {
    /// JSON fixture describing the forest (defaults to the built-in demo).
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Config file (defaults to `$XDG_CONFIG_HOME/folder-tree/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use plain ASCII icons instead of Nerd Font glyphs.
    #[arg(long)]
    ascii: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

type Tui = Terminal<CrosstermBackend<Stderr>>;

// ───────────────────────────────────────── setup ─────────────

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let (writer, default_filter) = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), "folder_tree=debug")
        }
        // stderr is the terminal backend; keep it quiet unless asked.
        None => (BoxMakeWriter::new(io::stderr), "error"),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .init();
    Ok(())
}

fn load_forest(fixture: Option<&Path>) -> Result<Forest> {
    let nodes = match fixture {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading fixture {}", path.display()))?;
            model::parse_fixture(&json)
                .with_context(|| format!("loading fixture {}", path.display()))?
        }
        None => model::default_forest().context("loading built-in demo tree")?,
    };
    let forest = Forest::project(&nodes, &IconTable::default());
    tracing::info!(
        records = model::count_nodes(&nodes),
        projected = forest.len(),
        "forest loaded"
    );
    Ok(forest)
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.ascii {
        config.icon_style = IconStyle::Ascii;
    }
    let forest = load_forest(cli.fixture.as_deref())?;
    let mut state = AppState::new(forest, config);

    // ── terminal setup ────────────────────────────────────────
    // Mouse capture routes right-clicks to us instead of the terminal's
    // own menu.
    enable_raw_mode()?;
    execute!(stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stderr()))?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(terminal: &mut Tui, state: &mut AppState) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(250));

    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let layout = AppLayout::from_area(frame.area());

            let tree_widget = TreeWidget::new(&state.forest)
                .icon_style(state.config.icon_style)
                .indent(state.config.indent)
                .editing(state.rename.as_ref())
                .block(tree_block());
            frame.render_stateful_widget(tree_widget, layout.tree_area, &mut state.tree_state);

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);

            if let Some(anchor) = state.session.menu {
                frame.render_widget(
                    ContextMenu {
                        anchor,
                        selected: state.menu_selected,
                    },
                    frame.area(),
                );
            }
            if let Some(prompt) = state.confirm_prompt.as_deref() {
                frame.render_widget(ConfirmDialog { prompt }, frame.area());
            }
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m),
            AppEvent::Resize(_, _) | AppEvent::Tick => {}
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}
