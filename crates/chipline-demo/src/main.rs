//! Chipline demo - a tag input showcase for the terminal.

mod app;
mod event;
mod logging;

use anyhow::Result;
use app::App;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event::{Event, EventHandler};
use logging::LogLevel;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "chipline-demo")]
#[command(author, version, about = "Tag input widget demo", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Cap the number of tags in the first input
    #[arg(long)]
    max_tags: Option<usize>,

    /// Disable automatic scroll-to-end/bottom
    #[arg(long)]
    no_auto_scroll: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = LogLevel::parse(&cli.log_level).unwrap_or_default();
    logging::init(level, cli.log_file)?;
    info!("starting chipline demo");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, cli.max_tags, cli.no_auto_scroll).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    max_tags: Option<usize>,
    no_auto_scroll: bool,
) -> Result<()> {
    let mut app = App::new(max_tags, no_auto_scroll)?;
    let mut events = EventHandler::new();
    let loop_handle = events.start();

    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;

        match events.next().await {
            Some(Event::Key(key)) => app.handle_key(key),
            Some(Event::Paste(text)) => app.handle_paste(&text),
            Some(Event::Resize(_, _)) | Some(Event::Tick) => {}
            None => break,
        }
    }

    loop_handle.abort();
    Ok(())
}
