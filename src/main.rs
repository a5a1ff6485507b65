//! waymark: a markdown viewer whose contents pane follows the scroll position.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use waymark::app_state::{AppState, Focus};
use waymark::{config, formats, input, logging, ui};

#[derive(Parser)]
#[command(name = "waymark")]
#[command(about = "Scroll-synchronised table of contents for markdown documents", long_about = None)]
struct Args {
    /// Markdown file to view
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Rows ahead of the top edge at which a heading counts as reached
    #[arg(long, value_name = "ROWS", allow_negative_numbers = true)]
    lookahead: Option<i64>,

    /// Print the extracted sections as JSON and exit
    #[arg(long)]
    toc: bool,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose, args.log_file.as_deref())?;

    let mut cfg = config::Config::load();
    if let Some(lookahead) = args.lookahead {
        cfg.lookahead = lookahead;
    }

    let document = input::read_document(&args.path, &formats::markdown::MarkdownFormat)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if args.toc {
        let json = serde_json::to_string_pretty(&document.sections()).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    if document.headings.is_empty() {
        eprintln!("No sections found in {}", args.path.display());
    }

    let (width, height) = terminal::size()?;
    let area = ui::document_area(Rect::new(0, 0, width, height), &cfg);
    let app = AppState::new(args.path, document, &cfg, (area.width, area.height));

    run_tui(app, &cfg)
}

fn run_tui(mut app: AppState, cfg: &config::Config) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg);
    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }
    Ok(())
}

/// What the loop should do after an event.
enum Flow {
    Continue,
    Quit,
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &config::Config,
) -> io::Result<()> {
    let frame = Duration::from_millis(cfg.frame_ms);

    loop {
        terminal.draw(|f| ui::draw(f, app, cfg))?;

        // Drain everything already queued so a burst of scrolling lands in one frame.
        let mut timeout = frame;
        while event::poll(timeout)? {
            if let Flow::Quit = handle_event(event::read()?, app, cfg) {
                return Ok(());
            }
            timeout = Duration::ZERO;
        }

        app.tick();
    }
}

fn handle_event(ev: Event, app: &mut AppState, cfg: &config::Config) -> Flow {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            app.message = None;
            match (app.focus, key.code) {
                (_, KeyCode::Char('q') | KeyCode::Esc) => return Flow::Quit,
                (_, KeyCode::Tab) => app.toggle_focus(),
                (_, KeyCode::Char('r')) => {
                    if let Err(e) = app.reload() {
                        app.message = Some(format!("Error reloading: {e}"));
                    }
                }
                (_, KeyCode::PageDown | KeyCode::Char(' ')) => app.page_down(),
                (_, KeyCode::PageUp) => app.page_up(),
                (_, KeyCode::Home | KeyCode::Char('g')) => app.scroll_to_top(),
                (_, KeyCode::End | KeyCode::Char('G')) => app.scroll_to_bottom(),
                (Focus::Document, KeyCode::Down | KeyCode::Char('j')) => app.scroll_by(1),
                (Focus::Document, KeyCode::Up | KeyCode::Char('k')) => app.scroll_by(-1),
                (Focus::Contents, KeyCode::Down | KeyCode::Char('j')) => app.toc_next(),
                (Focus::Contents, KeyCode::Up | KeyCode::Char('k')) => app.toc_prev(),
                (Focus::Contents, KeyCode::Enter) => app.jump_to_selected(),
                _ => {}
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => app.scroll_by(3),
            MouseEventKind::ScrollUp => app.scroll_by(-3),
            _ => {}
        },
        Event::Resize(width, height) => {
            let area = ui::document_area(Rect::new(0, 0, width, height), cfg);
            app.resize(area.width, area.height);
        }
        _ => {}
    }
    Flow::Continue
}
