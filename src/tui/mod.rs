//! Terminal host: frame loop, wall clock, and canvas plumbing.

#![warn(missing_docs)]

mod canvas;
mod input;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color as TermColor, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, Paragraph};
use ratatui::{Frame, Terminal};
use tracing::{error, info};

use noughts::{AdGateway, Flow, NoAds, TimedIntermission, BACKDROP};

use canvas::{CanvasSurface, WORLD_HEIGHT, WORLD_WIDTH};
use input::map_key;

/// How long one frame waits on the keyboard before moving on.
const FRAME_BUDGET: Duration = Duration::from_millis(15);

/// Wall-clock frame timer.
///
/// After a reset the next delta reads zero, so time spent paused is
/// never billed to the frame that resumes.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    /// Creates a clock with no reference instant yet.
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Time since the previous advance; zero on the first call after
    /// creation or a reset.
    pub fn advance(&mut self) -> Duration {
        let now = Instant::now();
        let delta = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);
        delta
    }

    /// Forgets the reference instant.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Runs the terminal game until the player exits.
///
/// A `seed` makes the side roll and the opponent's dice replayable. An
/// `intermission` length swaps the silent ad gateway for a timed
/// stand-in break around every round start.
pub fn run(seed: Option<u64>, intermission: Option<Duration>) -> Result<()> {
    // Log to a file so the TUI stays clean.
    let log_file = std::fs::File::create("noughts.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(?seed, ?intermission, "starting noughts");

    let gateway: Box<dyn AdGateway> = match intermission {
        Some(length) => Box::new(TimedIntermission::new(length)),
        None => Box::new(NoAds),
    };
    let mut flow = Flow::new(seed, gateway);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut flow);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = ?err, "frame loop error");
    }
    result
}

/// One frame: draw, advance the flow, then poll the keyboard.
fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, flow: &mut Flow) -> Result<()> {
    let mut clock = FrameClock::new();
    loop {
        terminal.draw(|frame| draw_frame(frame, flow))?;

        let delta = if flow.is_paused() {
            clock.reset();
            Duration::ZERO
        } else {
            clock.advance()
        };
        flow.advance(delta);

        if event::poll(FRAME_BUDGET)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        info!("quit key pressed");
                        return Ok(());
                    }
                    _ => {
                        if let Some(signal) = map_key(&key) {
                            flow.handle_key(signal);
                        }
                    }
                }
            }
        }

        if flow.has_exited() {
            info!("player exited");
            return Ok(());
        }
    }
}

fn draw_frame(frame: &mut Frame, flow: &Flow) {
    let backdrop = TermColor::Rgb(BACKDROP.r, BACKDROP.g, BACKDROP.b);
    let widget = Canvas::default()
        .block(Block::default().style(Style::default().bg(backdrop)))
        .marker(Marker::Braille)
        .x_bounds([0.0, f64::from(WORLD_WIDTH)])
        .y_bounds([0.0, f64::from(WORLD_HEIGHT)])
        .paint(|ctx| {
            let mut surface = CanvasSurface::new(ctx, BACKDROP);
            flow.render(&mut surface);
        });
    frame.render_widget(widget, frame.area());

    if flow.is_paused() {
        let label = "Ad break in progress";
        let area = frame.area();
        let width = (label.len() as u16).min(area.width);
        let rect = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height / 2,
            width,
            height: area.height.min(1),
        };
        frame.render_widget(
            Paragraph::new(label).style(Style::default().fg(TermColor::Black).bg(backdrop)),
            rect,
        );
    }
}
