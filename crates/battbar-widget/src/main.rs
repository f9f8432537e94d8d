//! battbar widget
//!
//! Periodic battery watcher with a segmented bar display. Samples the
//! battery on a fixed interval, suppresses redraws when the level is
//! unchanged, and renders the quantized plan as a colored block bar with
//! a percentage label.

mod render;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

use battbar_config::WidgetConfig;
use battbar_core::{quantize, BatteryPercentage, ChangeGate, SegmentPlan};
use battbar_hal::{BatterySampler, MockSampler, SysfsSampler};

/// Environment variable selecting the mock sampler, holding the initial
/// percentage.
const MOCK_ENV: &str = "BATTBAR_MOCK";

/// Battery directory tried when auto-detection finds nothing. The next
/// periodic sample self-corrects if a battery appears there later.
const FALLBACK_BATTERY_PATH: &str = "/sys/class/power_supply/BAT0";

/// Application state
struct App {
    /// Battery reading source
    sampler: Box<dyn BatterySampler>,

    /// Handle to the mock sampler when running in mock mode
    mock: Option<MockSampler>,

    /// Configuration
    config: WidgetConfig,

    /// Last observed percentage, for redraw suppression
    gate: ChangeGate,

    /// Current quantized bar
    plan: SegmentPlan,

    /// Status message
    status: String,

    /// Should quit
    should_quit: bool,
}

impl App {
    fn new(config: WidgetConfig) -> Self {
        let (sampler, mock) = build_sampler(&config);

        let plan = quantize(
            BatteryPercentage::EMPTY,
            config.steps,
            config.tier_policy,
        );

        Self {
            sampler,
            mock,
            config,
            gate: ChangeGate::new(),
            plan,
            status: "Waiting for first sample".to_string(),
            should_quit: false,
        }
    }

    /// Take a sample. Returns true when the level changed and the bar
    /// should be redrawn.
    fn sample_now(&mut self) -> bool {
        let pct = match self.sampler.sample() {
            Ok(snapshot) => match snapshot.percentage() {
                Some(pct) => pct,
                None => {
                    warn!(
                        "Unusable battery reading {}/{}, showing empty",
                        snapshot.level, snapshot.scale
                    );
                    BatteryPercentage::EMPTY
                }
            },
            Err(e) => {
                warn!("Battery sample failed ({}), showing empty", e);
                BatteryPercentage::EMPTY
            }
        };

        if !self.gate.observe(pct) {
            tracing::debug!("Battery level unchanged at {}, skipping redraw", pct);
            return false;
        }

        info!("Battery level = {}", pct);
        self.plan = quantize(pct, self.config.steps, self.config.tier_policy);
        self.status = format!("Battery at {}", pct);
        true
    }

    /// Handle input. Returns true when the display needs a redraw.
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
                false
            }
            // Manual refresh, standing in for the host's battery-changed
            // notification
            KeyCode::Char('r') => {
                self.status = "Manual refresh".to_string();
                self.sample_now();
                true
            }
            KeyCode::Char('+') => self.adjust_mock(5),
            KeyCode::Char('-') => self.adjust_mock(-5),
            _ => false,
        }
    }

    /// Nudge the mock battery, when running in mock mode.
    fn adjust_mock(&mut self, delta: i64) -> bool {
        let Some(mock) = &self.mock else {
            return false;
        };
        mock.adjust_level(delta);
        self.sample_now();
        true
    }
}

/// Pick the reading source: scripted mock when `BATTBAR_MOCK` is set,
/// otherwise sysfs with auto-detection.
fn build_sampler(config: &WidgetConfig) -> (Box<dyn BatterySampler>, Option<MockSampler>) {
    if let Ok(value) = std::env::var(MOCK_ENV) {
        let pct = value.parse().unwrap_or(80);
        info!("Using mock battery at {}%", pct);
        let mock = MockSampler::with_percentage(pct);
        return (Box::new(mock.clone()), Some(mock));
    }

    let sampler = match &config.battery_path {
        Some(path) => SysfsSampler::new(path.clone()),
        None => SysfsSampler::detect().unwrap_or_else(|e| {
            warn!("Battery detection failed ({}), will retry at {}", e, FALLBACK_BATTERY_PATH);
            SysfsSampler::new(PathBuf::from(FALLBACK_BATTERY_PATH))
        }),
    };

    (Box::new(sampler), None)
}

/// Draw the UI
fn draw_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Bar
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0]);
    draw_bar(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);
}

/// Draw header
fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new("battbar")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Draw the segmented bar
fn draw_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = render::bar_line(&app.plan, app.config.show_label);

    let bar = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Battery"));

    frame.render_widget(bar, area);
}

/// Draw footer
fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = if app.mock.is_some() {
        "[R] Refresh  [+/-] Adjust mock  [Q] Quit"
    } else {
        "[R] Refresh  [Q] Quit"
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    let status = Paragraph::new(app.status.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, chunks[0]);
    frame.render_widget(status, chunks[1]);
}

/// Main loop: wake on the sampling interval or on input, nothing else.
async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticks = tokio::time::interval(app.config.refresh_interval());

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                if app.sample_now() {
                    terminal.draw(|f| draw_ui(f, &app))?;
                }
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if app.handle_key(key.code) {
                            terminal.draw(|f| draw_ui(f, &app))?;
                        }
                        if app.should_quit {
                            break;
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        terminal.draw(|f| draw_ui(f, &app))?;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(io::stderr)
        .init();

    info!("battbar starting...");

    // Load configuration
    let config = WidgetConfig::load_default()?;
    config.validate()?;

    let app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("battbar exiting");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_app(pct: u8) -> App {
        let mock = MockSampler::with_percentage(pct);
        let config = WidgetConfig::default();
        let plan = quantize(
            BatteryPercentage::EMPTY,
            config.steps,
            config.tier_policy,
        );
        App {
            sampler: Box::new(mock.clone()),
            mock: Some(mock),
            config,
            gate: ChangeGate::new(),
            plan,
            status: String::new(),
            should_quit: false,
        }
    }

    #[test]
    fn test_first_sample_triggers_redraw() {
        let mut app = mock_app(45);
        assert!(app.sample_now());
        assert_eq!(app.plan.percentage().value(), 45);
        assert_eq!(app.plan.full_steps(), 4);
    }

    #[test]
    fn test_unchanged_sample_suppresses_redraw() {
        let mut app = mock_app(45);
        assert!(app.sample_now());
        assert!(!app.sample_now());

        app.mock.as_ref().unwrap().set_level(46);
        assert!(app.sample_now());
    }

    #[test]
    fn test_failed_sample_shows_empty() {
        let mut app = mock_app(45);
        app.mock.as_ref().unwrap().set_unavailable(true);
        assert!(app.sample_now());
        assert_eq!(app.plan.percentage(), BatteryPercentage::EMPTY);
    }

    #[test]
    fn test_recovery_after_failed_sample() {
        let mut app = mock_app(45);
        app.mock.as_ref().unwrap().set_unavailable(true);
        assert!(app.sample_now());

        // next periodic sample self-corrects
        app.mock.as_ref().unwrap().set_unavailable(false);
        assert!(app.sample_now());
        assert_eq!(app.plan.percentage().value(), 45);
    }

    #[test]
    fn test_quit_key() {
        let mut app = mock_app(45);
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_mock_adjust_keys() {
        let mut app = mock_app(50);
        app.sample_now();
        assert!(app.handle_key(KeyCode::Char('+')));
        assert_eq!(app.plan.percentage().value(), 55);
        assert!(app.handle_key(KeyCode::Char('-')));
        assert_eq!(app.plan.percentage().value(), 50);
    }

    #[test]
    fn test_adjust_is_inert_without_mock() {
        let mut app = mock_app(50);
        app.mock = None;
        assert!(!app.handle_key(KeyCode::Char('+')));
    }
}
