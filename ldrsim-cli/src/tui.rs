//! Interactive terminal dashboard: two sliders, live readouts, and the curve.
//!
//! Keys
//! - `↑`/`↓`, `k`/`j`, `Tab` : select the pull-down or the LDR slider
//! - `←`/`→`, `h`/`l`        : move the selected slider one step (1 kΩ)
//! - `PgDn`/`PgUp`           : move ten steps
//! - `Home`/`End`            : jump to the slider's minimum/maximum
//! - `q`, `Esc`              : quit

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ldrsim_engine::model::prelude::*;
use ldrsim_engine::{Bench, LogAxis, Slider};
use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph};

const POLL: Duration = Duration::from_millis(250);
const PAGE: i32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    PullDown,
    Ldr,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Self::PullDown => Self::Ldr,
            Self::Ldr => Self::PullDown,
        }
    }
}

/// Dashboard state: the bench plus which slider the keys move.
pub struct App {
    pub bench: Bench,
    pub focus: Focus,
    pub should_quit: bool,
    pub last_error: Option<String>,
}

impl App {
    pub fn new(bench: Bench) -> Self {
        Self { bench, focus: Focus::Ldr, should_quit: false, last_error: None }
    }

    fn focused(&self) -> &Slider {
        match self.focus {
            Focus::PullDown => self.bench.pull_down_slider(),
            Focus::Ldr => self.bench.ldr_slider(),
        }
    }

    fn nudge(&mut self, steps: i32) {
        let r = match self.focus {
            Focus::PullDown => self.bench.nudge_pull_down(steps).map(|_| ()),
            Focus::Ldr => self.bench.nudge_ldr(steps).map(|_| ()),
        };
        self.last_error = r.err().map(|e| e.to_string());
    }

    fn jump(&mut self, ohms: f64) {
        let r = match self.focus {
            Focus::PullDown => self.bench.set_pull_down(ohms).map(|_| ()),
            Focus::Ldr => self.bench.set_ldr(ohms).map(|_| ()),
        };
        self.last_error = r.err().map(|e| e.to_string());
    }

    pub fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('j' | 'k') => {
                self.focus = self.focus.toggle();
            }
            KeyCode::Left | KeyCode::Char('h') => self.nudge(-1),
            KeyCode::Right | KeyCode::Char('l') => self.nudge(1),
            KeyCode::PageDown => self.nudge(-PAGE),
            KeyCode::PageUp => self.nudge(PAGE),
            KeyCode::Home => {
                let min = self.focused().min();
                self.jump(min);
            }
            KeyCode::End => {
                let max = self.focused().max();
                self.jump(max);
            }
            _ => {}
        }
    }
}

type PanicHook = dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send + 'static;

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Runs `cleanup` on drop and from the panic hook while alive, then puts the
/// previous panic hook back.
struct TerminalGuard {
    cleanup: fn(),
    previous_hook: Arc<PanicHook>,
}

impl TerminalGuard {
    fn with_cleanup(cleanup: fn()) -> Self {
        let previous_hook: Arc<PanicHook> = Arc::from(std::panic::take_hook());
        let chained = Arc::clone(&previous_hook);
        std::panic::set_hook(Box::new(move |info| {
            cleanup();
            chained(info);
        }));
        Self { cleanup, previous_hook }
    }

    /// Raw mode plus alternate screen. Both are undone on every exit path,
    /// including a failure halfway through entering.
    fn enter() -> io::Result<Self> {
        let guard = Self::with_cleanup(restore_terminal);
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        (self.cleanup)();
        // set_hook panics when called during unwinding.
        if !std::thread::panicking() {
            let previous = Arc::clone(&self.previous_hook);
            std::panic::set_hook(Box::new(move |info| previous(info)));
        }
    }
}

/// Take over the terminal and run the dashboard until the user quits.
///
/// # Errors
/// Terminal I/O failures.
pub fn run(bench: Bench) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(bench);
    let result = run_app(&mut terminal, &mut app);
    terminal.show_cursor()?;
    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if event::poll(POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn state_color(state: DigitalState) -> Color {
    match state {
        DigitalState::High => Color::Green,
        DigitalState::Low => Color::Blue,
        DigitalState::Indeterminate => Color::Yellow,
    }
}

fn slider_gauge<'a>(title: &'a str, slider: &Slider, focused: bool) -> Gauge<'a> {
    let border = if focused { Style::default().fg(Color::Cyan) } else { Style::default() };
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).border_style(border).title(title))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(slider.fraction().clamp(0.0, 1.0))
        .label(format!("{}  ({} .. {})", Ohms(slider.value()), TickLabel(slider.min()), TickLabel(slider.max())))
}

/// Draw one frame.
pub fn render(frame: &mut Frame, app: &App) {
    let columns = Layout::horizontal([Constraint::Length(46), Constraint::Min(30)]).split(frame.area());
    let left = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(9),
        Constraint::Length(4),
    ])
    .split(columns[0]);

    let bench = &app.bench;
    let snap = bench.snapshot();

    frame.render_widget(
        slider_gauge(" Pull-down Rd ", bench.pull_down_slider(), app.focus == Focus::PullDown),
        left[0],
    );
    frame.render_widget(slider_gauge(" LDR R_LDR ", bench.ldr_slider(), app.focus == Focus::Ldr), left[1]);

    let state = snap.result.digital_state;
    let mut readout = vec![
        Line::from(vec![
            Span::raw("Vpin           "),
            Span::styled(Volts(snap.result.pin_voltage).to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::raw("Digital state  "),
            Span::styled(
                state.label(),
                Style::default().fg(state_color(state)).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
        Line::raw(format!(
            "HIGH ({:.1} V) => R_LDR <= {}",
            snap.thresholds.high_volts,
            Ohms(snap.threshold_resistances.ldr_for_high)
        )),
        Line::raw(format!(
            "LOW  ({:.1} V) => R_LDR >= {}",
            snap.thresholds.low_volts,
            Ohms(snap.threshold_resistances.ldr_for_low)
        )),
        Line::raw(""),
        Line::raw("Vpin = Vcc · Rd / (R_LDR + Rd)"),
    ];
    if let Some(err) = &app.last_error {
        readout.push(Line::styled(err.clone(), Style::default().fg(Color::Red)));
    }
    frame.render_widget(
        Paragraph::new(readout).block(Block::default().borders(Borders::ALL).title(" Readout ")),
        left[2],
    );

    frame.render_widget(
        Paragraph::new(vec![
            Line::raw("↑↓ select  ←→ ±1k  PgUp/PgDn ±10k"),
            Line::raw("Home/End min/max  q quit"),
        ])
        .block(Block::default().borders(Borders::ALL)),
        left[3],
    );

    render_chart(frame, app, columns[1]);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let snap = app.bench.snapshot();
    let axis = LogAxis::for_sweep(app.bench.sweep());
    let [x_lo, x_hi] = axis.log_bounds();
    let vmax = snap.supply_voltage;

    let curve: Vec<(f64, f64)> = snap.curve.iter().map(|s| (s.log_resistance, s.pin_voltage)).collect();
    let low = [(x_lo, snap.thresholds.low_volts), (x_hi, snap.thresholds.low_volts)];
    let high = [(x_lo, snap.thresholds.high_volts), (x_hi, snap.thresholds.high_volts)];
    let m = snap.marker_log_resistance.clamp(x_lo, x_hi);
    let marker = [(m, 0.0), (m, vmax)];

    let guide = Style::default().fg(Color::DarkGray);
    let datasets = vec![
        Dataset::default()
            .name(format!("LOW {:.1} V", snap.thresholds.low_volts))
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(guide)
            .data(&low),
        Dataset::default()
            .name(format!("HIGH {:.1} V", snap.thresholds.high_volts))
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(guide)
            .data(&high),
        Dataset::default()
            .name("R_LDR")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(state_color(snap.result.digital_state)))
            .data(&marker),
        Dataset::default()
            .name("Vpin")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&curve),
    ];

    // Only decade ticks: ratatui spaces labels evenly, which matches a log axis
    // only at whole decades.
    let x_labels: Vec<Span> = axis
        .ticks()
        .filter(|(_, log_r)| (log_r - log_r.round()).abs() < 1e-9)
        .map(|(ohms, _)| Span::raw(TickLabel(ohms).to_string()))
        .collect();
    let y_labels = vec![
        Span::raw("0V"),
        Span::raw(format!("{:.1}V", vmax / 2.0)),
        Span::raw(format!("{vmax:.1}V")),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(" Vpin vs R_LDR (log x) "))
        .x_axis(Axis::default().title("R_LDR").bounds([x_lo, x_hi]).labels(x_labels))
        .y_axis(Axis::default().title("Vpin").bounds([0.0, vmax]).labels(y_labels));
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldrsim_engine::BenchConfig;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(Bench::new(BenchConfig::default()).unwrap())
    }

    #[test]
    fn arrows_move_the_focused_slider() {
        let mut a = app();
        assert_eq!(a.focus, Focus::Ldr);
        a.on_key(KeyCode::Right);
        assert_eq!(a.bench.inputs().ldr_ohms, 21_000.0);
        a.on_key(KeyCode::PageDown);
        assert_eq!(a.bench.inputs().ldr_ohms, 11_000.0);

        a.on_key(KeyCode::Up);
        assert_eq!(a.focus, Focus::PullDown);
        a.on_key(KeyCode::Char('h'));
        assert_eq!(a.bench.inputs().pull_down_ohms, 29_000.0);
        a.on_key(KeyCode::End);
        assert_eq!(a.bench.inputs().pull_down_ohms, 220_000.0);
        a.on_key(KeyCode::Home);
        assert_eq!(a.bench.inputs().pull_down_ohms, 5_000.0);
        assert!(a.last_error.is_none());
    }

    #[test]
    fn q_quits() {
        let mut a = app();
        a.on_key(KeyCode::Char('x'));
        assert!(!a.should_quit);
        a.on_key(KeyCode::Char('q'));
        assert!(a.should_quit);
    }

    #[test]
    fn terminal_guard_cleans_up_and_restores_the_previous_hook() {
        use std::sync::atomic::{AtomicUsize, Ordering::SeqCst};

        static CLEANUPS: AtomicUsize = AtomicUsize::new(0);
        static OUTER_HOOK: AtomicUsize = AtomicUsize::new(0);
        fn count_cleanup() {
            CLEANUPS.fetch_add(1, SeqCst);
        }

        std::panic::set_hook(Box::new(|_| {
            OUTER_HOOK.fetch_add(1, SeqCst);
        }));
        {
            let _guard = TerminalGuard::with_cleanup(count_cleanup);
            let _ = std::panic::catch_unwind(|| panic!("while drawing"));
            assert_eq!(CLEANUPS.load(SeqCst), 1);
            assert_eq!(OUTER_HOOK.load(SeqCst), 1);
        }
        assert_eq!(CLEANUPS.load(SeqCst), 2);

        let _ = std::panic::catch_unwind(|| panic!("after the dashboard"));
        assert_eq!(CLEANUPS.load(SeqCst), 2);
        assert_eq!(OUTER_HOOK.load(SeqCst), 2);
        drop(std::panic::take_hook());
    }

    #[test]
    fn renders_readouts_into_a_buffer() {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let a = app();
        terminal.draw(|f| render(f, &a)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("3.000 V"));
        assert!(text.contains("HIGH"));
        assert!(text.contains("20.00 kΩ"));
    }
}
