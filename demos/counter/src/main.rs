//! Counter - slomux demo
//!
//! One store, two components that select different slices of it:
//! 1. Event (keyboard) -> Component.handle_event() -> Dispatch
//! 2. Store runs the reducer and notifies every selector listener
//! 3. Listeners whose slice changed request a re-render
//! 4. The next paint re-activates only those components
//!
//! # Usage
//!
//! ```sh
//! cargo run -p counter-demo
//!
//! # Start at 10 with a step of 2, logging dispatches to a file
//! RUST_LOG=debug cargo run -p counter-demo -- --counter 10 --step 2 --log-file counter.log
//!
//! # Dispatch a recorded action script before the UI starts
//! cargo run -p counter-demo -- --replay demos/counter/scripts/sample.json
//! ```

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    Terminal,
};
use slomux::{
    process_raw_event, spawn_event_poller, EventKind, Host, InstanceId, PollerConfig, Provider,
    RawEvent, Store, StoreConfig,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use counter_demo::action::CounterAction;
use counter_demo::components::{Counter, HelpBar, Step};
use counter_demo::reducer::reducer;
use counter_demo::script::{load_script, ScriptError};
use counter_demo::state::CounterState;

/// Counter - slomux selector demo
#[derive(Parser, Debug)]
#[command(name = "counter")]
#[command(about = "A counter with an adjustable step, re-rendered by selector")]
struct Args {
    /// Initial counter value
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    counter: i64,

    /// Initial step size
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    step: i64,

    /// JSON array of `{ "type", "payload" }` actions to dispatch before the UI starts
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Write tracing output to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("render failed: {0}")]
    Render(#[from] slomux::Error),

    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// The TUI owns stdout, so logs only go to a file
fn init_tracing(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,slomux_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }

    let store = Store::with_config(
        CounterState::new(args.counter, args.step),
        reducer,
        StoreConfig::named("counter"),
    );

    // Replay before entering TUI mode so script errors print normally
    if let Some(path) = &args.replay {
        let actions = load_script(path)?;
        tracing::info!(path = %path.display(), actions = actions.len(), "Replaying script");
        for action in actions {
            store.dispatch(action);
        }
    }

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, store).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let state = result?;
    println!("counter = {}, step size = {}", state.counter, state.step_size);
    Ok(())
}

/// Instance ids of the mounted components
struct CounterUi {
    step: InstanceId,
    counter: InstanceId,
    help: InstanceId,
}

impl CounterUi {
    /// Mount `Step` above `Counter` under one provider
    fn mount(
        host: &mut Host,
        store: Store<CounterState, CounterAction>,
        area: Rect,
    ) -> Result<Self, AppError> {
        let [step_area, counter_area, help_area] = layout(area);
        let root = host.provide(None, Provider::new(store))?;
        Ok(Self {
            step: host.mount(Some(root), Step::default(), step_area)?,
            counter: host.mount(Some(root), Counter::default(), counter_area)?,
            help: host.mount(Some(root), HelpBar, help_area)?,
        })
    }

    fn resize(&self, host: &mut Host, area: Rect) -> Result<(), AppError> {
        let [step_area, counter_area, help_area] = layout(area);
        host.set_area(self.step, step_area)?;
        host.set_area(self.counter, counter_area)?;
        host.set_area(self.help, help_area)?;
        Ok(())
    }
}

fn layout(area: Rect) -> [Rect; 3] {
    let [step, counter, _, help] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);
    [step, counter, help]
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    store: Store<CounterState, CounterAction>,
) -> Result<std::rc::Rc<CounterState>, AppError> {
    let size = terminal.size()?;
    let mut host = Host::new();
    let area = Rect::new(0, 0, size.width, size.height);
    let ui = CounterUi::mount(&mut host, store.clone(), area)?;

    // Event poller
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());

    let mut should_render = true;

    loop {
        // Paint when a component asked for it or the screen needs a full redraw
        if should_render || host.has_pending() {
            let mut painted = Ok(());
            terminal.draw(|frame| painted = host.draw(frame))?;
            painted?;
            should_render = false;
        }

        let Some(raw_event) = event_rx.recv().await else {
            break;
        };

        match process_raw_event(raw_event) {
            EventKind::Key(key) if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) => break,
            EventKind::Resize(width, height) => {
                ui.resize(&mut host, Rect::new(0, 0, width, height))?;
                should_render = true;
            }
            event => host.handle_event(&event),
        }
    }

    cancel_token.cancel();
    Ok(store.state())
}
