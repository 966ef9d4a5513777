use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use ratatui::crossterm::execute;
use tokio::sync::mpsc;
use tracing::debug;

use super::{App, SearchOutcome};
use crate::endpoint::SearchEndpoint;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const TICK_INTERVAL: Duration = Duration::from_millis(100);

enum Step {
    Signal,
    Input(Event),
    Tick,
    Disconnected,
}

/// Take over the terminal and run `app` until the user leaves.
pub async fn run<E: SearchEndpoint>(mut app: App<E>) -> Result<SearchOutcome> {
    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture).context("failed to enable mouse capture")?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let running = Arc::new(AtomicBool::new(true));
    let running_flag = Arc::clone(&running);

    // crossterm reads block, so input is polled on a plain thread.
    let event_thread = thread::spawn(move || -> Result<()> {
        while running_flag.load(Ordering::Relaxed) {
            if event::poll(POLL_INTERVAL)? {
                let event = event::read()?;
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        }
        Ok(())
    });

    app.controller.focus();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);

    let result: Result<SearchOutcome> = loop {
        if let Err(err) = terminal.draw(|frame| app.draw(frame)) {
            break Err(err).context("failed to draw frame");
        }

        let step = tokio::select! {
            () = app.controller.process_next() => Step::Signal,
            event = event_rx.recv() => event.map_or(Step::Disconnected, Step::Input),
            _ = ticker.tick() => Step::Tick,
        };

        match step {
            Step::Signal => {
                app.controller.pump();
                app.sync_list_state();
            }
            Step::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if let Some(outcome) = app.handle_key(key) {
                    break Ok(outcome);
                }
            }
            Step::Input(Event::Mouse(mouse)) => app.handle_mouse(mouse),
            Step::Input(_) => {}
            Step::Tick => {
                if app.controller.state().is_loading() {
                    app.throbber_state.calc_next();
                }
            }
            Step::Disconnected => break Err(anyhow!("input event channel disconnected")),
        }
    };

    running.store(false, Ordering::Relaxed);
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();

    match event_thread.join() {
        Ok(join_result) => join_result?,
        Err(err) => std::panic::resume_unwind(err),
    }

    if let Ok(outcome) = &result {
        debug!(selection = ?outcome.selection, query = %outcome.query, "search box closed");
    }
    result
}
