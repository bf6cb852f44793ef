use std::{
    ops::ControlFlow,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use oxiflap_engine::{FrameObserver, WorldSnapshot};
use ratatui::DefaultTerminal;

use crate::{logging, ui::widgets::PlayfieldDisplay};

/// Draws every tick to the terminal, paced to a fixed tick rate.
///
/// `q`, `Esc` or `Ctrl-C` stop the run after the current tick. Terminal
/// errors also stop it; they are kept until [`Self::finish`].
#[derive(Debug)]
pub struct TerminalRenderer {
    terminal: DefaultTerminal,
    tick_interval: Duration,
    next_frame: Instant,
    error: Option<anyhow::Error>,
}

impl TerminalRenderer {
    pub const TICKS_PER_SECOND: u32 = 30;

    /// Switches the terminal to the alternate screen.
    ///
    /// Log lines are held back until the renderer is dropped.
    pub fn init() -> Self {
        logging::hold();
        Self {
            terminal: ratatui::init(),
            tick_interval: Duration::from_secs(1) / Self::TICKS_PER_SECOND,
            next_frame: Instant::now(),
            error: None,
        }
    }

    /// Restores the terminal, prints the held log lines and reports the first
    /// error hit while drawing.
    pub fn finish(mut self) -> anyhow::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn draw_and_wait(&mut self, snapshot: &WorldSnapshot<'_>) -> anyhow::Result<ControlFlow<()>> {
        self.terminal
            .draw(|frame| frame.render_widget(PlayfieldDisplay::new(snapshot), frame.area()))
            .context("Failed to draw frame")?;

        let now = Instant::now();
        self.next_frame = (self.next_frame + self.tick_interval).max(now);
        loop {
            let timeout = self.next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout).context("Failed to poll terminal events")? {
                return Ok(ControlFlow::Continue(()));
            }
            if let Event::Key(key) = event::read().context("Failed to read terminal event")?
                && key.kind == KeyEventKind::Press
                && is_quit_key(key.code, key.modifiers)
            {
                return Ok(ControlFlow::Break(()));
            }
        }
    }
}

fn is_quit_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl FrameObserver for TerminalRenderer {
    fn on_frame(&mut self, snapshot: &WorldSnapshot<'_>) -> ControlFlow<()> {
        match self.draw_and_wait(snapshot) {
            Ok(flow) => flow,
            Err(err) => {
                self.error = Some(err);
                ControlFlow::Break(())
            }
        }
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        ratatui::restore();
        logging::release();
    }
}
