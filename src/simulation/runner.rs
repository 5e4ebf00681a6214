//! Fixed-rate loop driving a session from an input source
//!
//! The loop owns a cancellation token; a quit input (or any holder of a
//! cloned token) stops it between ticks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::info;

use super::input::InputSource;
use super::session::{GameSession, TickReport};

/// Shared flag that asks a running loop to stop
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Re-arm the token after a cancellation has been handled
    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Why a loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Quit input or an external cancel
    Cancelled { ticks: u64 },
    /// The session ended and the loop was told to stop on terminal
    Terminal { ticks: u64 },
    /// The tick budget ran out
    TickLimit { ticks: u64 },
}

impl LoopExit {
    pub fn ticks(&self) -> u64 {
        match *self {
            LoopExit::Cancelled { ticks }
            | LoopExit::Terminal { ticks }
            | LoopExit::TickLimit { ticks } => ticks,
        }
    }
}

/// Runs `GameSession::tick` at a fixed step
#[derive(Debug, Clone)]
pub struct FixedStepLoop {
    pub delta_secs: f64,
    pub max_ticks: Option<u64>,
    /// Leave the loop as soon as the session becomes terminal
    pub stop_on_terminal: bool,
    /// Real time to sleep between ticks; zero runs as fast as possible
    pub pace: Duration,
    cancel: CancelToken,
}

impl FixedStepLoop {
    pub fn new(delta_secs: f64) -> Self {
        Self {
            delta_secs,
            max_ticks: None,
            stop_on_terminal: true,
            pace: Duration::ZERO,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    pub fn keep_running_after_end(mut self) -> Self {
        self.stop_on_terminal = false;
        self
    }

    /// A handle that can stop the loop from outside
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Drive `session` until cancelled, terminal or out of ticks.
    /// `observer` sees the session and the report after every tick.
    ///
    /// A cancellation stops only the run that observes it; the token is
    /// cleared on the way out so the loop can be run again.
    pub fn run<S, F>(&self, session: &mut GameSession, input: &mut S, mut observer: F) -> LoopExit
    where
        S: InputSource + ?Sized,
        F: FnMut(&GameSession, &TickReport),
    {
        let mut ticks = 0u64;
        loop {
            if self.cancel.is_cancelled() {
                self.cancel.clear();
                return LoopExit::Cancelled { ticks };
            }
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                return LoopExit::TickLimit { ticks };
            }

            let frame = input.next_frame();
            let report = session.tick(&frame, self.delta_secs);
            ticks += 1;
            observer(session, &report);

            if report.quit_requested {
                info!("Quit requested after {} ticks", ticks);
                self.cancel.cancel();
                continue;
            }
            if self.stop_on_terminal && session.is_terminal() {
                return LoopExit::Terminal { ticks };
            }
            if !self.pace.is_zero() {
                std::thread::sleep(self.pace);
            }
        }
    }
}
