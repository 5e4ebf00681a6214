//! Terminal state tracking for a training session
//!
//! This module tracks whether the session is still running, why it ended,
//! and the cheat switch that suppresses the two failure rules.

use std::fmt;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalReason {
    /// Still running
    #[default]
    None,
    /// The avatar was hit by a vehicle
    VehicleCollision,
    /// The pedestrian did not appear often enough before the deadline
    InsufficientAppearances,
    /// The avatar reached the final waypoint (only when enabled)
    Completed,
}

impl TerminalReason {
    /// Whether this outcome counts as a failure
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            TerminalReason::VehicleCollision | TerminalReason::InsufficientAppearances
        )
    }
}

impl fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TerminalReason::None => "running",
            TerminalReason::VehicleCollision => "vehicle collision",
            TerminalReason::InsufficientAppearances => "insufficient appearances",
            TerminalReason::Completed => "route completed",
        };
        f.write_str(text)
    }
}

/// Session-wide flags owned by the orchestrator
#[derive(Debug, Clone, Default)]
pub struct SessionStatus {
    pub terminal: bool,
    pub reason: TerminalReason,
    /// Suppresses collision and deadline failures only
    pub cheat: bool,
}

impl SessionStatus {
    pub fn new(cheat: bool) -> Self {
        Self {
            cheat,
            ..Self::default()
        }
    }

    /// Enter the terminal state. The first reason recorded wins.
    /// Returns false if the session had already ended.
    pub fn end(&mut self, reason: TerminalReason) -> bool {
        if self.terminal {
            return false;
        }
        self.terminal = true;
        self.reason = reason;
        true
    }

    pub fn toggle_cheat(&mut self) -> bool {
        self.cheat = !self.cheat;
        self.cheat
    }

    /// Short status line for logs and the HUD
    pub fn summary(&self) -> String {
        format!(
            "Cheat Mode: {} | State: {}",
            if self.cheat { "ON" } else { "OFF" },
            self.reason
        )
    }
}
