//! Pedestrian crossing signal
//!
//! A strict three-phase cycle: green for cars, changing, red for cars,
//! then back to green. Standalone implementation that doesn't depend on Bevy.

use log::debug;

use super::types::{Position, CROSSWALK_Z};

/// Location of the push-button pole next to the crossing
pub const BUTTON_POLE: Position = Position {
    x: -6.5,
    y: 0.0,
    z: CROSSWALK_Z + 0.2,
};

/// How close the avatar must stand to the pole to press the button
pub const BUTTON_PRESS_DISTANCE: f32 = 1.2;

/// Seconds between pressing the button and the signal turning red
pub const CHANGE_DELAY_SECS: f64 = 1.2;

/// Seconds the signal stays red for cars
pub const RED_DURATION_SECS: f64 = 6.0;

/// Phase of the crossing signal, named from the cars' point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalState {
    #[default]
    GreenForCars,
    ChangingToRed,
    RedForCars,
}

impl SignalState {
    /// The only phase that may follow this one
    pub fn successor(self) -> SignalState {
        match self {
            SignalState::GreenForCars => SignalState::ChangingToRed,
            SignalState::ChangingToRed => SignalState::RedForCars,
            SignalState::RedForCars => SignalState::GreenForCars,
        }
    }

    /// Pedestrians may cross only while cars have red
    pub fn walk_allowed(self) -> bool {
        self == SignalState::RedForCars
    }

    pub fn label(self) -> &'static str {
        match self {
            SignalState::GreenForCars => "Cars: GREEN  | Pedestrians: WAIT",
            SignalState::ChangingToRed => "Cars: YELLOW | Pedestrians: WAIT",
            SignalState::RedForCars => "Cars: RED    | Pedestrians: WALK",
        }
    }
}

/// The crossing signal and its button pole
#[derive(Debug, Clone)]
pub struct TrafficSignal {
    pub state: SignalState,
    pub pole: Position,
    /// When the current timed phase started (button press, then red onset)
    pub last_transition_at: Option<f64>,
}

impl Default for TrafficSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficSignal {
    pub fn new() -> Self {
        Self {
            state: SignalState::GreenForCars,
            pole: BUTTON_POLE,
            last_transition_at: None,
        }
    }

    /// Whether `position` is close enough to reach the button
    pub fn in_reach(&self, position: &Position) -> bool {
        position.planar_distance_squared(&self.pole) <= BUTTON_PRESS_DISTANCE * BUTTON_PRESS_DISTANCE
    }

    /// Press the crossing button.
    /// Returns true if the press started a change; otherwise nothing happens.
    pub fn request_crossing(&mut self, avatar: &Position, now: f64) -> bool {
        if self.state != SignalState::GreenForCars || !self.in_reach(avatar) {
            return false;
        }
        self.state = SignalState::ChangingToRed;
        self.last_transition_at = Some(now);
        debug!("Crossing requested at {:.2}s", now);
        true
    }

    /// Advance the signal timers.
    /// Returns the new state if a transition happened on this call.
    pub fn tick(&mut self, now: f64) -> Option<SignalState> {
        let since = match self.last_transition_at {
            Some(started) => now - started,
            None => return None,
        };

        match self.state {
            SignalState::GreenForCars => None,
            SignalState::ChangingToRed if since >= CHANGE_DELAY_SECS => {
                self.state = SignalState::RedForCars;
                self.last_transition_at = Some(now);
                debug!("Signal red for cars at {:.2}s", now);
                Some(self.state)
            }
            SignalState::RedForCars if since >= RED_DURATION_SECS => {
                self.state = SignalState::GreenForCars;
                self.last_transition_at = None;
                debug!("Signal green for cars at {:.2}s", now);
                Some(self.state)
            }
            _ => None,
        }
    }

    /// Seconds left in the current timed phase, if any
    pub fn remaining(&self, now: f64) -> Option<f64> {
        let started = self.last_transition_at?;
        let duration = match self.state {
            SignalState::GreenForCars => return None,
            SignalState::ChangingToRed => CHANGE_DELAY_SECS,
            SignalState::RedForCars => RED_DURATION_SECS,
        };
        Some((duration - (now - started)).max(0.0))
    }
}
