//! Per-tick input contract and the scripted input used by headless runs

use anyhow::{bail, Context, Result};

/// Held movement keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementIntent {
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Everything the session consumes on one tick
///
/// Movement is level-triggered; the remaining flags are edge-triggered and
/// should be set on a single frame only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub movement: MovementIntent,
    pub toggle_cheat: bool,
    pub request_crossing: bool,
    /// Only honored once the session has ended
    pub reset: bool,
    /// Debug: make the pedestrian appear now
    pub force_spawn: bool,
    pub quit: bool,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(movement: MovementIntent) -> Self {
        Self {
            movement,
            ..Self::default()
        }
    }

    /// Copy of this frame with the edge-triggered events cleared
    pub fn held_only(&self) -> Self {
        Self::moving(self.movement)
    }
}

/// Supplies one input frame per tick
pub trait InputSource {
    fn next_frame(&mut self) -> InputFrame;
}

/// A parsed script of input steps
///
/// Steps are comma separated. Each step is one or more `+`-joined tokens with
/// an optional `*count` repeat, e.g. `forward*34,left+cross,wait*120,quit`.
/// Movement tokens hold for every repeated tick; event tokens fire on the
/// first tick of their step only. Once the script runs out it yields idle
/// frames.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    steps: Vec<(InputFrame, u32)>,
    step: usize,
    repeat: u32,
}

impl InputScript {
    pub fn parse(text: &str) -> Result<Self> {
        let mut steps = Vec::new();
        for raw in text.split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            steps.push(parse_step(raw).with_context(|| format!("Invalid script step '{}'", raw))?);
        }
        Ok(Self {
            steps,
            step: 0,
            repeat: 0,
        })
    }

    /// Total number of ticks the script spells out
    pub fn len_ticks(&self) -> u64 {
        self.steps.iter().map(|(_, count)| u64::from(*count)).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.steps.len()
    }
}

impl InputSource for InputScript {
    fn next_frame(&mut self) -> InputFrame {
        let Some((frame, count)) = self.steps.get(self.step).copied() else {
            return InputFrame::idle();
        };

        let out = if self.repeat == 0 {
            frame
        } else {
            frame.held_only()
        };

        self.repeat += 1;
        if self.repeat >= count {
            self.step += 1;
            self.repeat = 0;
        }
        out
    }
}

fn parse_step(raw: &str) -> Result<(InputFrame, u32)> {
    let (body, count) = match raw.split_once('*') {
        Some((body, count)) => {
            let count: u32 = count
                .trim()
                .parse()
                .with_context(|| format!("Bad repeat count '{}'", count.trim()))?;
            if count == 0 {
                bail!("Repeat count must be at least 1");
            }
            (body, count)
        }
        None => (raw, 1),
    };

    let mut frame = InputFrame::idle();
    for token in body.split('+') {
        match token.trim().to_ascii_lowercase().as_str() {
            "forward" | "w" => frame.movement.forward = true,
            "back" | "s" => frame.movement.back = true,
            "left" | "a" => frame.movement.left = true,
            "right" | "d" => frame.movement.right = true,
            "wait" | "idle" => {}
            "cross" | "e" => frame.request_crossing = true,
            "cheat" | "c" => frame.toggle_cheat = true,
            "spawn" | "n" => frame.force_spawn = true,
            "reset" | "r" => frame.reset = true,
            "quit" | "esc" => frame.quit = true,
            "" => bail!("Empty token"),
            other => bail!("Unknown token '{}'", other),
        }
    }
    Ok((frame, count))
}
