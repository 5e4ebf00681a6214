//! Crosswalk Trainer Library
//!
//! A street-crossing training scenario whose rule engine can run
//! independently or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
