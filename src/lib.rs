//! Get a Grip: a grip-strength party game.
//!
//! Players each hold a force-sensing hand dynamometer. A round lasts a
//! fixed time; whoever squeezed hardest when it ends wins.

pub mod app;
pub mod config;
pub mod devices;
pub mod error;
pub mod game;
pub mod input;
pub mod present;
pub mod units;
