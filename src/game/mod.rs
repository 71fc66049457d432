//! Game state and rules.
//!
//! The [`GameController`] owns the [`Session`] and is driven by
//! [`GameEvent`]s from a single event loop, so session state has exactly
//! one writer. Sensor callbacks only touch per-player atomic readings, and
//! the device picker runs in its own task so an open picker never holds up
//! the round timer.

pub mod manager;
pub mod notifier;
pub mod player;
pub mod round;
pub mod session;
pub mod winners;

pub use manager::{ConnectOutcome, DeviceManager};
pub use notifier::{RenderScheduler, StateNotifier};
pub use player::{Player, Readings};
pub use round::{GameController, RoundState};
pub use session::Session;
pub use winners::{Standing, resolve_winners};

use crate::devices::Device;
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// Inputs to the game event loop.
#[derive(Debug)]
pub enum GameEvent {
    /// Open the device picker and add a player once a device is chosen.
    Connect,
    /// The picker opened by a `Connect` closed.
    DeviceSelected(DeviceSelection),
    /// Start a round when idle, end it early when running.
    Toggle,
    /// The timer for round `round` ran out.
    RoundExpired { round: u64 },
    Quit,
}

/// What the device picker returned.
pub struct DeviceSelection(pub Result<Arc<dyn Device>>);

impl DeviceSelection {
    pub fn into_inner(self) -> Result<Arc<dyn Device>> {
        self.0
    }
}

impl fmt::Debug for DeviceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Ok(device) => f.debug_tuple("Picked").field(&device.name()).finish(),
            Err(e) => f.debug_tuple("Failed").field(e).finish(),
        }
    }
}
