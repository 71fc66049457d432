//! Session state: connected devices, players, round flag and winners.
//!
//! Every mutation goes through a method that notifies the
//! [`StateNotifier`], so the presentation layer never misses a change.

use super::notifier::StateNotifier;
use super::player::Player;
use super::winners::Standing;
use crate::devices::Device;
use std::sync::Arc;

pub struct Session {
    devices: Vec<Arc<dyn Device>>,
    players: Vec<Player>,
    winners: Vec<Standing>,
    running: bool,
    notifier: StateNotifier,
}

impl Session {
    pub fn new(notifier: StateNotifier) -> Self {
        Self {
            devices: Vec::new(),
            players: Vec::new(),
            winners: Vec::new(),
            running: false,
            notifier,
        }
    }

    pub fn devices(&self) -> &[Arc<dyn Device>] {
        &self.devices
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn winners(&self) -> &[Standing] {
        &self.winners
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn notifier(&self) -> &StateNotifier {
        &self.notifier
    }

    /// Whether any player already holds the sensor with this id.
    pub fn holds_sensor(&self, sensor_id: &str) -> bool {
        self.players.iter().any(|p| p.sensor().id() == sensor_id)
    }

    /// Append a newly connected device and the player using its sensor.
    pub(crate) fn add(&mut self, device: Arc<dyn Device>, player: Player) {
        self.devices.push(device);
        self.players.push(player);
        self.notifier.notify();
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        if self.running != running {
            self.running = running;
            self.notifier.notify();
        }
    }

    pub(crate) fn set_winners(&mut self, winners: Vec<Standing>) {
        if self.winners != winners {
            self.winners = winners;
            self.notifier.notify();
        }
    }
}
