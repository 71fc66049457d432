//! Device/session manager: turns a picked device into a new player.

use super::player::Player;
use super::session::Session;
use super::{DeviceSelection, GameEvent};
use crate::devices::{Device, DeviceSelector, Sensor};
use crate::error::{GripError, Result};
use log::{debug, error, info};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Result of a connect attempt, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A player with this name joined.
    Connected(String),
    /// The user dismissed the picker; nothing changed.
    Cancelled,
    /// Connecting failed; the error was logged and nothing changed.
    Failed(String),
}

pub struct DeviceManager {
    selector: Arc<dyn DeviceSelector>,
}

impl DeviceManager {
    pub fn new(selector: Arc<dyn DeviceSelector>) -> Self {
        Self { selector }
    }

    /// Open the device picker in its own task.
    ///
    /// The picker may stay open for as long as the user likes; its result
    /// comes back to the event loop as [`GameEvent::DeviceSelected`].
    pub fn spawn_selection(&self, events: mpsc::Sender<GameEvent>) -> JoinHandle<()> {
        let selector = self.selector.clone();
        tokio::spawn(async move {
            let selection = DeviceSelection(selector.select_device().await);
            if events
                .send(GameEvent::DeviceSelected(selection))
                .await
                .is_err()
            {
                debug!("Event loop closed while the device picker was open");
            }
        })
    }

    /// Add a player for the picked device's first sensor.
    ///
    /// Never fails the session: cancellation is silent and other errors
    /// are logged. The player is named from the count at the time the
    /// picker closes.
    pub fn apply_selection(session: &mut Session, selection: DeviceSelection) -> ConnectOutcome {
        match Self::add_player(session, selection.into_inner()) {
            Ok(name) => ConnectOutcome::Connected(name),
            Err(e) if e.is_cancellation() => ConnectOutcome::Cancelled,
            Err(e) => {
                error!("Failed to connect device: {}", e);
                ConnectOutcome::Failed(e.to_string())
            }
        }
    }

    fn add_player(session: &mut Session, selection: Result<Arc<dyn Device>>) -> Result<String> {
        let device = selection?;
        let sensor = first_sensor(device.as_ref())?;
        if session.holds_sensor(sensor.id()) {
            return Err(GripError::SensorInUse(sensor.id().to_string()));
        }

        let name = Player::name_for(session.players().len());
        info!("Connected {} as {}", device.name(), name);
        session.add(device, Player::new(name.clone(), sensor));
        Ok(name)
    }
}

/// Only the first sensor of a multi-sensor device is used.
fn first_sensor(device: &dyn Device) -> Result<Arc<dyn Sensor>> {
    device
        .sensors()
        .into_iter()
        .next()
        .ok_or_else(|| GripError::NoSensors(device.name().to_string()))
}
