//! Round lifecycle controller.
//!
//! Two states, `Idle` and `Running`:
//! - Idle → Running on toggle: bind every player's sensor, start every
//!   device, arm the round timer.
//! - Running → Idle on timer expiry: unbind sensors, stop devices,
//!   resolve winners.
//! - Running → Idle on toggle (ending early): stop devices and cancel the
//!   timer. Sensors stay bound and no winner is declared.

use super::manager::{ConnectOutcome, DeviceManager};
use super::session::Session;
use super::winners::resolve_winners;
use super::{DeviceSelection, GameEvent};
use log::{debug, info, trace, warn};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Idle,
    Running,
}

/// One-shot timer that reports expiry of a specific round.
struct RoundTimer {
    round: u64,
    handle: JoinHandle<()>,
}

impl RoundTimer {
    fn arm(round: u64, duration: Duration, events: mpsc::Sender<GameEvent>) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if events.send(GameEvent::RoundExpired { round }).await.is_err() {
                debug!("Event loop closed before round {} expired", round);
            }
        });
        Self { round, handle }
    }

    fn cancel(self) {
        self.handle.abort();
    }
}

/// Owns the session and applies game events to it.
pub struct GameController {
    session: Session,
    manager: DeviceManager,
    events: mpsc::Sender<GameEvent>,
    round_duration: Duration,
    timer: Option<RoundTimer>,
    rounds: u64,
    pickers: Vec<JoinHandle<()>>,
}

impl GameController {
    /// `events` is the sender half of the loop's own event channel; the
    /// round timer and the device picker report back through it.
    pub fn new(
        session: Session,
        manager: DeviceManager,
        events: mpsc::Sender<GameEvent>,
        round_duration: Duration,
    ) -> Self {
        Self {
            session,
            manager,
            events,
            round_duration,
            timer: None,
            rounds: 0,
            pickers: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> RoundState {
        if self.session.is_running() {
            RoundState::Running
        } else {
            RoundState::Idle
        }
    }

    /// Id of the round whose timer is currently armed.
    pub fn armed_round(&self) -> Option<u64> {
        self.timer.as_ref().map(|t| t.round)
    }

    /// Apply one event. Returns `false` once the session should end.
    ///
    /// Never waits: the device picker runs in its own task.
    pub fn handle(&mut self, event: GameEvent) -> bool {
        match event {
            GameEvent::Connect => self.open_picker(),
            GameEvent::DeviceSelected(selection) => {
                self.device_selected(selection);
            }
            GameEvent::Toggle => self.toggle(),
            GameEvent::RoundExpired { round } => self.expire_round(round),
            GameEvent::Quit => return false,
        }
        true
    }

    /// Number of device pickers still open.
    pub fn open_pickers(&self) -> usize {
        self.pickers.iter().filter(|p| !p.is_finished()).count()
    }

    pub fn open_picker(&mut self) {
        self.pickers.retain(|p| !p.is_finished());
        let picker = self.manager.spawn_selection(self.events.clone());
        self.pickers.push(picker);
    }

    pub fn device_selected(&mut self, selection: DeviceSelection) -> ConnectOutcome {
        DeviceManager::apply_selection(&mut self.session, selection)
    }

    /// The single start/end control.
    pub fn toggle(&mut self) {
        match self.state() {
            RoundState::Idle => self.start_round(),
            RoundState::Running => self.end_round_early(),
        }
    }

    fn start_round(&mut self) {
        self.rounds += 1;
        let round = self.rounds;

        self.session.set_winners(Vec::new());
        self.session.set_running(true);

        for player in self.session.players() {
            let readings = player.readings();
            let notifier = self.session.notifier().clone();
            let name = player.name().to_string();
            player.sensor().bind(Box::new(move |value| {
                trace!("{}: {:.2} N", name, value);
                readings.record(value);
                notifier.notify();
            }));
        }

        for device in self.session.devices() {
            if let Err(e) = device.start() {
                warn!("Failed to start {}: {}", device.name(), e);
            }
        }

        self.timer = Some(RoundTimer::arm(
            round,
            self.round_duration,
            self.events.clone(),
        ));
        info!(
            "Round {} started with {} player(s) for {:?}",
            round,
            self.session.players().len(),
            self.round_duration
        );
    }

    fn end_round_early(&mut self) {
        self.stop_devices();
        self.session.set_running(false);
        if let Some(timer) = self.timer.take() {
            info!("Round {} ended early", timer.round);
            timer.cancel();
        }
    }

    /// Finish the round if `round` is the one currently armed.
    pub fn expire_round(&mut self, round: u64) {
        if self.armed_round() != Some(round) {
            debug!("Ignoring stale expiry for round {}", round);
            return;
        }
        self.timer = None;

        self.unbind_sensors();
        self.stop_devices();
        self.session.set_running(false);

        let winners = resolve_winners(self.session.players());
        match winners.first() {
            Some(top) => info!(
                "Round {} won by {} with {:.2} N",
                round, top.name, top.max_value
            ),
            None => info!("Round {} finished without a winner", round),
        }
        self.session.set_winners(winners);
    }

    /// Release all hardware before the session ends.
    pub fn shutdown(&mut self) {
        for picker in self.pickers.drain(..) {
            picker.abort();
        }
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.unbind_sensors();
        self.stop_devices();
        self.session.set_running(false);
    }

    fn unbind_sensors(&self) {
        for player in self.session.players() {
            player.sensor().unbind();
        }
    }

    /// A device that fails to stop is logged and skipped.
    fn stop_devices(&self) {
        for device in self.session.devices() {
            if let Err(e) = device.stop() {
                warn!("Failed to stop {}: {}", device.name(), e);
            }
        }
    }
}
