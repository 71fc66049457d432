//! Player record and its live force readings.

use crate::devices::Sensor;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe current/maximum force readings for one player.
///
/// Sensor callbacks run on SDK tasks, so readings are kept in atomics
/// (as `f64` bit patterns) and updated without touching the session.
#[derive(Debug)]
pub struct Readings {
    current: AtomicU64,
    max: AtomicU64,
}

impl Readings {
    pub fn new() -> Self {
        Self {
            current: AtomicU64::new(0f64.to_bits()),
            max: AtomicU64::new(0f64.to_bits()),
        }
    }

    /// Record a new reading as the current value and fold it into the maximum.
    pub fn record(&self, value: f64) {
        self.current.store(value.to_bits(), Ordering::SeqCst);
        // f64::max ignores NaN, so a garbage reading never poisons the max.
        let _ = self
            .max
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |bits| {
                let max = f64::from_bits(bits);
                let next = max.max(value);
                (next.to_bits() != bits).then_some(next.to_bits())
            });
    }

    pub fn current(&self) -> f64 {
        f64::from_bits(self.current.load(Ordering::SeqCst))
    }

    pub fn max(&self) -> f64 {
        f64::from_bits(self.max.load(Ordering::SeqCst))
    }
}

impl Default for Readings {
    fn default() -> Self {
        Self::new()
    }
}

/// A named participant holding exactly one sensor.
pub struct Player {
    name: String,
    sensor: Arc<dyn Sensor>,
    readings: Arc<Readings>,
}

impl Player {
    pub fn new(name: impl Into<String>, sensor: Arc<dyn Sensor>) -> Self {
        Self {
            name: name.into(),
            sensor,
            readings: Arc::new(Readings::new()),
        }
    }

    /// Display name for the player that joins a session of `count` players.
    pub fn name_for(count: usize) -> String {
        format!("player {}", count + 1)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sensor(&self) -> &Arc<dyn Sensor> {
        &self.sensor
    }

    /// Shared handle to the readings, for wiring into sensor callbacks.
    pub fn readings(&self) -> Arc<Readings> {
        self.readings.clone()
    }

    pub fn current_value(&self) -> f64 {
        self.readings.current()
    }

    pub fn max_value(&self) -> f64 {
        self.readings.max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::SimulatedSensor;

    #[test]
    fn test_initial_readings_are_zero() {
        let player = Player::new("player 1", Arc::new(SimulatedSensor::new("s1")));
        assert_eq!(player.name(), "player 1");
        assert_eq!(player.current_value(), 0.0);
        assert_eq!(player.max_value(), 0.0);
    }

    #[test]
    fn test_current_tracks_last_and_max_tracks_peak() {
        let readings = Readings::new();
        for v in [12.5, 80.0, 40.0, -1.5] {
            readings.record(v);
        }
        assert_eq!(readings.current(), -1.5);
        assert_eq!(readings.max(), 80.0);
    }

    #[test]
    fn test_max_never_below_zero() {
        let readings = Readings::new();
        readings.record(-3.0);
        readings.record(-1.0);
        assert_eq!(readings.current(), -1.0);
        assert_eq!(readings.max(), 0.0);
    }

    #[test]
    fn test_nan_does_not_poison_max() {
        let readings = Readings::new();
        readings.record(10.0);
        readings.record(f64::NAN);
        assert!(readings.current().is_nan());
        assert_eq!(readings.max(), 10.0);
    }

    #[test]
    fn test_name_for_counts_from_one() {
        assert_eq!(Player::name_for(0), "player 1");
        assert_eq!(Player::name_for(2), "player 3");
    }
}
