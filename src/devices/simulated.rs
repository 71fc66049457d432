//! Simulated hand dynamometers for development and testing.
//!
//! A [`SimulatedDevice`] streams a random-walk grip force from its single
//! [`SimulatedSensor`] while started. [`SimulatedSelector`] plays the role of
//! the device picker and hands out fresh devices until its configured supply
//! runs out, after which it behaves like a dismissed picker.

use super::{Device, DeviceSelector, Sensor, ValueCallback};
use crate::config::SimulationConfig;
use crate::error::{GripError, Result};
use async_trait::async_trait;
use log::{debug, info};
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// How far below zero an idle dynamometer may drift.
const DRIFT_FLOOR_NEWTONS: f64 = 2.0;

/// Force sensor whose readings are pushed in by its device (or a test).
pub struct SimulatedSensor {
    id: String,
    callback: RwLock<Option<ValueCallback>>,
}

impl SimulatedSensor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            callback: RwLock::new(None),
        }
    }

    /// Deliver a reading to the bound callback, if any.
    pub fn emit(&self, value: f64) {
        if let Some(callback) = self.callback.read().as_ref() {
            callback(value);
        }
    }

    pub fn is_bound(&self) -> bool {
        self.callback.read().is_some()
    }
}

impl Sensor for SimulatedSensor {
    fn id(&self) -> &str {
        &self.id
    }

    fn bind(&self, callback: ValueCallback) {
        *self.callback.write() = Some(callback);
    }

    fn unbind(&self) {
        *self.callback.write() = None;
    }
}

/// Single-sensor hand dynamometer.
pub struct SimulatedDevice {
    name: String,
    sensor: Arc<SimulatedSensor>,
    sample_interval: Duration,
    peak_newtons: f64,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SimulatedDevice {
    pub fn new(name: impl Into<String>, sample_interval: Duration, peak_newtons: f64) -> Self {
        let name = name.into();
        let sensor = Arc::new(SimulatedSensor::new(format!("{}:force", name)));
        Self {
            name,
            sensor,
            sample_interval,
            peak_newtons: peak_newtons.max(1.0),
            task: Mutex::new(None),
        }
    }

    /// The device's force sensor, for pushing readings by hand.
    pub fn sensor(&self) -> Arc<SimulatedSensor> {
        self.sensor.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Device for SimulatedDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn sensors(&self) -> Vec<Arc<dyn Sensor>> {
        vec![self.sensor.clone() as Arc<dyn Sensor>]
    }

    fn start(&self) -> Result<()> {
        let mut task = self.task.lock();
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            return Ok(());
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| GripError::DeviceError(format!("{}: {}", self.name, e)))?;

        let sensor = self.sensor.clone();
        let sample_interval = self.sample_interval;
        let peak = self.peak_newtons;
        *task = Some(runtime.spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut ticker = interval(sample_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let step = peak / 8.0;
            let mut force = 0.0_f64;
            loop {
                ticker.tick().await;
                force = (force + rng.gen_range(-step..step)).clamp(-DRIFT_FLOOR_NEWTONS, peak);
                sensor.emit(force);
            }
        }));

        debug!("[Sim] {} streaming", self.name);
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        if let Some(task) = self.task.lock().take() {
            task.abort();
            debug!("[Sim] {} stopped", self.name);
        }
        Ok(())
    }
}

impl Drop for SimulatedDevice {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

/// Picker that offers a fixed supply of simulated devices.
pub struct SimulatedSelector {
    config: SimulationConfig,
    offered: AtomicUsize,
}

impl SimulatedSelector {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            offered: AtomicUsize::new(0),
        }
    }

    /// Devices still available to pick.
    pub fn remaining(&self) -> usize {
        self.config
            .device_count
            .saturating_sub(self.offered.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl DeviceSelector for SimulatedSelector {
    async fn select_device(&self) -> Result<Arc<dyn Device>> {
        // The real picker always suspends on user interaction.
        tokio::task::yield_now().await;

        let taken = self
            .offered
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.config.device_count).then_some(n + 1)
            });
        if taken.is_err() {
            debug!("[Sim] No devices left in range, picker dismissed");
            return Err(GripError::UserCancelled);
        }

        let serial: u32 = rand::thread_rng().gen_range(10_000_000..100_000_000);
        let device = SimulatedDevice::new(
            format!("GDX-HD {}", serial),
            self.config.sample_interval(),
            self.config.peak_newtons,
        );
        info!("[Sim] Picked {}", device.name());
        Ok(Arc::new(device))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::sync::atomic::AtomicU32;

    fn sim_config(device_count: usize) -> SimulationConfig {
        SimulationConfig {
            device_count,
            ..Config::default().simulation
        }
    }

    #[test]
    fn test_emit_reaches_bound_callback_only() {
        let sensor = SimulatedSensor::new("s1");
        let hits = Arc::new(AtomicU32::new(0));

        sensor.emit(1.0);
        assert!(!sensor.is_bound());

        let counter = hits.clone();
        sensor.bind(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        sensor.emit(1.0);
        sensor.emit(2.0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        sensor.unbind();
        sensor.emit(3.0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(!sensor.is_bound());
    }

    #[test]
    fn test_start_outside_runtime_is_device_error() {
        let device = SimulatedDevice::new("GDX-HD 1", Duration::from_millis(10), 100.0);
        let err = device.start().unwrap_err();
        assert!(matches!(err, GripError::DeviceError(_)));
        assert!(!device.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_started_device_streams_within_bounds() {
        let device = SimulatedDevice::new("GDX-HD 2", Duration::from_millis(10), 100.0);
        let readings = Arc::new(Mutex::new(Vec::new()));
        let sink = readings.clone();
        device.sensor().bind(Box::new(move |v| sink.lock().push(v)));

        device.start().unwrap();
        assert!(device.is_running());
        tokio::time::sleep(Duration::from_millis(105)).await;
        device.stop().unwrap();
        assert!(!device.is_running());

        let collected = readings.lock().clone();
        assert!(collected.len() >= 5);
        assert!(
            collected
                .iter()
                .all(|v| (-DRIFT_FLOOR_NEWTONS..=100.0).contains(v))
        );

        let count = collected.len();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(readings.lock().len(), count);
    }

    #[tokio::test]
    async fn test_selector_runs_out_and_cancels() {
        let selector = SimulatedSelector::new(sim_config(2));

        let first = selector.select_device().await.unwrap();
        let second = selector.select_device().await.unwrap();
        assert_ne!(first.sensors()[0].id(), second.sensors()[0].id());
        assert_eq!(selector.remaining(), 0);

        let err = selector.select_device().await.err().unwrap();
        assert!(err.is_cancellation());
    }
}
