//! Capability traits for force-sensing hardware.
//!
//! The game only ever talks to devices through these traits, so a real
//! hardware SDK and the simulated devices in [`simulated`] (or a test
//! double) are interchangeable.

pub mod simulated;

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub use simulated::{SimulatedDevice, SimulatedSelector, SimulatedSensor};

/// Callback invoked with every new reading while a sensor is bound.
pub type ValueCallback = Box<dyn Fn(f64) + Send + Sync>;

/// A single streaming numeric data source on a device.
pub trait Sensor: Send + Sync {
    /// Stable identifier, unique across all connected devices.
    fn id(&self) -> &str;

    /// Subscribe to value-changed notifications.
    ///
    /// Binding replaces any previously bound callback.
    fn bind(&self, callback: ValueCallback);

    /// Drop the bound callback, if any.
    fn unbind(&self);
}

/// A connected hardware unit exposing one or more sensors.
pub trait Device: Send + Sync {
    fn name(&self) -> &str;

    /// Sensors in the order the device reports them.
    fn sensors(&self) -> Vec<Arc<dyn Sensor>>;

    /// Begin streaming readings to bound sensors.
    fn start(&self) -> Result<()>;

    /// Stop streaming. Stopping an idle device is a no-op.
    fn stop(&self) -> Result<()>;
}

/// Device discovery, typically backed by a user-facing picker.
#[async_trait]
pub trait DeviceSelector: Send + Sync {
    /// Wait for the user to pick a device.
    ///
    /// Returns [`GripError::UserCancelled`](crate::error::GripError::UserCancelled)
    /// when the picker is dismissed.
    async fn select_device(&self) -> Result<Arc<dyn Device>>;
}
