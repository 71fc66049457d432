use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum GripError {
    #[error("Device selection cancelled by user")]
    UserCancelled,

    #[error("Device error: {0}")]
    DeviceError(String),

    #[error("Device {0} has no sensors")]
    NoSensors(String),

    #[error("Sensor {0} is already assigned to a player")]
    SensorInUse(String),

    #[error("Unknown command: {0}")]
    InvalidCommand(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

impl GripError {
    /// Whether this error is the user dismissing the device picker.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, GripError::UserCancelled)
    }
}

pub type Result<T> = std::result::Result<T, GripError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_user_cancelled_is_cancellation() {
        assert!(GripError::UserCancelled.is_cancellation());
        assert!(!GripError::DeviceError("boom".into()).is_cancellation());
        assert!(!GripError::NoSensors("GDX-HD 1".into()).is_cancellation());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GripError::NoSensors("GDX-HD 15200113".into()).to_string(),
            "Device GDX-HD 15200113 has no sensors"
        );
        assert_eq!(
            GripError::DeviceError("gatt disconnected".into()).to_string(),
            "Device error: gatt disconnected"
        );
    }
}
