use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Load environment variables from a `.env` file in the working directory.
///
/// Variables already present in the environment take precedence.
pub fn load_dotenv() {
    let env_path = Path::new(".env");
    let Ok(content) = fs::read_to_string(env_path) else {
        return;
    };

    for (key, value) in parse_dotenv(&content) {
        if std::env::var(&key).is_err() {
            // SAFETY: called from main before the runtime spawns any threads
            unsafe { std::env::set_var(key, value) };
        }
    }
}

/// Parse `KEY=value` lines, skipping blanks and `#` comments.
///
/// Values may contain spaces without quoting; a single pair of surrounding
/// quotes is stripped.
pub fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub round: RoundConfig,
    pub display: DisplayConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Length of one round in milliseconds.
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Minimum time between two rendered frames.
    pub frame_interval_ms: u64,
    /// Emit frames as JSON lines instead of the terminal view.
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Devices the simulated picker offers before it reports cancellation.
    pub device_count: usize,
    pub sample_interval_ms: u64,
    /// Upper bound of simulated grip force, in newtons.
    pub peak_newtons: f64,
}

impl RoundConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl DisplayConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

impl SimulationConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round: RoundConfig { duration_ms: 5000 },
            display: DisplayConfig {
                frame_interval_ms: 50,
                json: false,
            },
            simulation: SimulationConfig {
                device_count: 4,
                sample_interval_ms: 100,
                peak_newtons: 400.0,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from defaults overridden by `lookup`.
    ///
    /// Values that fail to parse are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ms) = lookup("GRIP_ROUND_MS")
            && let Ok(ms) = ms.parse()
        {
            config.round.duration_ms = ms;
        }
        if let Some(ms) = lookup("GRIP_FRAME_MS")
            && let Ok(ms) = ms.parse()
        {
            config.display.frame_interval_ms = ms;
        }
        if let Some(json) = lookup("GRIP_JSON") {
            config.display.json = matches!(json.as_str(), "1" | "true" | "yes");
        }
        if let Some(count) = lookup("GRIP_SIM_DEVICES")
            && let Ok(count) = count.parse()
        {
            config.simulation.device_count = count;
        }
        if let Some(ms) = lookup("GRIP_SIM_SAMPLE_MS")
            && let Ok(ms) = ms.parse()
        {
            config.simulation.sample_interval_ms = ms;
        }
        if let Some(peak) = lookup("GRIP_SIM_PEAK_NEWTONS")
            && let Ok(peak) = peak.parse::<f64>()
            && peak.is_finite()
            && peak > 0.0
        {
            config.simulation.peak_newtons = peak;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.round.duration(), Duration::from_millis(5000));
        assert_eq!(config.display.frame_interval_ms, 50);
        assert!(!config.display.json);
        assert_eq!(config.simulation.device_count, 4);
    }

    #[test]
    fn test_lookup_overrides_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = [
            ("GRIP_ROUND_MS", "3000"),
            ("GRIP_FRAME_MS", "fast"),
            ("GRIP_JSON", "true"),
            ("GRIP_SIM_PEAK_NEWTONS", "-5"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.round.duration_ms, 3000);
        assert_eq!(config.display.frame_interval_ms, 50);
        assert!(config.display.json);
        assert_eq!(config.simulation.peak_newtons, 400.0);
    }

    #[test]
    fn test_parse_dotenv() {
        let parsed = parse_dotenv(
            "# comment\n\nGRIP_ROUND_MS = 7000\nNAME=\"grip night\"\nOTHER='x'\nbroken line\n=novalue\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("GRIP_ROUND_MS".to_string(), "7000".to_string()),
                ("NAME".to_string(), "grip night".to_string()),
                ("OTHER".to_string(), "x".to_string()),
            ]
        );
    }
}
