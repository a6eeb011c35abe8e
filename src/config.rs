use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid duration '{0}': {1}")]
    Duration(String, String),
    #[error("no callsign configured")]
    MissingCallsign,
}

/// Everything the analysis needs for one run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Substring a received message must contain to count as our own echo.
    #[serde(default)]
    pub callsign: String,
    #[serde(default)]
    pub logs: LogPaths,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogPaths {
    /// WSJT-X log of the transmitting instance.
    #[serde(default = "default_tx_log")]
    pub tx: PathBuf,
    /// WSJT-X log of the receiving instance.
    #[serde(default = "default_rx_log")]
    pub rx: PathBuf,
    #[serde(default = "default_telemetry_log")]
    pub telemetry: PathBuf,
}

impl Default for LogPaths {
    fn default() -> Self {
        Self {
            tx: default_tx_log(),
            rx: default_rx_log(),
            telemetry: default_telemetry_log(),
        }
    }
}

/// Time windows used by the matcher, correlator, segmenter and track
/// extractor. Written as humantime strings in YAML (`"1s"`, `"30m"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MatchingConfig {
    /// Maximum |tx - rx| for an echo. Inclusive.
    #[serde(default = "default_echo_tolerance", deserialize_with = "duration")]
    pub echo_tolerance: Duration,
    /// Telemetry is attached only when strictly closer than this.
    #[serde(default = "default_telemetry_max_diff", deserialize_with = "duration")]
    pub telemetry_max_diff: Duration,
    /// Largest gap between consecutive echoes of one pass. Inclusive.
    #[serde(default = "default_max_pass_gap", deserialize_with = "duration")]
    pub max_pass_gap: Duration,
    /// Extra time around a pass when extracting its track.
    #[serde(default = "default_track_margin", deserialize_with = "duration")]
    pub track_margin: Duration,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            echo_tolerance: default_echo_tolerance(),
            telemetry_max_diff: default_telemetry_max_diff(),
            max_pass_gap: default_max_pass_gap(),
            track_margin: default_track_margin(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("echo_passes")
}

fn default_tx_log() -> PathBuf {
    PathBuf::from("WSJT-X/ALL.TXT")
}

fn default_rx_log() -> PathBuf {
    PathBuf::from("WSJT-X - None/ALL.TXT")
}

fn default_telemetry_log() -> PathBuf {
    PathBuf::from("Pycom/logs/pycom.log")
}

fn default_echo_tolerance() -> Duration {
    Duration::seconds(1)
}

fn default_telemetry_max_diff() -> Duration {
    Duration::seconds(5)
}

fn default_max_pass_gap() -> Duration {
    Duration::minutes(30)
}

fn default_track_margin() -> Duration {
    Duration::minutes(10)
}

fn duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let err = |msg: String| ConfigError::Duration(s.to_string(), msg);
    humantime::parse_duration(s.trim())
        .map_err(|e| err(e.to_string()))
        .and_then(|d| Duration::from_std(d).map_err(|e| err(e.to_string())))
}

impl Config {
    /// Defaults for everything except the callsign, which has none.
    pub fn with_callsign(callsign: impl Into<String>) -> Self {
        Self {
            callsign: callsign.into(),
            logs: LogPaths::default(),
            output_dir: default_output_dir(),
            matching: MatchingConfig::default(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.callsign.trim().is_empty() {
            return Err(ConfigError::MissingCallsign);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_windows() {
        let config = Config::with_callsign("M0SNZ");
        assert_eq!(config.matching.echo_tolerance, Duration::seconds(1));
        assert_eq!(config.matching.telemetry_max_diff, Duration::seconds(5));
        assert_eq!(config.matching.max_pass_gap, Duration::minutes(30));
        assert_eq!(config.matching.track_margin, Duration::minutes(10));
        assert_eq!(config.output_dir, PathBuf::from("echo_passes"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn yaml_overrides_and_durations() {
        let yaml = r#"
callsign: G4ABC
output_dir: /tmp/passes
logs:
  tx: tx/ALL.TXT
matching:
  echo_tolerance: 2s
  max_pass_gap: 1h
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.callsign, "G4ABC");
        assert_eq!(config.logs.tx, PathBuf::from("tx/ALL.TXT"));
        assert_eq!(config.logs.telemetry, default_telemetry_log());
        assert_eq!(config.matching.echo_tolerance, Duration::seconds(2));
        assert_eq!(config.matching.max_pass_gap, Duration::hours(1));
        assert_eq!(config.matching.track_margin, Duration::minutes(10));
    }

    #[test]
    fn bad_duration_is_rejected() {
        let yaml = "callsign: G4ABC\nmatching:\n  echo_tolerance: soon\n";
        assert!(matches!(Config::from_yaml(yaml), Err(ConfigError::Yaml(_))));
        assert!(parse_duration("10 parsecs").is_err());
    }

    #[test]
    fn empty_callsign_fails_validation() {
        let config = Config::from_yaml("output_dir: out\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::MissingCallsign)));
    }
}
