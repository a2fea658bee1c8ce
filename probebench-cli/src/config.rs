//! Configuration loading from probebench.toml
//!
//! Defaults can be kept in a `probebench.toml` next to the project (or any
//! ancestor directory); the file is discovered by walking up from the
//! current directory. CLI flags always override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HarnessConfig {
    /// Run defaults (iterations, workers)
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Target service settings
    #[serde(default)]
    pub target: TargetConfig,
}

/// Run defaults; unset values fall back to the built-in defaults
/// (20 iterations, 5 workers).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    /// Number of probe iterations per run
    #[serde(default)]
    pub iterations: Option<usize>,
    /// Worker thread count
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Target service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Root URL of the service under benchmark
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Full-request timeout for a single probe phase (e.g. "30s", "500ms")
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_timeout() -> String {
    "30s".to_string()
}

impl TargetConfig {
    /// Timeout as a duration; malformed strings fall back to the default.
    pub fn request_timeout(&self) -> Duration {
        HarnessConfig::parse_duration(&self.timeout).unwrap_or(Duration::from_secs(30))
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the current
    /// directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("probebench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Parse a duration string (e.g. "30s", "500ms", "2m")
    pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("empty duration string"));
        }

        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid duration number: {}", num_part))?;

        let multiplier: f64 = match unit_part.to_lowercase().as_str() {
            "ms" => 1e-3,
            "s" | "" => 1.0,
            "m" | "min" => 60.0,
            other => return Err(anyhow::anyhow!("unknown duration unit: {}", other)),
        };

        Ok(Duration::from_secs_f64(value * multiplier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.target.base_url, "http://localhost:8080");
        assert_eq!(config.target.timeout, "30s");
        assert!(config.runner.iterations.is_none());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(
            HarnessConfig::parse_duration("30s").unwrap(),
            Duration::from_secs(30)
        );
        assert_eq!(
            HarnessConfig::parse_duration("500ms").unwrap(),
            Duration::from_millis(500)
        );
        assert_eq!(
            HarnessConfig::parse_duration("2m").unwrap(),
            Duration::from_secs(120)
        );
        assert_eq!(
            HarnessConfig::parse_duration("1.5s").unwrap(),
            Duration::from_millis(1500)
        );
        assert!(HarnessConfig::parse_duration("3 parsecs").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            iterations = 100
            workers = 8

            [target]
            base_url = "https://id.example.com"
        "#;

        let config: HarnessConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.iterations, Some(100));
        assert_eq!(config.runner.workers, Some(8));
        assert_eq!(config.target.base_url, "https://id.example.com");
        // Defaults should still apply
        assert_eq!(config.target.timeout, "30s");
    }

    #[test]
    fn malformed_timeout_falls_back() {
        let target = TargetConfig {
            base_url: default_base_url(),
            timeout: "soonish".to_string(),
        };
        assert_eq!(target.request_timeout(), Duration::from_secs(30));
    }
}
