//! Configuration loading from micro-bench.toml
//!
//! The file is discovered by walking up from the current directory. Every
//! field is optional; command-line flags override whatever it sets.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::output::OutputFormat;
use crate::utils::timer::Options;

/// File name looked up by [`HarnessConfig::discover`]
pub const CONFIG_FILE: &str = "micro-bench.toml";

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HarnessConfig {
    /// Measurement options
    #[serde(default)]
    pub options: OptionsConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Measurement options as written in the file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Minimum time for one timed invocation (e.g. "100ms")
    #[serde(default = "default_min_time")]
    pub min_time: String,
    /// Time budget per candidate (e.g. "1s")
    #[serde(default = "default_max_time")]
    pub max_time: String,
    /// Starting iteration count
    #[serde(default = "default_iterations")]
    pub iterations: u64,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            min_time: default_min_time(),
            max_time: default_max_time(),
            iterations: default_iterations(),
        }
    }
}

fn default_min_time() -> String {
    "100ms".to_string()
}
fn default_max_time() -> String {
    "1s".to_string()
}
fn default_iterations() -> u64 {
    1
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl HarnessConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Result<Self>> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` and load the first [`CONFIG_FILE`] found
    pub fn discover_from(start: &Path) -> Option<Result<Self>> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(Self::load(&config_path));
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Measurement options described by this configuration
    pub fn options(&self) -> Result<Options> {
        if self.options.iterations == 0 {
            return Err(Error::Config("iterations must be at least 1".to_string()));
        }
        Ok(Options {
            min_time: parse_duration(&self.options.min_time)?,
            max_time: parse_duration(&self.options.max_time)?,
            iterations: self.options.iterations,
        })
    }

    /// Configured output format
    pub fn format(&self) -> Result<OutputFormat> {
        self.output.format.parse().map_err(Error::Config)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# micro-bench configuration

[options]
# Minimum duration of one timed invocation before it counts as a sample
min_time = "100ms"
# Time budget spent measuring each candidate
max_time = "1s"
# Iteration count the doubling search starts from
iterations = 1

[output]
# Output format: human or json
format = "human"
"#
        .to_string()
    }
}

/// Parse a duration string (e.g. "3s", "500ms", "2m"); bare numbers are seconds
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::Config("empty duration string".to_string()));
    }

    let (num_part, unit_part) = s
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| s.split_at(i))
        .unwrap_or((s, "s"));

    let value: f64 = num_part
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("invalid duration number: {}", num_part)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(Error::Config(format!("invalid duration: {}", s)));
    }

    let multiplier: f64 = match unit_part.to_lowercase().as_str() {
        "ns" => 1.0,
        "us" | "µs" => 1_000.0,
        "ms" => 1_000_000.0,
        "s" => 1_000_000_000.0,
        "m" | "min" => 60_000_000_000.0,
        _ => {
            return Err(Error::Config(format!(
                "unknown duration unit: {}",
                unit_part
            )))
        }
    };

    Ok(Duration::from_nanos((value * multiplier) as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.options().unwrap(), Options::default());
        assert_eq!(config.format().unwrap(), OutputFormat::Human);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("3s").unwrap(), Duration::from_secs(3));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("100us").unwrap(), Duration::from_micros(100));
        assert_eq!(parse_duration("100µs").unwrap(), Duration::from_micros(100));
        assert_eq!(parse_duration("1000ns").unwrap(), Duration::from_nanos(1000));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("2").unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn test_parse_duration_errors() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("fast").is_err());
        assert!(parse_duration("10 parsecs").is_err());
        assert!(parse_duration("-1s").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [options]
            min_time = "5ms"
            iterations = 16
        "#;

        let config: HarnessConfig = toml::from_str(toml_str).unwrap();
        let options = config.options().unwrap();
        assert_eq!(options.min_time, Duration::from_millis(5));
        assert_eq!(options.iterations, 16);
        // Defaults should still apply
        assert_eq!(options.max_time, Duration::from_secs(1));
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config: HarnessConfig = toml::from_str("[options]\niterations = 0\n").unwrap();
        assert!(matches!(config.options(), Err(Error::Config(_))));
    }

    #[test]
    fn test_default_toml_parses() {
        let config: HarnessConfig = toml::from_str(&HarnessConfig::default_toml()).unwrap();
        assert_eq!(config.options().unwrap(), Options::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"json\"").unwrap();

        let config = HarnessConfig::load(file.path()).unwrap();
        assert_eq!(config.format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_discover_walks_up() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE),
            "[options]\nmin_time = \"5ms\"\n",
        )
        .unwrap();
        let nested = root.path().join("crates").join("inner");
        std::fs::create_dir_all(&nested).unwrap();

        let config = HarnessConfig::discover_from(&nested).unwrap().unwrap();
        assert_eq!(config.options().unwrap().min_time, Duration::from_millis(5));
    }

    #[test]
    fn test_discover_prefers_nearest_file() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("inner");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(CONFIG_FILE), "[output]\nformat = \"human\"\n").unwrap();
        std::fs::write(nested.join(CONFIG_FILE), "[output]\nformat = \"json\"\n").unwrap();

        let config = HarnessConfig::discover_from(&nested).unwrap().unwrap();
        assert_eq!(config.format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_discover_reports_broken_file() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(CONFIG_FILE), "[options\n").unwrap();

        assert!(matches!(
            HarnessConfig::discover_from(root.path()),
            Some(Err(Error::Toml(_)))
        ));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[options\nmin_time = ").unwrap();

        assert!(matches!(
            HarnessConfig::load(file.path()),
            Err(Error::Toml(_))
        ));
    }
}
