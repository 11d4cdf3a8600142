use std::path::Path;

use anyhow::{Context, Result, bail};
use kaal_dasha::{DEFAULT_HORIZON_YEARS, DashaLevel, MAX_HORIZON_YEARS};
use kaal_time::{FixedOffset, parse_utc_offset};
use serde::Deserialize;

/// Top-level kaal configuration. Every field has a default, so an empty
/// or missing file is valid.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KaalConfig {
    /// Chart settings.
    #[serde(default)]
    pub chart: ChartToml,

    /// Timeline generation settings.
    #[serde(default)]
    pub timeline: TimelineToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartToml {
    /// Default offset for naive date-times and for display.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "+00:00".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelineToml {
    #[serde(default = "default_horizon_years")]
    pub horizon_years: f64,
    /// 0 = Mahadasha only, 2 = down to Pratyantardasha.
    #[serde(default = "default_depth")]
    pub depth: u8,
}

impl Default for TimelineToml {
    fn default() -> Self {
        Self {
            horizon_years: default_horizon_years(),
            depth: default_depth(),
        }
    }
}

fn default_horizon_years() -> f64 {
    DEFAULT_HORIZON_YEARS
}
fn default_depth() -> u8 {
    DashaLevel::Pratyantardasha as u8
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    /// "text" or "json".
    #[serde(default = "default_format")]
    pub format: String,
    /// Rows printed per level in text mode before eliding the rest.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            format: default_format(),
            max_rows: default_max_rows(),
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}
fn default_max_rows() -> usize {
    50
}

impl KaalConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine or renderer cannot use.
    pub fn validate(&self) -> Result<()> {
        self.chart_timezone()?;
        let horizon = self.timeline.horizon_years;
        if !(horizon.is_finite() && horizon > 0.0 && horizon <= MAX_HORIZON_YEARS) {
            bail!("[timeline].horizon_years must be in (0, {MAX_HORIZON_YEARS}], got {horizon}");
        }
        if DashaLevel::from_u8(self.timeline.depth).is_none() {
            bail!("[timeline].depth must be 0, 1 or 2, got {}", self.timeline.depth);
        }
        if !matches!(self.output.format.as_str(), "text" | "json") {
            bail!(
                "[output].format must be \"text\" or \"json\", got {:?}",
                self.output.format
            );
        }
        Ok(())
    }

    /// Parsed `[chart].timezone`.
    pub fn chart_timezone(&self) -> Result<FixedOffset> {
        parse_utc_offset(&self.chart.timezone).context("invalid [chart].timezone")
    }
}
