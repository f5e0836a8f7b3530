use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

/// Pull fraction at which the bow starts stretching, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    /// Clamp `value` into [0, 1]; NaN becomes 0
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(default_threshold())
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(value: Threshold) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub effect: EffectConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    /// Fraction of the view height where the bow rests
    #[serde(default)]
    pub threshold: Threshold,
    /// Length of the settle bounce and the spinner drop-in
    #[serde(default = "default_bounce_duration")]
    pub bounce_duration_ms: u64,
    /// Length of each per-tick arc transition
    #[serde(default = "default_arc_transition")]
    pub arc_transition_ms: u64,
    /// Interval of the repeating spinner timer
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Arc progress added per tick
    #[serde(default = "default_iota")]
    pub iota: f64,
    /// Timer start delay as a multiple of the bounce duration
    #[serde(default = "default_timer_delay_factor")]
    pub timer_delay_factor: f64,
    /// Seed for the initial arc jitter (entropy when absent)
    #[serde(default)]
    pub jitter_seed: Option<u64>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            bounce_duration_ms: default_bounce_duration(),
            arc_transition_ms: default_arc_transition(),
            tick_interval_ms: default_tick_interval(),
            iota: default_iota(),
            timer_delay_factor: default_timer_delay_factor(),
            jitter_seed: None,
        }
    }
}

impl EffectConfig {
    pub fn bounce_duration(&self) -> Duration {
        Duration::from_millis(self.bounce_duration_ms)
    }

    pub fn arc_transition(&self) -> Duration {
        Duration::from_millis(self.arc_transition_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        if self.tick_interval_ms == 0 {
            Duration::from_millis(default_tick_interval()) // zero would spin forever
        } else {
            Duration::from_millis(self.tick_interval_ms)
        }
    }

    /// Delay between refresh start and the first spinner tick
    ///
    /// A factor that does not give a representable delay falls back to the
    /// default factor.
    pub fn timer_delay(&self) -> Duration {
        let base = self.bounce_duration();
        scale_duration(base, self.timer_delay_factor).unwrap_or_else(|| {
            warn!(
                "Timer delay factor {} out of range, using {}",
                self.timer_delay_factor,
                default_timer_delay_factor()
            );
            scale_duration(base, default_timer_delay_factor()).unwrap_or(base)
        })
    }

    /// Replace values the effect cannot run with by their defaults
    ///
    /// `iota` must be finite and positive so the arc only moves forward.
    /// `timer_delay_factor` must be finite, non-negative and give a delay
    /// that fits in a `Duration`.
    pub fn sanitized(mut self) -> Self {
        if !(self.iota.is_finite() && self.iota > 0.0) {
            warn!("Invalid arc step iota {}, using {}", self.iota, default_iota());
            self.iota = default_iota();
        }
        if scale_duration(self.bounce_duration(), self.timer_delay_factor).is_none() {
            warn!(
                "Invalid timer delay factor {}, using {}",
                self.timer_delay_factor,
                default_timer_delay_factor()
            );
            self.timer_delay_factor = default_timer_delay_factor();
        }
        self
    }
}

fn scale_duration(base: Duration, factor: f64) -> Option<Duration> {
    if !factor.is_finite() || factor < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(base.as_secs_f64() * factor).ok()
}

/// Theme colors as hex strings ("#RRGGBB" or "#RRGGBBAA")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Background of the container hosting the effect
    #[serde(default = "default_container_background")]
    pub container_background: String,
    /// Background of the surrounding chrome; bow falls back to gray without it
    #[serde(default)]
    pub chrome_background: Option<String>,
    #[serde(default = "default_spinner_background")]
    pub spinner_background: String,
    #[serde(default = "default_spinner_color")]
    pub spinner_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            container_background: default_container_background(),
            chrome_background: None,
            spinner_background: default_spinner_background(),
            spinner_color: default_spinner_color(),
        }
    }
}

fn default_threshold() -> f64 {
    0.5
}

fn default_bounce_duration() -> u64 {
    500
}

fn default_arc_transition() -> u64 {
    100
}

fn default_tick_interval() -> u64 {
    10
}

fn default_iota() -> f64 {
    crate::arc::IOTA
}

fn default_timer_delay_factor() -> f64 {
    1.1
}

fn default_container_background() -> String {
    "#00000000".to_string()
}

fn default_spinner_background() -> String {
    "#ffffff".to_string()
}

fn default_spinner_color() -> String {
    "#808080".to_string()
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, returning defaults when it is missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let mut config: Self =
                toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
            config.effect = config.effect.sanitized();
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/elastic-refresh/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("elastic-refresh")
            .join("config.toml")
    }
}
