use std::path::Path;

use anyhow::Context;
use gridsweep_core::{GameConfig, SessionOptions};
use gridsweep_host::{LayoutSettings, MotionSettings};
use serde::{Deserialize, Serialize};

/// Everything the terminal host can be configured with, usually read from a TOML file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridSettings,
    pub session: SessionOptions,
    pub layout: LayoutSettings,
    pub motion: MotionTuning,
    pub play: PlaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            session: SessionOptions::default(),
            layout: LayoutSettings::default(),
            motion: MotionTuning::default(),
            play: PlaySettings::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing settings in {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Raw grid values, kept signed so out-of-range input clamps instead of failing to parse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub size_x: i64,
    pub size_y: i64,
    pub mines: i64,
    pub seed: Option<u64>,
}

impl Default for GridSettings {
    fn default() -> Self {
        let (size_x, size_y) = GameConfig::DEFAULT_SIZE;
        Self {
            size_x: size_x.into(),
            size_y: size_y.into(),
            mines: GameConfig::DEFAULT_MINES.into(),
            seed: None,
        }
    }
}

impl GridSettings {
    pub fn game_config(&self) -> GameConfig {
        GameConfig::from_signed((self.size_x, self.size_y), self.mines)
    }
}

/// Terminal movement tuning, its own defaults apply to every key a `[motion]` section leaves out.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    pub speed_multiplier: f32,
    pub deceleration: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            // one key press carries the player roughly one tile
            speed_multiplier: 400.0,
            deceleration: MotionSettings::default().deceleration,
        }
    }
}

impl From<MotionTuning> for MotionSettings {
    fn from(tuning: MotionTuning) -> Self {
        Self {
            speed_multiplier: tuning.speed_multiplier,
            deceleration: tuning.deceleration,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaySettings {
    /// Simulation ticks per second of movement.
    pub tick_hz: u32,
    /// How long a movement key is held per command.
    pub hold_secs: f32,
}

impl Default for PlaySettings {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            hold_secs: 0.44,
        }
    }
}

impl PlaySettings {
    const MAX_TICK_HZ: u32 = 1000;
    const MAX_HOLD_SECS: f32 = 10.0;

    /// Configured tick rate kept within `1..=1000`.
    pub fn tick_rate(&self) -> u32 {
        self.tick_hz.clamp(1, Self::MAX_TICK_HZ)
    }

    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate() as f32
    }

    pub fn hold_ticks(&self) -> u32 {
        let hold_secs = if self.hold_secs.is_nan() { 0.0 } else { self.hold_secs };
        (hold_secs.clamp(0.0, Self::MAX_HOLD_SECS) * self.tick_rate() as f32).round() as u32
    }

    /// Ticks a released key may take to come to rest.
    pub fn settle_ticks(&self) -> u32 {
        self.tick_rate().saturating_mul(10)
    }
}
